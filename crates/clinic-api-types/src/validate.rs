//! Client-side form validation.
//!
//! All checks run before any network call; a form that fails here must never
//! reach the gateway. Error strings are user-facing and rendered verbatim.

use crate::AppointmentRequest;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A plain calendar date, compared field-wise. Ordering matches chronology
/// because the fields are declared year, month, day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Parse the `YYYY-MM-DD` value of an `<input type="date">`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.splitn(3, '-');
        let year: i32 = parts.next()?.parse().ok()?;
        let month: u32 = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(Self { year, month, day })
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Validate a booking draft against the required-field and future-date rules.
/// Returns every violation; an empty vec means the draft may be submitted.
pub fn validate_booking(draft: &AppointmentRequest, today: CalendarDate) -> Vec<String> {
    let mut errors = Vec::new();

    match CalendarDate::parse(&draft.date) {
        None => errors.push("Please select a date".to_owned()),
        // Comparison is against local midnight: today itself is allowed.
        Some(date) if date < today => errors.push("Please select a future date".to_owned()),
        Some(_) => {}
    }
    if draft.time.is_empty() {
        errors.push("Please select a time".to_owned());
    }
    if draft.doctor.is_empty() {
        errors.push("Please select a doctor".to_owned());
    }
    if draft.service.is_empty() {
        errors.push("Please select a service".to_owned());
    }

    errors
}

/// Per-field login errors, rendered next to their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoginFieldErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginFieldErrors {
    pub fn ok(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Validate the login form. Both fields are required and the email must be
/// well-formed; a rejected form must not reach the network.
pub fn validate_login(email: &str, password: &str) -> LoginFieldErrors {
    let email_error = if email.is_empty() {
        Some("Please enter your email address.")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email address.")
    } else {
        None
    };
    LoginFieldErrors {
        email: email_error,
        password: password
            .is_empty()
            .then_some("Please enter your password."),
    }
}

/// Validate the contact form. Returns the first user-facing error, if any.
pub fn validate_contact(
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
) -> Option<&'static str> {
    if name.is_empty() || email.is_empty() || subject.is_empty() || message.is_empty() {
        return Some("Please fill in all fields.");
    }
    if !is_valid_email(email) {
        return Some("Please enter a valid email address.");
    }
    None
}

/// Validate a footer feedback form (no subject field; it is fixed).
pub fn validate_feedback(name: &str, email: &str, message: &str) -> Option<&'static str> {
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Some("Please fill in all fields.");
    }
    if !is_valid_email(email) {
        return Some("Please enter a valid email address.");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(date: &str, time: &str, doctor: &str, service: &str) -> AppointmentRequest {
        AppointmentRequest {
            date: date.into(),
            time: time.into(),
            doctor: doctor.into(),
            service: service.into(),
            notes: String::new(),
        }
    }

    const TODAY: CalendarDate = CalendarDate {
        year: 2026,
        month: 8,
        day: 29,
    };

    #[test]
    fn email_pattern_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@clinic.example.org"));
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for bad in ["", "plain", "a @b.com", "a@b", "a@ b.com", "@b.com", "a@"] {
            assert!(!is_valid_email(bad), "accepted {bad:?}");
        }
    }

    #[test]
    fn calendar_date_parses_input_values() {
        assert_eq!(
            CalendarDate::parse("2026-08-29"),
            Some(CalendarDate::new(2026, 8, 29))
        );
        assert_eq!(CalendarDate::parse("2026-13-01"), None);
        assert_eq!(CalendarDate::parse("2026-00-10"), None);
        assert_eq!(CalendarDate::parse("not-a-date"), None);
        assert_eq!(CalendarDate::parse(""), None);
    }

    #[test]
    fn calendar_date_orders_chronologically() {
        assert!(CalendarDate::new(2026, 8, 28) < TODAY);
        assert!(CalendarDate::new(2026, 7, 30) < TODAY);
        assert!(CalendarDate::new(2025, 12, 31) < TODAY);
        assert!(CalendarDate::new(2026, 9, 1) > TODAY);
    }

    #[test]
    fn complete_future_draft_passes() {
        let errors = validate_booking(&draft("2026-09-01", "10:30", "1", "2"), TODAY);
        assert!(errors.is_empty());
    }

    #[test]
    fn today_is_allowed() {
        let errors = validate_booking(&draft("2026-08-29", "10:30", "1", "2"), TODAY);
        assert!(errors.is_empty());
    }

    #[test]
    fn past_date_is_rejected_with_future_date_message() {
        let errors = validate_booking(&draft("2026-08-28", "10:30", "1", "2"), TODAY);
        assert_eq!(errors, vec!["Please select a future date".to_owned()]);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = validate_booking(&draft("", "", "", ""), TODAY);
        assert_eq!(
            errors,
            vec![
                "Please select a date".to_owned(),
                "Please select a time".to_owned(),
                "Please select a doctor".to_owned(),
                "Please select a service".to_owned(),
            ]
        );
    }

    #[test]
    fn single_missing_field_combinations_are_rejected() {
        let complete = draft("2026-09-01", "10:30", "1", "2");
        for blank in ["date", "time", "doctor", "service"] {
            let mut d = complete.clone();
            match blank {
                "date" => d.date.clear(),
                "time" => d.time.clear(),
                "doctor" => d.doctor.clear(),
                _ => d.service.clear(),
            }
            assert_eq!(validate_booking(&d, TODAY).len(), 1, "field {blank}");
        }
    }

    #[test]
    fn login_rejects_missing_fields_per_field() {
        let check = validate_login("", "");
        assert_eq!(check.email, Some("Please enter your email address."));
        assert_eq!(check.password, Some("Please enter your password."));
        assert!(!check.ok());
    }

    #[test]
    fn login_rejects_malformed_email() {
        let check = validate_login("not-an-email", "hunter2");
        assert_eq!(check.email, Some("Please enter a valid email address."));
        assert_eq!(check.password, None);
        assert!(!check.ok());
    }

    #[test]
    fn login_accepts_complete_credentials() {
        assert!(validate_login("a@b.com", "hunter2").ok());
    }

    #[test]
    fn contact_validation_requires_all_fields() {
        assert_eq!(
            validate_contact("", "a@b.com", "Hi", "msg"),
            Some("Please fill in all fields.")
        );
        assert_eq!(
            validate_contact("Ada", "not-an-email", "Hi", "msg"),
            Some("Please enter a valid email address.")
        );
        assert_eq!(validate_contact("Ada", "a@b.com", "Hi", "msg"), None);
    }

    #[test]
    fn feedback_validation_mirrors_contact_rules() {
        assert_eq!(
            validate_feedback("Ada", "a@b.com", ""),
            Some("Please fill in all fields.")
        );
        assert_eq!(validate_feedback("Ada", "a@b.com", "msg"), None);
    }
}
