//! Profile page controller: view, edit, cancel, save.
//!
//! The fetched profile is cached for the page load so cancel can restore the
//! displayed values without another round trip. Editing swaps each display
//! span for its input; save pushes the whole profile and re-renders from the
//! echoed response.

use crate::api;
use crate::dom::{self, ProfileElements};
use crate::events::{on_click, on_click_async};
use crate::nav;
use crate::notify::{self, Level};
use clinic_api_types::{ProfileData, ProfileUpdateRequest};
use gloo_console::{error, log};
use std::cell::RefCell;

const MY_APPOINTMENTS_PAGE: &str = "/frontend/pages/my_appointments.html";

thread_local! {
    static PROFILE: RefCell<ProfileData> = RefCell::new(ProfileData::default());
}

fn cached() -> ProfileData {
    PROFILE.with(|p| p.borrow().clone())
}

fn set_cached(data: ProfileData) {
    PROFILE.with(|p| *p.borrow_mut() = data);
}

pub async fn init() {
    let Ok(els) = ProfileElements::bind() else {
        log!("no profile panel on this page");
        return;
    };

    match api::get_profile().await {
        Ok(data) => {
            populate(&els, &data);
            set_cached(data);
        }
        Err(e) => {
            error!(format!("could not load profile: {e}"));
            notify::show("Failed to load profile. Please try again later.", Level::Error);
            return;
        }
    }

    bind(&els);
}

/// Empty backend fields render as a placeholder rather than a blank span.
fn display_or_placeholder(value: &str) -> &str {
    if value.is_empty() { "Not provided" } else { value }
}

/// Split a single full-name input back into the first/last pair the API
/// stores. Everything after the first word is the last name.
fn split_full_name(full: &str) -> (String, String) {
    let mut parts = full.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or_default().to_owned();
    let last = parts.next().unwrap_or_default().trim().to_owned();
    (first, last)
}

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// `YYYY-MM-DD` → `Month D, YYYY`; anything unparseable passes through.
fn format_long_date(value: &str) -> String {
    let mut parts = value.splitn(3, '-');
    let parsed = (|| {
        let year: i32 = parts.next()?.parse().ok()?;
        let month: usize = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(format!("{} {day}, {year}", MONTHS[month - 1]))
    })();
    parsed.unwrap_or_else(|| value.to_owned())
}

fn populate(els: &ProfileElements, data: &ProfileData) {
    let full_name = data.full_name();
    dom::set_text(&els.user_name, display_or_placeholder(&full_name));
    dom::set_text(&els.user_email, display_or_placeholder(&data.email));
    dom::set_text(&els.full_name_display, display_or_placeholder(&full_name));
    dom::set_text(&els.phone_display, display_or_placeholder(&data.phone));
    dom::set_text(
        &els.dob_display,
        display_or_placeholder(&format_long_date(&data.date_of_birth)),
    );
    dom::set_text(&els.address_display, display_or_placeholder(&data.address));
}

fn enter_edit_mode(els: &ProfileElements) {
    let data = cached();
    els.full_name_edit.set_value(&data.full_name());
    els.phone_edit.set_value(&data.phone);
    els.dob_edit.set_value(&data.date_of_birth);
    els.address_edit.set_value(&data.address);

    for display in [
        &els.full_name_display,
        &els.phone_display,
        &els.dob_display,
        &els.address_display,
    ] {
        dom::set_display(display, "none");
    }
    for edit in [
        &els.full_name_edit,
        &els.phone_edit,
        &els.dob_edit,
        &els.address_edit,
    ] {
        dom::set_display(edit, "inline-block");
    }
    dom::set_display(&els.edit_actions, "flex");
    dom::set_display(&els.edit_btn, "none");
}

fn exit_edit_mode(els: &ProfileElements) {
    for display in [
        &els.full_name_display,
        &els.phone_display,
        &els.dob_display,
        &els.address_display,
    ] {
        dom::set_display(display, "inline");
    }
    for edit in [
        &els.full_name_edit,
        &els.phone_edit,
        &els.dob_edit,
        &els.address_edit,
    ] {
        dom::set_display(edit, "none");
    }
    dom::set_display(&els.edit_actions, "none");
    dom::set_display(&els.edit_btn, "inline-block");
}

fn bind(els: &ProfileElements) {
    {
        let els2 = els.clone();
        on_click!(els.edit_btn, move |_: web_sys::MouseEvent| {
            enter_edit_mode(&els2);
        });
    }
    {
        let els2 = els.clone();
        on_click!(els.cancel_btn, move |_: web_sys::MouseEvent| {
            exit_edit_mode(&els2);
        });
    }
    on_click_async!(els.save_btn, els, on_save);

    if let Some(btn) = &els.book_appointment_btn {
        on_click!(btn, move |_: web_sys::MouseEvent| {
            dom::redirect(nav::BOOKING_PAGE);
        });
    }
    if let Some(btn) = &els.view_appointments_btn {
        on_click!(btn, move |_: web_sys::MouseEvent| {
            dom::redirect(MY_APPOINTMENTS_PAGE);
        });
    }
}

async fn on_save(els: &ProfileElements) {
    let full_name = dom::get_input_value(&els.full_name_edit);
    if full_name.is_empty() {
        notify::show("Please enter your name.", Level::Error);
        return;
    }
    let (first_name, last_name) = split_full_name(&full_name);

    let req = ProfileUpdateRequest {
        first_name,
        last_name,
        phone: dom::get_input_value(&els.phone_edit),
        date_of_birth: dom::get_input_value(&els.dob_edit),
        address: dom::get_input_value(&els.address_edit),
    };

    let original = dom::begin_busy(&els.save_btn, "Saving...");
    let result = api::update_profile(&req).await;
    dom::end_busy(&els.save_btn, &original);

    match result {
        Ok(data) => {
            populate(els, &data);
            set_cached(data);
            exit_edit_mode(els);
            notify::show("Profile updated successfully!", Level::Success);
        }
        Err(e) => {
            error!(format!("profile update failed: {e}"));
            notify::show("Failed to update profile. Please try again.", Level::Error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_splits_on_first_space() {
        assert_eq!(split_full_name("Ada Lovelace"), ("Ada".into(), "Lovelace".into()));
        assert_eq!(
            split_full_name("  Mary Jane Watson "),
            ("Mary".into(), "Jane Watson".into())
        );
        assert_eq!(split_full_name("Prince"), ("Prince".into(), String::new()));
        assert_eq!(split_full_name(""), (String::new(), String::new()));
    }

    #[test]
    fn long_date_formats_iso_input() {
        assert_eq!(format_long_date("1990-01-05"), "January 5, 1990");
        assert_eq!(format_long_date("2026-12-31"), "December 31, 2026");
    }

    #[test]
    fn long_date_passes_through_unparseable_values() {
        assert_eq!(format_long_date(""), "");
        assert_eq!(format_long_date("sometime"), "sometime");
        assert_eq!(format_long_date("1990-13-05"), "1990-13-05");
    }

    #[test]
    fn empty_fields_render_placeholder() {
        assert_eq!(display_or_placeholder(""), "Not provided");
        assert_eq!(display_or_placeholder("0123 456"), "0123 456");
    }
}
