//! Appointment booking form and confirmation page controllers.
//!
//! The form page is gated on the session before anything is wired: doctors
//! are bounced to their dashboard, unauthenticated visitors to the login
//! page. Doctor and service selects are populated from the API with
//! hardcoded stand-ins when a list call fails, so the form never renders
//! empty. A successful booking writes a denormalized summary to
//! `localStorage` for the confirmation page to read.

use crate::api;
use crate::dom::{self, BookingElements, ConfirmationElements};
use crate::events::on_submit_async;
use crate::nav;
use crate::notify::{self, Level};
use crate::state;
use clinic_api_types::validate::{CalendarDate, validate_booking};
use clinic_api_types::{
    AppointmentRequest, BookingSummary, Doctor, Service, fallback_doctors, fallback_services,
};
use gloo_console::{error, log, warn};
use gloo_timers::future::TimeoutFuture;
use web_sys::HtmlSelectElement;

const REDIRECT_DELAY_MS: u32 = 2_000;
const CONFIRMATION_PAGE: &str = "/frontend/pages/appointment_successful.html";

pub async fn init() {
    let Ok(els) = BookingElements::bind() else {
        log!("no booking form on this page");
        return;
    };

    if !gate_session().await {
        return;
    }

    show_signed_in_navigation();
    set_min_date(&els);
    load_choices(&els).await;

    on_submit_async!(els.form, els, on_submit);
}

/// Patients may book; everyone else is redirected away. Returns whether the
/// form should be wired at all.
async fn gate_session() -> bool {
    match api::check_auth().await {
        Ok(resp) if resp.is_authenticated => {
            if resp.user.as_ref().is_some_and(|u| u.is_doctor()) {
                notify::show(
                    "Doctors cannot book appointments. Redirecting to doctor dashboard...",
                    Level::Info,
                );
                TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                dom::redirect(nav::DOCTOR_HOME_PAGE);
                return false;
            }
            true
        }
        Ok(_) => {
            notify::show("Please log in to book an appointment.", Level::Warning);
            TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            dom::redirect(nav::LOGIN_PAGE);
            false
        }
        Err(e) => {
            warn!(format!("auth check failed: {e}"));
            notify::show(
                "Unable to verify authentication. Redirecting to login...",
                Level::Error,
            );
            TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            dom::redirect(nav::LOGIN_PAGE);
            false
        }
    }
}

fn signed_in_nav_html() -> &'static str {
    r#"<a href="logout.html" class="appointment">Sign Out</a>"#
}

/// The gate has confirmed a session, so the auth slot in the navigation
/// flips from Login to Sign Out. The injected link gets its own logout
/// handler; the page-load pass ran before the swap.
fn show_signed_in_navigation() {
    let Some(slot) = dom::by_id("authNavigation") else {
        return;
    };
    slot.set_inner_html(signed_in_nav_html());
    if let Some(link) = dom::query_within::<web_sys::Element>(&slot, r#"a[href*="logout.html"]"#) {
        nav::bind_logout_link(&link);
    }
}

/// Local calendar date from the browser clock. `getMonth` is zero-based.
fn today() -> CalendarDate {
    let now = js_sys::Date::new_0();
    CalendarDate::new(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

/// Constrain the date picker so past days cannot be chosen in the UI; the
/// validator still re-checks on submit.
fn set_min_date(els: &BookingElements) {
    let _ = els.date.set_attribute("min", &today().to_string());
}

async fn load_choices(els: &BookingElements) {
    let doctors = match api::fetch_doctors().await {
        Ok(d) if !d.is_empty() => d,
        Ok(_) => {
            warn!("doctor list came back empty; using stand-ins");
            fallback_doctors()
        }
        Err(e) => {
            warn!(format!("could not load doctors: {e}; using stand-ins"));
            fallback_doctors()
        }
    };
    let services = match api::fetch_services().await {
        Ok(s) if !s.is_empty() => s,
        Ok(_) => {
            warn!("service list came back empty; using stand-ins");
            fallback_services()
        }
        Err(e) => {
            warn!(format!("could not load services: {e}; using stand-ins"));
            fallback_services()
        }
    };

    populate_doctor_select(&els.doctor, &doctors);
    populate_service_select(&els.service, &services);

    // Kept for the summary lookup on submit.
    state::set_doctors(doctors);
    state::set_services(services);
}

fn populate_doctor_select(select: &HtmlSelectElement, doctors: &[Doctor]) {
    select.set_inner_html("");
    let _ = select.append_child(&dom::create_option("", "Select a doctor"));
    for doctor in doctors {
        let opt = dom::create_option(&doctor.id.to_string(), &doctor.display_name());
        let _ = select.append_child(&opt);
    }
}

fn populate_service_select(select: &HtmlSelectElement, services: &[Service]) {
    select.set_inner_html("");
    let _ = select.append_child(&dom::create_option("", "Select a service"));
    for service in services {
        let opt = dom::create_option(&service.id.to_string(), &service.name);
        let _ = select.append_child(&opt);
    }
}

fn collect_draft(els: &BookingElements) -> AppointmentRequest {
    AppointmentRequest {
        date: dom::get_input_value(&els.date),
        time: dom::get_input_value(&els.time),
        doctor: dom::get_select_value(&els.doctor),
        service: dom::get_select_value(&els.service),
        notes: dom::get_textarea_value(&els.notes),
    }
}

fn render_errors(els: &BookingElements, errors: &[String]) {
    dom::set_inner_html(&els.errors, "");
    for message in errors {
        let p = dom::create_element("p");
        p.set_text_content(Some(message));
        let _ = p.set_attribute("style", "color: #d32f2f; font-size: 14px; margin: 5px 0;");
        els.errors.append_child(&p).unwrap();
    }
    dom::set_display(&els.errors, if errors.is_empty() { "none" } else { "block" });
}

/// Resolve the display names for the stored summary from whatever lists the
/// selects were populated with.
fn build_summary(draft: &AppointmentRequest, doctors: &[Doctor], services: &[Service]) -> BookingSummary {
    let doctor_name = doctors
        .iter()
        .find(|d| d.id.to_string() == draft.doctor)
        .map(Doctor::display_name);
    let service_name = services
        .iter()
        .find(|s| s.id.to_string() == draft.service)
        .map(|s| s.name.clone());
    BookingSummary {
        date: draft.date.clone(),
        time: draft.time.clone(),
        doctor_name,
        service_name,
        notes: draft.notes.clone(),
    }
}

async fn on_submit(els: &BookingElements) {
    let draft = collect_draft(els);

    let violations = validate_booking(&draft, today());
    render_errors(els, &violations);
    if !violations.is_empty() {
        return;
    }

    let original = dom::begin_busy(&els.submit, "Booking...");
    let result = api::book_appointment(&draft).await;
    dom::end_busy(&els.submit, &original);

    match result {
        Ok(resp) if resp.success => {
            let summary = build_summary(&draft, &state::doctors(), &state::services());
            state::store_booking_summary(&summary);
            els.form.reset();
            notify::show(
                resp.message
                    .as_deref()
                    .unwrap_or("Appointment booked successfully!"),
                Level::Success,
            );
            TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            dom::redirect(CONFIRMATION_PAGE);
        }
        Ok(resp) => {
            let messages: Vec<String> = match &resp.errors {
                Some(errors) => errors.values().flatten().cloned().collect(),
                None => vec![
                    resp.message
                        .unwrap_or_else(|| "Failed to book appointment. Please try again.".into()),
                ],
            };
            render_errors(els, &messages);
        }
        Err(e) => {
            error!(format!("booking failed: {e}"));
            notify::show(
                "Failed to book appointment. Please try again.",
                Level::Error,
            );
        }
    }
}

// ── Confirmation page ──

/// Render the stored summary on the confirmation page, if both the panel and
/// a stored booking exist.
pub fn init_confirmation() {
    let Ok(els) = ConfirmationElements::bind() else {
        return;
    };

    let Some(summary) = state::load_booking_summary() else {
        dom::set_text(&els.panel, "No recent booking found.");
        return;
    };

    dom::set_text(&els.date, &summary.date);
    dom::set_text(&els.time, &summary.time);
    dom::set_text(&els.doctor, summary.doctor_name.as_deref().unwrap_or("Not specified"));
    dom::set_text(&els.service, summary.service_name.as_deref().unwrap_or("Not specified"));
    dom::set_text(
        &els.notes,
        if summary.notes.is_empty() { "None" } else { &summary.notes },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists() -> (Vec<Doctor>, Vec<Service>) {
        (fallback_doctors(), fallback_services())
    }

    #[test]
    fn summary_resolves_names_from_select_values() {
        let (doctors, services) = lists();
        let draft = AppointmentRequest {
            date: "2026-09-01".into(),
            time: "10:30".into(),
            doctor: "2".into(),
            service: "3".into(),
            notes: "first visit".into(),
        };
        let summary = build_summary(&draft, &doctors, &services);
        assert_eq!(
            summary.doctor_name.as_deref(),
            Some("Dr. Sarah Johnson - Gynecology")
        );
        assert_eq!(summary.service_name.as_deref(), Some("Gynecological Exam"));
        assert_eq!(summary.date, "2026-09-01");
        assert_eq!(summary.notes, "first visit");
    }

    #[test]
    fn signed_in_nav_markup_is_a_sign_out_link() {
        let html = signed_in_nav_html();
        assert!(html.contains(r#"href="logout.html""#));
        assert!(html.contains("Sign Out"));
        assert!(html.contains(r#"class="appointment""#));
    }

    #[test]
    fn summary_tolerates_unknown_ids() {
        let (doctors, services) = lists();
        let draft = AppointmentRequest {
            date: "2026-09-01".into(),
            time: "10:30".into(),
            doctor: "99".into(),
            service: "".into(),
            notes: String::new(),
        };
        let summary = build_summary(&draft, &doctors, &services);
        assert_eq!(summary.doctor_name, None);
        assert_eq!(summary.service_name, None);
    }
}
