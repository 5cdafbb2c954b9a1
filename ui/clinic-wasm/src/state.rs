//! Global application state.
//!
//! `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Holds only what is cached for the lifetime of a page load: the resolved
//! CSRF token and the doctors/services lists for the booking form. The
//! session user is deliberately *not* cached here; the backend cookie is the
//! source of truth and callers re-check per operation.

use clinic_api_types::{BOOKING_SUMMARY_KEY, BookingSummary, Doctor, Service};
use gloo_storage::{LocalStorage, Storage};
use std::cell::RefCell;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub csrf_token: Option<String>,
    pub doctors: Vec<Doctor>,
    pub services: Vec<Service>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn csrf_token() -> Option<String> {
    with(|s| s.csrf_token.clone())
}

pub fn set_csrf_token(token: &str) {
    with_mut(|s| s.csrf_token = Some(token.to_string()));
}

pub fn doctors() -> Vec<Doctor> {
    with(|s| s.doctors.clone())
}

pub fn set_doctors(d: Vec<Doctor>) {
    with_mut(|s| s.doctors = d);
}

pub fn services() -> Vec<Service> {
    with(|s| s.services.clone())
}

pub fn set_services(s: Vec<Service>) {
    with_mut(|st| st.services = s);
}

// ── localStorage ──

/// Persist the last booked appointment for the confirmation page.
/// Overwrites any previous entry; never expired.
pub fn store_booking_summary(summary: &BookingSummary) {
    if let Err(e) = LocalStorage::set(BOOKING_SUMMARY_KEY, summary) {
        gloo_console::warn!(format!("could not persist booking summary: {e}"));
    }
}

pub fn load_booking_summary() -> Option<BookingSummary> {
    LocalStorage::get(BOOKING_SUMMARY_KEY).ok()
}
