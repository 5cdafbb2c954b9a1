//! Auto-fill of name/email fields from the authenticated session.
//!
//! One shared implementation for the contact form and the footer feedback
//! forms. Only fields that are currently empty are filled, so a user's own
//! typing always wins the race against the auth check.

use crate::api;
use crate::dom;
use crate::notify;
use clinic_api_types::SessionUser;
use gloo_console::log;
use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlInputElement};

const FILL_TINT: &str = "#f0f8ff";

/// Fetch the session user. `None` covers both "logged out" and "check
/// failed" — auto-fill is best-effort and silent either way.
pub async fn session_user() -> Option<SessionUser> {
    match api::check_auth().await {
        Ok(resp) if resp.is_authenticated => resp.user,
        Ok(_) => None,
        Err(e) => {
            log!(format!("auth check for auto-fill failed: {e}"));
            None
        }
    }
}

/// Fill empty name/email inputs from the user, tinting what was filled.
/// Returns whether anything changed.
pub fn fill_fields(
    user: &SessionUser,
    name: Option<&HtmlInputElement>,
    email: Option<&HtmlInputElement>,
) -> bool {
    let mut filled = false;

    if let Some(input) = name {
        if input.value().is_empty() {
            let display = user.display_name();
            if !display.is_empty() {
                input.set_value(&display);
                let _ = input.style().set_property("background-color", FILL_TINT);
                filled = true;
            }
        }
    }

    if let Some(input) = email {
        if input.value().is_empty() && !user.email.is_empty() {
            input.set_value(&user.email);
            let _ = input.style().set_property("background-color", FILL_TINT);
            filled = true;
        }
    }

    filled
}

/// Insert a transient "auto-filled" notice at the top of the form, unless
/// one is already showing there.
pub fn show_notice(form: &Element, text: &str) {
    if form
        .query_selector(".auto-fill-notice")
        .ok()
        .flatten()
        .is_some()
    {
        return;
    }

    let notice = dom::create_element("div");
    dom::add_class(&notice, "auto-fill-notice");
    notice.set_text_content(Some(text));
    let _ = notice.set_attribute(
        "style",
        "background-color: #d1ecf1; color: #0c5460; padding: 8px 12px; \
         border-radius: 4px; font-size: 14px; margin-bottom: 15px; \
         border: 1px solid #bee5eb; text-align: center;",
    );

    let _ = form.insert_before(&notice, form.first_child().as_ref());

    Timeout::new(notify::BANNER_DISMISS_MS, move || notice.remove()).forget();
}

/// Check auth and auto-fill one form's name/email inputs.
pub async fn autofill_form(
    form: &Element,
    name: Option<&HtmlInputElement>,
    email: Option<&HtmlInputElement>,
) {
    let Some(user) = session_user().await else {
        return;
    };
    if fill_fields(&user, name, email) {
        show_notice(form, "\u{2713} Name and email auto-filled from your account");
    }
}
