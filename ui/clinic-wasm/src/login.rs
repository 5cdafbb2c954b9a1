//! Login and registration form controllers.

use crate::api::{self, ApiError};
use crate::dom::{self, LoginElements, RegisterElements};
use crate::events::on_submit_async;
use crate::nav;
use crate::notify::{self, Level};
use clinic_api_types::validate::{is_valid_email, validate_login};
use clinic_api_types::{FieldErrors, LoginResponse, RegisterRequest, UserType};
use gloo_console::{error, log};
use gloo_timers::future::TimeoutFuture;

const REDIRECT_DELAY_MS: u32 = 1_500;

pub fn init() {
    let Ok(els) = LoginElements::bind() else {
        log!("no login form on this page");
        return;
    };
    on_submit_async!(els.form, els, on_login_submit);
}

/// Role-specific success copy shown before the redirect.
fn login_success_message(user_type: Option<UserType>) -> &'static str {
    match user_type {
        Some(UserType::Doctor) => "Welcome Doctor! Redirecting to your dashboard...",
        Some(UserType::Patient) => "Welcome! Redirecting to homepage...",
        None => "Login successful! Redirecting...",
    }
}

async fn on_login_submit(els: &LoginElements) {
    dom::set_text(&els.email_error, "");
    dom::set_text(&els.password_error, "");

    let email = dom::get_input_value(&els.email);
    let password = els.password.value();

    // Rejected credentials never leave the page.
    let check = validate_login(&email, &password);
    if !check.ok() {
        if let Some(msg) = check.email {
            dom::set_text(&els.email_error, msg);
        }
        if let Some(msg) = check.password {
            dom::set_text(&els.password_error, msg);
        }
        return;
    }

    let original = dom::begin_busy(&els.submit, "Signing in...");
    let result = api::login(&email, &password).await;
    dom::end_busy(&els.submit, &original);

    match result {
        Ok(resp) if resp.success => {
            let user_type = resp.user.as_ref().and_then(|u| u.user_type);
            notify::show(login_success_message(user_type), Level::Success);
            TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            let target = resp.redirect_url.as_deref().unwrap_or(nav::HOME_PAGE);
            dom::redirect(target);
        }
        Ok(resp) => render_login_failure(els, &resp),
        Err(e) => {
            error!(format!("login failed: {e}"));
            notify::show("Network error. Please try again.", Level::Error);
        }
    }
}

fn render_login_failure(els: &LoginElements, resp: &LoginResponse) {
    if let Some(errors) = &resp.errors {
        if let Some(messages) = errors.get("email") {
            dom::set_text(&els.email_error, &messages.join(", "));
        }
        if let Some(messages) = errors.get("password") {
            dom::set_text(&els.password_error, &messages.join(", "));
        }
        if let Some(messages) = errors.get("non_field_errors") {
            notify::show(&messages.join(", "), Level::Error);
        }
    } else {
        notify::show(resp.message.as_deref().unwrap_or("Login failed"), Level::Error);
    }
}

// ── Registration ──

pub fn init_register() {
    let Ok(els) = RegisterElements::bind() else {
        return;
    };
    on_submit_async!(els.form, els, on_register_submit);
}

/// Local checks before the register POST; the first violation wins.
fn validate_register(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Option<&'static str> {
    if first_name.is_empty() || last_name.is_empty() || email.is_empty() || password.is_empty() {
        return Some("Please fill in all fields.");
    }
    if !is_valid_email(email) {
        return Some("Please enter a valid email address.");
    }
    if password != confirm {
        return Some("Passwords do not match.");
    }
    None
}

async fn on_register_submit(els: &RegisterElements) {
    dom::set_inner_html(&els.errors, "");
    dom::set_display(&els.errors, "none");

    let first_name = dom::get_input_value(&els.first_name);
    let last_name = dom::get_input_value(&els.last_name);
    let email = dom::get_input_value(&els.email);
    let password = els.password.value();
    let confirm = els.confirm_password.value();

    if let Some(msg) = validate_register(&first_name, &last_name, &email, &password, &confirm) {
        notify::show(msg, Level::Error);
        return;
    }

    let original = dom::begin_busy(&els.submit, "Creating account...");
    let result = api::register(&RegisterRequest {
        first_name,
        last_name,
        email,
        password,
    })
    .await;
    dom::end_busy(&els.submit, &original);

    match result {
        Ok(resp) if resp.success => {
            notify::show("Account created! Redirecting to sign in...", Level::Success);
            TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            dom::redirect(nav::LOGIN_PAGE);
        }
        Ok(resp) => {
            if let Some(errors) = &resp.errors {
                render_field_errors(els, errors);
            } else {
                notify::show(
                    resp.message.as_deref().unwrap_or("Registration failed"),
                    Level::Error,
                );
            }
        }
        Err(ApiError::Http { status, .. }) => {
            notify::show(&format!("Registration failed (HTTP {status})"), Level::Error);
        }
        Err(e) => {
            error!(format!("registration failed: {e}"));
            notify::show("Network error. Please try again.", Level::Error);
        }
    }
}

fn render_field_errors(els: &RegisterElements, errors: &FieldErrors) {
    for messages in errors.values() {
        for message in messages {
            let p = dom::create_element("p");
            p.set_text_content(Some(message));
            let _ = p.set_attribute("style", "color: #d32f2f; font-size: 14px; margin: 5px 0;");
            els.errors.append_child(&p).unwrap();
        }
    }
    dom::set_display(&els.errors, "block");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_message_depends_on_role() {
        assert_eq!(
            login_success_message(Some(UserType::Doctor)),
            "Welcome Doctor! Redirecting to your dashboard..."
        );
        assert_eq!(
            login_success_message(Some(UserType::Patient)),
            "Welcome! Redirecting to homepage..."
        );
        assert_eq!(login_success_message(None), "Login successful! Redirecting...");
    }

    #[test]
    fn register_validation_order() {
        assert_eq!(
            validate_register("", "B", "a@b.com", "pw", "pw"),
            Some("Please fill in all fields.")
        );
        assert_eq!(
            validate_register("A", "B", "bad", "pw", "pw"),
            Some("Please enter a valid email address.")
        );
        assert_eq!(
            validate_register("A", "B", "a@b.com", "pw", "other"),
            Some("Passwords do not match.")
        );
        assert_eq!(validate_register("A", "B", "a@b.com", "pw", "pw"), None);
    }
}
