//! Session gateway: authenticated JSON calls to the clinic REST backend.
//!
//! Wraps `fetch` with same-origin credentials, `X-CSRFToken` injection and a
//! hard timeout so a hung request can never leave a submit control disabled.
//! The CSRF token is resolved once per page load through the priority chain
//! cookie → meta tag → hidden form input → token endpoint, then cached in
//! [`crate::state`].

use crate::dom;
use crate::state;
use clinic_api_types::{
    Appointment, AppointmentRequest, AppointmentResponse, AppointmentsResponse, AuthCheckResponse,
    ContactRequest, ContactResponse, Doctor, ListResponse, LoginRequest, LoginResponse,
    ProfileData, ProfileUpdateRequest, RegisterRequest, Service,
};
use gloo_console::warn;
use gloo_timers::callback::Timeout;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestCredentials, RequestInit, Response};

pub const BASE_URL: &str = "/api";

/// Every call is aborted after this long; the UI then recovers as if the
/// network had failed.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Json(String),
    #[error("request timed out")]
    Timeout,
    /// 2xx envelope with `success: false` and no more specific shape.
    #[error("backend reported failure")]
    Backend,
}

fn js_err(e: JsValue) -> String {
    format!("{e:?}")
}

fn is_abort_error(e: &JsValue) -> bool {
    js_sys::Reflect::get(e, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .is_some_and(|name| name == "AbortError")
}

// ── CSRF token ──

/// Extract the `csrftoken` cookie from a raw `document.cookie` string.
pub fn csrf_from_cookies(cookies: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|c| c.strip_prefix("csrftoken="))
        .map(str::to_owned)
        .filter(|v| !v.is_empty())
}

fn csrf_from_meta() -> Option<String> {
    dom::query(r#"meta[name="csrf-token"]"#)?
        .get_attribute("content")
        .filter(|v| !v.is_empty())
}

fn csrf_from_hidden_input() -> Option<String> {
    let input = dom::query(r#"input[name="csrfmiddlewaretoken"]"#)?;
    let input: web_sys::HtmlInputElement = input.dyn_into().ok()?;
    let value = input.value();
    (!value.is_empty()).then_some(value)
}

async fn csrf_from_endpoint() -> Option<String> {
    let value = perform("/csrf-token/", "GET", None, None).await.ok()?;
    value
        .get("csrfToken")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
}

/// Resolve the CSRF token, caching the first hit for the rest of the page
/// load. Returns an empty string when every source fails; the backend will
/// reject the mutating call and the error surfaces as a notice.
pub async fn csrf_token() -> String {
    if let Some(token) = state::csrf_token() {
        return token;
    }
    let token = csrf_from_cookies(&dom::cookie_string())
        .or_else(csrf_from_meta)
        .or_else(csrf_from_hidden_input);
    let token = match token {
        Some(t) => t,
        None => match csrf_from_endpoint().await {
            Some(t) => t,
            None => {
                warn!("CSRF token unavailable; mutating requests may be rejected");
                return String::new();
            }
        },
    };
    state::set_csrf_token(&token);
    token
}

// ── Core request ──

/// Single fetch against `/api` with credentials, optional CSRF header and
/// the abort timeout. `csrf` is `None` only for the token endpoint itself.
async fn perform(
    path: &str,
    method: &str,
    body: Option<String>,
    csrf: Option<&str>,
) -> Result<serde_json::Value, ApiError> {
    let url = format!("{BASE_URL}{path}");

    let controller = AbortController::new().map_err(|e| ApiError::Network(js_err(e)))?;
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_credentials(RequestCredentials::SameOrigin);
    opts.set_signal(Some(&controller.signal()));

    let headers = Headers::new().map_err(|e| ApiError::Network(js_err(e)))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| ApiError::Network(js_err(e)))?;
    if let Some(token) = csrf {
        if !token.is_empty() {
            headers
                .set("X-CSRFToken", token)
                .map_err(|e| ApiError::Network(js_err(e)))?;
        }
    }
    opts.set_headers(&headers);

    if let Some(ref b) = body {
        opts.set_body(&JsValue::from_str(b));
    }

    let request =
        Request::new_with_str_and_init(&url, &opts).map_err(|e| ApiError::Network(js_err(e)))?;

    // Aborting an already-settled fetch is a no-op, so the timer can just run.
    Timeout::new(REQUEST_TIMEOUT_MS, move || controller.abort()).forget();

    let resp_value = JsFuture::from(dom::window().fetch_with_request(&request))
        .await
        .map_err(|e| {
            if is_abort_error(&e) {
                ApiError::Timeout
            } else {
                ApiError::Network(js_err(e))
            }
        })?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| ApiError::Network("response is not a Response".into()))?;

    let text = JsFuture::from(resp.text().map_err(|e| ApiError::Network(js_err(e)))?)
        .await
        .map_err(|e| ApiError::Network(js_err(e)))?;
    let text = text.as_string().unwrap_or_default();

    if !resp.ok() {
        return Err(ApiError::Http {
            status: resp.status(),
            body: text,
        });
    }

    serde_json::from_str(&text).map_err(|e| ApiError::Json(e.to_string()))
}

/// Generic JSON request with CSRF injection. `path` is relative to `/api`.
pub async fn request(
    path: &str,
    method: &str,
    body: Option<String>,
) -> Result<serde_json::Value, ApiError> {
    let token = csrf_token().await;
    perform(path, method, body, Some(&token)).await
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let value = request(path, "GET", None).await?;
    serde_json::from_value(value).map_err(|e| ApiError::Json(e.to_string()))
}

async fn send<B: Serialize, T: DeserializeOwned>(
    path: &str,
    method: &str,
    body: &B,
) -> Result<T, ApiError> {
    let body = serde_json::to_string(body).map_err(|e| ApiError::Json(e.to_string()))?;
    let value = request(path, method, Some(body)).await?;
    serde_json::from_value(value).map_err(|e| ApiError::Json(e.to_string()))
}

// ── Typed operations ──

/// `GET /api/auth/check/`. A logged-out user is a valid `false` result, not
/// an error; this only fails on network or non-2xx problems.
pub async fn check_auth() -> Result<AuthCheckResponse, ApiError> {
    get("/auth/check/").await
}

pub async fn login(email: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let req = LoginRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    };
    send("/auth/login/", "POST", &req).await
}

/// Registration shares the login envelope (success/errors/message).
pub async fn register(req: &RegisterRequest) -> Result<LoginResponse, ApiError> {
    send("/auth/register/", "POST", req).await
}

pub async fn logout() -> Result<(), ApiError> {
    request("/auth/logout/", "POST", None).await?;
    Ok(())
}

pub async fn fetch_doctors() -> Result<Vec<Doctor>, ApiError> {
    let resp: ListResponse<Doctor> = get("/doctors/").await?;
    if resp.success { Ok(resp.data) } else { Err(ApiError::Backend) }
}

pub async fn fetch_services() -> Result<Vec<Service>, ApiError> {
    let resp: ListResponse<Service> = get("/services/").await?;
    if resp.success { Ok(resp.data) } else { Err(ApiError::Backend) }
}

pub async fn book_appointment(req: &AppointmentRequest) -> Result<AppointmentResponse, ApiError> {
    send("/appointments/", "POST", req).await
}

/// `GET /api/doctor/appointments/` for the signed-in doctor.
pub async fn fetch_doctor_appointments() -> Result<Vec<Appointment>, ApiError> {
    let resp: AppointmentsResponse = get("/doctor/appointments/").await?;
    if resp.success { Ok(resp.appointments) } else { Err(ApiError::Backend) }
}

pub async fn send_contact(req: &ContactRequest) -> Result<ContactResponse, ApiError> {
    send("/contact/", "POST", req).await
}

pub async fn get_profile() -> Result<ProfileData, ApiError> {
    get("/user/profile/").await
}

pub async fn update_profile(req: &ProfileUpdateRequest) -> Result<ProfileData, ApiError> {
    send("/user/profile/", "PUT", req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_cookie_is_found_among_others() {
        let cookies = "sessionid=abc123; csrftoken=tok-42; theme=dark";
        assert_eq!(csrf_from_cookies(cookies), Some("tok-42".to_owned()));
    }

    #[test]
    fn csrf_cookie_handles_leading_whitespace_and_first_position() {
        assert_eq!(
            csrf_from_cookies("csrftoken=first"),
            Some("first".to_owned())
        );
        assert_eq!(
            csrf_from_cookies("a=1;  csrftoken=padded"),
            Some("padded".to_owned())
        );
    }

    #[test]
    fn missing_or_empty_csrf_cookie_yields_none() {
        assert_eq!(csrf_from_cookies(""), None);
        assert_eq!(csrf_from_cookies("sessionid=abc"), None);
        assert_eq!(csrf_from_cookies("csrftoken="), None);
        // Prefix of another cookie name must not match.
        assert_eq!(csrf_from_cookies("xcsrftoken=nope"), None);
    }

    #[test]
    fn http_error_display_carries_status() {
        let err = ApiError::Http {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "HTTP 403: forbidden");
    }
}
