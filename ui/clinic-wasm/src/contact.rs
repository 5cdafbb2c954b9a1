//! Contact form and footer feedback form controllers.
//!
//! The main contact page form binds by stable ids. The footer feedback form
//! appears on several pages with slightly different markup, so its fields
//! are found through the union of the historical selector fallbacks (`name`
//! attribute first, placeholder substring second) — the one place dynamic
//! selection is kept.

use crate::api;
use crate::autofill;
use crate::dom::{self, ContactElements};
use crate::events::{listen, on_submit_async};
use crate::notify::{self, Level};
use clinic_api_types::ContactRequest;
use clinic_api_types::validate::{validate_contact, validate_feedback};
use gloo_console::{error, log};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

pub fn init() {
    let Ok(els) = ContactElements::bind() else {
        log!("no contact form on this page");
        return;
    };

    {
        let els2 = els.clone();
        wasm_bindgen_futures::spawn_local(async move {
            autofill::autofill_form(&els2.form, Some(&els2.name), Some(&els2.email)).await;
        });
    }

    on_submit_async!(els.form, els, on_submit);
}

async fn on_submit(els: &ContactElements) {
    let name = dom::get_input_value(&els.name);
    let email = dom::get_input_value(&els.email);
    let subject = dom::get_input_value(&els.subject);
    let message = dom::get_textarea_value(&els.message);

    if let Some(msg) = validate_contact(&name, &email, &subject, &message) {
        notify::show(msg, Level::Error);
        return;
    }

    let original = dom::begin_busy(&els.submit, "Sending...");
    let result = api::send_contact(&ContactRequest {
        name,
        email,
        subject,
        message,
    })
    .await;
    dom::end_busy(&els.submit, &original);

    match result {
        Ok(resp) if resp.success => {
            notify::show(
                resp.message.as_deref().unwrap_or("Message sent successfully!"),
                Level::Success,
            );
            els.form.reset();
            // Re-fill name/email for the signed-in user after the reset.
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                autofill::autofill_form(&els2.form, Some(&els2.name), Some(&els2.email)).await;
            });
        }
        Ok(resp) => notify::show(
            resp.message
                .as_deref()
                .unwrap_or("Failed to send message. Please try again later."),
            Level::Error,
        ),
        Err(e) => {
            error!(format!("contact submit failed: {e}"));
            notify::show("Failed to send message. Please try again later.", Level::Error);
        }
    }
}

// ── Footer feedback forms ──

const FEEDBACK_SUBJECT: &str = "Footer Feedback";

#[derive(Clone)]
struct FeedbackFields {
    form: HtmlFormElement,
    name: HtmlInputElement,
    email: HtmlInputElement,
    message: HtmlTextAreaElement,
    submit: Option<HtmlButtonElement>,
}

fn resolve_feedback_fields(form: &Element) -> Option<FeedbackFields> {
    let form: HtmlFormElement = form.clone().dyn_into().ok()?;
    let name = dom::query_within::<HtmlInputElement>(
        &form,
        r#"input[name="name"], input[placeholder*="Name"]"#,
    )?;
    let email = dom::query_within::<HtmlInputElement>(
        &form,
        r#"input[name="email"], input[placeholder*="Email"]"#,
    )?;
    let message = dom::query_within::<HtmlTextAreaElement>(
        &form,
        r#"textarea[name="message"], textarea[placeholder*="Message"]"#,
    )?;
    let submit = dom::query_within::<HtmlButtonElement>(&form, r#"button[type="submit"]"#);
    Some(FeedbackFields {
        form,
        name,
        email,
        message,
        submit,
    })
}

/// Wire every `form.feedback-form` on the page behind one shared contract.
pub fn init_footer_feedback() {
    for form_el in dom::query_all("form.feedback-form") {
        let Some(fields) = resolve_feedback_fields(&form_el) else {
            log!("feedback form missing expected fields; skipping");
            continue;
        };

        {
            let f = fields.clone();
            wasm_bindgen_futures::spawn_local(async move {
                autofill::autofill_form(&f.form, Some(&f.name), Some(&f.email)).await;
            });
        }

        let f = fields.clone();
        listen!(fields.form, "submit", web_sys::Event, move |e: web_sys::Event| {
            e.prevent_default();
            let f2 = f.clone();
            wasm_bindgen_futures::spawn_local(async move {
                submit_feedback(&f2).await;
            });
        });
    }
}

async fn submit_feedback(f: &FeedbackFields) {
    let name = dom::get_input_value(&f.name);
    let email = dom::get_input_value(&f.email);
    let message = dom::get_textarea_value(&f.message);

    if let Some(msg) = validate_feedback(&name, &email, &message) {
        notify::show(msg, Level::Error);
        return;
    }

    let original = f.submit.as_ref().map(|b| dom::begin_busy(b, "Sending..."));
    let result = api::send_contact(&ContactRequest {
        name,
        email,
        subject: FEEDBACK_SUBJECT.to_owned(),
        message,
    })
    .await;
    if let (Some(btn), Some(orig)) = (f.submit.as_ref(), original.as_ref()) {
        dom::end_busy(btn, orig);
    }

    match result {
        Ok(resp) if resp.success => {
            notify::show(
                "Thank you for your feedback! We'll get back to you soon.",
                Level::Success,
            );
            f.form.reset();
            let f2 = f.clone();
            wasm_bindgen_futures::spawn_local(async move {
                autofill::autofill_form(&f2.form, Some(&f2.name), Some(&f2.email)).await;
            });
        }
        Ok(_) => notify::show(
            "Failed to send feedback. Please try again later.",
            Level::Error,
        ),
        Err(e) => {
            error!(format!("feedback submit failed: {e}"));
            notify::show(
                "Failed to send feedback. Please try again later.",
                Level::Error,
            );
        }
    }
}
