//! DOM helpers and typed element bindings.
//!
//! Each page feature gets an `*Elements` struct resolved once via `bind()`.
//! A failed bind means the current page does not carry that feature; callers
//! log and no-op instead of panicking. Controllers never query the document
//! by placeholder text; every element is reached through a stable id here
//! (the footer feedback forms are the one sanctioned exception, see
//! [`crate::contact`]).

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement,
};

// ── Helpers ──

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn document() -> Document {
    doc()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let nl = doc().query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn query_within<T: JsCast>(parent: &Element, selector: &str) -> Option<T> {
    parent
        .query_selector(selector)
        .ok()?
        .and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

/// Input value with surrounding whitespace stripped.
pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn get_select_value(el: &HtmlSelectElement) -> String {
    el.value()
}

pub fn get_textarea_value(el: &HtmlTextAreaElement) -> String {
    el.value().trim().to_string()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn create_element(tag: &str) -> Element {
    doc().create_element(tag).unwrap()
}

pub fn create_option(value: &str, text: &str) -> HtmlOptionElement {
    let opt: HtmlOptionElement = create_element("option").dyn_into().unwrap();
    opt.set_value(value);
    opt.set_text_content(Some(text));
    opt
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn set_display(el: &Element, value: &str) {
    set_style(el, "display", value);
}

/// `document.cookie` for the CSRF lookup.
pub fn cookie_string() -> String {
    doc()
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()
        .and_then(|d| d.cookie().ok())
        .unwrap_or_default()
}

pub fn viewport_width() -> i32 {
    window()
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as i32
}

pub fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

pub fn redirect(url: &str) {
    let _ = window().location().set_href(url);
}

/// Disable a submit control and swap in a busy label. Returns the original
/// label so the caller can restore it with [`end_busy`] on every exit path.
pub fn begin_busy(btn: &HtmlButtonElement, label: &str) -> String {
    let original = btn.text_content().unwrap_or_default();
    btn.set_disabled(true);
    btn.set_text_content(Some(label));
    original
}

pub fn end_busy(btn: &HtmlButtonElement, original: &str) {
    btn.set_disabled(false);
    btn.set_text_content(Some(original));
}

// ── Binding macros ──

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_select {
    ($id:expr) => {
        by_id_typed::<HtmlSelectElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing select #{}", $id)))?
    };
}

macro_rules! get_textarea {
    ($id:expr) => {
        by_id_typed::<HtmlTextAreaElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing textarea #{}", $id)))?
    };
}

macro_rules! get_form {
    ($id:expr) => {
        by_id_typed::<HtmlFormElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing form #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

macro_rules! get_button {
    ($id:expr) => {
        by_id_typed::<HtmlButtonElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing button #{}", $id)))?
    };
}

fn submit_button_of(form: &HtmlFormElement) -> Result<HtmlButtonElement, JsValue> {
    query_within::<HtmlButtonElement>(form, r#"button[type="submit"]"#)
        .ok_or_else(|| JsValue::from_str("missing submit button"))
}

// ── Navigation chrome ──

/// Elements the navigation controller drives. The top bar and navbar are
/// optional; pages without them simply skip the sticky-scroll styling.
#[derive(Clone)]
pub struct NavElements {
    pub hamburger: HtmlElement,
    pub nav_links: Element,
    pub top_bar: Option<Element>,
    pub navbar: Option<Element>,
}

impl NavElements {
    pub fn bind() -> Result<NavElements, JsValue> {
        Ok(NavElements {
            hamburger: get_html!("hamburger"),
            nav_links: get_el!("navLinks"),
            top_bar: query(".top-bar"),
            navbar: query(".navbar"),
        })
    }
}

// ── Contact page ──

#[derive(Clone)]
pub struct ContactElements {
    pub form: HtmlFormElement,
    pub name: HtmlInputElement,
    pub email: HtmlInputElement,
    pub subject: HtmlInputElement,
    pub message: HtmlTextAreaElement,
    pub submit: HtmlButtonElement,
}

impl ContactElements {
    pub fn bind() -> Result<ContactElements, JsValue> {
        let form = get_form!("contactForm");
        let submit = submit_button_of(&form)?;
        Ok(ContactElements {
            form,
            name: get_input!("contact_name"),
            email: get_input!("contact_email"),
            subject: get_input!("contact_subject"),
            message: get_textarea!("contact_message"),
            submit,
        })
    }
}

// ── Login page ──

#[derive(Clone)]
pub struct LoginElements {
    pub form: HtmlFormElement,
    pub email: HtmlInputElement,
    pub password: HtmlInputElement,
    pub email_error: Element,
    pub password_error: Element,
    pub submit: HtmlButtonElement,
}

impl LoginElements {
    pub fn bind() -> Result<LoginElements, JsValue> {
        let form = get_form!("loginForm");
        let submit = submit_button_of(&form)?;
        Ok(LoginElements {
            form,
            email: get_input!("email"),
            password: get_input!("password"),
            email_error: get_el!("emailError"),
            password_error: get_el!("passwordError"),
            submit,
        })
    }
}

#[derive(Clone)]
pub struct RegisterElements {
    pub form: HtmlFormElement,
    pub first_name: HtmlInputElement,
    pub last_name: HtmlInputElement,
    pub email: HtmlInputElement,
    pub password: HtmlInputElement,
    pub confirm_password: HtmlInputElement,
    pub errors: Element,
    pub submit: HtmlButtonElement,
}

impl RegisterElements {
    pub fn bind() -> Result<RegisterElements, JsValue> {
        let form = get_form!("registerForm");
        let submit = submit_button_of(&form)?;
        Ok(RegisterElements {
            form,
            first_name: get_input!("register_first_name"),
            last_name: get_input!("register_last_name"),
            email: get_input!("register_email"),
            password: get_input!("register_password"),
            confirm_password: get_input!("register_confirm_password"),
            errors: get_el!("registerErrors"),
            submit,
        })
    }
}

// ── Booking wizard ──

#[derive(Clone)]
pub struct BookingElements {
    pub form: HtmlFormElement,
    pub date: HtmlInputElement,
    pub time: HtmlInputElement,
    pub doctor: HtmlSelectElement,
    pub service: HtmlSelectElement,
    pub notes: HtmlTextAreaElement,
    pub errors: Element,
    pub submit: HtmlButtonElement,
}

impl BookingElements {
    pub fn bind() -> Result<BookingElements, JsValue> {
        Ok(BookingElements {
            form: get_form!("appointmentForm"),
            date: get_input!("id_date"),
            time: get_input!("id_time"),
            doctor: get_select!("id_doctor"),
            service: get_select!("id_service"),
            notes: get_textarea!("id_notes"),
            errors: get_el!("formErrors"),
            submit: get_button!("sent"),
        })
    }
}

/// Confirmation page summary panel, fed from `localStorage`.
#[derive(Clone)]
pub struct ConfirmationElements {
    pub panel: Element,
    pub date: Element,
    pub time: Element,
    pub doctor: Element,
    pub service: Element,
    pub notes: Element,
}

impl ConfirmationElements {
    pub fn bind() -> Result<ConfirmationElements, JsValue> {
        Ok(ConfirmationElements {
            panel: get_el!("bookingSummary"),
            date: get_el!("summaryDate"),
            time: get_el!("summaryTime"),
            doctor: get_el!("summaryDoctor"),
            service: get_el!("summaryService"),
            notes: get_el!("summaryNotes"),
        })
    }
}

// ── Profile page ──

#[derive(Clone)]
pub struct ProfileElements {
    pub edit_btn: HtmlElement,
    pub cancel_btn: HtmlElement,
    pub save_btn: HtmlButtonElement,
    pub edit_actions: Element,

    pub user_name: Element,
    pub user_email: Element,

    pub full_name_display: Element,
    pub phone_display: Element,
    pub dob_display: Element,
    pub address_display: Element,

    pub full_name_edit: HtmlInputElement,
    pub phone_edit: HtmlInputElement,
    pub dob_edit: HtmlInputElement,
    pub address_edit: HtmlInputElement,

    pub book_appointment_btn: Option<HtmlElement>,
    pub view_appointments_btn: Option<HtmlElement>,
}

impl ProfileElements {
    pub fn bind() -> Result<ProfileElements, JsValue> {
        Ok(ProfileElements {
            edit_btn: get_html!("editProfileBtn"),
            cancel_btn: get_html!("cancelEditBtn"),
            save_btn: get_button!("saveChangesBtn"),
            edit_actions: get_el!("editActions"),
            user_name: get_el!("userName"),
            user_email: get_el!("userEmail"),
            full_name_display: get_el!("fullNameDisplay"),
            phone_display: get_el!("phoneDisplay"),
            dob_display: get_el!("dobDisplay"),
            address_display: get_el!("addressDisplay"),
            full_name_edit: get_input!("fullNameEdit"),
            phone_edit: get_input!("phoneEdit"),
            dob_edit: get_input!("dobEdit"),
            address_edit: get_input!("addressEdit"),
            book_appointment_btn: by_id_typed::<HtmlElement>("bookAppointmentBtn"),
            view_appointments_btn: by_id_typed::<HtmlElement>("viewAppointmentsBtn"),
        })
    }
}

// ── Progress indicator ──

/// Step tracker widgets. Fill bars and step markers come in duplicated
/// desktop/mobile variants, so everything is a list.
#[derive(Clone)]
pub struct ProgressElements {
    pub fills: Vec<Element>,
    pub steps: Vec<Element>,
    pub prev: Option<HtmlButtonElement>,
    pub next: Option<HtmlButtonElement>,
}

impl ProgressElements {
    /// Unlike the other features this never fails: pages without a tracker
    /// produce empty lists and the controller skips itself.
    pub fn bind() -> ProgressElements {
        let mut fills = Vec::new();
        for id in ["progressFill1", "progressFill2"] {
            if let Some(el) = by_id(id) {
                fills.push(el);
            }
        }
        let mut steps = query_all(".step1");
        steps.extend(query_all(".step2"));
        ProgressElements {
            fills,
            steps,
            prev: by_id_typed::<HtmlButtonElement>("prevBtn"),
            next: by_id_typed::<HtmlButtonElement>("nextBtn"),
        }
    }

    pub fn is_present(&self) -> bool {
        !self.fills.is_empty() || !self.steps.is_empty()
    }
}
