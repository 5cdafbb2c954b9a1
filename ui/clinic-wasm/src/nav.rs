//! Navigation controller.
//!
//! One instance of state per page, encapsulated in thread-locals (WASM is
//! single-threaded): menu state machine `Closed` / `Open` /
//! `ServicesSubmenu`, the saved navigation markup the submenu swap must
//! restore byte-for-byte, and the sticky-navbar scroll styling. Clicks on
//! booking links are gated on the session: unauthenticated users go to the
//! login page, doctors to their dashboard.
//!
//! The services submenu replaces the inner content of `#navLinks`, so all
//! menu clicks are handled by one delegated listener on `#navLinks` itself;
//! the swap can never orphan a handler.

use crate::api;
use crate::dom::{self, NavElements};
use crate::events::{listen, on_click};
use crate::notify::{self, Level};
use gloo_console::warn;
use gloo_timers::future::TimeoutFuture;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::Element;

pub const MOBILE_BREAKPOINT_PX: i32 = 768;
pub const STICKY_SCROLL_PX: f64 = 50.0;
const REDIRECT_DELAY_MS: u32 = 2_000;

pub const HOME_PAGE: &str = "/frontend/index.html";
pub const LOGIN_PAGE: &str = "/frontend/pages/login.html";
pub const BOOKING_PAGE: &str = "/frontend/pages/appointment_form.html";
pub const DOCTOR_HOME_PAGE: &str = "/frontend/pages/doctor_home.html";

// Stylesheet hooks for the mobile menu backdrop and scroll lock.
const OVERLAY_CLASS: &str = "overlay";
const MENU_OPEN_CLASS: &str = "menu-open";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open,
    ServicesSubmenu,
}

thread_local! {
    static MENU_STATE: RefCell<MenuState> = const { RefCell::new(MenuState::Closed) };
    static SAVED_NAV_HTML: RefCell<Option<String>> = const { RefCell::new(None) };
    static WAS_MOBILE: RefCell<bool> = const { RefCell::new(false) };
}

pub fn current() -> MenuState {
    MENU_STATE.with(|s| *s.borrow())
}

fn set_state(s: MenuState) {
    MENU_STATE.with(|st| *st.borrow_mut() = s);
}

pub fn is_mobile_viewport(width: i32) -> bool {
    width <= MOBILE_BREAKPOINT_PX
}

pub fn is_scrolled(y: f64) -> bool {
    y > STICKY_SCROLL_PX
}

/// Mobile services submenu: back control plus the service page links.
pub fn services_submenu_html() -> &'static str {
    r#"
    <div class="services-menu-header">
      <button class="back-to-main-menu" type="button">Back</button>
      <span>Services</span>
    </div>
    <div class="services-menu-content">
      <a href="/frontend/pages/gynaecology.html">Obstetrics and Gynaecological Services</a>
      <a href="/frontend/pages/consultation.html">Consultation &amp; Specialised Clinics</a>
      <a href="/frontend/pages/Antenatal.html">Antenatal Care</a>
      <a href="/frontend/pages/fertility.html">Fertility/IVF</a>
    </div>
    "#
}

/// Wire all navigation behaviour. Call once per page.
pub fn init(els: &NavElements) {
    // The markup to restore after a submenu swap is captured exactly once.
    SAVED_NAV_HTML.with(|saved| {
        let mut saved = saved.borrow_mut();
        if saved.is_none() {
            *saved = Some(els.nav_links.inner_html());
        }
    });
    WAS_MOBILE.with(|m| *m.borrow_mut() = is_mobile_viewport(dom::viewport_width()));

    ensure_overlay(els);
    bind_hamburger(els);
    bind_menu_delegate(els);
    bind_outside_click(els);
    bind_resize(els);
    bind_scroll(els);
    bind_booking_links();
    bind_logout_links();
}

// ── Menu state transitions ──

/// Backdrop behind the open mobile menu; created once, a click on it closes
/// the menu.
fn ensure_overlay(els: &NavElements) {
    if dom::query(&format!(".{OVERLAY_CLASS}")).is_some() {
        return;
    }
    let overlay = dom::create_element("div");
    dom::add_class(&overlay, OVERLAY_CLASS);
    let body = dom::document().body().unwrap();
    body.append_child(&overlay).unwrap();

    let els2 = els.clone();
    on_click!(overlay, move |_: web_sys::MouseEvent| {
        close_menu(&els2);
    });
}

fn overlay() -> Option<Element> {
    dom::query(&format!(".{OVERLAY_CLASS}"))
}

/// While the mobile menu is open the page behind it must not scroll.
fn set_scroll_lock(locked: bool) {
    let Some(body) = dom::document().body() else {
        return;
    };
    if locked {
        dom::add_class(&body, MENU_OPEN_CLASS);
        let _ = body.style().set_property("overflow", "hidden");
    } else {
        dom::remove_class(&body, MENU_OPEN_CLASS);
        let _ = body.style().remove_property("overflow");
    }
}

fn open_menu(els: &NavElements) {
    dom::add_class(&els.nav_links, "active");
    if let Some(overlay) = overlay() {
        dom::add_class(&overlay, "active");
    }
    set_scroll_lock(true);
    set_state(MenuState::Open);
}

fn close_menu(els: &NavElements) {
    if current() == MenuState::ServicesSubmenu {
        restore_main_menu(els);
    }
    dom::remove_class(&els.nav_links, "active");
    if let Some(overlay) = overlay() {
        dom::remove_class(&overlay, "active");
    }
    set_scroll_lock(false);
    set_state(MenuState::Closed);
}

/// Swap the nav content for the services submenu (mobile only).
fn show_services_submenu(els: &NavElements) {
    els.nav_links.set_inner_html(services_submenu_html());
    dom::add_class(&els.nav_links, "active");
    set_state(MenuState::ServicesSubmenu);
}

/// Put back the saved original markup; the menu stays open.
fn restore_main_menu(els: &NavElements) {
    if let Some(html) = SAVED_NAV_HTML.with(|s| s.borrow().clone()) {
        els.nav_links.set_inner_html(&html);
    }
    dom::add_class(&els.nav_links, "active");
    set_state(MenuState::Open);
}

fn bind_hamburger(els: &NavElements) {
    let els2 = els.clone();
    on_click!(els.hamburger, move |e: web_sys::MouseEvent| {
        e.stop_propagation();
        match current() {
            // Restore the exact original markup before anything else.
            MenuState::ServicesSubmenu => restore_main_menu(&els2),
            MenuState::Open => close_menu(&els2),
            MenuState::Closed => open_menu(&els2),
        }
    });
}

/// One delegated listener handles the services link, the injected Back
/// control, and the close-on-link-click rule, surviving innerHTML swaps.
fn bind_menu_delegate(els: &NavElements) {
    let els2 = els.clone();
    listen!(
        els.nav_links,
        "click",
        web_sys::MouseEvent,
        move |e: web_sys::MouseEvent| {
            let Some(target) = e.target() else { return };
            let Ok(target) = target.dyn_into::<Element>() else {
                return;
            };

            if target.closest(".back-to-main-menu").ok().flatten().is_some() {
                restore_main_menu(&els2);
                return;
            }

            if target.closest("#services-link").ok().flatten().is_some() {
                e.prevent_default();
                if is_mobile_viewport(dom::viewport_width()) {
                    show_services_submenu(&els2);
                } else {
                    toggle_services_dropdown();
                }
                return;
            }

            // Following any other link closes the mobile menu.
            if target.closest("a").ok().flatten().is_some()
                && is_mobile_viewport(dom::viewport_width())
            {
                close_menu(&els2);
            }
        }
    );
}

// ── Desktop services dropdown ──

fn toggle_services_dropdown() {
    if let Some(dropdown) = dom::by_id("services-dropdown") {
        let visible = dropdown
            .dyn_ref::<web_sys::HtmlElement>()
            .map(|h| h.style().get_property_value("display").unwrap_or_default())
            .unwrap_or_default()
            == "block";
        dom::set_display(&dropdown, if visible { "none" } else { "block" });
    }
}

fn hide_services_dropdown() {
    if let Some(dropdown) = dom::by_id("services-dropdown") {
        dom::set_display(&dropdown, "none");
    }
}

// ── Document-level listeners ──

fn bind_outside_click(els: &NavElements) {
    let els2 = els.clone();
    listen!(
        dom::document(),
        "click",
        web_sys::MouseEvent,
        move |e: web_sys::MouseEvent| {
            let Some(target) = e.target() else { return };
            let Ok(node) = target.dyn_into::<web_sys::Node>() else {
                return;
            };

            let inside_nav =
                els2.nav_links.contains(Some(&node)) || els2.hamburger.contains(Some(&node));
            if !inside_nav && current() != MenuState::Closed {
                close_menu(&els2);
            }

            if !is_mobile_viewport(dom::viewport_width()) {
                let over_dropdown = node
                    .dyn_ref::<Element>()
                    .and_then(|el| {
                        el.closest("#services-link, #services-dropdown").ok().flatten()
                    })
                    .is_some();
                if !over_dropdown {
                    hide_services_dropdown();
                }
            }
        }
    );
}

/// Close the menu when the viewport crosses the mobile breakpoint; the
/// submenu layout is meaningless on the other side of it.
fn bind_resize(els: &NavElements) {
    let els2 = els.clone();
    listen!(dom::window(), "resize", web_sys::Event, move |_: web_sys::Event| {
        let mobile = is_mobile_viewport(dom::viewport_width());
        let crossed = WAS_MOBILE.with(|m| {
            let mut m = m.borrow_mut();
            let crossed = *m != mobile;
            *m = mobile;
            crossed
        });
        if crossed {
            close_menu(&els2);
            hide_services_dropdown();
        }
    });
}

/// Sticky-navbar styling; purely presentational and independent of the menu
/// state machine.
fn bind_scroll(els: &NavElements) {
    let els2 = els.clone();
    listen!(dom::window(), "scroll", web_sys::Event, move |_: web_sys::Event| {
        apply_scroll_state(&els2, is_scrolled(dom::scroll_y()));
    });
}

fn apply_scroll_state(els: &NavElements, scrolled: bool) {
    let body: Element = dom::document().body().unwrap().unchecked_into();
    if scrolled {
        if let Some(top_bar) = &els.top_bar {
            dom::add_class(top_bar, "hidden");
        }
        if let Some(navbar) = &els.navbar {
            dom::add_class(navbar, "scrolled");
        }
        dom::add_class(&body, "scrolled");
    } else {
        if let Some(top_bar) = &els.top_bar {
            dom::remove_class(top_bar, "hidden");
        }
        if let Some(navbar) = &els.navbar {
            dom::remove_class(navbar, "scrolled");
        }
        dom::remove_class(&body, "scrolled");
    }
}

// ── Auth-gated links ──

/// Intercept every link into the booking form and route by session role.
fn bind_booking_links() {
    for link in dom::query_all(r#"a[href*="appointment_form.html"]"#) {
        on_click!(link, move |e: web_sys::MouseEvent| {
            e.prevent_default();
            wasm_bindgen_futures::spawn_local(gate_booking_navigation());
        });
    }
}

async fn gate_booking_navigation() {
    match api::check_auth().await {
        Ok(resp) if resp.is_authenticated => {
            if resp.user.as_ref().is_some_and(|u| u.is_doctor()) {
                notify::show(
                    "Doctors cannot book appointments. Redirecting to doctor dashboard...",
                    Level::Info,
                );
                TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                dom::redirect(DOCTOR_HOME_PAGE);
            } else {
                dom::redirect(BOOKING_PAGE);
            }
        }
        Ok(_) => dom::redirect(LOGIN_PAGE),
        Err(e) => {
            warn!(format!("auth check failed: {e}"));
            notify::show(
                "Unable to verify authentication. Redirecting to login...",
                Level::Error,
            );
            TimeoutFuture::new(REDIRECT_DELAY_MS).await;
            dom::redirect(LOGIN_PAGE);
        }
    }
}

/// Sign-out links end the backend session before leaving for the home page.
/// Also used for links injected after page load (the booking page swaps its
/// auth slot once the session is confirmed).
pub fn bind_logout_link(link: &Element) {
    on_click!(link, move |e: web_sys::MouseEvent| {
        e.prevent_default();
        wasm_bindgen_futures::spawn_local(async {
            if let Err(e) = api::logout().await {
                warn!(format!("logout failed: {e}"));
            }
            dom::redirect(HOME_PAGE);
        });
    });
}

fn bind_logout_links() {
    for link in dom::query_all(r#"a[href*="logout.html"]"#) {
        bind_logout_link(&link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive_at_768() {
        assert!(is_mobile_viewport(320));
        assert!(is_mobile_viewport(768));
        assert!(!is_mobile_viewport(769));
        assert!(!is_mobile_viewport(1440));
    }

    #[test]
    fn sticky_threshold_is_exclusive_at_50() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.1));
        assert!(is_scrolled(400.0));
    }

    #[test]
    fn scroll_lock_hooks_match_the_stylesheet() {
        assert_eq!(OVERLAY_CLASS, "overlay");
        assert_eq!(MENU_OPEN_CLASS, "menu-open");
    }

    #[test]
    fn submenu_markup_has_back_control_and_all_service_links() {
        let html = services_submenu_html();
        assert!(html.contains("back-to-main-menu"));
        for page in [
            "gynaecology.html",
            "consultation.html",
            "Antenatal.html",
            "fertility.html",
        ] {
            assert!(html.contains(page), "missing link to {page}");
        }
    }
}
