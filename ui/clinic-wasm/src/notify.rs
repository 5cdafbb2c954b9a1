//! Transient status banners and the page-load message modal.
//!
//! Banners stack inside a fixed `#messageContainer` (created on demand) and
//! remove themselves after five seconds unless dismissed via the close
//! control first. The page-load modal closes after eight seconds, on a
//! click outside it, or on Escape. Nothing here touches the network.

use crate::dom;
use crate::events::{listen, on_click};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::Element;

pub const BANNER_DISMISS_MS: u32 = 5_000;
pub const MODAL_DISMISS_MS: u32 = 8_000;
const MODAL_FADE_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
    Warning,
    Info,
}

impl Level {
    /// `(background, text, border)` from the site palette.
    pub fn colors(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Level::Success => ("#d4edda", "#155724", "#c3e6cb"),
            Level::Error => ("#f8d7da", "#721c24", "#f5c6cb"),
            Level::Warning => ("#fff3cd", "#856404", "#ffeeba"),
            Level::Info => ("#d1ecf1", "#0c5460", "#bee5eb"),
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        }
    }
}

fn container() -> Element {
    if let Some(existing) = dom::by_id("messageContainer") {
        return existing;
    }
    let container = dom::create_element("div");
    container.set_id("messageContainer");
    let _ = container.set_attribute(
        "style",
        "position: fixed; top: 20px; right: 20px; z-index: 9999;",
    );
    let body = dom::document().body().expect("document has no body");
    body.append_child(&container).unwrap();
    container
}

/// Show a stacking banner that auto-dismisses after [`BANNER_DISMISS_MS`].
pub fn show(message: &str, level: Level) {
    let (bg, fg, border) = level.colors();

    let banner = dom::create_element("div");
    dom::add_class(&banner, "notice-banner");
    dom::add_class(&banner, level.css_class());
    let _ = banner.set_attribute(
        "style",
        &format!(
            "background: {bg}; color: {fg}; border: 1px solid {border}; \
             padding: 12px 20px; margin-bottom: 10px; border-radius: 5px; \
             box-shadow: 0 2px 8px rgba(0,0,0,0.1); max-width: 300px; \
             word-wrap: break-word; font-weight: 500;"
        ),
    );

    let close = dom::create_element("button");
    close.set_text_content(Some("\u{00d7}"));
    let _ = close.set_attribute(
        "style",
        "float: right; background: none; border: none; font-size: 18px; \
         cursor: pointer; margin-left: 10px;",
    );
    {
        let banner2 = banner.clone();
        on_click!(close, move |_: web_sys::MouseEvent| {
            banner2.remove();
        });
    }

    let text = dom::create_element("span");
    text.set_text_content(Some(message));

    banner.append_child(&close).unwrap();
    banner.append_child(&text).unwrap();
    container().append_child(&banner).unwrap();

    let banner2 = banner.clone();
    Timeout::new(BANNER_DISMISS_MS, move || banner2.remove()).forget();
}

// ── Page-load message modal ──

/// Fade out and remove `#messageModal`, if still present.
pub fn close_message_modal() {
    if let Some(modal) = dom::by_id("messageModal") {
        dom::add_class(&modal, "fade-out");
        Timeout::new(MODAL_FADE_MS, move || modal.remove()).forget();
    }
}

/// Wire the modal's dismissal paths. Call once per page; pages without the
/// modal no-op here.
pub fn init_message_modal() {
    let Some(modal) = dom::by_id("messageModal") else {
        return;
    };

    Timeout::new(MODAL_DISMISS_MS, close_message_modal).forget();

    if let Some(close_btn) = dom::query_within::<web_sys::HtmlElement>(&modal, ".modal-close") {
        on_click!(close_btn, move |_: web_sys::MouseEvent| {
            close_message_modal();
        });
    }

    // A click on the backdrop (the modal element itself) closes; clicks on
    // the inner dialog do not bubble up as the modal target.
    let modal_id = modal.id();
    listen!(
        dom::document(),
        "click",
        web_sys::MouseEvent,
        move |e: web_sys::MouseEvent| {
            let Some(target) = e.target() else { return };
            if let Ok(el) = target.dyn_into::<Element>() {
                if el.id() == modal_id {
                    close_message_modal();
                }
            }
        }
    );

    listen!(
        dom::document(),
        "keydown",
        web_sys::KeyboardEvent,
        move |e: web_sys::KeyboardEvent| {
            if e.key() == "Escape" {
                close_message_modal();
            }
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mapping_is_fixed() {
        assert_eq!(Level::Success.colors().0, "#d4edda");
        assert_eq!(Level::Error.colors().0, "#f8d7da");
        assert_eq!(Level::Warning.colors().0, "#fff3cd");
        assert_eq!(Level::Info.colors().0, "#d1ecf1");
    }

    #[test]
    fn banner_and_modal_timeouts_match_contract() {
        assert_eq!(BANNER_DISMISS_MS, 5_000);
        assert_eq!(MODAL_DISMISS_MS, 8_000);
    }

    #[test]
    fn css_classes_are_lowercase_level_names() {
        for (level, name) in [
            (Level::Success, "success"),
            (Level::Error, "error"),
            (Level::Warning, "warning"),
            (Level::Info, "info"),
        ] {
            assert_eq!(level.css_class(), name);
        }
    }
}
