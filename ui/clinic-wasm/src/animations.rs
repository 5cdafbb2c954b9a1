//! Page entrance and scroll-reveal animations.
//!
//! The stylesheet animates `.fade-in` elements once they also carry
//! `visible`; an `IntersectionObserver` adds that class when a tenth of the
//! element scrolls into view. Purely presentational, no network or state.

use crate::dom;
use gloo_console::warn;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

const FADE_IN_SELECTOR: &str = "main, .footer, .footer-top, .footer-content, .footer-bottom";
const OBSERVED_SELECTOR: &str = ".fade-in, .footer, .footer-top, .footer-content, .footer-bottom";
const REVEAL_THRESHOLD: f64 = 0.1;

pub fn init() {
    for el in dom::query_all(FADE_IN_SELECTOR) {
        dom::add_class(&el, "fade-in");
    }
    if let Some(footer) = dom::query(".footer") {
        dom::add_class(&footer, "slide-up");
    }

    let cb = Closure::wrap(Box::new(
        |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    dom::add_class(&entry.target(), "visible");
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let opts = IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &opts) {
        Ok(observer) => {
            for el in dom::query_all(OBSERVED_SELECTOR) {
                observer.observe(&el);
            }
            cb.forget();
        }
        Err(e) => warn!(format!("could not start scroll animations: {e:?}")),
    }
}

/// Smooth scroll back to the top of the page. Exported so markup `onclick`
/// handlers can call it.
#[wasm_bindgen(js_name = scrollToTop)]
pub fn scroll_to_top() {
    let opts = web_sys::ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(web_sys::ScrollBehavior::Smooth);
    dom::window().scroll_to_with_scroll_to_options(&opts);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_targets_cover_the_page_chrome() {
        for part in [".footer", ".footer-top", ".footer-content", ".footer-bottom"] {
            assert!(FADE_IN_SELECTOR.contains(part), "fade-in misses {part}");
            assert!(OBSERVED_SELECTOR.contains(part), "observer misses {part}");
        }
        assert!(FADE_IN_SELECTOR.contains("main"));
        assert!(OBSERVED_SELECTOR.contains(".fade-in"));
    }
}
