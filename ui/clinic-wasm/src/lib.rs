//! Browser entry point for the clinic site.
//!
//! One WASM bundle serves every page; each controller binds only when its
//! elements exist, so `start` can wire everything unconditionally.

use wasm_bindgen::prelude::*;

pub mod api;

mod animations;
mod autofill;
mod booking;
mod contact;
mod dom;
mod events;
mod login;
mod nav;
mod notify;
mod profile;
mod progress;
mod state;

#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if let Ok(nav_els) = dom::NavElements::bind() {
        nav::init(&nav_els);
    } else {
        gloo_console::log!("no navigation chrome on this page");
    }

    notify::init_message_modal();
    animations::init();
    progress::init();

    login::init();
    login::init_register();
    contact::init();
    contact::init_footer_feedback();
    booking::init_confirmation();

    // These await the session check before wiring their forms.
    booking::init().await;
    profile::init().await;

    Ok(())
}
