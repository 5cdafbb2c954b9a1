//! Event binding macros shared by the controllers.
//!
//! Closures are `forget()`-ed: listeners live for the whole page, so the
//! leak is intentional. Async handlers are spawned on the page task queue via
//! `wasm_bindgen_futures::spawn_local`.

/// Attach a listener for `$event` with a typed event argument.
macro_rules! listen {
    ($target:expr, $event:expr, $ty:ty, $cb:expr) => {{
        let cb = wasm_bindgen::closure::Closure::wrap(Box::new($cb) as Box<dyn FnMut($ty)>);
        $target
            .add_event_listener_with_callback($event, wasm_bindgen::JsCast::unchecked_ref(cb.as_ref()))
            .unwrap();
        cb.forget();
    }};
}

/// Attach a sync click handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {
        $crate::events::listen!($el, "click", web_sys::MouseEvent, $cb)
    };
}

/// Attach an async click handler: `$handler(&$els).await` on each click.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        $crate::events::on_click!($el, move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        });
    }};
}

/// Attach an async submit handler that suppresses the default navigation.
macro_rules! on_submit_async {
    ($form:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        $crate::events::listen!($form, "submit", web_sys::Event, move |e: web_sys::Event| {
            e.prevent_default();
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        });
    }};
}

pub(crate) use {listen, on_click, on_click_async, on_submit_async};
