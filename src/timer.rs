//! Runtime-neutral sleep used between retry attempts.

use std::time::Duration;

/// Suspends the current task for `delay`.
///
/// On native targets this is `tokio::time::sleep`. On WASM targets it awaits
/// a JS `setTimeout` promise, which works in browsers and workers alike.
pub(crate) async fn sleep(delay: Duration) {
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(delay).await;

    #[cfg(target_arch = "wasm32")]
    wasm::sleep(delay).await;
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::time::Duration;

    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_name = setTimeout)]
        fn set_timeout(handler: &js_sys::Function, timeout: i32) -> JsValue;
    }

    pub(super) async fn sleep(delay: Duration) {
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            set_timeout(&resolve, millis);
        });
        // setTimeout never rejects; the result carries no information.
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }
}
