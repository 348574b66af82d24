//! Image persistence through a JavaScript function.
//!
//! The UI supplies `persist(bytes, mimeType, onSuccess, onError)`. It writes
//! the encoded image wherever the platform keeps photos and later calls
//! exactly one of the two callbacks; `onError` receives a message.

use std::cell::RefCell;
use std::rc::Rc;

use instafilter_core::encode::encode;
use instafilter_core::{ExportSettings, ImageData, ImageSink, SaveCallbacks, SaveError};
use js_sys::{Function, Uint8Array};
use wasm_bindgen::prelude::*;

/// [`ImageSink`] that encodes and forwards to a JS `persist` function.
pub(crate) struct JsSink<'a> {
    persist: &'a Function,
    settings: ExportSettings,
}

impl<'a> JsSink<'a> {
    pub(crate) fn new(persist: &'a Function, settings: ExportSettings) -> Self {
        Self { persist, settings }
    }
}

impl ImageSink for JsSink<'_> {
    fn persist(&mut self, image: ImageData, callbacks: SaveCallbacks) {
        let bytes = match encode(&image, self.settings.format, self.settings.quality) {
            Ok(bytes) => bytes,
            Err(e) => return callbacks.fail(e.into()),
        };

        // Whichever JS callback fires first consumes the pair
        let pending = Rc::new(RefCell::new(Some(callbacks)));
        let on_ok = {
            let pending = pending.clone();
            Closure::once_into_js(move || {
                if let Some(callbacks) = pending.borrow_mut().take() {
                    callbacks.succeed();
                }
            })
        };
        let on_err = {
            let pending = pending.clone();
            Closure::once_into_js(move |reason: JsValue| {
                if let Some(callbacks) = pending.borrow_mut().take() {
                    callbacks.fail(SaveError::Rejected(describe(&reason)));
                }
            })
        };

        let args = js_sys::Array::of4(
            &Uint8Array::from(bytes.as_slice()),
            &JsValue::from_str(self.settings.format.mime_type()),
            &on_ok,
            &on_err,
        );
        if let Err(thrown) = self.persist.apply(&JsValue::NULL, &args) {
            if let Some(callbacks) = pending.borrow_mut().take() {
                callbacks.fail(SaveError::Rejected(describe(&thrown)));
            }
        }
    }
}

/// Human-readable text for a JS error value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// JS-callback based [`SaveCallbacks`].
pub(crate) fn js_callbacks(on_success: Function, on_error: Function) -> SaveCallbacks {
    SaveCallbacks::new(
        move || {
            if let Err(e) = on_success.call0(&JsValue::NULL) {
                log::error!("Save success callback threw: {}", describe(&e));
            }
        },
        move |error| {
            let message = JsValue::from_str(&error.to_string());
            if let Err(e) = on_error.call1(&JsValue::NULL, &message) {
                log::error!("Save error callback threw: {}", describe(&e));
            }
        },
    )
}
