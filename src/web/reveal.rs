// One-shot reveal on scroll, backed by IntersectionObserver.

use js_sys::{Array, Function};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use super::js_error;
use crate::reveal::RevealTrigger;

#[wasm_bindgen]
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

#[wasm_bindgen]
impl RevealObserver {
    /// Calls `on_reveal` once, the first time `element` is at least
    /// `threshold` visible, then stops observing.
    #[allow(deprecated)]
    pub fn observe(
        element: &Element,
        threshold: f64,
        on_reveal: Function,
    ) -> Result<RevealObserver, JsValue> {
        let mut trigger = RevealTrigger::new(threshold);
        let threshold = trigger.threshold();

        let on_entries = move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if trigger.observe(entry.intersection_ratio(), entry.is_intersecting()) {
                    observer.disconnect();
                    if let Err(e) = on_reveal.call0(&JsValue::NULL) {
                        js_error("reveal callback threw", &e);
                    }
                    break;
                }
            }
        };
        let callback =
            Closure::wrap(Box::new(on_entries) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let mut init = IntersectionObserverInit::new();
        init.threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        observer.observe(element);

        Ok(RevealObserver {
            observer,
            _callback: callback,
        })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
