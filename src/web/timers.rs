// setTimeout-backed TimerScheduler. One closure per host; the timer key is
// passed back as the timeout argument so the owner knows which one fired.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use super::js_error;
use crate::host::{TimerHandle, TimerScheduler};

pub(crate) trait TimerTarget: 'static {
    /// Handles a fired timer. The returned closure runs after the owner's
    /// borrow is released, so it may call back into the page.
    fn fire(&mut self, handle: TimerHandle) -> Option<Box<dyn FnOnce()>>;
}

pub(crate) struct TimerHost {
    window: Window,
    callback: Closure<dyn FnMut(JsValue)>,
    browser_ids: HashMap<i32, i32>,
    next_key: i32,
}

impl TimerHost {
    pub(crate) fn new<T: TimerTarget>(window: Window, owner: Weak<RefCell<T>>) -> TimerHost {
        let callback = Closure::wrap(Box::new(move |key: JsValue| {
            let key = match key.as_f64() {
                Some(key) => key as i32,
                None => return,
            };
            let owner = match owner.upgrade() {
                Some(owner) => owner,
                None => return,
            };
            let after = match owner.try_borrow_mut() {
                Ok(mut owner) => owner.fire(TimerHandle(key)),
                Err(_) => {
                    log::warn!("timer {} fired while its owner was busy", key);
                    None
                }
            };
            if let Some(after) = after {
                after();
            }
        }) as Box<dyn FnMut(JsValue)>);

        TimerHost {
            window,
            callback,
            browser_ids: HashMap::new(),
            next_key: 1,
        }
    }

    /// Drops the bookkeeping for a timer that has already fired.
    pub(crate) fn forget_fired(&mut self, handle: TimerHandle) {
        self.browser_ids.remove(&handle.0);
    }

    pub(crate) fn pending(&self) -> usize {
        self.browser_ids.len()
    }
}

impl TimerScheduler for TimerHost {
    fn set_timer(&mut self, delay_ms: u32) -> TimerHandle {
        let key = self.next_key;
        self.next_key += 1;
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_1(
            self.callback.as_ref().unchecked_ref(),
            delay_ms.min(i32::MAX as u32) as i32,
            &JsValue::from(key),
        ) {
            Ok(id) => {
                self.browser_ids.insert(key, id);
            }
            Err(e) => js_error("setTimeout failed", &e),
        }
        TimerHandle(key)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        if let Some(id) = self.browser_ids.remove(&handle.0) {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

impl Drop for TimerHost {
    fn drop(&mut self) {
        for (_, id) in self.browser_ids.drain() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}
