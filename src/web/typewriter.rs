// Typewriter writing into an element's text content.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Array;
use rand::rngs::ThreadRng;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::timers::{TimerHost, TimerTarget};
use super::window;
use crate::component::TypewriterComponent;
use crate::config::FxConfig;
use crate::host::TimerHandle;
use crate::typewriter::Typewriter;

struct TypewriterState {
    component: TypewriterComponent,
    host: TimerHost,
    element: Element,
    rng: ThreadRng,
}

impl TimerTarget for TypewriterState {
    fn fire(&mut self, handle: TimerHandle) -> Option<Box<dyn FnOnce()>> {
        let TypewriterState {
            component,
            host,
            element,
            rng,
        } = self;
        host.forget_fired(handle);
        if let Some(text) = component.on_timer(host, rng) {
            element.set_text_content(Some(text));
        }
        None
    }
}

#[wasm_bindgen]
pub struct TypewriterHandle {
    state: Option<Rc<RefCell<TypewriterState>>>,
}

#[wasm_bindgen]
impl TypewriterHandle {
    /// Starts cycling `words` (an array of strings) inside `element`.
    pub fn mount(
        element: Element,
        words: Array,
        config_toml: Option<String>,
    ) -> Result<TypewriterHandle, JsValue> {
        let config = FxConfig::from_optional_toml(config_toml.as_deref())?;
        let words: Vec<String> = words.iter().filter_map(|w| w.as_string()).collect();
        let typewriter = Typewriter::new(words, config.typewriter)?;
        let window = window()?;

        element.set_text_content(Some(""));
        let state = Rc::new_cyclic(|weak: &Weak<RefCell<TypewriterState>>| {
            RefCell::new(TypewriterState {
                component: TypewriterComponent::new(typewriter),
                host: TimerHost::new(window, weak.clone()),
                element,
                rng: rand::thread_rng(),
            })
        });

        {
            let mut guard = state.borrow_mut();
            let TypewriterState { component, host, .. } = &mut *guard;
            component.mount(host);
        }

        Ok(TypewriterHandle { state: Some(state) })
    }

    pub fn text(&self) -> String {
        match &self.state {
            Some(state) => state.borrow().component.typewriter().text().to_string(),
            None => String::new(),
        }
    }

    #[wasm_bindgen(js_name = pendingTimers)]
    pub fn pending_timers(&self) -> usize {
        match &self.state {
            Some(state) => state.borrow().host.pending(),
            None => 0,
        }
    }

    pub fn unmount(&mut self) {
        if let Some(state) = self.state.take() {
            let mut guard = state.borrow_mut();
            let TypewriterState { component, host, .. } = &mut *guard;
            component.unmount(host);
        }
    }
}

impl Drop for TypewriterHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}
