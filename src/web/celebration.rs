// Fireworks celebration cues delivered to a page callback.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;

use super::timers::{TimerHost, TimerTarget};
use super::{js_error, viewport_width, window};
use crate::celebration::{Celebration, Cue, FireworksOptions};
use crate::component::CelebrationComponent;
use crate::config::FxConfig;
use crate::host::TimerHandle;

struct CelebrationState {
    component: CelebrationComponent,
    host: TimerHost,
    on_cue: Function,
}

impl TimerTarget for CelebrationState {
    fn fire(&mut self, handle: TimerHandle) -> Option<Box<dyn FnOnce()>> {
        self.host.forget_fired(handle);
        let cue = self.component.on_timer(handle)?;
        Some(notify(self.on_cue.clone(), vec![cue]))
    }
}

fn notify(on_cue: Function, cues: Vec<Cue>) -> Box<dyn FnOnce()> {
    Box::new(move || {
        for cue in cues {
            if let Err(e) = on_cue.call1(&JsValue::NULL, &JsValue::from_str(cue.name())) {
                js_error("celebration cue callback threw", &e);
            }
        }
    })
}

#[wasm_bindgen]
pub struct CelebrationHandle {
    state: Rc<RefCell<CelebrationState>>,
}

#[wasm_bindgen]
impl CelebrationHandle {
    /// `on_cue` receives "show-backdrop", "start-fireworks", "fade-out" and
    /// "stop-fireworks" as the sequence plays. Cancelling, restarting or
    /// dropping the handle mid-show also reports "stop-fireworks".
    #[wasm_bindgen(constructor)]
    pub fn new(
        on_cue: Function,
        config_toml: Option<String>,
    ) -> Result<CelebrationHandle, JsValue> {
        let config = FxConfig::from_optional_toml(config_toml.as_deref())?;
        let window = window()?;
        let state = Rc::new_cyclic(|weak: &Weak<RefCell<CelebrationState>>| {
            RefCell::new(CelebrationState {
                component: CelebrationComponent::new(Celebration::new(config.celebration)),
                host: TimerHost::new(window, weak.clone()),
                on_cue,
            })
        });
        Ok(CelebrationHandle { state })
    }

    pub fn start(&self) {
        let after = {
            let mut guard = self.state.borrow_mut();
            let CelebrationState { component, host, on_cue } = &mut *guard;
            let cues = component.activate(host);
            notify(on_cue.clone(), cues)
        };
        after();
    }

    pub fn cancel(&self) {
        let after = {
            let mut guard = self.state.borrow_mut();
            let CelebrationState { component, host, on_cue } = &mut *guard;
            component.cancel(host).map(|cue| notify(on_cue.clone(), vec![cue]))
        };
        if let Some(after) = after {
            after();
        }
    }

    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.borrow().component.is_finished()
    }

    /// Options object for the fireworks renderer, sized for the current viewport.
    #[wasm_bindgen(js_name = fireworksOptions)]
    pub fn fireworks_options(&self) -> Result<Object, JsValue> {
        let viewport = viewport_width(&window()?);
        let options = self.state.borrow().component.celebration().fireworks_options(viewport);
        options_object(&options)
    }
}

impl Drop for CelebrationHandle {
    fn drop(&mut self) {
        let after = match self.state.try_borrow_mut() {
            Ok(mut guard) => {
                let CelebrationState { component, host, on_cue } = &mut *guard;
                component.cancel(host).map(|cue| notify(on_cue.clone(), vec![cue]))
            }
            Err(_) => None,
        };
        if let Some(after) = after {
            after();
        }
    }
}

fn range(min: f64, max: f64) -> Result<Object, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"min".into(), &min.into())?;
    Reflect::set(&obj, &"max".into(), &max.into())?;
    Ok(obj)
}

fn options_object(o: &FireworksOptions) -> Result<Object, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &"particles".into(), &o.particles.into())?;
    Reflect::set(&obj, &"trace".into(), &o.trace.into())?;
    Reflect::set(&obj, &"explosion".into(), &o.explosion.into())?;
    Reflect::set(&obj, &"intensity".into(), &o.intensity.into())?;
    Reflect::set(&obj, &"acceleration".into(), &o.acceleration.into())?;
    Reflect::set(&obj, &"friction".into(), &o.friction.into())?;
    Reflect::set(&obj, &"gravity".into(), &o.gravity.into())?;
    Reflect::set(&obj, &"flickering".into(), &o.flickering.into())?;
    Reflect::set(&obj, &"hue".into(), &range(o.hue.0, o.hue.1)?)?;
    Reflect::set(&obj, &"delay".into(), &range(o.delay.0, o.delay.1)?)?;
    Reflect::set(&obj, &"decay".into(), &range(o.decay.0, o.decay.1)?)?;
    Reflect::set(&obj, &"brightness".into(), &range(o.brightness.0, o.brightness.1)?)?;
    Reflect::set(&obj, &"saturation".into(), &range(o.saturation.0, o.saturation.1)?)?;
    Ok(obj)
}
