//! Browser bindings. Everything that talks to `web_sys` lives here; the rest
//! of the crate only sees the traits in `host` and `renderer`.

use log::Level;
use wasm_bindgen::prelude::*;
use web_sys::{console, Window};

use crate::error::FxError;
use crate::reveal::{ease_out_cubic, ProgressAnimation};
use crate::tech_icon;

mod canvas;
mod celebration;
mod field;
mod reveal;
mod timers;
mod typewriter;

pub use celebration::CelebrationHandle;
pub use field::{AnchoredFieldHandle, ParticleFieldHandle};
pub use reveal::RevealObserver;
pub use typewriter::TypewriterHandle;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if console_log::init_with_level(Level::Info).is_err() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = level
        .parse::<log::LevelFilter>()
        .map_err(|_| FxError::InvalidConfig(format!("unknown log level '{}'", level)))?;
    log::set_max_level(filter);
    Ok(())
}

#[wasm_bindgen(js_name = iconForTech)]
pub fn icon_for_tech(tech: &str) -> String {
    tech_icon::icon_for(tech).name().to_string()
}

#[wasm_bindgen(js_name = scrollProgress)]
pub fn scroll_progress(element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
    crate::reveal::scroll_progress(element_top, element_height, viewport_height)
}

#[wasm_bindgen(js_name = progressValue)]
pub fn progress_value(target: f64, elapsed_ms: f64) -> f64 {
    ProgressAnimation::new(target).value_at(elapsed_ms)
}

#[wasm_bindgen(js_name = easeOutCubic)]
pub fn ease_out_cubic_js(t: f64) -> f64 {
    ease_out_cubic(t)
}

// Wraps console.time/timeEnd around a scope
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        if log::log_enabled!(Level::Debug) {
            console::time_with_label(name);
        }
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        if log::log_enabled!(Level::Debug) {
            console::time_end_with_label(self.name);
        }
    }
}

pub(crate) fn window() -> Result<Window, FxError> {
    web_sys::window().ok_or_else(|| FxError::Js("no global window".into()))
}

pub(crate) fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub(crate) fn js_error(context: &str, err: &JsValue) {
    log::error!("{}: {:?}", context, err);
}
