// Particle fields mounted on a canvas element.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::info;
use rand::rngs::ThreadRng;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Event, EventTarget, HtmlCanvasElement, MouseEvent, ResizeObserver, TouchEvent, Window,
};

use super::canvas::{fit_canvas, CanvasSurface};
use super::{js_error, viewport_width, window, Timer};
use crate::component::{FieldComponent, FieldProps};
use crate::config::FxConfig;
use crate::field::{AnchoredField, ParticleField, Simulation};
use crate::host::{EventRegistry, FrameHandle, FrameScheduler, Listener, ListenerId};

enum Registered {
    Event {
        target: EventTarget,
        event_type: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    },
    Observer {
        observer: ResizeObserver,
        _callback: Closure<dyn FnMut(JsValue)>,
    },
}

impl Registered {
    fn release(self) {
        match self {
            Registered::Event {
                target,
                event_type,
                callback,
            } => {
                let callback = callback.as_ref().unchecked_ref();
                if let Err(e) = target.remove_event_listener_with_callback(event_type, callback) {
                    js_error("removeEventListener failed", &e);
                }
            }
            Registered::Observer { observer, .. } => observer.disconnect(),
        }
    }
}

struct FieldHost<F: Simulation + 'static> {
    window: Window,
    canvas: HtmlCanvasElement,
    state: Weak<RefCell<FieldState<F>>>,
    frame_callback: Closure<dyn FnMut()>,
    listeners: HashMap<ListenerId, Registered>,
    next_listener: u32,
}

impl<F: Simulation + 'static> FieldHost<F> {
    fn new(
        window: Window,
        canvas: HtmlCanvasElement,
        state: Weak<RefCell<FieldState<F>>>,
    ) -> Self {
        let frame_state = state.clone();
        let frame_callback = Closure::wrap(Box::new(move || {
            if let Some(state) = frame_state.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    let FieldState { component, host, .. } = &mut *state;
                    component.on_frame(host);
                }
            }
        }) as Box<dyn FnMut()>);

        FieldHost {
            window,
            canvas,
            state,
            frame_callback,
            listeners: HashMap::new(),
            next_listener: 1,
        }
    }

    fn add_event_listener(&self, target: EventTarget, listener: Listener) -> Registered {
        let state = self.state.clone();
        let callback = Closure::wrap(Box::new(move |event: Event| {
            if let Some(state) = state.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.dispatch(listener, &event);
                }
            }
        }) as Box<dyn FnMut(Event)>);

        let event_type = listener.event_type();
        let js_callback = callback.as_ref().unchecked_ref();
        if let Err(e) = target.add_event_listener_with_callback(event_type, js_callback) {
            js_error("addEventListener failed", &e);
        }
        Registered::Event {
            target,
            event_type,
            callback,
        }
    }

    // Size changes of the canvas container, which a window resize misses
    fn observe_container(&self) -> Option<Registered> {
        let container = self.canvas.parent_element()?;
        let state = self.state.clone();
        let callback = Closure::wrap(Box::new(move |_entries: JsValue| {
            if let Some(state) = state.upgrade() {
                if let Ok(mut state) = state.try_borrow_mut() {
                    state.resize();
                }
            }
        }) as Box<dyn FnMut(JsValue)>);

        match ResizeObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&container);
                Some(Registered::Observer {
                    observer,
                    _callback: callback,
                })
            }
            Err(e) => {
                js_error("ResizeObserver unavailable", &e);
                None
            }
        }
    }
}

impl<F: Simulation + 'static> FrameScheduler for FieldHost<F> {
    fn request_frame(&mut self) -> FrameHandle {
        match self
            .window
            .request_animation_frame(self.frame_callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameHandle(id),
            Err(e) => {
                js_error("requestAnimationFrame failed", &e);
                FrameHandle(-1)
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if handle.0 < 0 {
            return;
        }
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            js_error("cancelAnimationFrame failed", &e);
        }
    }
}

impl<F: Simulation + 'static> EventRegistry for FieldHost<F> {
    fn listen(&mut self, listener: Listener) -> ListenerId {
        // leaving is tracked on the canvas, movement anywhere in the window
        let registered = match listener {
            Listener::PointerLeave | Listener::TouchEnd => {
                self.add_event_listener(self.canvas.clone().into(), listener)
            }
            Listener::PointerMove | Listener::TouchMove => {
                self.add_event_listener(self.window.clone().into(), listener)
            }
            Listener::Resize => match self.observe_container() {
                Some(observer) => observer,
                None => self.add_event_listener(self.window.clone().into(), listener),
            },
        };

        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, registered);
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        if let Some(registered) = self.listeners.remove(&id) {
            registered.release();
        }
    }
}

struct FieldState<F: Simulation + 'static> {
    component: FieldComponent<CanvasSurface, F>,
    host: FieldHost<F>,
    rng: ThreadRng,
    // backing buffer follows devicePixelRatio
    hidpi: bool,
    // (css width, css height, viewport width) of the last population
    last_layout: (f64, f64, f64),
}

impl<F: Simulation + 'static> FieldState<F> {
    fn dispatch(&mut self, listener: Listener, event: &Event) {
        match listener {
            Listener::PointerMove => {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    self.pointer_at(event.client_x() as f64, event.client_y() as f64);
                }
            }
            Listener::TouchMove => {
                let touch = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|event| event.touches().get(0));
                if let Some(touch) = touch {
                    self.pointer_at(touch.client_x() as f64, touch.client_y() as f64);
                }
            }
            Listener::PointerLeave | Listener::TouchEnd => self.component.on_pointer_leave(),
            Listener::Resize => self.resize(),
        }
    }

    fn pointer_at(&mut self, client_x: f64, client_y: f64) {
        let rect = self.host.canvas.get_bounding_client_rect();
        self.component
            .on_pointer_move(client_x - rect.left(), client_y - rect.top());
    }

    fn pixel_ratio(&self) -> f64 {
        if self.hidpi {
            self.host.window.device_pixel_ratio()
        } else {
            1.0
        }
    }

    // Refits the canvas. Returns the CSS size and viewport width.
    fn fit(&mut self) -> (f64, f64, f64) {
        let ratio = self.pixel_ratio();
        let (width, height) = fit_canvas(&self.host.canvas, ratio);
        if let Some(surface) = self.component.surface_mut() {
            surface.set_pixel_ratio(ratio);
        }
        (width, height, viewport_width(&self.host.window))
    }

    fn resize(&mut self) {
        let _timer = Timer::new("ParticleField::resize");
        let layout = self.fit();
        // observers report once on attach; nothing moved then
        if layout == self.last_layout {
            return;
        }
        self.last_layout = layout;
        let (width, height, viewport) = layout;
        self.component.on_resize((width, height), viewport, &mut self.rng);
    }
}

// Shared plumbing behind the exported handles.
struct MountedField<F: Simulation + 'static> {
    state: Option<Rc<RefCell<FieldState<F>>>>,
}

impl<F: Simulation + 'static> MountedField<F> {
    fn mount(
        canvas: HtmlCanvasElement,
        field: F,
        props: FieldProps,
        hidpi: bool,
    ) -> Result<Self, JsValue> {
        let window = window()?;
        let surface = CanvasSurface::from_canvas(&canvas);

        let state = Rc::new_cyclic(|weak: &Weak<RefCell<FieldState<F>>>| {
            RefCell::new(FieldState {
                component: FieldComponent::with_field(field, props),
                host: FieldHost::new(window, canvas, weak.clone()),
                rng: rand::thread_rng(),
                hidpi,
                last_layout: (0.0, 0.0, 0.0),
            })
        });

        {
            let _timer = Timer::new("ParticleField::mount");
            let mut guard = state.borrow_mut();
            let ratio = guard.pixel_ratio();
            let (width, height) = fit_canvas(&guard.host.canvas, ratio);
            let viewport = viewport_width(&guard.host.window);
            guard.last_layout = (width, height, viewport);

            let FieldState { component, host, rng, .. } = &mut *guard;
            component.mount(host, surface, (width, height), viewport, rng);
            if let Some(surface) = component.surface_mut() {
                surface.set_pixel_ratio(ratio);
            }
        }

        Ok(MountedField { state: Some(state) })
    }

    fn set_visible(&self, visible: bool) {
        if let Some(state) = &self.state {
            state.borrow_mut().component.set_visible(visible);
        }
    }

    fn is_mounted(&self) -> bool {
        match &self.state {
            Some(state) => state.borrow().component.is_mounted(),
            None => false,
        }
    }

    fn particle_count(&self) -> usize {
        match &self.state {
            Some(state) => state.borrow().component.field().particle_count(),
            None => 0,
        }
    }

    fn listener_count(&self) -> usize {
        match &self.state {
            Some(state) => state.borrow().host.listeners.len(),
            None => 0,
        }
    }

    fn unmount(&mut self) {
        if let Some(state) = self.state.take() {
            let mut guard = state.borrow_mut();
            let FieldState { component, host, .. } = &mut *guard;
            component.unmount(host);
            info!("particle field handle released");
        }
    }
}

impl<F: Simulation + 'static> Drop for MountedField<F> {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// A running particle field. Call `unmount` (or drop the handle) to stop
/// the frame loop and remove every listener.
#[wasm_bindgen]
pub struct ParticleFieldHandle {
    inner: MountedField<ParticleField>,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
    /// Mounts a field on `canvas`. `config_toml` overrides the default tuning.
    /// A canvas without a 2D context gives an idle handle rather than an error.
    pub fn mount(
        canvas: HtmlCanvasElement,
        interactive: bool,
        config_toml: Option<String>,
    ) -> Result<ParticleFieldHandle, JsValue> {
        let config = FxConfig::from_optional_toml(config_toml.as_deref())?;
        let props = FieldProps {
            visible: true,
            interactive,
        };
        let inner = MountedField::mount(canvas, ParticleField::new(config.field), props, false)?;
        Ok(ParticleFieldHandle { inner })
    }

    #[wasm_bindgen(js_name = setVisible)]
    pub fn set_visible(&self, visible: bool) {
        self.inner.set_visible(visible);
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.inner.particle_count()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}

/// Greyscale points pinned to home positions, drawn at the device pixel
/// ratio and refitted whenever the canvas container changes size.
#[wasm_bindgen]
pub struct AnchoredFieldHandle {
    inner: MountedField<AnchoredField>,
}

#[wasm_bindgen]
impl AnchoredFieldHandle {
    /// Mounts on `canvas`; the `[anchored_field]` table of `config_toml`
    /// overrides the default tuning.
    pub fn mount(
        canvas: HtmlCanvasElement,
        config_toml: Option<String>,
    ) -> Result<AnchoredFieldHandle, JsValue> {
        let config = FxConfig::from_optional_toml(config_toml.as_deref())?;
        let field = AnchoredField::new(config.anchored_field);
        let inner = MountedField::mount(canvas, field, FieldProps::default(), true)?;
        Ok(AnchoredFieldHandle { inner })
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.inner.particle_count()
    }

    #[wasm_bindgen(js_name = listenerCount)]
    pub fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}
