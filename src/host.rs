//! The pieces of the browser event loop the effects depend on.
//!
//! Components never call `requestAnimationFrame`, `setTimeout` or
//! `addEventListener` directly. They go through these traits, which the wasm
//! build implements on `web_sys::Window` and the tests implement with spies.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub i32);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Events a particle field can subscribe to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Listener {
    PointerMove,
    TouchMove,
    PointerLeave,
    TouchEnd,
    Resize,
}

impl Listener {
    pub const POINTER: [Listener; 4] = [
        Listener::PointerMove,
        Listener::TouchMove,
        Listener::PointerLeave,
        Listener::TouchEnd,
    ];

    /// Mouse only, for fields that ignore touch.
    pub const MOUSE: [Listener; 2] = [Listener::PointerMove, Listener::PointerLeave];

    /// DOM event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Listener::PointerMove => "mousemove",
            Listener::TouchMove => "touchmove",
            Listener::PointerLeave => "mouseleave",
            Listener::TouchEnd => "touchend",
            // the wasm host observes the canvas container instead when it has one
            Listener::Resize => "resize",
        }
    }
}

pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

pub trait TimerScheduler {
    fn set_timer(&mut self, delay_ms: u32) -> TimerHandle;
    fn clear_timer(&mut self, handle: TimerHandle);
}

pub trait EventRegistry {
    fn listen(&mut self, listener: Listener) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);
}
