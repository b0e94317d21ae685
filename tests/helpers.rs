#![allow(dead_code)]

use std::collections::HashSet;

use portfolio_fx::host::{
    EventRegistry, FrameHandle, FrameScheduler, Listener, ListenerId, TimerHandle, TimerScheduler,
};
use portfolio_fx::{Color, Surface};
use vecmath::Vector2;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Counts every schedule/cancel and listen/unlisten call.
#[derive(Default)]
pub struct SpyHost {
    next: i32,
    pub frames_requested: usize,
    pub frames_cancelled: usize,
    pub pending_frames: HashSet<i32>,
    pub timers_set: usize,
    pub timers_cleared: usize,
    pub pending_timers: HashSet<i32>,
    pub last_delay: Option<u32>,
    pub live_listeners: Vec<(ListenerId, Listener)>,
}

impl SpyHost {
    fn next_id(&mut self) -> i32 {
        self.next += 1;
        self.next
    }

    /// Simulates the browser running a frame callback.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        let id = *self.pending_frames.iter().next()?;
        self.pending_frames.remove(&id);
        Some(FrameHandle(id))
    }

    /// Simulates a timer firing.
    pub fn take_timer(&mut self) -> Option<TimerHandle> {
        let id = *self.pending_timers.iter().min()?;
        self.pending_timers.remove(&id);
        Some(TimerHandle(id))
    }

    pub fn listening_to(&self, listener: Listener) -> bool {
        self.live_listeners.iter().any(|(_, l)| *l == listener)
    }
}

impl FrameScheduler for SpyHost {
    fn request_frame(&mut self) -> FrameHandle {
        let id = self.next_id();
        self.frames_requested += 1;
        self.pending_frames.insert(id);
        FrameHandle(id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames_cancelled += 1;
        self.pending_frames.remove(&handle.0);
    }
}

impl TimerScheduler for SpyHost {
    fn set_timer(&mut self, delay_ms: u32) -> TimerHandle {
        let id = self.next_id();
        self.timers_set += 1;
        self.last_delay = Some(delay_ms);
        self.pending_timers.insert(id);
        TimerHandle(id)
    }

    fn clear_timer(&mut self, handle: TimerHandle) {
        self.timers_cleared += 1;
        self.pending_timers.remove(&handle.0);
    }
}

impl EventRegistry for SpyHost {
    fn listen(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id() as u32);
        self.live_listeners.push((id, listener));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.live_listeners.retain(|(live, _)| *live != id);
    }
}

/// Surface that only counts draw calls.
#[derive(Default, Debug)]
pub struct CountingSurface {
    pub clears: usize,
    pub circles: usize,
    pub lines: usize,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
    }

    fn fill_circle(&mut self, _center: Vector2<f64>, _radius: f64, _color: Color, _alpha: f64) {
        self.circles += 1;
    }

    fn stroke_line(
        &mut self,
        _from: Vector2<f64>,
        _to: Vector2<f64>,
        _color: Color,
        _alpha: f64,
        _width: f64,
    ) {
        self.lines += 1;
    }
}
