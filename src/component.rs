//! Mount/unmount lifecycles for the effects.
//!
//! Each component owns its effect state plus every frame, timer and listener
//! it has registered with the host, and releases all of them on unmount.

use log::{debug, info, warn};
use rand::Rng;

use crate::celebration::{Celebration, Cue};
use crate::field::{FieldConfig, ParticleField, Simulation};
use crate::host::{
    EventRegistry, FrameHandle, FrameScheduler, Listener, ListenerId, TimerHandle, TimerScheduler,
};
use crate::renderer::Surface;
use crate::typewriter::Typewriter;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldProps {
    /// Gates stepping and drawing. The frame loop and listeners stay alive.
    pub visible: bool,
    /// Track the pointer and push particles away from it.
    pub interactive: bool,
}

impl Default for FieldProps {
    fn default() -> Self {
        FieldProps {
            visible: true,
            interactive: true,
        }
    }
}

pub struct FieldComponent<S, F = ParticleField> {
    field: F,
    surface: Option<S>,
    props: FieldProps,
    pending_frame: Option<FrameHandle>,
    listeners: Vec<ListenerId>,
}

impl<S: Surface> FieldComponent<S, ParticleField> {
    pub fn new(config: FieldConfig, props: FieldProps) -> Self {
        FieldComponent::with_field(ParticleField::new(config), props)
    }
}

impl<S: Surface, F: Simulation> FieldComponent<S, F> {
    pub fn with_field(field: F, props: FieldProps) -> Self {
        FieldComponent {
            field,
            surface: None,
            props,
            pending_frame: None,
            listeners: Vec::new(),
        }
    }

    /// Starts the field on `surface`. Without a surface the component stays
    /// inert and registers nothing.
    pub fn mount<H, R>(
        &mut self,
        host: &mut H,
        surface: Option<S>,
        size: (f64, f64),
        viewport_width: f64,
        rng: &mut R,
    ) where
        H: FrameScheduler + EventRegistry,
        R: Rng + ?Sized,
    {
        if self.is_mounted() {
            return;
        }
        let surface = match surface {
            Some(surface) => surface,
            None => {
                warn!("particle field has no drawing surface, staying idle");
                return;
            }
        };
        self.surface = Some(surface);

        self.field.populate(size.0, size.1, viewport_width, rng);

        self.listeners.push(host.listen(Listener::Resize));
        if self.props.interactive {
            for listener in self.field.pointer_listeners() {
                self.listeners.push(host.listen(*listener));
            }
        }
        self.pending_frame = Some(host.request_frame());

        info!(
            "particle field mounted ({} particles, interactive: {})",
            self.field.particle_count(),
            self.props.interactive
        );
    }

    /// Frame callback: step and draw when visible, then ask for the next frame.
    pub fn on_frame<H: FrameScheduler>(&mut self, host: &mut H) {
        self.pending_frame = None;
        let surface = match self.surface.as_mut() {
            Some(surface) => surface,
            None => return,
        };

        if self.props.visible {
            self.field.step();
            self.field.render(surface);
        }

        self.pending_frame = Some(host.request_frame());
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if self.is_mounted() && self.props.interactive {
            self.field.set_pointer(x, y);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        if self.props.interactive {
            self.field.clear_pointer();
        }
    }

    /// Container resized: throw the population away and build a new one.
    pub fn on_resize<R: Rng + ?Sized>(
        &mut self,
        size: (f64, f64),
        viewport_width: f64,
        rng: &mut R,
    ) {
        if !self.is_mounted() {
            return;
        }
        debug!("particle field resized to {}x{}", size.0, size.1);
        self.field.populate(size.0, size.1, viewport_width, rng);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.props.visible = visible;
    }

    /// Cancels the pending frame and removes every listener.
    pub fn unmount<H>(&mut self, host: &mut H)
    where
        H: FrameScheduler + EventRegistry,
    {
        if let Some(handle) = self.pending_frame.take() {
            host.cancel_frame(handle);
        }
        for id in self.listeners.drain(..) {
            host.unlisten(id);
        }
        if self.surface.take().is_some() {
            info!("particle field unmounted");
        }
        self.field.clear_pointer();
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn props(&self) -> FieldProps {
        self.props
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending_frame
    }
}

pub struct TypewriterComponent {
    typewriter: Typewriter,
    pending_timer: Option<TimerHandle>,
    mounted: bool,
}

impl TypewriterComponent {
    pub fn new(typewriter: Typewriter) -> Self {
        TypewriterComponent {
            typewriter,
            pending_timer: None,
            mounted: false,
        }
    }

    /// Starts from an empty line after the start delay.
    pub fn mount<H: TimerScheduler>(&mut self, host: &mut H) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.typewriter.restart();
        let delay = self.typewriter.timing().start_delay_ms;
        self.pending_timer = Some(host.set_timer(delay));
    }

    /// Timer callback. Returns the text to display.
    pub fn on_timer<H, R>(&mut self, host: &mut H, rng: &mut R) -> Option<&str>
    where
        H: TimerScheduler,
        R: Rng + ?Sized,
    {
        self.pending_timer = None;
        if !self.mounted {
            return None;
        }
        let delay = self.typewriter.tick(rng);
        self.pending_timer = Some(host.set_timer(delay));
        Some(self.typewriter.text())
    }

    pub fn unmount<H: TimerScheduler>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending_timer.take() {
            host.clear_timer(handle);
        }
        self.mounted = false;
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

pub struct CelebrationComponent {
    celebration: Celebration,
    pending: Vec<(TimerHandle, Cue)>,
    fireworks_running: bool,
}

impl CelebrationComponent {
    pub fn new(celebration: Celebration) -> Self {
        CelebrationComponent {
            celebration,
            pending: Vec::new(),
            fireworks_running: false,
        }
    }

    /// Arms a timer for every delayed cue and returns the cues due right away.
    /// Re-activating while fireworks still run leads with `StopFireworks`.
    pub fn activate<H: TimerScheduler>(&mut self, host: &mut H) -> Vec<Cue> {
        let mut immediate: Vec<Cue> = self.cancel(host).into_iter().collect();
        for (at_ms, cue) in self.celebration.cues().iter() {
            if *at_ms == 0 {
                immediate.push(*cue);
                self.note_fired(*cue);
            } else {
                self.pending.push((host.set_timer(*at_ms), *cue));
            }
        }
        immediate
    }

    /// Timer callback for `handle`; unknown handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Option<Cue> {
        let index = self.pending.iter().position(|(h, _)| *h == handle)?;
        let (_, cue) = self.pending.remove(index);
        self.note_fired(cue);
        Some(cue)
    }

    /// Clears pending cues. Returns `StopFireworks` when they were still running.
    pub fn cancel<H: TimerScheduler>(&mut self, host: &mut H) -> Option<Cue> {
        for (handle, _) in self.pending.drain(..) {
            host.clear_timer(handle);
        }
        if self.fireworks_running {
            self.fireworks_running = false;
            Some(Cue::StopFireworks)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && !self.fireworks_running
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    fn note_fired(&mut self, cue: Cue) {
        match cue {
            Cue::StartFireworks => self.fireworks_running = true,
            Cue::StopFireworks => self.fireworks_running = false,
            Cue::ShowBackdrop | Cue::FadeOut => {}
        }
    }
}
