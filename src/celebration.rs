//! Fireworks celebration: a fixed sequence of cues played after activation.
//! The explosions themselves are drawn by the page's fireworks renderer;
//! this module decides when it runs and how heavy it is.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub show_fireworks_ms: u32,
    pub fade_out_ms: u32,
    pub stop_ms: u32,
    /// Viewports at or below this width get the light preset.
    pub mobile_breakpoint: f64,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        CelebrationConfig {
            show_fireworks_ms: 200,
            fade_out_ms: 4000,
            stop_ms: 5500,
            mobile_breakpoint: 768.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    ShowBackdrop,
    StartFireworks,
    FadeOut,
    StopFireworks,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::ShowBackdrop => "show-backdrop",
            Cue::StartFireworks => "start-fireworks",
            Cue::FadeOut => "fade-out",
            Cue::StopFireworks => "stop-fireworks",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Backdrop,
    Fireworks,
    FadingOut,
    Complete,
}

/// Target opacities of the two overlay layers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layers {
    pub backdrop: f64,
    pub fireworks: f64,
}

impl Phase {
    pub fn layers(&self) -> Layers {
        match self {
            Phase::Backdrop => Layers { backdrop: 1.0, fireworks: 0.0 },
            Phase::Fireworks => Layers { backdrop: 1.0, fireworks: 1.0 },
            Phase::Idle | Phase::FadingOut | Phase::Complete => Layers {
                backdrop: 0.0,
                fireworks: 0.0,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Celebration {
    config: CelebrationConfig,
}

impl Celebration {
    pub fn new(config: CelebrationConfig) -> Celebration {
        Celebration { config }
    }

    /// Cues in firing order with their offset from activation.
    pub fn cues(&self) -> [(u32, Cue); 4] {
        [
            (0, Cue::ShowBackdrop),
            (self.config.show_fireworks_ms, Cue::StartFireworks),
            (self.config.fade_out_ms, Cue::FadeOut),
            (self.config.stop_ms, Cue::StopFireworks),
        ]
    }

    pub fn phase_at(&self, elapsed_ms: f64) -> Phase {
        let c = &self.config;
        if elapsed_ms < 0.0 {
            Phase::Idle
        } else if elapsed_ms < c.show_fireworks_ms as f64 {
            Phase::Backdrop
        } else if elapsed_ms < c.fade_out_ms as f64 {
            Phase::Fireworks
        } else if elapsed_ms < c.stop_ms as f64 {
            Phase::FadingOut
        } else {
            Phase::Complete
        }
    }

    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width <= self.config.mobile_breakpoint
    }

    pub fn fireworks_options(&self, viewport_width: f64) -> FireworksOptions {
        FireworksOptions::preset(self.is_mobile(viewport_width))
    }
}

/// Tuning handed to the fireworks renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FireworksOptions {
    pub particles: u32,
    pub trace: u32,
    pub explosion: u32,
    pub intensity: u32,
    pub hue: (f64, f64),
    pub delay: (f64, f64),
    pub acceleration: f64,
    pub friction: f64,
    pub gravity: f64,
    pub flickering: f64,
    pub decay: (f64, f64),
    pub brightness: (f64, f64),
    pub saturation: (f64, f64),
}

impl FireworksOptions {
    pub fn preset(mobile: bool) -> FireworksOptions {
        let (particles, trace, explosion, intensity) = if mobile {
            (60, 2, 4, 20)
        } else {
            (150, 4, 8, 50)
        };
        FireworksOptions {
            particles,
            trace,
            explosion,
            intensity,
            hue: (90.0, 300.0),
            delay: (15.0, 30.0),
            acceleration: 1.009,
            friction: 0.98,
            gravity: 1.5,
            flickering: 25.0,
            decay: (0.015, 0.03),
            brightness: (50.0, 80.0),
            saturation: (80.0, 100.0),
        }
    }
}
