//! Scroll-driven helpers: one-shot reveal triggers for page sections, the
//! experience timeline's scroll progress, and the eased skill progress bar.

pub const SECTION_THRESHOLD: f64 = 0.3;
pub const FOOTER_THRESHOLD: f64 = 0.5;

/// Latches once the observed element is visible enough. Never un-reveals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RevealTrigger {
    threshold: f64,
    revealed: bool,
}

impl RevealTrigger {
    pub fn new(threshold: f64) -> RevealTrigger {
        RevealTrigger {
            threshold: threshold.max(0.0).min(1.0),
            revealed: false,
        }
    }

    /// Feeds one intersection observation; returns true only on the
    /// observation that reveals.
    pub fn observe(&mut self, intersection_ratio: f64, is_intersecting: bool) -> bool {
        if self.revealed || !is_intersecting || intersection_ratio < self.threshold {
            return false;
        }
        self.revealed = true;
        true
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// How far an element has been scrolled through, in `[0, 1]`.
///
/// 0 while its top is still below the bottom of the viewport, 1 once its
/// bottom has passed the middle of the viewport.
pub fn scroll_progress(element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
    let start = viewport_height;
    let end = viewport_height / 2.0 - element_height;
    let span = start - end;
    if span <= 0.0 {
        return if element_top <= end { 1.0 } else { 0.0 };
    }
    ((start - element_top) / span).max(0.0).min(1.0)
}

pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.max(0.0).min(1.0);
    1.0 - (1.0 - t).powi(3)
}

pub const MILESTONE_STEP: f64 = 20.0;

/// Progress bar filling up to `target` percent once revealed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProgressAnimation {
    pub target: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
}

impl ProgressAnimation {
    pub fn new(target: f64) -> ProgressAnimation {
        ProgressAnimation {
            target,
            duration_ms: 2000.0,
            delay_ms: 300.0,
        }
    }

    pub fn value_at(&self, elapsed_ms: f64) -> f64 {
        let running = elapsed_ms - self.delay_ms;
        if running <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return self.target;
        }
        ease_out_cubic(running / self.duration_ms) * self.target
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms - self.delay_ms >= self.duration_ms
    }

    /// Milestones (every 20 percent, four of them) the bar has passed.
    pub fn milestones_reached(value: f64) -> usize {
        (1..=4).filter(|i| value >= *i as f64 * MILESTONE_STEP).count()
    }
}
