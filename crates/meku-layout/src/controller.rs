//! Split-pane layout controller
//!
//! Sizes are percentages of the container: `[left, right]` with
//! `left + right == 100` at rest. The collapse rule works on the left
//! pane's *pixel* width against the current container width, so the
//! behavior is resolution-independent. One fixed threshold is applied
//! asymmetrically by current state (hysteresis): while expanded only
//! the collapse crossing is evaluated, while collapsed only the expand
//! crossing. Inputs hovering near the threshold therefore cannot flap.

use std::time::{Duration, Instant};

use crate::easing::ease_in_out_cubic;
use crate::phase::LayoutPhase;

/// Pixel width of the left pane below/above which collapse/expand fires.
pub const COLLAPSE_THRESHOLD_PX: f32 = 50.0;

/// Fixed minimal split while collapsed.
pub const COLLAPSED_SIZES: [f32; 2] = [8.0, 92.0];

/// Default split restored when no expanded sizes have been remembered.
pub const DEFAULT_OPEN_SIZES: [f32; 2] = [60.0, 40.0];

/// Duration of a programmatic collapse/expand interpolation.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// The reflow notification fires this long after a transition settles,
/// so the surrounding layout has stabilized before the renderer
/// re-measures its surface.
pub const REFLOW_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
struct Animation {
    from: f32,
    to: f32,
    started: Instant,
}

impl Animation {
    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        elapsed.as_secs_f32() / ANIMATION_DURATION.as_secs_f32()
    }
}

#[derive(Debug)]
pub struct LayoutController {
    /// Left pane size in percent; the right pane is `100 - left`.
    left: f32,
    collapsed: bool,
    /// Last split the user had while expanded; restored by `expand`.
    last_open: [f32; 2],
    /// Container width in pixels, fed by renderer resize notifications.
    container_width: f32,
    phase: LayoutPhase,
    anim: Option<Animation>,
    /// When a settled transition should notify the renderer to reflow.
    reflow_at: Option<Instant>,
}

impl LayoutController {
    pub fn new() -> Self {
        Self {
            left: DEFAULT_OPEN_SIZES[0],
            collapsed: false,
            last_open: DEFAULT_OPEN_SIZES,
            container_width: 0.0,
            phase: LayoutPhase::Idle,
            anim: None,
            reflow_at: None,
        }
    }

    /// Reinitialize to the default open split, keeping the measured
    /// container width. Called on every entry into model mode.
    pub fn reset_open(&mut self) {
        let width = self.container_width;
        *self = Self::new();
        self.container_width = width;
    }

    pub fn sizes(&self) -> [f32; 2] {
        [self.left, 100.0 - self.left]
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    pub fn last_expanded(&self) -> [f32; 2] {
        self.last_open
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }

    pub fn set_container_width(&mut self, width_px: f32) {
        self.container_width = width_px.max(0.0);
    }

    /// Continuous update during an active drag gesture. Cancels any
    /// in-flight animation and hands control to the drag.
    pub fn on_drag_update(&mut self, sizes: [f32; 2], now: Instant) {
        if self.anim.take().is_some() {
            tracing::debug!("Drag cancelled in-flight animation");
        }
        self.phase = LayoutPhase::Dragging;
        self.left = sizes[0];
        self.apply_hysteresis(sizes, now);
    }

    /// End of a drag gesture. Re-evaluates the collapse rule and, if the
    /// result is expanded beyond the collapsed guard band, commits the
    /// gesture's sizes as the remembered expanded split.
    pub fn on_drag_end(&mut self, sizes: [f32; 2], now: Instant) {
        self.phase = LayoutPhase::Idle;
        self.apply_hysteresis(sizes, now);
        if !self.collapsed && sizes[0] > COLLAPSED_SIZES[0] {
            self.last_open = sizes;
        }
    }

    /// Button-triggered collapse, animated.
    pub fn collapse(&mut self, now: Instant) {
        if self.collapsed && self.anim.is_none() {
            return;
        }
        self.collapsed = true;
        self.start_animation(COLLAPSED_SIZES[0], now);
    }

    /// Button-triggered expand, animated back to the remembered split.
    pub fn expand(&mut self, now: Instant) {
        if !self.collapsed && self.anim.is_none() {
            return;
        }
        self.collapsed = false;
        self.start_animation(self.last_open[0], now);
    }

    /// Advance the current animation one display frame. Returns `true`
    /// while an interpolation is still running, so the caller knows to
    /// re-schedule itself.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(anim) = self.anim else {
            return false;
        };

        let t = anim.progress(now);
        if t >= 1.0 {
            // Snap exactly to the integral target.
            self.left = anim.to;
            if !self.collapsed {
                self.last_open = [anim.to, 100.0 - anim.to];
            }
            self.anim = None;
            self.phase = LayoutPhase::Idle;
            self.reflow_at = Some(now + REFLOW_DELAY);
            tracing::debug!(left = self.left, collapsed = self.collapsed, "Animation settled");
            return false;
        }

        self.left = anim.from + (anim.to - anim.from) * ease_in_out_cubic(t);
        true
    }

    /// Drain a due reflow notification. The caller forwards it to the
    /// external renderer as a resize request.
    pub fn take_reflow(&mut self, now: Instant) -> bool {
        match self.reflow_at {
            Some(at) if now >= at => {
                self.reflow_at = None;
                true
            }
            _ => false,
        }
    }

    fn start_animation(&mut self, to: f32, now: Instant) {
        // Replacing `anim` cancels any in-flight interpolation outright;
        // there is never more than one on this state.
        self.anim = Some(Animation {
            from: self.left,
            to,
            started: now,
        });
        self.phase = LayoutPhase::Animating;
        tracing::debug!(from = self.left, to, "Started layout animation");
    }

    /// Evaluate only the transition relevant to the current collapsed
    /// flag. The untaken direction is not examined, which is what keeps
    /// near-threshold input from oscillating.
    fn apply_hysteresis(&mut self, sizes: [f32; 2], now: Instant) {
        if self.container_width <= 0.0 {
            return;
        }
        let left_px = self.container_width * sizes[0] / 100.0;

        if !self.collapsed && left_px < COLLAPSE_THRESHOLD_PX {
            self.collapsed = true;
            self.left = COLLAPSED_SIZES[0];
            self.reflow_at = Some(now + REFLOW_DELAY);
            tracing::debug!(left_px, "Collapsed viewer pane");
        } else if self.collapsed && left_px > COLLAPSE_THRESHOLD_PX {
            self.collapsed = false;
            self.last_open = sizes;
            self.left = sizes[0];
            self.reflow_at = Some(now + REFLOW_DELAY);
            tracing::debug!(left_px, "Expanded viewer pane");
        } else if self.collapsed {
            // The collapsed split is fixed; dragging below the
            // threshold does not move it.
            self.left = COLLAPSED_SIZES[0];
        }
    }
}

impl Default for LayoutController {
    fn default() -> Self {
        Self::new()
    }
}
