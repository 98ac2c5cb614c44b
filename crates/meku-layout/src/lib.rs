//! Meku layout controller
//!
//! Numeric state machine for the viewer/chat split pane:
//! - live drag resizing with a hysteretic pixel-width collapse rule
//! - button-triggered collapse/expand animated with a cubic
//!   ease-in-out curve, cancelled cleanly by any newer request
//! - a delayed reflow notification once a collapse/expand settles so
//!   the external renderer can re-measure its drawing surface
//!
//! Time is injected into every transition so the controller stays
//! deterministic under test.

mod controller;
mod easing;
mod phase;

pub use controller::{
    LayoutController, ANIMATION_DURATION, COLLAPSED_SIZES, COLLAPSE_THRESHOLD_PX,
    DEFAULT_OPEN_SIZES, REFLOW_DELAY,
};
pub use easing::ease_in_out_cubic;
pub use phase::LayoutPhase;
