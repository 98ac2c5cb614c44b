//! Layout sub-state
//!
//! Two code paths mutate the split sizes: live drag gestures and
//! programmatic animations. The phase makes the active one explicit;
//! a drag arriving during an animation cancels the animation and
//! takes over.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPhase {
    /// No gesture or animation in progress
    Idle,
    /// A drag gesture owns the split sizes
    Dragging,
    /// A programmatic collapse/expand interpolation owns the split sizes
    Animating,
}

impl LayoutPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPhase::Idle => "idle",
            LayoutPhase::Dragging => "dragging",
            LayoutPhase::Animating => "animating",
        }
    }
}

impl std::fmt::Display for LayoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
