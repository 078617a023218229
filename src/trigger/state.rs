//! Trigger control state and labels.
//!
//! # States
//! - Idle: control enabled, ready label
//! - Firing: probe in flight, control disabled
//! - Succeeded / Failed: result label shown for the dwell time, control disabled
//!
//! # State Transitions
//! ```text
//! Idle → Firing: accepted activation
//! Firing → Succeeded: a candidate matched
//! Firing → Failed: every candidate missed, or the probe faulted
//! Succeeded | Failed → Idle: after dwell
//! ```

use serde::Serialize;

use crate::probe::{CandidateEndpoint, CandidateMiss};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    Idle,
    Firing,
    Succeeded,
    Failed,
}

impl TriggerState {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerState::Idle => "idle",
            TriggerState::Firing => "firing",
            TriggerState::Succeeded => "succeeded",
            TriggerState::Failed => "failed",
        }
    }

    /// Only an idle control accepts activation.
    pub fn accepts_activation(self) -> bool {
        self == TriggerState::Idle
    }
}

impl std::fmt::Display for TriggerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the control currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub state: TriggerState,
    pub label: String,
    pub enabled: bool,
}

impl ButtonView {
    /// Enabled control showing the ready label.
    pub fn idle(labels: &ButtonLabels) -> Self {
        Self {
            state: TriggerState::Idle,
            label: labels.ready.to_string(),
            enabled: true,
        }
    }
}

/// How one accepted activation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerResult {
    /// A candidate matched.
    Hit(CandidateEndpoint),
    /// Every candidate missed.
    Exhausted(Vec<CandidateMiss>),
    /// The probe itself failed (bad request URL, panicked task).
    Fault(String),
}

impl TriggerResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, TriggerResult::Hit(_))
    }

    pub fn final_state(&self) -> TriggerState {
        if self.is_hit() {
            TriggerState::Succeeded
        } else {
            TriggerState::Failed
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TriggerResult::Hit(_) => "hit",
            TriggerResult::Exhausted(_) => "exhausted",
            TriggerResult::Fault(_) => "fault",
        }
    }
}

/// Label text for each step of the choreography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonLabels {
    pub ready: &'static str,
    pub firing: &'static str,
    pub hit: &'static str,
    pub failed: &'static str,
    pub connection_error: &'static str,
}

impl ButtonLabels {
    pub fn new(compact: bool) -> Self {
        Self {
            ready: if compact { "🔥 FIRE" } else { "🔥 TRIGGER TARGET" },
            firing: "💥 FIRING...",
            hit: "✅ TARGET HIT!",
            failed: "❌ TRIGGER FAILED",
            connection_error: "❌ CONNECTION ERROR",
        }
    }

    pub fn for_result(&self, result: &TriggerResult) -> &'static str {
        match result {
            TriggerResult::Hit(_) => self.hit,
            TriggerResult::Exhausted(_) => self.failed,
            TriggerResult::Fault(_) => self.connection_error,
        }
    }
}

impl Default for ButtonLabels {
    fn default() -> Self {
        Self::new(false)
    }
}
