//! Trigger control subsystem.
//!
//! # Data Flow
//! ```text
//! Activation (panel POST, CLI fire)
//!     → controller.rs (Idle → Firing, spawn sequence)
//!     → probe::EndpointProber (one pass over the plan)
//!     → state.rs (Succeeded | Failed, result label)
//!     → render.rs (RenderPort shows each view)
//!     → after dwell: Idle
//! ```

pub mod controller;
pub mod render;
pub mod state;

pub use controller::{Activation, ProbePlan, TriggerController};
pub use render::{LogRenderer, RenderPort, WatchRenderer};
pub use state::{ButtonLabels, ButtonView, TriggerResult, TriggerState};
