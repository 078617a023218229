//! Trigger control for embedded devices with an unknown actuator API.
//!
//! The prober walks an ordered list of guessed (path, method) endpoints and
//! stops at the first 2xx. The controller wraps each probe in a visible
//! idle → firing → result → idle choreography.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod panel;
pub mod probe;
pub mod trigger;

pub use config::schema::TriggerConfig;
pub use lifecycle::Shutdown;
pub use probe::{CandidateEndpoint, EndpointProber, ProbeOutcome};
pub use trigger::{Activation, TriggerController};
