//! Control panel: the HTTP face of the trigger.
//!
//! # Data Flow
//! ```text
//! POST /api/trigger
//!     → handlers.rs (activate controller)
//!     → 202 Accepted | 409 Conflict with the current view
//!
//! GET /api/trigger     → current ButtonView from the watch channel
//! GET /api/candidates  → current probe plan
//! GET /health          → liveness
//! ```

pub mod handlers;
pub mod server;

pub use server::{PanelServer, PanelState};
