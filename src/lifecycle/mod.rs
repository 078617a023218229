//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Metrics → Controller → Config watcher → Panel listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → panel drains, watcher task exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)
//! - An in-flight trigger sequence is not cancelled by shutdown

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
