//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Prober and controller produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Per-attempt detail at debug, outcomes at info/warn, faults at error
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;
