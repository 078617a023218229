//! Endpoint probing subsystem.
//!
//! # Data Flow
//! ```text
//! ProbePlan (base URL + ordered candidates)
//!     → prober.rs (one attempt per candidate, in order)
//!     → transport.rs (HTTP request, status or transport error)
//!     → outcome.rs (Success(endpoint) | Failure(misses))
//! ```
//!
//! # Design Decisions
//! - Candidate order is priority; first 2xx wins
//! - Sequential only, at most one request in flight
//! - Every miss is kept with its reason

pub mod candidate;
pub mod outcome;
pub mod prober;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use candidate::{CandidateEndpoint, CandidateSet, Method};
pub use outcome::{CandidateMiss, MissReason, ProbeError, ProbeOutcome};
pub use prober::EndpointProber;
pub use transport::{HttpTransport, ProbeRequest, Transport, TransportError};
