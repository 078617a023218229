//! Probe results.

use thiserror::Error;

use crate::probe::candidate::CandidateEndpoint;
use crate::probe::transport::TransportError;

/// Why a candidate was eliminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    /// The device answered with a non-2xx status.
    Status(u16),
    /// The request never produced a response.
    Transport(TransportError),
}

impl MissReason {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            MissReason::Status(_) => "http_error",
            MissReason::Transport(_) => "transport_error",
        }
    }
}

impl std::fmt::Display for MissReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissReason::Status(status) => write!(f, "status {}", status),
            MissReason::Transport(e) => write!(f, "{}", e),
        }
    }
}

/// One eliminated candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMiss {
    pub endpoint: CandidateEndpoint,
    pub reason: MissReason,
}

/// Result of one full pass over the candidate list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The first candidate that answered 2xx.
    Success(CandidateEndpoint),
    /// Every candidate missed, in attempt order.
    Failure(Vec<CandidateMiss>),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }
}

/// A fault that aborts the probe loop itself rather than eliminating a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("cannot build request URL from base '{base}' and path '{path}': {reason}")]
    InvalidUrl {
        base: String,
        path: String,
        reason: String,
    },
}
