//! Sequential endpoint prober.
//!
//! # Responsibilities
//! - Try each candidate once, strictly in list order
//! - Stop at the first 2xx response
//! - Record every miss (status or transport error) for diagnostics
//!
//! # Design Decisions
//! - Never fan out: each attempt may actuate the device, so at most one
//!   request is in flight and nothing after the match is sent
//! - Misses are not errors; only a request URL that cannot be built aborts
//! - No caching of the winning endpoint between probes

use std::time::{Duration, Instant};

use tokio::time;
use url::Url;

use crate::observability::metrics;
use crate::probe::candidate::CandidateEndpoint;
use crate::probe::outcome::{CandidateMiss, MissReason, ProbeError, ProbeOutcome};
use crate::probe::transport::{ProbeRequest, Transport, TransportError};

/// Resolves "activate the actuator" into at most one successful call.
#[derive(Debug)]
pub struct EndpointProber<T> {
    transport: T,
    candidate_timeout: Option<Duration>,
}

impl<T: Transport> EndpointProber<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            candidate_timeout: None,
        }
    }

    /// Bound each attempt. `None` leaves it to the transport.
    pub fn with_candidate_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.candidate_timeout = timeout;
        self
    }

    pub fn candidate_timeout(&self) -> Option<Duration> {
        self.candidate_timeout
    }

    /// Probe `candidates` against `base_url` in order.
    pub async fn probe(
        &self,
        base_url: &Url,
        candidates: &[CandidateEndpoint],
    ) -> Result<ProbeOutcome, ProbeError> {
        let started = Instant::now();
        let mut misses = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let url = candidate_url(base_url, &candidate.path)?;
            tracing::debug!(method = %candidate.method, url = %url, "Trying candidate");

            let request = ProbeRequest {
                method: candidate.method,
                url,
            };
            let result = match self.candidate_timeout {
                Some(limit) => match time::timeout(limit, self.transport.send(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(TransportError::Timeout(limit)),
                },
                None => self.transport.send(request).await,
            };

            let reason = match result {
                Ok(status) if (200..300).contains(&status) => {
                    tracing::info!(
                        method = %candidate.method,
                        path = %candidate.path,
                        status,
                        attempts = misses.len() + 1,
                        "Candidate matched"
                    );
                    metrics::record_probe_attempt("matched");
                    metrics::record_probe_outcome("success", started.elapsed());
                    return Ok(ProbeOutcome::Success(candidate.clone()));
                }
                Ok(status) => MissReason::Status(status),
                Err(e) => MissReason::Transport(e),
            };

            tracing::debug!(
                method = %candidate.method,
                path = %candidate.path,
                reason = %reason,
                "Candidate missed"
            );
            metrics::record_probe_attempt(reason.kind());
            misses.push(CandidateMiss {
                endpoint: candidate.clone(),
                reason,
            });
        }

        tracing::warn!(
            base_url = %base_url,
            attempts = misses.len(),
            "No candidate matched"
        );
        metrics::record_probe_outcome("failure", started.elapsed());
        Ok(ProbeOutcome::Failure(misses))
    }
}

/// `base_url + path`, with a single slash between them.
pub fn candidate_url(base_url: &Url, path: &str) -> Result<Url, ProbeError> {
    let joined = format!("{}{}", base_url.as_str().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| ProbeError::InvalidUrl {
        base: base_url.to_string(),
        path: path.to_string(),
        reason: e.to_string(),
    })
}
