//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the trigger.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::probe::candidate::{CandidateEndpoint, CandidateSet};

/// Root configuration for the trigger.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TriggerConfig {
    /// Remote device location.
    pub device: DeviceConfig,

    /// Candidate endpoints and per-candidate limits.
    pub probe: ProbeConfig,

    /// Trigger state machine presentation.
    pub controller: ControllerConfig,

    /// Control panel listener.
    pub panel: PanelConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote device configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device hostname or IP address (e.g., "target-ab12.local").
    pub host: String,

    /// Device web port. Omitted from the base URL when 80.
    pub port: u16,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 80,
        }
    }
}

impl DeviceConfig {
    /// Build `http://<host>[:<port>]` for this device.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        if self.port == 80 {
            Url::parse(&format!("http://{}", self.host))
        } else {
            Url::parse(&format!("http://{}:{}", self.host, self.port))
        }
    }
}

/// Command-line replacements for `[device]`, re-applied on every reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl DeviceOverrides {
    pub fn apply(&self, config: &mut TriggerConfig) {
        if let Some(host) = &self.host {
            config.device.host = host.clone();
        }
        if let Some(port) = self.port {
            config.device.port = port;
        }
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Built-in candidate list to use when `candidates` is empty.
    pub candidate_set: CandidateSet,

    /// Explicit candidate list. Overrides `candidate_set` when non-empty.
    pub candidates: Vec<CandidateEndpoint>,

    /// Optional deadline for a single candidate attempt in milliseconds.
    /// Absent means the transport default applies.
    pub candidate_timeout_ms: Option<u64>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            candidate_set: CandidateSet::TestButton,
            candidates: Vec::new(),
            candidate_timeout_ms: None,
        }
    }
}

impl ProbeConfig {
    /// The ordered candidates this configuration resolves to.
    pub fn resolved_candidates(&self) -> Vec<CandidateEndpoint> {
        if self.candidates.is_empty() {
            self.candidate_set.candidates()
        } else {
            self.candidates.clone()
        }
    }
}

/// Trigger controller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// How long a result label stays up before returning to idle.
    pub dwell_ms: u64,

    /// Use the short "ready" label (small screens).
    pub compact_labels: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dwell_ms: 2000,
            compact_labels: false,
        }
    }
}

/// Control panel configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Bind address (e.g., "127.0.0.1:8088").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8088".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
