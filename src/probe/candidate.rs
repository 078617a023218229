//! Candidate endpoints and the built-in candidate sets.
//!
//! Each set is an ordered guess at how the device firmware names its
//! actuator. Order is priority: the first candidate that answers 2xx wins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method used for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One guessed (path, method) pair for the remote actuator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateEndpoint {
    /// Path appended to the device base URL (e.g., "/switch/test_button/turn_on").
    pub path: String,

    /// Method to send.
    pub method: Method,
}

impl CandidateEndpoint {
    pub fn new(path: impl Into<String>, method: Method) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, Method::Post)
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, Method::Get)
    }
}

impl fmt::Display for CandidateEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

const TEST_BUTTON_POST: &[&str] = &[
    "/switch/test_button/turn_on",
    "/switch/test_button/toggle",
    "/api/switch/test_button/turn_on",
    "/api/switch/test_button/toggle",
    "/switch/test_button",
    "/button/test_button/press",
    "/api/button/test_button/press",
];

const TARGET_HIT_POST: &[&str] = &[
    "/switch/__test_target_hit/turn_on",
    "/switch/__test_target_hit/toggle",
    "/api/switch/__test_target_hit/turn_on",
    "/switch/test_button/turn_on",
    "/button/__test_target_hit/press",
    "/switch/relay_1/turn_on",
    "/api/switch/test_button/turn_on",
    "/api/switch/test_button/toggle",
];

// Older firmware only accepts GET on the switch routes.
const GET_FALLBACK: &[&str] = &["/switch/test_button/turn_on", "/switch/test_button/toggle"];

/// Built-in candidate lists, one per known firmware naming scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSet {
    /// Actuator exposed under its `test_button` id.
    #[default]
    TestButton,
    /// Actuator exposed under the `__test_target_hit` entity name.
    TargetHit,
}

impl CandidateSet {
    /// The ordered candidates for this set: POST guesses, then GET fallbacks.
    pub fn candidates(self) -> Vec<CandidateEndpoint> {
        let posts = match self {
            CandidateSet::TestButton => TEST_BUTTON_POST,
            CandidateSet::TargetHit => TARGET_HIT_POST,
        };
        posts
            .iter()
            .map(|path| CandidateEndpoint::post(*path))
            .chain(GET_FALLBACK.iter().map(|path| CandidateEndpoint::get(*path)))
            .collect()
    }
}
