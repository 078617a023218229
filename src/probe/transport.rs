//! Outbound HTTP transport for candidate attempts.
//!
//! # Responsibilities
//! - Send one request per candidate and report the response status
//! - Encode POST candidates as an empty JSON object
//! - Classify network failures without judging the status code
//!
//! # Design Decisions
//! - The prober decides what counts as a match; the transport only reports
//! - Trait seam so the prober can run against a scripted device in tests

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::probe::candidate::Method;

/// A single outbound attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub method: Method,
    pub url: Url,
}

/// Network-level failure of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The attempt exceeded the configured per-candidate deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Connection could not be established (DNS, refused, unreachable).
    #[error("connection failed: {0}")]
    Connect(String),

    /// Any other failure while sending or reading the response.
    #[error("request failed: {0}")]
    Request(String),
}

/// Sends probe requests and returns the response status code.
pub trait Transport: Send + Sync + 'static {
    fn send(
        &self,
        request: ProbeRequest,
    ) -> impl Future<Output = Result<u16, TransportError>> + Send;
}

/// Transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Client that talks to the device directly. `HTTP_PROXY` and friends
    /// are ignored.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured client (proxy settings, connect timeout).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: ProbeRequest,
    ) -> impl Future<Output = Result<u16, TransportError>> + Send {
        let builder = match request.method {
            Method::Get => self.client.get(request.url),
            Method::Post => self.client.post(request.url).json(&serde_json::json!({})),
        };

        async move {
            let response = builder.send().await.map_err(classify)?;
            Ok(response.status().as_u16())
        }
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}
