//! Scripted transport for unit tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;

use crate::probe::candidate::Method;
use crate::probe::transport::{ProbeRequest, Transport, TransportError};

/// Replies per (method, path); unscripted routes answer 404.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    replies: Arc<HashMap<(Method, String), Result<u16, TransportError>>>,
    sent: Arc<Mutex<Vec<ProbeRequest>>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedTransport {
    pub(crate) fn new(replies: Vec<(Method, &str, Result<u16, TransportError>)>) -> Self {
        let replies = replies
            .into_iter()
            .map(|(method, path, reply)| ((method, path.to_string()), reply))
            .collect();
        Self {
            replies: Arc::new(replies),
            sent: Arc::default(),
            gate: None,
        }
    }

    /// Hold every request until a permit is added to the returned semaphore.
    pub(crate) fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub(crate) fn sent(&self) -> Vec<ProbeRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        request: ProbeRequest,
    ) -> impl Future<Output = Result<u16, TransportError>> + Send {
        let reply = self
            .replies
            .get(&(request.method, request.url.path().to_string()))
            .cloned()
            .unwrap_or(Ok(404));
        let sent = self.sent.clone();
        let gate = self.gate.clone();

        async move {
            sent.lock().unwrap().push(request);
            if let Some(gate) = gate {
                gate.acquire().await.unwrap().forget();
            }
            reply
        }
    }
}
