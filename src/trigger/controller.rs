//! Trigger controller.
//!
//! # Responsibilities
//! - Accept an activation only while idle
//! - Run exactly one probe per accepted activation on its own task
//! - Drive the control through firing, result and back to idle
//! - Swap the probe plan when configuration reloads
//!
//! # Design Decisions
//! - Activations outside Idle are dropped, not queued
//! - The Idle → Firing check-and-set happens under one lock
//! - A probe fault or panic ends in Failed like an exhausted probe,
//!   with its own label and an error log
//! - One dwell time for every result

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::task::JoinHandle;
use tokio::time;
use url::Url;

use crate::config::{ControllerConfig, TriggerConfig};
use crate::observability::metrics;
use crate::probe::{CandidateEndpoint, EndpointProber, ProbeOutcome, Transport};
use crate::trigger::render::RenderPort;
use crate::trigger::state::{ButtonLabels, ButtonView, TriggerResult, TriggerState};

/// Where to probe and what to try, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbePlan {
    pub base_url: Url,
    pub candidates: Vec<CandidateEndpoint>,
}

impl ProbePlan {
    pub fn new(base_url: Url, candidates: Vec<CandidateEndpoint>) -> Self {
        Self {
            base_url,
            candidates,
        }
    }

    pub fn from_config(config: &TriggerConfig) -> Result<Self, url::ParseError> {
        Ok(Self::new(
            config.device.base_url()?,
            config.probe.resolved_candidates(),
        ))
    }
}

/// Result of asking the controller to fire.
#[derive(Debug)]
pub enum Activation {
    /// The choreography is running; the handle resolves once it is back to idle.
    Accepted(JoinHandle<TriggerResult>),
    /// The control was not idle. Nothing was sent.
    Ignored(TriggerState),
}

impl Activation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Activation::Accepted(_))
    }
}

/// Owns the trigger state and is the prober's only caller.
pub struct TriggerController<T, R> {
    inner: Arc<Inner<T, R>>,
}

impl<T, R> Clone for TriggerController<T, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<T, R> {
    prober: Arc<EndpointProber<T>>,
    render: R,
    plan: ArcSwap<ProbePlan>,
    state: Mutex<TriggerState>,
    labels: ButtonLabels,
    dwell: Duration,
}

impl<T: Transport, R: RenderPort> TriggerController<T, R> {
    /// Create an idle controller and render its initial view.
    pub fn new(
        prober: EndpointProber<T>,
        render: R,
        plan: ProbePlan,
        config: &ControllerConfig,
    ) -> Self {
        let inner = Inner {
            prober: Arc::new(prober),
            render,
            plan: ArcSwap::from_pointee(plan),
            state: Mutex::new(TriggerState::Idle),
            labels: ButtonLabels::new(config.compact_labels),
            dwell: Duration::from_millis(config.dwell_ms),
        };
        inner.render.set_state(&inner.idle_view());

        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn state(&self) -> TriggerState {
        *self.inner.lock_state()
    }

    pub fn plan(&self) -> Arc<ProbePlan> {
        self.inner.plan.load_full()
    }

    /// Replace the plan used by future activations.
    pub fn update_plan(&self, plan: ProbePlan) {
        tracing::info!(
            base_url = %plan.base_url,
            candidates = plan.candidates.len(),
            "Probe plan updated"
        );
        self.inner.plan.store(Arc::new(plan));
    }

    /// Fire once if idle. Must be called from within a tokio runtime.
    pub fn activate(&self) -> Activation {
        {
            let mut state = self.inner.lock_state();
            if !state.accepts_activation() {
                tracing::debug!(state = %*state, "Activation ignored, trigger busy");
                metrics::record_activation(false);
                return Activation::Ignored(*state);
            }
            *state = TriggerState::Firing;
            self.inner.render.set_state(&ButtonView {
                state: TriggerState::Firing,
                label: self.inner.labels.firing.to_string(),
                enabled: false,
            });
        }

        tracing::info!("Starting trigger sequence");
        metrics::record_activation(true);
        let inner = self.inner.clone();
        Activation::Accepted(tokio::spawn(inner.run_sequence()))
    }
}

impl<T: Transport, R: RenderPort> Inner<T, R> {
    fn lock_state(&self) -> std::sync::MutexGuard<'_, TriggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn idle_view(&self) -> ButtonView {
        ButtonView::idle(&self.labels)
    }

    fn transition(&self, view: ButtonView) {
        let mut state = self.lock_state();
        *state = view.state;
        self.render.set_state(&view);
    }

    async fn run_sequence(self: Arc<Self>) -> TriggerResult {
        let plan = self.plan.load_full();
        let prober = self.prober.clone();
        let probe = tokio::spawn(async move { prober.probe(&plan.base_url, &plan.candidates).await });

        let result = match probe.await {
            Ok(Ok(ProbeOutcome::Success(endpoint))) => TriggerResult::Hit(endpoint),
            Ok(Ok(ProbeOutcome::Failure(misses))) => TriggerResult::Exhausted(misses),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Trigger probe faulted");
                TriggerResult::Fault(e.to_string())
            }
            Err(e) => {
                tracing::error!(error = %e, "Trigger probe task aborted");
                TriggerResult::Fault(e.to_string())
            }
        };

        match &result {
            TriggerResult::Hit(endpoint) => {
                tracing::info!(endpoint = %endpoint, "Target hit");
            }
            TriggerResult::Exhausted(misses) => {
                tracing::warn!(attempts = misses.len(), "Trigger failed, no candidate matched");
            }
            TriggerResult::Fault(_) => {}
        }
        metrics::record_trigger_result(result.kind());

        self.transition(ButtonView {
            state: result.final_state(),
            label: self.labels.for_result(&result).to_string(),
            enabled: false,
        });
        time::sleep(self.dwell).await;
        self.transition(self.idle_view());

        result
    }
}
