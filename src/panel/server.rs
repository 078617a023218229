//! Control panel HTTP server.
//!
//! # Responsibilities
//! - Create the Axum Router with the trigger handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve until the shutdown broadcast fires

use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, watch};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::PanelConfig;
use crate::panel::handlers::{get_candidates, get_trigger, health, post_trigger};
use crate::probe::Transport;
use crate::trigger::{ButtonView, RenderPort, TriggerController};

/// Application state injected into handlers.
pub struct PanelState<T, R> {
    pub controller: TriggerController<T, R>,
    pub view: watch::Receiver<ButtonView>,
}

impl<T, R> Clone for PanelState<T, R> {
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            view: self.view.clone(),
        }
    }
}

/// HTTP server for the control panel.
pub struct PanelServer {
    router: Router,
}

impl PanelServer {
    pub fn new<T: Transport, R: RenderPort>(state: PanelState<T, R>, config: &PanelConfig) -> Self {
        Self {
            router: Self::build_router(state, config),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<T: Transport, R: RenderPort>(
        state: PanelState<T, R>,
        config: &PanelConfig,
    ) -> Router {
        Router::new()
            .route("/health", get(health))
            .route(
                "/api/trigger",
                get(get_trigger::<T, R>).post(post_trigger::<T, R>),
            )
            .route("/api/candidates", get(get_candidates::<T, R>))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Control panel listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Control panel stopped");
        Ok(())
    }
}
