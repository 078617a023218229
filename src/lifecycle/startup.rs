//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the prober and controller from configuration
//! - Start the metrics exporter and config watcher when configured
//! - Bind the control panel and run it until a shutdown signal

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};

use crate::config::watcher::ConfigWatcher;
use crate::config::{DeviceOverrides, ProbeConfig, TriggerConfig};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::wait_for_shutdown_signal;
use crate::observability::metrics;
use crate::panel::{PanelServer, PanelState};
use crate::probe::{EndpointProber, HttpTransport, Transport};
use crate::trigger::{ButtonLabels, ButtonView, ProbePlan, RenderPort, TriggerController, WatchRenderer};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("device client setup failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid device base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),

    #[error("metrics exporter failed: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("config watcher failed: {0}")]
    Watch(#[from] notify::Error),
}

/// Prober over HTTP with the configured per-candidate deadline.
pub fn build_prober(config: &ProbeConfig) -> Result<EndpointProber<HttpTransport>, StartupError> {
    Ok(EndpointProber::new(HttpTransport::new()?)
        .with_candidate_timeout(config.candidate_timeout_ms.map(Duration::from_millis)))
}

/// Controller rendering into a watch channel, plus the panel state around it.
pub fn build_panel_state(
    config: &TriggerConfig,
) -> Result<PanelState<HttpTransport, WatchRenderer>, StartupError> {
    let plan = ProbePlan::from_config(config)?;
    let labels = ButtonLabels::new(config.controller.compact_labels);
    let (renderer, view) = WatchRenderer::new(ButtonView::idle(&labels));
    let controller =
        TriggerController::new(build_prober(&config.probe)?, renderer, plan, &config.controller);
    Ok(PanelState { controller, view })
}

/// Feed reloaded configs into the controller until shutdown.
pub async fn apply_config_updates<T: Transport, R: RenderPort>(
    controller: TriggerController<T, R>,
    mut updates: mpsc::UnboundedReceiver<TriggerConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else { break };
                match ProbePlan::from_config(&config) {
                    Ok(plan) => {
                        tracing::debug!(previous = %controller.plan().base_url, "Replacing probe plan");
                        controller.update_plan(plan);
                    }
                    Err(e) => tracing::error!(error = %e, "Reloaded config has an invalid base URL"),
                }
            }
            _ = shutdown.recv() => break,
        }
    }
    tracing::debug!("Config update task exiting");
}

/// Run the control panel until SIGINT/SIGTERM.
///
/// `overrides` are the command-line device settings already applied to
/// `config`; the watcher re-applies them to every reloaded file.
pub async fn serve(
    config: TriggerConfig,
    config_path: Option<PathBuf>,
    overrides: DeviceOverrides,
) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let state = build_panel_state(&config)?;
    let shutdown = Shutdown::new();

    // Dropping the watcher handle stops notifications, so keep it for the whole run.
    let _watcher = match config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(&path, overrides);
            let handle = watcher.run()?;
            tokio::spawn(apply_config_updates(
                state.controller.clone(),
                updates,
                shutdown.subscribe(),
            ));
            Some(handle)
        }
        None => None,
    };

    let plan = state.controller.plan();
    tracing::info!(
        base_url = %plan.base_url,
        candidates = plan.candidates.len(),
        dwell_ms = config.controller.dwell_ms,
        "Trigger controller ready"
    );

    let listener = TcpListener::bind(&config.panel.bind_address).await?;
    let server = PanelServer::new(state, &config.panel);

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        signal_shutdown.trigger();
    });

    server.run(listener, shutdown.subscribe()).await?;
    shutdown.trigger();

    tracing::info!("Shutdown complete");
    Ok(())
}
