//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself so that
//! editors which save by writing a temp file and renaming it over the
//! original keep triggering reloads.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config_with;
use crate::config::schema::{DeviceOverrides, TriggerConfig};

/// Reloads the config file on change and forwards valid results.
pub struct ConfigWatcher {
    path: PathBuf,
    overrides: DeviceOverrides,
    update_tx: mpsc::UnboundedSender<TriggerConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver of validated configs, each with
    /// `overrides` already applied.
    pub fn new(
        path: &Path,
        overrides: DeviceOverrides,
    ) -> (Self, mpsc::UnboundedReceiver<TriggerConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                overrides,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            overrides,
            update_tx,
        } = self;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path.file_name().map(|name| name.to_os_string());
        let reload_path = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == file_name.as_deref());
                    if !touches_config {
                        return;
                    }

                    match load_config_with(&reload_path, &overrides) {
                        Ok(config) => {
                            tracing::info!(
                                path = ?reload_path,
                                host = %config.device.host,
                                port = config.device.port,
                                "Config file reloaded"
                            );
                            let _ = update_tx.send(config);
                        }
                        Err(e) => tracing::error!(
                            path = ?reload_path,
                            error = %e,
                            "Failed to reload config, keeping current probe plan"
                        ),
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}
