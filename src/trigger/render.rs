//! Rendering port for the trigger control.
//!
//! The controller is the only caller; whatever hosts the control (panel,
//! terminal, tests) implements `RenderPort`.

use std::sync::Arc;

use tokio::sync::watch;

use crate::trigger::state::ButtonView;

pub trait RenderPort: Send + Sync + 'static {
    fn set_state(&self, view: &ButtonView);
}

impl<R: RenderPort> RenderPort for Arc<R> {
    fn set_state(&self, view: &ButtonView) {
        (**self).set_state(view)
    }
}

/// Publishes the latest view on a watch channel.
#[derive(Debug)]
pub struct WatchRenderer {
    tx: watch::Sender<ButtonView>,
}

impl WatchRenderer {
    pub fn new(initial: ButtonView) -> (Self, watch::Receiver<ButtonView>) {
        let (tx, rx) = watch::channel(initial);
        (Self { tx }, rx)
    }
}

impl RenderPort for WatchRenderer {
    fn set_state(&self, view: &ButtonView) {
        // send_replace keeps the value even with no receivers
        self.tx.send_replace(view.clone());
    }
}

/// Writes each view change to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRenderer;

impl RenderPort for LogRenderer {
    fn set_state(&self, view: &ButtonView) {
        tracing::info!(
            state = %view.state,
            label = %view.label,
            enabled = view.enabled,
            "Trigger control updated"
        );
    }
}
