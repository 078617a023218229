//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick the filter from RUST_LOG, falling back to the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Default filter directive for a configured level.
pub fn default_directive(config: &ObservabilityConfig) -> String {
    format!("target_trigger={},tower_http={}", config.log_level, config.log_level)
}

/// Install the global subscriber. Call once, from the binary.
pub fn init_logging(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(config).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_uses_configured_level() {
        let config = ObservabilityConfig {
            log_level: "debug".into(),
            ..Default::default()
        };
        assert_eq!(default_directive(&config), "target_trigger=debug,tower_http=debug");
    }
}
