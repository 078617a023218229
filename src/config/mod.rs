//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TriggerConfig (validated, immutable)
//!     → ProbePlan handed to the trigger controller
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config, re-applying CLI device overrides
//!     → validation.rs validates
//!     → controller swaps its ProbePlan atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config_with, ConfigError};
pub use schema::ControllerConfig;
pub use schema::DeviceConfig;
pub use schema::DeviceOverrides;
pub use schema::ObservabilityConfig;
pub use schema::PanelConfig;
pub use schema::ProbeConfig;
pub use schema::TriggerConfig;
