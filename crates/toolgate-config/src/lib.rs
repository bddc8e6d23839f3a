//! Configuration models and layered config loading.
//!
//! This crate owns the Toolgate config schema, validation, environment
//! overrides, and layer-merging logic used by the server and CLI.

mod env;
mod error;
mod loader;
mod model;

/// Environment variable names recognised as overrides.
pub use env::{
    ENV_DATABASE_PATH, ENV_KB_FAILURE_RATE, ENV_LOG_LEVEL, ENV_MOCK_MODE, ENV_PORT,
};
/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Layered config types and loader options.
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
/// Configuration schema models.
pub use model::*;
