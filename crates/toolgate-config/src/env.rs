//! Environment variable overrides applied after file layers.

use crate::{AgentMode, ConfigError, GatewayConfig};
use log::{debug, warn};
use std::ffi::OsString;

/// Overrides `logging.level`.
pub const ENV_LOG_LEVEL: &str = "TOOLGATE_LOG_LEVEL";
/// Overrides `database.path`.
pub const ENV_DATABASE_PATH: &str = "TOOLGATE_DATABASE_PATH";
/// Overrides `server.port`.
pub const ENV_PORT: &str = "TOOLGATE_PORT";
/// `true` selects the heuristic agent, `false` the model-backed agent.
pub const ENV_MOCK_MODE: &str = "TOOLGATE_MOCK_MODE";
/// Overrides `tools.kb_failure_rate`.
pub const ENV_KB_FAILURE_RATE: &str = "TOOLGATE_KB_FAILURE_RATE";

impl GatewayConfig {
    /// Apply overrides from the current process environment.
    pub fn apply_process_env(&mut self) -> Result<(), ConfigError> {
        self.apply_os_env_overrides(std::env::vars_os())
    }

    /// Apply overrides from raw OS variables, skipping entries that are not UTF-8.
    pub fn apply_os_env_overrides<I>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        self.apply_env_overrides(vars.into_iter().filter_map(|(name, value)| {
            match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (Ok(name), Err(_)) => {
                    warn!("skipping non-utf8 environment value (name={name})");
                    None
                }
                (Err(_), _) => None,
            }
        }))
    }

    /// Apply overrides from an explicit set of variables.
    pub fn apply_env_overrides<I, K, V>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in vars {
            let name = name.as_ref();
            let value = value.as_ref().trim();
            match name {
                ENV_LOG_LEVEL => self.logging.level = value.to_string(),
                ENV_DATABASE_PATH => self.database.path = value.to_string(),
                ENV_PORT => {
                    self.server.port = value
                        .parse()
                        .map_err(|_| invalid_env(name, "expected port number"))?;
                }
                ENV_MOCK_MODE => {
                    self.agent.mode = if parse_bool(name, value)? {
                        AgentMode::Heuristic
                    } else {
                        AgentMode::Model
                    };
                }
                ENV_KB_FAILURE_RATE => {
                    self.tools.kb_failure_rate = value
                        .parse()
                        .map_err(|_| invalid_env(name, "expected number"))?;
                }
                _ => continue,
            }
            debug!("applied environment override (name={name})");
        }
        self.validate()
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid_env(name, "expected boolean")),
    }
}

fn invalid_env(name: &str, message: &str) -> ConfigError {
    ConfigError::InvalidEnv {
        name: name.to_string(),
        message: message.to_string(),
    }
}
