//! Tests for layered configuration loading.

use super::*;
use crate::AgentMode;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// Options that only consider layers under the temp root.
fn isolated_options(root: &Path) -> LayeredConfigOptions {
    let mut options = LayeredConfigOptions::new(root);
    options.system_config_path = None;
    options.user_config_path = None;
    options
}

/// Verify that a minimal config parses with defaults.
#[test]
fn parse_minimal_config() {
    let config = GatewayConfig::load_from_str("{}").expect("config");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.retry.delay_ms, 100);
    assert_eq!(config.tools.kb_failure_rate, 0.0);
    assert_eq!(config.tools.default_top_k, 5);
    assert_eq!(config.agent.mode, AgentMode::Heuristic);
    assert_eq!(config.database.seed_path, None);
}

/// Reject unexpected top-level config keys.
#[test]
fn rejects_unknown_top_level_key() {
    let err = GatewayConfig::load_from_str(r#"{ unexpected: true }"#).unwrap_err();
    assert!(format!("{err}").contains("unknown key"));
}

/// Reject invalid agent mode values.
#[test]
fn rejects_invalid_agent_mode() {
    let err = GatewayConfig::load_from_str(r#"{ agent: { mode: "oracle" } }"#).unwrap_err();
    assert!(format!("{err}").contains("agent.mode"));
}

/// Model settings require a provider and a name.
#[test]
fn rejects_model_without_name() {
    let err =
        GatewayConfig::load_from_str(r#"{ agent: { model: { provider: "openai" } } }"#)
            .unwrap_err();
    assert!(format!("{err}").contains("agent.model.name"));
}

/// Zero retry attempts would never run the operation.
#[test]
fn rejects_zero_attempts() {
    let err = GatewayConfig::load_from_str(r#"{ retry: { max_attempts: 0 } }"#).unwrap_err();
    assert!(format!("{err}").contains("max_attempts"));
}

/// Precedence runs system -> user -> cwd -> runtime.
#[test]
fn layered_config_applies_precedence() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    let system_config = root.join("system.json5");
    write_json5(
        &system_config,
        "{ server: { host: \"127.0.0.1\", port: 7000 }, logging: { level: \"warn\" } }",
    );
    let user_config = root.join("user.json5");
    write_json5(&user_config, "{ server: { port: 7100 } }");
    write_json5(
        &cwd.join(DEFAULT_CONFIG_FILE),
        "{ server: { port: 7200 }, retry: { delay_ms: 5 } }",
    );
    let runtime_config = root.join("runtime.json5");
    write_json5(&runtime_config, "{ server: { port: 7300 } }");

    let mut options = LayeredConfigOptions::new(&cwd).with_runtime_path(&runtime_config);
    options.system_config_path = Some(system_config);
    options.user_config_path = Some(user_config);

    let layered = GatewayConfig::load_layered_with_options(options).expect("layered");
    assert_eq!(layered.layers.len(), 4);
    assert_eq!(layered.config.server.host, "127.0.0.1");
    assert_eq!(layered.config.server.port, 7300);
    assert_eq!(layered.config.logging.level, "warn");
    assert_eq!(layered.config.retry.delay_ms, 5);
}

/// Missing optional layers are skipped silently.
#[test]
fn layered_config_skips_missing_layers() {
    let temp = TempDir::new().expect("tmp");
    let layered =
        GatewayConfig::load_layered_with_options(isolated_options(temp.path())).expect("layered");
    assert!(layered.layers.is_empty());
    assert_eq!(layered.config.server.port, 8000);
}

/// A runtime layer that does not exist is an error.
#[test]
fn layered_config_requires_runtime_layers() {
    let temp = TempDir::new().expect("tmp");
    let options = isolated_options(temp.path()).with_runtime_path(temp.path().join("nope.json5"));
    let err = GatewayConfig::load_layered_with_options(options).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}

/// Schema errors name the offending layer.
#[test]
fn layer_errors_include_layer_label() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(DEFAULT_CONFIG_FILE),
        "{ tools: { kb_failure_rate: \"often\" } }",
    );
    let err = GatewayConfig::load_layered_with_options(isolated_options(temp.path())).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("));
    assert!(msg.contains("tools.kb_failure_rate"));
}
