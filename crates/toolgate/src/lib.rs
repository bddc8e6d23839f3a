//! Toolgate application crate.
//!
//! Re-exports the workspace crates and wires a loaded [`GatewayConfig`] into a
//! ready-to-serve [`Orchestrator`]. The `toolgate` binary and the eval harness
//! both start from [`build_orchestrator`].

pub mod eval;

/// Re-export for convenience.
pub use toolgate_config as config;
pub use toolgate_core as core;
/// Re-export for convenience.
pub use toolgate_protocol as protocol;
pub use toolgate_server as server;
/// Re-export for convenience.
pub use toolgate_store as store;
pub use toolgate_tools as tools;

use anyhow::Context;
use log::{debug, info};
use std::sync::Arc;
use toolgate_config::{DatabaseConfig, GatewayConfig, LayeredConfigOptions, LoggingConfig};
use toolgate_core::{Orchestrator, select_classifier};
use toolgate_store::SqliteStore;
use toolgate_tools::{KnowledgeBase, RetryPolicy, ToolDispatcher, ToolServices, builtin_catalog};

/// Initialize env_logger, using `default_level` when `RUST_LOG` is unset.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init();
}

/// Load the layered config stack, then apply process environment overrides.
pub fn load_config(options: LayeredConfigOptions) -> anyhow::Result<GatewayConfig> {
    let loaded = GatewayConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("config layers loaded (count={})", loaded.layers.len());
    let mut config = loaded.config;
    config
        .apply_process_env()
        .context("invalid environment override")?;
    Ok(config)
}

/// Log level to start the logger with, resolved before the logger exists.
///
/// Falls back to the default level when the config cannot be loaded; the
/// real load runs again afterwards and reports the failure.
pub fn startup_log_level(options: &LayeredConfigOptions) -> String {
    load_config(options.clone())
        .map(|config| config.logging.level)
        .unwrap_or_else(|_| LoggingConfig::default().level)
}

/// Open the configured database and run the seed script through the
/// bootstrap path.
pub fn open_store(config: &DatabaseConfig) -> anyhow::Result<SqliteStore> {
    let store = SqliteStore::open(&config.path)
        .with_context(|| format!("failed to open database at {}", config.path))?;
    match config.seed_path.as_deref() {
        Some(seed_path) => store
            .seed_from_path(seed_path)
            .with_context(|| format!("failed to run seed script {seed_path}"))?,
        None => store
            .seed_default()
            .context("failed to run bundled seed script")?,
    }
    Ok(store)
}

/// Tool services configured from the `tools` and `retry` sections.
pub fn tool_services(config: &GatewayConfig, store: SqliteStore) -> ToolServices {
    ToolServices::new(Arc::new(store))
        .with_knowledge(KnowledgeBase::builtin().with_failure_rate(config.tools.kb_failure_rate))
        .with_retry(RetryPolicy::new(
            config.retry.max_attempts,
            config.retry.delay(),
        ))
        .with_default_top_k(config.tools.default_top_k)
}

/// Build the orchestrator described by `config`.
pub fn build_orchestrator(config: &GatewayConfig) -> anyhow::Result<Orchestrator> {
    let store = open_store(&config.database)?;
    let services = tool_services(config, store);
    let catalog = builtin_catalog(config.tools.default_top_k)
        .context("failed to build tool catalog")?;
    let dispatcher = ToolDispatcher::new(catalog, services);
    // No model backend ships with the binary; model mode falls back to heuristics.
    let classifier =
        select_classifier(&config.agent, None).context("failed to build intent classifier")?;
    info!(
        "orchestrator ready (classifier={}, tools={})",
        classifier.name(),
        dispatcher.catalog().len()
    );
    Ok(Orchestrator::new(dispatcher, classifier))
}
