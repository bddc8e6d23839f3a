//! Toolgate command-line entry point.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};
use toolgate::eval::{self, DEFAULT_PROMPTS_PATH, DEFAULT_REPORT_DIR};
use toolgate::{build_orchestrator, init_logging, load_config, startup_log_level};
use toolgate_config::{GatewayConfig, LayeredConfigOptions};
use toolgate_server::{AppState, router, serve};

/// Command-line options for the gateway.
#[derive(Parser)]
#[command(name = "toolgate", version, about)]
struct Cli {
    /// Optional path to a toolgate.json5 config file, applied as the last layer
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Listen port override
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the tool catalog as JSON
    Tools,
    /// Run one agent query and print the result as JSON
    Run {
        query: String,
    },
    /// Run the golden prompt evaluation
    Eval {
        #[arg(long, default_value = DEFAULT_PROMPTS_PATH)]
        prompts: PathBuf,
        #[arg(long, default_value = DEFAULT_REPORT_DIR)]
        report_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let options = config_options(&cli)?;
    init_logging(&startup_log_level(&options));
    let config = load_config(options)?;
    debug!(
        "config resolved (db={}, mode={:?})",
        config.database.path, config.agent.mode
    );

    match cli.command {
        Command::Serve { port } => run_server(config, port).await,
        Command::Tools => {
            let orchestrator = build_orchestrator(&config)?;
            let tools = orchestrator.dispatcher().catalog().list();
            println!("{}", serde_json::to_string_pretty(tools)?);
            Ok(())
        }
        Command::Run { query } => {
            let orchestrator = build_orchestrator(&config)?;
            let result = orchestrator
                .run(&query)
                .await
                .context("agent run failed")?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::Eval {
            prompts,
            report_dir,
        } => run_eval(&config, &prompts, &report_dir).await,
    }
}

fn config_options(cli: &Cli) -> anyhow::Result<LayeredConfigOptions> {
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        options = options.with_runtime_path(path);
    }
    Ok(options)
}

async fn run_server(mut config: GatewayConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    let addr = config.server.socket_addr().with_context(|| {
        format!(
            "invalid listen address {}:{}",
            config.server.host, config.server.port
        )
    })?;
    let orchestrator = build_orchestrator(&config)?;
    let app = router(AppState::new(orchestrator), config.server.request_timeout());
    serve(addr, app, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
        }
    })
    .await
    .context("server failed")
}

async fn run_eval(
    config: &GatewayConfig,
    prompts: &Path,
    report_dir: &Path,
) -> anyhow::Result<()> {
    let cases = eval::load_cases(prompts)?;
    let orchestrator = build_orchestrator(config)?;
    println!("Running {} evaluation cases...", cases.len());

    let report = eval::run_cases(&orchestrator, &cases).await?;
    for case in &report.cases {
        let verdict = match &case.outcome {
            eval::CaseOutcome::Failed { error } => format!("ERROR: {error}"),
            _ if case.success => "PASS".to_string(),
            _ => "FAIL".to_string(),
        };
        println!("Testing: {} ... {}", case.prompt, verdict);
    }

    let path = eval::write_report(&report, report_dir, chrono::Local::now())?;
    println!("\nEvaluation Complete. Report saved to {}", path.display());
    println!("Passed: {}/{}", report.passed(), report.total());
    if report.failures() > 0 {
        bail!("{} evaluation case(s) failed", report.failures());
    }
    Ok(())
}
