//! Process entry point.
//!
//! Startup order: parse CLI → load and validate config → initialize logging
//! → bind the listener → register activities → wire signal handling → run
//! the coordinator → map its disposition to the process exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use service_runner::config;
use service_runner::http::ServerActivity;
use service_runner::lifecycle::{signals, BuildInfo, Coordinator};
use service_runner::observability;
use service_runner::worker::WorkerActivity;

#[derive(Parser)]
#[command(name = "service-runner")]
#[command(about = "Long-running service skeleton: health endpoint and periodic worker", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Environment variables override file values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which activities to run.
    #[arg(long, value_enum, default_value_t = Mode::All)]
    mode: Mode,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// HTTP server and periodic worker together.
    All,
    /// HTTP server only.
    Server,
    /// Periodic worker only.
    Worker,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Startup errors are fatal before any activity runs.
    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("service-runner: {err}");
            return ExitCode::from(1);
        }
    };

    observability::init_logging(&config.observability);

    tracing::info!(
        mode = ?cli.mode,
        database_host = %config.database.host,
        database_name = %config.database.database,
        redis_address = %config.redis.address(),
        "Configuration loaded"
    );

    let mut coordinator = Coordinator::new(config.shutdown.grace_period(), BuildInfo::from_crate());

    if matches!(cli.mode, Mode::All | Mode::Server) {
        let server = match ServerActivity::bind(&config.server).await {
            Ok(server) => server,
            Err(err) => {
                tracing::error!(error = %err, "Failed to bind HTTP listener");
                return ExitCode::from(1);
            }
        };
        coordinator.register(server);
    }
    if matches!(cli.mode, Mode::All | Mode::Worker) {
        coordinator.register(WorkerActivity::new(&config.worker));
    }

    signals::trigger_on_termination(coordinator.shutdown_handle());

    let report = coordinator.run().await;
    ExitCode::from(report.disposition.exit_code())
}
