//! Replica Tuner
//!
//! Closed-loop controller that scales a Helm chart through git.
//!
//! # Architecture Overview
//!
//! ```text
//!     ┌────────────┐  PromQL   ┌─────────┐
//!     │ Prometheus │◀──────────│  usage  │
//!     └────────────┘           └────┬────┘
//!                                   │ sample
//!                                   ▼
//!                            ┌─────────────┐
//!                            │   control   │  usage > threshold ?
//!                            │ (cycle loop)│
//!                            └──┬───────┬──┘
//!                     breach    │       │  every cycle
//!                               ▼       ▼
//!                        ┌─────────┐  ┌───────────────┐
//!                        │  chart  │  │ sleep(interval)│
//!                        │ +1 repl │  └───────────────┘
//!                        └────┬────┘
//!                             ▼
//!                        ┌─────────┐   add / commit / push   ┌────────┐
//!                        │ publish │────────────────────────▶│  git   │
//!                        └─────────┘                          └────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use replica_tuner::config::load_or_default;
use replica_tuner::observability::{self, logging};
use replica_tuner::{lifecycle, Controller, Shutdown};

#[derive(Parser)]
#[command(name = "replica-tuner")]
#[command(about = "Scale a chart's replicaCount when workload CPU exceeds a threshold", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Config is loaded before logging so its level can seed the filter.
    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    logging::init(&config.observability.log_level);
    tracing::info!("replica-tuner v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        prometheus_url = %config.metrics.prometheus_url,
        target = %config.metrics.target,
        threshold = config.threshold,
        interval_secs = config.interval_secs,
        values = %config.chart.values_path().display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: std::net::SocketAddr = config.observability.metrics_address.parse()?;
        observability::metrics::init_metrics(addr)?;
    }

    let controller = Controller::from_config(&config)?;

    if cli.once {
        let report = controller.run_cycle().await;
        tracing::info!(
            usage = report.usage,
            breached = report.breached,
            mutated = report.mutated(),
            "Single cycle complete"
        );
        return Ok(());
    }

    let shutdown = Shutdown::new();
    let loop_shutdown = shutdown.subscribe();

    tokio::select! {
        _ = controller.run(loop_shutdown) => {}
        _ = async {
            lifecycle::signals::shutdown_signal().await;
            shutdown.trigger();
            std::future::pending::<()>().await
        } => {}
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
