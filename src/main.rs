//! CLI for the contest handler
//!
//! Loads configuration, wires the reference engine into a router and serves
//! the contest server until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use plista_challenge::config::{DEFAULT_CONFIG_PATH, Settings, load_config_from};
use plista_challenge::engine::{RecentItemsEngine, Recommender};
use plista_challenge::router::Router;
use plista_challenge::transport::start_http_server;
use plista_challenge::utils::logging;
use tracing::{error, info, info_span};

#[derive(Parser)]
#[command(name = "plista-challenge", version, about = "plista contest message handler")]
struct Cli {
    /// Configuration file (extension optional)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level, overrides `logging.level` from the configuration
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let settings = match load_config_from(&cli.config) {
        Ok(settings) => settings,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    logging::init(cli.log_level.as_deref().unwrap_or(&settings.logging.level));

    if let Err(e) = run_server(settings).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let engine: Arc<dyn Recommender> = Arc::new(RecentItemsEngine::new(settings.engine.clone()));
    let router = Router::new(engine, info_span!("router"));

    tokio::select! {
        result = start_http_server(&addr, router, settings.server.max_body_bytes) => {
            result.with_context(|| format!("HTTP server on {addr} stopped"))?;
            error!("HTTP server exited unexpectedly.");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
        }
    }

    Ok(())
}
