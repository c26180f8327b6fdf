use std::path::PathBuf;
use std::process;

use clap::Parser;
use tokio::net::TcpListener;

use algoforge::config::{load_config, GatewayConfig};
use algoforge::http::HttpServer;
use algoforge::observability;

#[derive(Debug, Parser)]
#[command(name = "algoforge", about = "Ledger dapp gateway", version)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("failed to load {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => GatewayConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "algoforge starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        node = %config.algod.url,
        app_id = config.contract.app_id,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let bind_address = config.listener.bind_address.clone();
    let server = match HttpServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build server");
            process::exit(1);
        }
    };

    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(address = %bind_address, error = %e, "Failed to bind");
            process::exit(1);
        }
    };

    if let Err(e) = server.run(listener).await {
        tracing::error!(error = %e, "Server error");
        process::exit(1);
    }

    tracing::info!("Shutdown complete");
}
