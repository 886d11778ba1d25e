//! HTTP Server Binary for the CASPER Studio API
//!
//! Serves result files of a CASPER checkout and runs its execution script on request.
//!
//! Usage:
//!   cargo run --bin http_server -- --host 0.0.0.0 --port 4000 --root /opt/casper

use casper_studio::{config::StudioConfig, http::start_server};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "CASPER Studio HTTP Server")]
#[command(about = "HTTP API server for CASPER solver results", long_about = None)]
struct Args {
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    #[arg(short, long, env = "PORT", default_value = "4000")]
    port: u16,

    /// CASPER checkout holding app/, results/ and execution/ (default: parent of the working directory)
    #[arg(short, long, env = "CASPER_ROOT")]
    root: Option<PathBuf>,

    /// Execution script to run instead of <root>/execution/run_casper.sh
    #[arg(long, env = "CASPER_SCRIPT")]
    script: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = StudioConfig::from_root(args.root.unwrap_or_else(StudioConfig::default_root));
    if let Some(script) = args.script {
        config = config.with_execution_script(script);
    }

    let addr = format!("{}:{}", args.host, args.port);
    info!("Starting HTTP server...");

    // Set up graceful shutdown
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received, stopping server...");
    };

    // Run server with graceful shutdown
    tokio::select! {
        result = start_server(&addr, &config) => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal => {
            info!("Server shut down gracefully");
        }
    }

    Ok(())
}
