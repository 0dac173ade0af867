use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use veille::config::Config;
use veille::server::ReportServer;

/// Consumer sector search-interest sentiment service
#[derive(Parser)]
#[command(name = "veille", version, about, long_about = None)]
struct Cli {
    /// Bind host (overrides VEILLE_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides VEILLE_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Minimum delay between sector fetches, in seconds
    #[arg(long, default_value = "2")]
    pause_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, default_value = "text")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    tracing::info!("veille sentiment service starting");

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.bind_address = format!("{host}:{}", config.bind_address.port()).parse()?;
    }
    if let Some(port) = cli.port {
        config.bind_address.set_port(port);
    }
    config.pause_secs = cli.pause_secs;

    let server = ReportServer::new(config)?;

    println!("{}", server.info().display());
    println!();
    println!("Endpoints:");
    println!("  GET /               - Service status");
    println!("  GET /health         - Health check");
    println!("  GET /generate       - Run the pipeline, JSON report");
    println!("  GET /generate/xlsx  - Run the pipeline, Excel download");
    println!();
    println!("Press Ctrl+C to stop.");

    server
        .start_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await?;

    tracing::info!("veille stopped");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("veille=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("veille=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
