//! AWX CLI
//!
//! Command-line interface for launching AWX templates and watching the
//! jobs they start.

mod commands;
mod config;
mod output;

use std::time::Duration;

use anyhow::Result;
use awx_client::ClientConfig;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "awx")]
#[command(about = "AWX template launcher and job watcher", long_about = None)]
struct Cli {
    /// AWX server URL
    #[arg(long, env = "AWX_HOST", default_value = "http://localhost:8052")]
    host: String,

    /// Timeout of a single HTTP request, in seconds
    #[arg(long, env = "AWX_REQUEST_TIMEOUT", default_value_t = 30)]
    request_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "awx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        client: ClientConfig::new(cli.host)
            .with_request_timeout(Duration::from_secs(cli.request_timeout)),
    };

    handle_command(cli.command, &config).await
}
