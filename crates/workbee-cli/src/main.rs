//! WorkBee CLI tool.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "workbee")]
#[command(about = "WorkBee staffing engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(default_value = "workbee.kdl")]
        path: String,
    },
    /// Post jobs and let the matching simulator staff them
    Simulate {
        /// Configuration providing the roster and match delay
        #[arg(long, env = "WORKBEE_CONFIG")]
        config: Option<String>,
        /// Number of jobs to post
        #[arg(long, default_value = "5")]
        jobs: usize,
        /// Give up after this many seconds without progress
        #[arg(long, default_value = "10")]
        idle_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            commands::validate(&path)?;
        }
        Commands::Simulate {
            config,
            jobs,
            idle_secs,
        } => {
            commands::simulate::run(config.as_deref(), jobs, idle_secs).await?;
        }
    }

    Ok(())
}
