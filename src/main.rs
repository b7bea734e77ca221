use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "termlaunch")]
#[command(about = "Launch AI coding assistants inside your favorite terminal or editor")]
#[command(version)]
struct Cli {
    /// Path to the workspace (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to .termlaunch/config.toml in the workspace)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the assistant in the configured application
    Launch {
        /// Launch into this application instead of the configured one
        #[arg(long)]
        app: Option<String>,
    },

    /// List supported applications and whether they are installed
    Apps {
        /// Drop cached detection results and probe again
        #[arg(long)]
        refresh: bool,
    },

    /// Check the assistant installation and the configuration
    Doctor,

    /// Initialize a new .termlaunch/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Determine the working directory
    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Commands::Launch { app }) => {
            cli::launch::launch_command(&work_dir, cli.config.as_deref(), app.as_deref()).await?;
        }
        Some(Commands::Apps { refresh }) => {
            cli::apps::apps_command(refresh).await?;
        }
        Some(Commands::Doctor) => {
            cli::doctor::doctor_command(&work_dir, cli.config.as_deref()).await?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, force).await?;
        }
        None => {
            // Default: launch with the configured application
            cli::launch::launch_command(&work_dir, cli.config.as_deref(), None).await?;
        }
    }

    Ok(())
}
