//! Switchboard CLI — the main entry point.
//!
//! Commands:
//! - `resolve` — Resolve the system prompt for a caller
//! - `demo`    — Scripted two-run walkthrough of the pipeline
//! - `config`  — Validate / show / locate configuration

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "switchboard",
    about = "Switchboard — Personalized multi-agent assistant runtime",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the system prompt for a caller
    Resolve {
        /// Caller to resolve for
        #[arg(short, long)]
        caller_id: String,

        /// Messages already in the conversation
        #[arg(short, long, default_value_t = 0)]
        message_count: u32,

        /// Seed a stored communication style before resolving
        #[arg(short, long)]
        style: Option<String>,

        /// Show which rule produced each prompt line
        #[arg(long)]
        explain: bool,
    },

    /// Run the scripted two-session pipeline demo
    Demo {
        /// Caller the demo runs as
        #[arg(short, long, default_value = "ashley-example")]
        caller_id: String,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate the configuration
    Validate,
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Resolve {
            caller_id,
            message_count,
            style,
            explain,
        } => commands::resolve::run(&caller_id, message_count, style.as_deref(), explain).await?,
        Commands::Demo { caller_id } => commands::demo::run(&caller_id).await?,
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
    }

    Ok(())
}
