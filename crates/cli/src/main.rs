//! Trellis CLI, the main entry point.
//!
//! Commands:
//! - `onboard`: write a default config file
//! - `serve`: start the chat proxy
//! - `status`: show the effective configuration
//! - `prompt`: render a task prompt from a journey outline file

use clap::{Parser, Subcommand};

mod commands;

use commands::prompt::{PromptArgs, PromptKind};

#[derive(Parser)]
#[command(
    name = "trellis",
    about = "Trellis: learning-journey prompts and LLM chat proxy",
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
    /// Write a default configuration file
    Onboard,

    /// Start the HTTP chat proxy
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the effective configuration
    Status,

    /// Render a task prompt to stdout
    Prompt {
        /// Which task prompt to render
        #[arg(value_enum)]
        kind: PromptKind,

        #[command(flatten)]
        args: PromptArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so `prompt` output can be piped.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Prompt { kind, args } => commands::prompt::run(kind, args)?,
    }

    Ok(())
}
