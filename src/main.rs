//! Scout CLI - interactive web search assistant
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use anyhow::Result;
use clap::{Parser, Subcommand};
use scout::{Config, GeminiClient, Repl, SearchClient};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scout")]
#[command(author, version, about = "Interactive CLI for web search with Gemini-powered summarisation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive search session
    Search {
        /// Override the configured Gemini model
        #[arg(long)]
        model: Option<String>,

        /// Override the configured result count (1-10)
        #[arg(long)]
        max_results: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Credentials are checked up front so a misconfigured environment
    // fails before any prompt is shown.
    let mut config = Config::load()?;

    match cli.command {
        Commands::Search { model, max_results } => {
            if let Some(model) = model {
                config.agent.model = model;
            }
            if let Some(n) = max_results {
                config.search.max_results = n;
            }

            let search = SearchClient::new(
                config.credentials.search_api_key.clone(),
                config.credentials.search_engine_id.clone(),
                config.search.max_results,
            )?;
            let gemini = GeminiClient::new(
                config.credentials.gemini_api_key.clone(),
                config.agent.model.clone(),
            )?;

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut repl = Repl::new(stdin.lock(), stdout.lock(), &search, &gemini);
            repl.run().await?;
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so user-facing stdout survives redirection.
fn init_tracing(verbose: bool) {
    let default = if verbose { "scout=debug" } else { "scout=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
