//! Quotewise CLI
//!
//! Main entry point for the quotewise command-line tool.
//! Chunks parsed quote documents and compares extracted quotes side by side.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ChunkCommand, CompareCommand};
use quotewise_core::{
    config::AppConfig,
    logging::{self, LogFormat},
    AppResult,
};
use std::path::PathBuf;

/// Quotewise - insurance quote chunking and comparison
#[derive(Parser, Debug)]
#[command(name = "quotewise")]
#[command(about = "Chunk quote documents and compare insurance quotes", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a markdown document into retrieval chunks
    Chunk(ChunkCommand),

    /// Compare extracted quotes side by side
    Compare(CompareCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Defaults, environment and .quotewise/config.yaml
    let mut config = AppConfig::load()?;

    // An explicit --config file is merged on top
    if let Some(path) = &cli.config {
        config = config.merge_yaml(path)?;
    }

    let config = config.with_overrides(cli.config, cli.log_level, cli.verbose, cli.no_color);
    config.validate()?;

    logging::init_logging(
        config.log_level.as_deref(),
        config.no_color,
        LogFormat::parse(&config.log_format)?,
    )?;

    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Chunking settings: {:?}", config.chunking);
    tracing::debug!("Comparison settings: {:?}", config.comparison);

    let command_name = match &cli.command {
        Commands::Chunk(_) => "chunk",
        Commands::Compare(_) => "compare",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Chunk(cmd) => cmd.execute(&config).await,
        Commands::Compare(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
