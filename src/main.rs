//! Quadrant MCP Server - Main Entry Point
//!
//! This is the main entry point for the quadrant MCP server application.
//! The actual implementation is in the `quadrant_mcp` library.

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use quadrant_mcp::{Config, MemoryStorage, QuadrantServerHandler, TaskRepository, TomlStorage};

/// Quadrant MCP Server - Eisenhower Matrix task prioritization via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task data file
    file: String,

    /// Path to a TOML config file (log_level, keywords)
    #[arg(long)]
    config: Option<String>,

    /// Log level: trace, debug, info, warn, error (overrides the config file)
    #[arg(long)]
    log_level: Option<String>,

    /// Keep tasks in memory only; FILE is ignored
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        // No arguments provided, show help and exit with error code
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!(); // Add a newline after help
        std::process::exit(2);
    }

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    quadrant_mcp::logging::init_logging(&config.log_level).map_err(|e| anyhow!(e))?;

    let storage: Box<dyn TaskRepository> = if args.in_memory {
        log::info!("Using in-memory storage");
        Box::new(MemoryStorage::new())
    } else {
        Box::new(TomlStorage::new(&args.file))
    };

    let handler = QuadrantServerHandler::with_repository(storage, config.keywords)?;
    serve_stdio(handler).await?;
    Ok(())
}
