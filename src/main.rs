mod cli;
mod commands;
mod conflict;
mod error;
mod mcp;
mod page_range;
mod pdf;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stderr only: stdout carries the MCP transport
    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .target(env_logger::Target::Stderr)
        .init();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path)?;
        }
        Commands::Pages { path, pages } => {
            commands::pages::run(&path, &pages)?;
        }
        Commands::Extract {
            path,
            pages,
            output,
            conflict,
        } => {
            commands::extract::run(&path, &pages, &output, &conflict)?;
        }
        Commands::Split {
            path,
            pages_per_file,
            output,
            conflict,
        } => {
            commands::split::run(&path, pages_per_file, output.as_deref(), &conflict)?;
        }
    }

    Ok(())
}
