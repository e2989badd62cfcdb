//! Command-line interface wiring for pharmalens.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod catalog;
pub mod indicators;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Pharmaceutical market intelligence backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Catalog(args) => catalog::run(args, settings).await,
            Commands::Indicators(args) => indicators::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the dashboard JSON API.
    Serve(serve::Args),
    /// Print the aggregated drug catalog (live or demo) as JSON.
    Catalog(catalog::Args),
    /// Print WHO health-indicator results for a country as JSON.
    Indicators(indicators::Args),
}
