//! CLI entry-point for fetching WHO health indicators.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::who::{self, WhoClient},
};

/// Fetch the indicator batch for one country.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// ISO3 country code (defaults to the configured country).
    #[arg(long)]
    pub country: Option<String>,
    /// Print the GHO dimension catalog instead of indicator data.
    #[arg(long)]
    pub dimensions: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let country = args
        .country
        .unwrap_or_else(|| settings.default_country.clone());
    let client = WhoClient::from_settings(&settings)?;

    if args.dimensions {
        let dimensions = client.dimensions().await;
        info!(count = dimensions.len(), "dimension catalog fetched");
        println!("{}", serde_json::to_string_pretty(&dimensions)?);
        return Ok(());
    }

    let results = who::collect_health_data(&client, &country).await;
    let succeeded = results.iter().filter(|r| r.success).count();
    info!(%country, succeeded, total = results.len(), "indicator batch complete");
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
