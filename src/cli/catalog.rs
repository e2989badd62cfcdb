//! CLI entry-point for dumping the aggregated drug catalog.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    data::{aggregate::Aggregator, store::PostgrestStore},
};

/// Print the catalog the dashboard would receive.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Restrict output to one category instead of the full catalog.
    #[arg(long)]
    pub category: Option<String>,
    /// Search term; with no term the full listing is printed.
    #[arg(long)]
    pub term: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let configured = settings.is_store_configured();
    let store = PostgrestStore::from_settings(&settings)?;
    let aggregator = Aggregator::new(store, configured);

    let listing = match &args.term {
        Some(term) => {
            aggregator
                .search_drugs(term, args.category.as_deref())
                .await
        }
        None => aggregator.drug_prices().await,
    };

    info!(origin = ?listing.origin, drugs = listing.data.len(), "catalog assembled");
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
