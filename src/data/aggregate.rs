//! Store-then-fallback orchestration.
//!
//! Each logical query walks the same path: gate check, store attempt,
//! normalize on success, demo data on misconfiguration, failure, or an empty
//! catalog. Read paths never surface an error to the caller (the site must
//! always render something); degradations are logged here and reported only
//! through the [`DataOrigin`] tag on the result. The two exceptions are drug
//! details and profile writes, where no substitute makes sense.

use tracing::{info, warn};

use super::{
    fallback, normalize,
    store::{ProfilePatch, StoreClient, StoreError},
    types::{
        CompetitorShare, DataOrigin, Drug, DrugDetail, MarketStats, PricePoint, PricePrediction,
        Profile, RegulatoryUpdate, Sourced,
    },
};

/// Fixed synthetic price history attached to live drugs: relative date,
/// multiplier, volume. The first three points scale off the launch price;
/// the final point is the current price.
const HISTORY_TEMPLATE: [(&str, f64, u64); 4] = [
    ("2020-01", 1.0, 45_000),
    ("2021-01", 1.1, 47_000),
    ("2022-01", 1.2, 49_000),
    ("2023-01", 1.0, 50_000),
];

/// Fixed forecast template: date, multiplier on current price, confidence.
const PREDICTION_TEMPLATE: [(&str, f64, f64); 3] = [
    ("2025-01", 1.04, 0.95),
    ("2025-06", 1.08, 0.92),
    ("2026-01", 1.12, 0.88),
];

/// Fixed competitor comparison: company, market share, multiplier on the
/// drug's current price.
const COMPETITOR_TEMPLATE: [(&str, f64, f64); 3] = [
    ("Competitor A", 12.5, 0.98),
    ("Competitor B", 10.8, 1.02),
    ("Competitor C", 8.3, 0.96),
];

/// Top-level entry points consumed by the dashboard, generic over the store
/// client so tests can substitute an in-memory double.
pub struct Aggregator<S> {
    store: S,
    configured: bool,
}

impl<S: StoreClient> Aggregator<S> {
    /// `configured` is the configuration gate's verdict, computed once from
    /// settings; when false no store call is ever issued.
    pub fn new(store: S, configured: bool) -> Self {
        Self { store, configured }
    }

    /// True when queries will be attempted against the live store.
    pub fn is_live(&self) -> bool {
        self.configured
    }

    /// The drug catalog: live rows normalized and augmented with the
    /// illustrative series, or the demo catalog.
    pub async fn drug_prices(&self) -> Sourced<Vec<Drug>> {
        if !self.configured {
            return Sourced::fallback(fallback::demo_catalog(), DataOrigin::FallbackUnconfigured);
        }
        match self.store.list_drugs().await {
            Ok(rows) if rows.is_empty() => {
                info!(operation = "list_drugs", "store returned no rows, serving demo catalog");
                Sourced::fallback(fallback::demo_catalog(), DataOrigin::FallbackEmpty)
            }
            Ok(rows) => {
                let data = rows
                    .iter()
                    .map(normalize::normalize_drug)
                    .map(attach_illustrative_series)
                    .collect();
                Sourced::live(data)
            }
            Err(err) => {
                warn!(operation = "list_drugs", error = %err, "store query failed, serving demo catalog");
                Sourced::fallback(fallback::demo_catalog(), DataOrigin::FallbackUnavailable)
            }
        }
    }

    /// Search the catalog. Unlike the listings, a successful empty search is
    /// an answer, not a degradation; only failure and misconfiguration fall
    /// back, and they fall back to the empty list.
    pub async fn search_drugs(&self, term: &str, category: Option<&str>) -> Sourced<Vec<Drug>> {
        if !self.configured {
            return Sourced::fallback(Vec::new(), DataOrigin::FallbackUnconfigured);
        }
        match self.store.search_drugs(term, category).await {
            Ok(rows) => Sourced::live(
                rows.iter()
                    .map(normalize::normalize_drug)
                    .map(attach_illustrative_series)
                    .collect(),
            ),
            Err(err) => {
                warn!(operation = "search_drugs", error = %err, "store query failed");
                Sourced::fallback(Vec::new(), DataOrigin::FallbackUnavailable)
            }
        }
    }

    /// The market statistics mapping, or the demo figures.
    pub async fn market_stats(&self) -> Sourced<MarketStats> {
        if !self.configured {
            return Sourced::fallback(
                fallback::demo_market_stats(),
                DataOrigin::FallbackUnconfigured,
            );
        }
        match self.store.market_stats().await {
            Ok(rows) if rows.is_empty() => {
                info!(operation = "market_stats", "store returned no rows, serving demo stats");
                Sourced::fallback(fallback::demo_market_stats(), DataOrigin::FallbackEmpty)
            }
            Ok(rows) => Sourced::live(normalize::normalize_market_stats(&rows)),
            Err(err) => {
                warn!(operation = "market_stats", error = %err, "store query failed, serving demo stats");
                Sourced::fallback(
                    fallback::demo_market_stats(),
                    DataOrigin::FallbackUnavailable,
                )
            }
        }
    }

    /// The regulatory bulletin list, or the demo bulletins.
    pub async fn regulatory_info(&self) -> Sourced<Vec<RegulatoryUpdate>> {
        if !self.configured {
            return Sourced::fallback(
                fallback::demo_regulatory_updates(),
                DataOrigin::FallbackUnconfigured,
            );
        }
        match self.store.regulatory_updates().await {
            Ok(rows) if rows.is_empty() => {
                info!(operation = "regulatory_updates", "store returned no rows, serving demo bulletins");
                Sourced::fallback(
                    fallback::demo_regulatory_updates(),
                    DataOrigin::FallbackEmpty,
                )
            }
            Ok(rows) => Sourced::live(rows.iter().map(normalize::normalize_regulatory).collect()),
            Err(err) => {
                warn!(operation = "regulatory_updates", error = %err, "store query failed, serving demo bulletins");
                Sourced::fallback(
                    fallback::demo_regulatory_updates(),
                    DataOrigin::FallbackUnavailable,
                )
            }
        }
    }

    /// Distinct drug categories, or the demo list.
    pub async fn drug_categories(&self) -> Sourced<Vec<String>> {
        if !self.configured {
            return Sourced::fallback(fallback::demo_categories(), DataOrigin::FallbackUnconfigured);
        }
        match self.store.drug_categories().await {
            Ok(rows) if rows.is_empty() => {
                info!(operation = "drug_categories", "store returned no rows, serving demo categories");
                Sourced::fallback(fallback::demo_categories(), DataOrigin::FallbackEmpty)
            }
            Ok(rows) => Sourced::live(rows),
            Err(err) => {
                warn!(operation = "drug_categories", error = %err, "store query failed, serving demo categories");
                Sourced::fallback(fallback::demo_categories(), DataOrigin::FallbackUnavailable)
            }
        }
    }

    /// One drug with its stored history and forecasts. No fallback: a detail
    /// view for an unknown or unreachable row has nothing sensible to show,
    /// so failures propagate.
    pub async fn drug_details(&self, drug_id: &str) -> Result<DrugDetail, StoreError> {
        if !self.configured {
            return Err(StoreError::NotConfigured);
        }
        let detail = self.store.drug_details(drug_id).await?;
        let mut drug = normalize::normalize_drug(&detail.drug);
        let history = normalize::normalize_price_history(&detail.history);
        let predictions = normalize::normalize_predictions(&detail.predictions);
        drug.price_history = history.clone();
        drug.predicted_prices = predictions.clone();
        drug.competitor_analysis = competitor_rows(drug.current_price);
        Ok(DrugDetail {
            drug,
            history,
            predictions,
        })
    }

    /// Registered profiles, newest first. Propagates store errors: profile
    /// data has no demo substitute.
    pub async fn user_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        if !self.configured {
            return Err(StoreError::NotConfigured);
        }
        self.store.user_profiles().await
    }

    /// Update the authenticated user's profile. The one write path; errors
    /// (including `Unauthenticated`) always propagate.
    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<Profile, StoreError> {
        if !self.configured {
            return Err(StoreError::NotConfigured);
        }
        self.store.update_profile(patch).await
    }
}

/// Attach the fixed illustrative series to a live drug. The store does not
/// yet carry per-drug history, forecasts, or competitor rows, so every live
/// listing gets this deterministic placeholder sub-data derived from its own
/// launch and current prices. Same multipliers, same dates, every call.
pub fn attach_illustrative_series(mut drug: Drug) -> Drug {
    let launch = drug.launch_price;
    let current = drug.current_price;
    drug.price_history = HISTORY_TEMPLATE
        .iter()
        .enumerate()
        .map(|(idx, (date, multiplier, volume))| PricePoint {
            date: (*date).to_string(),
            price: if idx == HISTORY_TEMPLATE.len() - 1 {
                current
            } else {
                launch * multiplier
            },
            volume: *volume,
        })
        .collect();
    drug.predicted_prices = PREDICTION_TEMPLATE
        .iter()
        .map(|(date, multiplier, confidence)| PricePrediction {
            date: (*date).to_string(),
            price: current * multiplier,
            confidence: *confidence,
        })
        .collect();
    drug.competitor_analysis = competitor_rows(current);
    drug
}

fn competitor_rows(current_price: f64) -> Vec<CompetitorShare> {
    COMPETITOR_TEMPLATE
        .iter()
        .map(|(company, market_share, multiplier)| CompetitorShare {
            company: (*company).to_string(),
            market_share: *market_share,
            price: current_price * multiplier,
        })
        .collect()
}
