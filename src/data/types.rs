//! Canonical, UI-facing records produced by the aggregation layer.
//!
//! Everything here is a read-only projection: the dashboard renders these
//! shapes directly, so field names serialize in the camelCase the frontend
//! expects. The invariant that matters is totality: every numeric field is a
//! real number by the time a value of one of these types exists (the
//! normalizer substitutes `0` for anything the store could not represent).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One drug in the catalog, with manufacturer resolved to a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drug {
    pub id: String,
    pub name: String,
    pub generic_name: String,
    pub manufacturer: String,
    pub category: String,
    pub therapeutic_class: String,
    pub dosage_form: String,
    pub strength: String,
    pub pack_size: String,
    pub approval_date: String,
    pub current_price: f64,
    pub launch_price: f64,
    pub mrp: f64,
    pub retail_price: f64,
    pub wholesale_price: f64,
    pub manufacturing_cost: f64,
    pub market_share: f64,
    pub monthly_volume: u64,
    pub regulatory_status: String,
    pub patent_status: String,
    pub export_markets: Vec<String>,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
    #[serde(default)]
    pub predicted_prices: Vec<PricePrediction>,
    #[serde(default)]
    pub competitor_analysis: Vec<CompetitorShare>,
}

/// One observed point in a drug's price time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
    pub volume: u64,
}

/// One forecast point, with model confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub date: String,
    pub price: f64,
    pub confidence: f64,
}

/// One competitor row in the per-drug comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorShare {
    pub company: String,
    pub market_share: f64,
    pub price: f64,
}

/// Flat metric-key to display-string mapping, in the store's category order.
pub type MarketStats = IndexMap<String, String>;

/// A regulatory bulletin entry shown on the regulations page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryUpdate {
    pub title: String,
    pub description: String,
    pub link: String,
    pub category: String,
    pub last_updated: String,
    pub impact: String,
    pub applicability: String,
}

/// A registered dashboard user. Writes to this entity are the only mutation
/// the core performs against the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A drug plus its stored (not synthesized) history and forecasts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugDetail {
    #[serde(flatten)]
    pub drug: Drug,
    pub history: Vec<PricePoint>,
    pub predictions: Vec<PricePrediction>,
}

/// Where an aggregated result came from. `Live` is normalized store data;
/// the three fallback variants distinguish "never tried" from "tried and
/// empty" from "tried and failed" so the dashboard can render an honest
/// trust badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Live,
    FallbackUnconfigured,
    FallbackEmpty,
    FallbackUnavailable,
}

impl DataOrigin {
    /// True when the payload came from the store rather than the demo set.
    pub fn is_live(&self) -> bool {
        matches!(self, DataOrigin::Live)
    }
}

/// An aggregated payload tagged with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sourced<T> {
    pub data: T,
    pub origin: DataOrigin,
}

impl<T> Sourced<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Live,
        }
    }

    pub fn fallback(data: T, origin: DataOrigin) -> Self {
        Self { data, origin }
    }
}

/// Outcome of one health-indicator request in the fan-out batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub indicator: String,
    pub name: String,
    pub data: IndicatorData,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Raw observation list as returned by the statistics API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorData {
    #[serde(default)]
    pub value: Vec<serde_json::Value>,
}
