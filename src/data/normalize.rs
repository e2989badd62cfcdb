//! Total normalization from raw store rows to canonical records.
//!
//! Every function here is total: a row with missing, null, or garbage fields
//! still produces a well-typed record. All "trust the external system" risk
//! is concentrated in this module, so nothing downstream ever sees a NaN, a
//! null price, or an absent manufacturer.

use serde_json::Value;

use super::{
    store::{RawDrugRow, RawMarketStatRow, RawPrediction, RawPricePoint, RawRegulatoryRow},
    types::{Drug, MarketStats, PricePoint, PricePrediction, RegulatoryUpdate},
};

/// Link substituted when a bulletin carries no source URL.
const PLACEHOLDER_LINK: &str = "#";
/// Applicability note attached to every store-backed bulletin.
const DEFAULT_APPLICABILITY: &str = "All pharmaceutical companies";

/// Map a raw drug row to the canonical shape. Numeric coercion failures
/// become `0`, an absent manufacturer becomes `"Unknown"`, and an absent
/// export list becomes empty. The attached time series start empty; the
/// aggregator decides what fills them.
pub fn normalize_drug(row: &RawDrugRow) -> Drug {
    Drug {
        id: coerce_id(&row.id),
        name: row.name.clone().unwrap_or_default(),
        generic_name: row.generic_name.clone().unwrap_or_default(),
        manufacturer: row
            .manufacturers
            .as_ref()
            .and_then(|m| m.name.clone())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        category: row.category.clone().unwrap_or_default(),
        therapeutic_class: row.therapeutic_class.clone().unwrap_or_default(),
        dosage_form: row.dosage_form.clone().unwrap_or_default(),
        strength: row.strength.clone().unwrap_or_default(),
        pack_size: row.pack_size.clone().unwrap_or_default(),
        approval_date: row.approval_date.clone().unwrap_or_default(),
        current_price: coerce_number(&row.current_price),
        launch_price: coerce_number(&row.launch_price),
        mrp: coerce_number(&row.mrp),
        retail_price: coerce_number(&row.retail_price),
        wholesale_price: coerce_number(&row.wholesale_price),
        manufacturing_cost: coerce_number(&row.manufacturing_cost),
        market_share: coerce_number(&row.market_share),
        monthly_volume: coerce_count(&row.monthly_volume),
        regulatory_status: row.regulatory_status.clone().unwrap_or_default(),
        patent_status: row.patent_status.clone().unwrap_or_default(),
        export_markets: row.export_markets.clone().unwrap_or_default(),
        price_history: Vec::new(),
        predicted_prices: Vec::new(),
        competitor_analysis: Vec::new(),
    }
}

/// Map stored price observations, preserving source order.
pub fn normalize_price_history(rows: &[RawPricePoint]) -> Vec<PricePoint> {
    rows.iter()
        .map(|row| PricePoint {
            date: row.recorded_date.clone().unwrap_or_default(),
            price: coerce_number(&row.price),
            volume: coerce_count(&row.volume),
        })
        .collect()
}

/// Map stored forecast rows, preserving source order.
pub fn normalize_predictions(rows: &[RawPrediction]) -> Vec<PricePrediction> {
    rows.iter()
        .map(|row| PricePrediction {
            date: row.prediction_date.clone().unwrap_or_default(),
            price: coerce_number(&row.predicted_price),
            confidence: coerce_number(&row.confidence_score),
        })
        .collect()
}

/// Map a raw bulletin row, substituting the placeholder link and the fixed
/// applicability note where the store is silent.
pub fn normalize_regulatory(row: &RawRegulatoryRow) -> RegulatoryUpdate {
    RegulatoryUpdate {
        title: row.title.clone().unwrap_or_default(),
        description: row.description.clone().unwrap_or_default(),
        link: row
            .source_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_LINK.to_string()),
        category: row.category.clone().unwrap_or_default(),
        last_updated: row.last_updated.clone().unwrap_or_default(),
        impact: row.impact_level.clone().unwrap_or_default(),
        applicability: DEFAULT_APPLICABILITY.to_string(),
    }
}

/// Reduce statistic rows (already in category order) into the flat mapping.
/// Later rows win on key collisions, which cannot occur for the known metric
/// set because [`metric_key`] is injective over it.
pub fn normalize_market_stats(rows: &[RawMarketStatRow]) -> MarketStats {
    let mut stats = MarketStats::new();
    for row in rows {
        let key = metric_key(&row.metric_name);
        if key.is_empty() {
            continue;
        }
        stats.insert(key, display_value(&row.metric_value));
    }
    stats
}

/// Derive the stable mapping key from a free-text metric name: trim,
/// lowercase, collapse whitespace runs to `_`, drop everything outside
/// `[a-z0-9_]`. `"Total Market Size (USD)"` becomes `total_market_size_usd`.
pub fn metric_key(name: &str) -> String {
    let mut key = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    key.retain(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    key
}

/// Coerce an arbitrary JSON value to a finite `f64`, defaulting to `0.0`.
/// Accepts numbers and numeric strings; rejects NaN and infinities so the
/// totality guarantee holds even for inputs like `"1e999"`.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce an arbitrary JSON value to a non-negative count, defaulting to `0`.
pub fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// Render a row id as an opaque string, whether the store sent a number or a
/// UUID.
pub fn coerce_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
