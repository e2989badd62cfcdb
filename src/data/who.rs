//! WHO Global Health Observatory client.
//!
//! The indicator batch is an all-succeed-independently fan-out: one request
//! per code, launched concurrently, each failure captured in its own entry.
//! A fully failed batch still yields ten entries with `success: false`.
//! Callers must check the flag per entry, never assume a non-erroring call
//! means usable data.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::future;
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::config::Settings;

use super::types::{IndicatorData, IndicatorResult};

/// Health indicators relevant to the pharmaceutical market, with their
/// display names. Queried in this order.
pub const HEALTH_INDICATORS: [(&str, &str); 10] = [
    ("WHOSIS_000001", "Life Expectancy at Birth"),
    ("WHOSIS_000015", "Infant Mortality Rate"),
    ("WHS9_86", "Health Expenditure % of GDP"),
    ("WHS7_156", "Out-of-pocket Health Expenditure"),
    ("GHED_CHEGDP_SHA2011", "Current Health Expenditure % GDP"),
    ("WHS4_544", "Physicians Density per 1000"),
    ("WHS4_543", "Hospital Beds per 10,000"),
    ("MDG_0000000026", "Under-five Mortality Rate"),
    ("WHOSIS_000002", "Healthy Life Expectancy"),
    ("WHS8_110", "UHC Service Coverage Index"),
];

/// Human-readable name for an indicator code; unmapped codes pass through.
pub fn indicator_name(code: &str) -> &str {
    HEALTH_INDICATORS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// One-indicator fetch, the seam the fan-out is built on. Production code
/// uses [`WhoClient`]; tests substitute a scripted source.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Observations for one indicator in one country.
    async fn indicator_values(&self, code: &str, country: &str) -> Result<Vec<Value>>;
}

/// Fetch every indicator for a country, concurrently, isolating failures per
/// entry. Always returns exactly one result per indicator, in table order.
pub async fn collect_health_data<S: IndicatorSource>(
    source: &S,
    country: &str,
) -> Vec<IndicatorResult> {
    let requests = HEALTH_INDICATORS.iter().map(|(code, name)| async move {
        match source.indicator_values(code, country).await {
            Ok(values) => IndicatorResult {
                indicator: (*code).to_string(),
                name: (*name).to_string(),
                data: IndicatorData { value: values },
                success: true,
                error: None,
            },
            Err(err) => {
                warn!(indicator = *code, country, error = %err, "indicator fetch failed");
                IndicatorResult {
                    indicator: (*code).to_string(),
                    name: (*name).to_string(),
                    data: IndicatorData::default(),
                    success: false,
                    error: Some(err.to_string()),
                }
            }
        }
    });
    future::join_all(requests).await
}

/// HTTP client for the GHO OData API.
pub struct WhoClient {
    http: Client,
    base: String,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ODataEnvelope {
    #[serde(default)]
    value: Vec<Value>,
}

impl WhoClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent("pharmalens/0.1")
            .timeout(settings.request_timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            http,
            base: settings.who_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The GHO dimension listing. Degrades to an empty list on failure; the
    /// dimension catalog is decoration, not data.
    pub async fn dimensions(&self) -> Vec<Value> {
        let url = format!("{}/Dimension", self.base);
        match self.fetch_envelope(&url, None).await {
            Ok(values) => values,
            Err(err) => {
                warn!(error = %err, "dimension listing failed");
                Vec::new()
            }
        }
    }

    async fn fetch_envelope(&self, url: &str, filter: Option<String>) -> Result<Vec<Value>> {
        let mut request = self.http.get(url);
        if let Some(filter) = filter {
            request = request.query(&[("$filter", filter)]);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("GHO returned {status} for {url}"));
        }
        let envelope: ODataEnvelope = response.json().await?;
        Ok(envelope.value)
    }
}

#[async_trait]
impl IndicatorSource for WhoClient {
    async fn indicator_values(&self, code: &str, country: &str) -> Result<Vec<Value>> {
        let url = format!("{}/{}", self.base, code);
        self.fetch_envelope(&url, Some(format!("SpatialDim eq '{country}'")))
            .await
    }
}
