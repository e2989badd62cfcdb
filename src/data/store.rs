//! Remote store client for the hosted relational backend.
//!
//! The store speaks the PostgREST dialect: every read is a `GET` against
//! `{base}/rest/v1/{table}` with filter/order/select encoded in the query
//! string, and the profile upsert is a `PATCH` with
//! `Prefer: return=representation`. Nothing in here falls back or normalizes;
//! this layer only distinguishes "rows" from "failure" and leaves the
//! degrade-to-demo policy to the aggregator. Empty result sets are `Ok`;
//! callers that care must check emptiness themselves.

use async_trait::async_trait;
use indexmap::IndexSet;
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Settings;

use super::types::Profile;

/// Failure modes of the remote store boundary.
///
/// Only `Unauthenticated` ever reaches dashboard callers; everything else is
/// swallowed by the aggregator's fallback policy on read paths.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store is not configured")]
    NotConfigured,
    #[error("no authenticated session")]
    Unauthenticated,
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("malformed store payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("no row with id {0}")]
    NotFound(String),
}

/// Raw manufacturer columns embedded into drug rows by the join.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawManufacturer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub who_gmp_certified: Option<bool>,
    #[serde(default)]
    pub fda_approved: Option<bool>,
}

/// One drug row exactly as the store returns it. Numeric columns arrive as
/// whatever the store felt like sending (string, number, null), so they are
/// kept as raw JSON until the normalizer coerces them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawDrugRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub generic_name: Option<String>,
    #[serde(default)]
    pub manufacturers: Option<RawManufacturer>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub therapeutic_class: Option<String>,
    #[serde(default)]
    pub dosage_form: Option<String>,
    #[serde(default)]
    pub strength: Option<String>,
    #[serde(default)]
    pub pack_size: Option<String>,
    #[serde(default)]
    pub approval_date: Option<String>,
    #[serde(default)]
    pub current_price: Value,
    #[serde(default)]
    pub launch_price: Value,
    #[serde(default)]
    pub mrp: Value,
    #[serde(default)]
    pub retail_price: Value,
    #[serde(default)]
    pub wholesale_price: Value,
    #[serde(default)]
    pub manufacturing_cost: Value,
    #[serde(default)]
    pub market_share: Value,
    #[serde(default)]
    pub monthly_volume: Value,
    #[serde(default)]
    pub regulatory_status: Option<String>,
    #[serde(default)]
    pub patent_status: Option<String>,
    #[serde(default)]
    pub export_markets: Option<Vec<String>>,
}

/// One market statistic row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMarketStatRow {
    #[serde(default)]
    pub metric_name: String,
    #[serde(default)]
    pub metric_value: Value,
    #[serde(default)]
    pub category: Option<String>,
}

/// One regulatory bulletin row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRegulatoryRow {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub impact_level: Option<String>,
}

/// One stored price observation for a drug.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPricePoint {
    #[serde(default)]
    pub recorded_date: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub volume: Value,
}

/// One stored forecast row for a drug.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPrediction {
    #[serde(default)]
    pub prediction_date: Option<String>,
    #[serde(default)]
    pub predicted_price: Value,
    #[serde(default)]
    pub confidence_score: Value,
}

/// A drug row together with its stored history and forecast rows.
#[derive(Debug, Clone, Default)]
pub struct RawDrugDetail {
    pub drug: RawDrugRow,
    pub history: Vec<RawPricePoint>,
    pub predictions: Vec<RawPrediction>,
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Read/search/update surface of the hosted store.
///
/// The aggregator is generic over this trait so tests can substitute an
/// in-memory double instead of mocking HTTP.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// All drugs joined with manufacturer columns, ordered by name.
    async fn list_drugs(&self) -> Result<Vec<RawDrugRow>, StoreError>;

    /// Case-insensitive substring search over name and generic name, with an
    /// optional exact category filter (`"all"` means no filter).
    async fn search_drugs(
        &self,
        term: &str,
        category: Option<&str>,
    ) -> Result<Vec<RawDrugRow>, StoreError>;

    /// All market statistic rows, ordered by category.
    async fn market_stats(&self) -> Result<Vec<RawMarketStatRow>, StoreError>;

    /// All regulatory bulletins, newest first.
    async fn regulatory_updates(&self) -> Result<Vec<RawRegulatoryRow>, StoreError>;

    /// Distinct drug categories in first-occurrence order.
    async fn drug_categories(&self) -> Result<Vec<String>, StoreError>;

    /// One drug row plus its ordered history and forecast rows. Fails as a
    /// unit: a detail view without its identity row is meaningless, so
    /// sub-query failures are not swallowed here.
    async fn drug_details(&self, drug_id: &str) -> Result<RawDrugDetail, StoreError>;

    /// All registered profiles, newest first.
    async fn user_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// Update the authenticated user's profile, stamping `updated_at`.
    async fn update_profile(&self, patch: ProfilePatch) -> Result<Profile, StoreError>;
}

/// Authenticated identity attached to a store client for profile writes.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub user_id: String,
}

/// PostgREST-backed implementation of [`StoreClient`].
pub struct PostgrestStore {
    http: Client,
    base: String,
    anon_key: String,
    session: Option<Session>,
}

const MANUFACTURER_JOIN: &str = "*,manufacturers(name,country,who_gmp_certified,fda_approved)";

impl PostgrestStore {
    /// Build a client from settings. Construction always succeeds given a
    /// working TLS stack: absent credentials are replaced with inert
    /// placeholders so an unconfigured deployment still boots, and the
    /// configuration gate keeps such a client from ever being queried.
    pub fn from_settings(settings: &Settings) -> Result<Self, StoreError> {
        let url = settings
            .store_url
            .as_deref()
            .unwrap_or("https://placeholder.supabase.co");
        let key = settings.store_key.as_deref().unwrap_or("placeholder-key");
        let session = match (&settings.store_access_token, &settings.store_user_id) {
            (Some(token), Some(user_id)) => Some(Session {
                access_token: token.clone(),
                user_id: user_id.clone(),
            }),
            _ => None,
        };
        let http = Client::builder()
            .user_agent("pharmalens/0.1")
            .timeout(settings.request_timeout)
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            http,
            base: format!("{}/rest/v1", url.trim_end_matches('/')),
            anon_key: key.to_string(),
            session,
        })
    }

    /// Attach an authenticated session for profile writes.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    fn get(&self, table: &str) -> RequestBuilder {
        let bearer = self
            .session
            .as_ref()
            .map(|s| s.access_token.as_str())
            .unwrap_or(self.anon_key.as_str());
        self.http
            .get(format!("{}/{}", self.base, table))
            .header("apikey", self.anon_key.as_str())
            .header(header::AUTHORIZATION, format!("Bearer {bearer}"))
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<T>, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl StoreClient for PostgrestStore {
    async fn list_drugs(&self) -> Result<Vec<RawDrugRow>, StoreError> {
        debug!("querying drug catalog");
        let request = self
            .get("drugs")
            .query(&[("select", MANUFACTURER_JOIN), ("order", "name.asc")]);
        self.fetch_rows(request).await
    }

    async fn search_drugs(
        &self,
        term: &str,
        category: Option<&str>,
    ) -> Result<Vec<RawDrugRow>, StoreError> {
        let mut request = self
            .get("drugs")
            .query(&[("select", MANUFACTURER_JOIN), ("order", "name.asc")]);
        let term = sanitize_pattern(term);
        if !term.is_empty() {
            request = request.query(&[(
                "or",
                format!("(name.ilike.*{term}*,generic_name.ilike.*{term}*)"),
            )]);
        }
        if let Some(category) = category.filter(|c| !c.is_empty() && *c != "all") {
            request = request.query(&[("category", format!("eq.{category}"))]);
        }
        self.fetch_rows(request).await
    }

    async fn market_stats(&self) -> Result<Vec<RawMarketStatRow>, StoreError> {
        let request = self
            .get("market_stats")
            .query(&[("select", "*"), ("order", "category.asc")]);
        self.fetch_rows(request).await
    }

    async fn regulatory_updates(&self) -> Result<Vec<RawRegulatoryRow>, StoreError> {
        let request = self
            .get("regulatory_updates")
            .query(&[("select", "*"), ("order", "last_updated.desc")]);
        self.fetch_rows(request).await
    }

    async fn drug_categories(&self) -> Result<Vec<String>, StoreError> {
        #[derive(Deserialize)]
        struct CategoryRow {
            #[serde(default)]
            category: Option<String>,
        }
        let request = self
            .get("drugs")
            .query(&[("select", "category"), ("order", "category.asc")]);
        let rows: Vec<CategoryRow> = self.fetch_rows(request).await?;
        Ok(dedupe_categories(
            rows.into_iter().filter_map(|row| row.category),
        ))
    }

    async fn drug_details(&self, drug_id: &str) -> Result<RawDrugDetail, StoreError> {
        let id_filter = format!("eq.{drug_id}");
        let request = self
            .get("drugs")
            .query(&[("select", MANUFACTURER_JOIN), ("id", id_filter.as_str())]);
        let mut rows: Vec<RawDrugRow> = self.fetch_rows(request).await?;
        let drug = if rows.is_empty() {
            return Err(StoreError::NotFound(drug_id.to_string()));
        } else {
            rows.swap_remove(0)
        };

        let history_request = self.get("drug_price_history").query(&[
            ("select", "*"),
            ("drug_id", id_filter.as_str()),
            ("order", "recorded_date.asc"),
        ]);
        let history: Vec<RawPricePoint> = self.fetch_rows(history_request).await?;

        let prediction_request = self.get("drug_predictions").query(&[
            ("select", "*"),
            ("drug_id", id_filter.as_str()),
            ("order", "prediction_date.asc"),
        ]);
        let predictions: Vec<RawPrediction> = self.fetch_rows(prediction_request).await?;

        Ok(RawDrugDetail {
            drug,
            history,
            predictions,
        })
    }

    async fn user_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let request = self
            .get("profiles")
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.fetch_rows(request).await
    }

    async fn update_profile(&self, patch: ProfilePatch) -> Result<Profile, StoreError> {
        let session = self.session.as_ref().ok_or(StoreError::Unauthenticated)?;

        #[derive(Serialize)]
        struct StampedPatch<'a> {
            #[serde(flatten)]
            patch: &'a ProfilePatch,
            updated_at: String,
        }

        let body = StampedPatch {
            patch: &patch,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        let request = self
            .http
            .patch(format!("{}/profiles", self.base))
            .header("apikey", self.anon_key.as_str())
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", session.access_token),
            )
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", session.user_id))])
            .json(&body);
        let mut rows: Vec<Profile> = self.fetch_rows(request).await?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(session.user_id.clone()));
        }
        Ok(rows.swap_remove(0))
    }
}

/// Collapse duplicate categories while keeping first-occurrence order.
pub fn dedupe_categories<I>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = IndexSet::new();
    for category in categories {
        let trimmed = category.trim();
        if !trimmed.is_empty() {
            seen.insert(trimmed.to_string());
        }
    }
    seen.into_iter().collect()
}

// Commas and parens would terminate the or-group in the PostgREST filter
// grammar; strip them rather than let a search term rewrite the query.
fn sanitize_pattern(term: &str) -> String {
    term.trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')'))
        .collect()
}
