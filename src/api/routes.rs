//! HTTP route handlers for Axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::data::{
    store::{ProfilePatch, StoreClient, StoreError},
    types::{Drug, DrugDetail, IndicatorResult, MarketStats, Profile, RegulatoryUpdate, Sourced},
    who,
};

use super::{types::StatusDto, AppState};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CountryQuery {
    pub country: Option<String>,
}

pub async fn drug_prices<S: StoreClient>(
    State(state): State<AppState<S>>,
) -> Json<Sourced<Vec<Drug>>> {
    Json(state.aggregator.drug_prices().await)
}

pub async fn search_drugs<S: StoreClient>(
    State(state): State<AppState<S>>,
    Query(query): Query<SearchQuery>,
) -> Json<Sourced<Vec<Drug>>> {
    Json(
        state
            .aggregator
            .search_drugs(&query.term, query.category.as_deref())
            .await,
    )
}

pub async fn drug_detail<S: StoreClient>(
    Path(id): Path<String>,
    State(state): State<AppState<S>>,
) -> ApiResult<DrugDetail> {
    state
        .aggregator
        .drug_details(&id)
        .await
        .map(Json)
        .map_err(reject)
}

pub async fn market_stats<S: StoreClient>(
    State(state): State<AppState<S>>,
) -> Json<Sourced<MarketStats>> {
    Json(state.aggregator.market_stats().await)
}

pub async fn regulatory_info<S: StoreClient>(
    State(state): State<AppState<S>>,
) -> Json<Sourced<Vec<RegulatoryUpdate>>> {
    Json(state.aggregator.regulatory_info().await)
}

pub async fn drug_categories<S: StoreClient>(
    State(state): State<AppState<S>>,
) -> Json<Sourced<Vec<String>>> {
    Json(state.aggregator.drug_categories().await)
}

pub async fn health_data<S: StoreClient>(
    State(state): State<AppState<S>>,
    Query(query): Query<CountryQuery>,
) -> Json<Vec<IndicatorResult>> {
    let country = query
        .country
        .unwrap_or_else(|| state.default_country.clone());
    Json(who::collect_health_data(state.who.as_ref(), &country).await)
}

pub async fn user_profiles<S: StoreClient>(
    State(state): State<AppState<S>>,
) -> ApiResult<Vec<Profile>> {
    state.aggregator.user_profiles().await.map(Json).map_err(reject)
}

pub async fn update_profile<S: StoreClient>(
    State(state): State<AppState<S>>,
    Json(patch): Json<ProfilePatch>,
) -> ApiResult<Profile> {
    state
        .aggregator
        .update_profile(patch)
        .await
        .map(Json)
        .map_err(reject)
}

pub async fn status<S: StoreClient>(State(state): State<AppState<S>>) -> Json<StatusDto> {
    Json(StatusDto {
        store_configured: state.aggregator.is_live(),
        default_country: state.default_country.clone(),
    })
}

fn reject(err: StoreError) -> (StatusCode, String) {
    let status = match err {
        StoreError::Unauthenticated => StatusCode::UNAUTHORIZED,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}
