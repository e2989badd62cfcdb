//! HTTP layer exposing the aggregated data to the dashboard.

pub mod routes;
pub mod types;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    routing::{get, patch},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Settings,
    data::{
        aggregate::Aggregator,
        store::{PostgrestStore, StoreClient},
        who::WhoClient,
    },
};

/// Shared state handed to every handler. Generic over the store client so
/// the same router serves production and test doubles.
pub struct AppState<S> {
    pub aggregator: Arc<Aggregator<S>>,
    pub who: Arc<WhoClient>,
    pub default_country: String,
}

// Manual Clone: handlers only need the Arcs, S itself need not be Clone.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            aggregator: Arc::clone(&self.aggregator),
            who: Arc::clone(&self.who),
            default_country: self.default_country.clone(),
        }
    }
}

/// Assemble the API router over any store client.
pub fn router<S: StoreClient + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/api/drugs", get(routes::drug_prices::<S>))
        .route("/api/drugs/search", get(routes::search_drugs::<S>))
        .route("/api/drugs/:id", get(routes::drug_detail::<S>))
        .route("/api/market-stats", get(routes::market_stats::<S>))
        .route("/api/regulatory", get(routes::regulatory_info::<S>))
        .route("/api/categories", get(routes::drug_categories::<S>))
        .route("/api/health-data", get(routes::health_data::<S>))
        .route("/api/profiles", get(routes::user_profiles::<S>))
        .route("/api/profile", patch(routes::update_profile::<S>))
        .route("/api/status", get(routes::status::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the dashboard API.
pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let configured = settings.is_store_configured();
    let store = PostgrestStore::from_settings(&settings)?;
    let who = WhoClient::from_settings(&settings)?;
    let state = AppState {
        aggregator: Arc::new(Aggregator::new(store, configured)),
        who: Arc::new(who),
        default_country: settings.default_country.clone(),
    };

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, store_configured = configured, "serving pharmalens API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}
