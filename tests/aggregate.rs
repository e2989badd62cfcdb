use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use pharmalens::data::{
    aggregate::Aggregator,
    fallback,
    store::{
        ProfilePatch, RawDrugDetail, RawDrugRow, RawManufacturer, RawMarketStatRow,
        RawRegulatoryRow, StoreClient, StoreError,
    },
    types::{DataOrigin, Profile},
};
use serde_json::json;

/// In-memory store double. `fail` makes every operation return a rejection;
/// `calls` counts how many store operations were actually attempted.
#[derive(Default)]
struct MockStore {
    drugs: Vec<RawDrugRow>,
    stats: Vec<RawMarketStatRow>,
    regulatory: Vec<RawRegulatoryRow>,
    categories: Vec<String>,
    authenticated: bool,
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockStore {
    fn failure() -> StoreError {
        StoreError::Rejected {
            status: 500,
            message: "backend exploded".to_string(),
        }
    }

    fn track(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(Self::failure())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StoreClient for MockStore {
    async fn list_drugs(&self) -> Result<Vec<RawDrugRow>, StoreError> {
        self.track()?;
        Ok(self.drugs.clone())
    }

    async fn search_drugs(
        &self,
        term: &str,
        category: Option<&str>,
    ) -> Result<Vec<RawDrugRow>, StoreError> {
        self.track()?;
        let needle = term.to_lowercase();
        Ok(self
            .drugs
            .iter()
            .filter(|row| {
                let name = row.name.clone().unwrap_or_default().to_lowercase();
                let generic = row.generic_name.clone().unwrap_or_default().to_lowercase();
                name.contains(&needle) || generic.contains(&needle)
            })
            .filter(|row| match category {
                Some(category) if category != "all" => {
                    row.category.as_deref() == Some(category)
                }
                _ => true,
            })
            .cloned()
            .collect())
    }

    async fn market_stats(&self) -> Result<Vec<RawMarketStatRow>, StoreError> {
        self.track()?;
        Ok(self.stats.clone())
    }

    async fn regulatory_updates(&self) -> Result<Vec<RawRegulatoryRow>, StoreError> {
        self.track()?;
        Ok(self.regulatory.clone())
    }

    async fn drug_categories(&self) -> Result<Vec<String>, StoreError> {
        self.track()?;
        Ok(self.categories.clone())
    }

    async fn drug_details(&self, drug_id: &str) -> Result<RawDrugDetail, StoreError> {
        self.track()?;
        self.drugs
            .first()
            .cloned()
            .map(|drug| RawDrugDetail {
                drug,
                history: Vec::new(),
                predictions: Vec::new(),
            })
            .ok_or_else(|| StoreError::NotFound(drug_id.to_string()))
    }

    async fn user_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        self.track()?;
        Ok(Vec::new())
    }

    async fn update_profile(&self, patch: ProfilePatch) -> Result<Profile, StoreError> {
        self.track()?;
        if !self.authenticated {
            return Err(StoreError::Unauthenticated);
        }
        Ok(Profile {
            id: "user-1".to_string(),
            bio: patch.bio,
            ..Default::default()
        })
    }
}

fn sample_row() -> RawDrugRow {
    RawDrugRow {
        name: Some("X".to_string()),
        current_price: json!("10.5"),
        launch_price: json!("10"),
        manufacturers: Some(RawManufacturer {
            name: Some("M".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn unconfigured_store_serves_demo_catalog_without_calls() {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = MockStore {
        calls: Arc::clone(&calls),
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, false);

    let first = aggregator.drug_prices().await;
    let second = aggregator.drug_prices().await;
    aggregator.market_stats().await;
    aggregator.regulatory_info().await;
    aggregator.drug_categories().await;

    assert_eq!(first.origin, DataOrigin::FallbackUnconfigured);
    assert!(!first.data.is_empty());
    assert_eq!(first, second, "fallback must be deep-equal across calls");
    assert!(!aggregator.is_live());
    assert_eq!(calls.load(Ordering::SeqCst), 0, "gate must prevent store traffic");
}

#[tokio::test]
async fn empty_store_falls_back_to_demo_catalog() {
    let aggregator = Aggregator::new(MockStore::default(), true);

    let listing = aggregator.drug_prices().await;
    assert_eq!(listing.origin, DataOrigin::FallbackEmpty);
    assert_eq!(listing.data, fallback::demo_catalog());
}

#[tokio::test]
async fn failing_store_falls_back_without_propagating() {
    let store = MockStore {
        fail: true,
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let listing = aggregator.drug_prices().await;
    assert_eq!(listing.origin, DataOrigin::FallbackUnavailable);
    assert_eq!(listing.data, fallback::demo_catalog());

    let stats = aggregator.market_stats().await;
    assert_eq!(stats.origin, DataOrigin::FallbackUnavailable);
    assert_eq!(stats.data, fallback::demo_market_stats());

    let bulletins = aggregator.regulatory_info().await;
    assert_eq!(bulletins.origin, DataOrigin::FallbackUnavailable);
    assert_eq!(bulletins.data, fallback::demo_regulatory_updates());
}

#[tokio::test]
async fn live_rows_are_normalized_and_augmented() {
    let store = MockStore {
        drugs: vec![sample_row()],
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let listing = aggregator.drug_prices().await;
    assert_eq!(listing.origin, DataOrigin::Live);
    assert_eq!(listing.data.len(), 1);

    let drug = &listing.data[0];
    assert_eq!(drug.current_price, 10.5);
    assert_eq!(drug.manufacturer, "M");
    assert_eq!(drug.price_history.len(), 4);
    assert_eq!(drug.predicted_prices.len(), 3);
    assert_eq!(drug.competitor_analysis.len(), 3);

    // History scales off launch price and lands on the current price.
    assert_eq!(drug.price_history[0].price, 10.0);
    assert_eq!(drug.price_history[3].price, 10.5);
    assert!((drug.predicted_prices[0].price - 10.5 * 1.04).abs() < 1e-9);
    assert_eq!(drug.predicted_prices[0].confidence, 0.95);
}

#[tokio::test]
async fn search_miss_is_an_answer_not_a_degradation() {
    let store = MockStore {
        drugs: vec![sample_row()],
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let miss = aggregator.search_drugs("nothing-matches", None).await;
    assert_eq!(miss.origin, DataOrigin::Live);
    assert!(miss.data.is_empty());

    let hit = aggregator.search_drugs("x", None).await;
    assert_eq!(hit.data.len(), 1);
    assert_eq!(hit.data[0].price_history.len(), 4);
}

#[tokio::test]
async fn search_failure_degrades_to_empty_listing() {
    let store = MockStore {
        fail: true,
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let listing = aggregator.search_drugs("paracetamol", None).await;
    assert_eq!(listing.origin, DataOrigin::FallbackUnavailable);
    assert!(listing.data.is_empty());
}

#[tokio::test]
async fn unauthenticated_profile_write_is_an_explicit_failure() {
    let aggregator = Aggregator::new(MockStore::default(), true);

    let patch = ProfilePatch {
        bio: Some("x".to_string()),
        ..Default::default()
    };
    let err = aggregator.update_profile(patch).await.unwrap_err();
    assert!(matches!(err, StoreError::Unauthenticated));
    assert!(err.to_string().contains("session"));
}

#[tokio::test]
async fn authenticated_profile_write_passes_through() {
    let store = MockStore {
        authenticated: true,
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let patch = ProfilePatch {
        bio: Some("pharma analyst".to_string()),
        ..Default::default()
    };
    let profile = aggregator.update_profile(patch).await.unwrap();
    assert_eq!(profile.bio.as_deref(), Some("pharma analyst"));
}

#[tokio::test]
async fn drug_details_propagate_store_failures() {
    let store = MockStore {
        fail: true,
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let err = aggregator.drug_details("1").await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected { .. }));
}

#[tokio::test]
async fn drug_details_attach_stored_series() {
    let store = MockStore {
        drugs: vec![sample_row()],
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let detail = aggregator.drug_details("1").await.unwrap();
    assert_eq!(detail.drug.manufacturer, "M");
    // Stored series were empty, and details never invent history.
    assert!(detail.history.is_empty());
    assert!(detail.drug.price_history.is_empty());
    assert_eq!(detail.drug.competitor_analysis.len(), 3);
}

#[test]
fn categories_dedupe_preserves_first_occurrence_order() {
    let deduped = pharmalens::data::store::dedupe_categories(
        [
            "Analgesic",
            "Cardiovascular",
            "Analgesic",
            "  ",
            "Antidiabetic",
            "Cardiovascular",
        ]
        .into_iter()
        .map(str::to_string),
    );
    assert_eq!(deduped, vec!["Analgesic", "Cardiovascular", "Antidiabetic"]);
}

#[tokio::test]
async fn live_categories_pass_through() {
    let store = MockStore {
        categories: vec!["Analgesic".to_string(), "Cardiovascular".to_string()],
        ..Default::default()
    };
    let aggregator = Aggregator::new(store, true);

    let listing = aggregator.drug_categories().await;
    assert_eq!(listing.origin, DataOrigin::Live);
    assert_eq!(listing.data, vec!["Analgesic", "Cardiovascular"]);
}
