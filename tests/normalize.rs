use pharmalens::data::{
    normalize::{
        coerce_count, coerce_number, metric_key, normalize_drug, normalize_market_stats,
        normalize_predictions, normalize_price_history, normalize_regulatory,
    },
    store::{
        RawDrugRow, RawManufacturer, RawMarketStatRow, RawPrediction, RawPricePoint,
        RawRegulatoryRow,
    },
};
use proptest::prelude::*;
use serde_json::{json, Value};

#[test]
fn missing_numeric_fields_become_zero() {
    let drug = normalize_drug(&RawDrugRow::default());
    assert_eq!(drug.current_price, 0.0);
    assert_eq!(drug.launch_price, 0.0);
    assert_eq!(drug.mrp, 0.0);
    assert_eq!(drug.retail_price, 0.0);
    assert_eq!(drug.wholesale_price, 0.0);
    assert_eq!(drug.manufacturing_cost, 0.0);
    assert_eq!(drug.market_share, 0.0);
    assert_eq!(drug.monthly_volume, 0);
}

#[test]
fn garbage_numeric_fields_become_zero() {
    let row = RawDrugRow {
        current_price: json!("not a number"),
        launch_price: Value::Null,
        mrp: json!({"nested": true}),
        retail_price: json!([1, 2]),
        wholesale_price: json!(true),
        monthly_volume: json!("minus five"),
        ..Default::default()
    };
    let drug = normalize_drug(&row);
    assert_eq!(drug.current_price, 0.0);
    assert_eq!(drug.launch_price, 0.0);
    assert_eq!(drug.mrp, 0.0);
    assert_eq!(drug.retail_price, 0.0);
    assert_eq!(drug.wholesale_price, 0.0);
    assert_eq!(drug.monthly_volume, 0);
}

#[test]
fn numeric_strings_are_parsed() {
    let row = RawDrugRow {
        current_price: json!("10.5"),
        launch_price: json!(10),
        market_share: json!("15.2"),
        monthly_volume: json!("50000"),
        ..Default::default()
    };
    let drug = normalize_drug(&row);
    assert_eq!(drug.current_price, 10.5);
    assert_eq!(drug.launch_price, 10.0);
    assert_eq!(drug.market_share, 15.2);
    assert_eq!(drug.monthly_volume, 50_000);
}

#[test]
fn manufacturer_defaults_to_unknown() {
    let drug = normalize_drug(&RawDrugRow::default());
    assert_eq!(drug.manufacturer, "Unknown");

    let row = RawDrugRow {
        manufacturers: Some(RawManufacturer {
            name: Some("  ".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(normalize_drug(&row).manufacturer, "Unknown");

    let row = RawDrugRow {
        manufacturers: Some(RawManufacturer {
            name: Some("Cipla Ltd".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_eq!(normalize_drug(&row).manufacturer, "Cipla Ltd");
}

#[test]
fn export_markets_default_to_empty() {
    let drug = normalize_drug(&RawDrugRow::default());
    assert!(drug.export_markets.is_empty());
}

#[test]
fn price_history_preserves_order_and_defaults() {
    let rows = vec![
        RawPricePoint {
            recorded_date: Some("2020-01".to_string()),
            price: json!("2.00"),
            volume: json!(45_000),
        },
        RawPricePoint {
            recorded_date: Some("2021-01".to_string()),
            price: json!("oops"),
            volume: Value::Null,
        },
    ];
    let history = normalize_price_history(&rows);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].date, "2020-01");
    assert_eq!(history[0].price, 2.0);
    assert_eq!(history[1].price, 0.0);
    assert_eq!(history[1].volume, 0);
}

#[test]
fn predictions_preserve_order_and_defaults() {
    let rows = vec![
        RawPrediction {
            prediction_date: Some("2025-01".to_string()),
            predicted_price: json!(2.6),
            confidence_score: json!("0.95"),
        },
        RawPrediction::default(),
    ];
    let predictions = normalize_predictions(&rows);
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].confidence, 0.95);
    assert_eq!(predictions[1].price, 0.0);
    assert_eq!(predictions[1].confidence, 0.0);
}

#[test]
fn regulatory_defaults_link_and_applicability() {
    let update = normalize_regulatory(&RawRegulatoryRow::default());
    assert_eq!(update.link, "#");
    assert_eq!(update.applicability, "All pharmaceutical companies");

    let row = RawRegulatoryRow {
        source_url: Some("https://cdsco.gov.in/".to_string()),
        ..Default::default()
    };
    assert_eq!(normalize_regulatory(&row).link, "https://cdsco.gov.in/");
}

#[test]
fn metric_key_is_deterministic() {
    for _ in 0..3 {
        assert_eq!(metric_key("Total Market Size (USD)"), "total_market_size_usd");
    }
    assert_eq!(metric_key("  Growth   Rate "), "growth_rate");
    assert_eq!(metric_key("Export Value (USD Bn)"), "export_value_usd_bn");
    assert_eq!(metric_key("Generic Market Share"), "generic_market_share");
}

#[test]
fn known_metric_set_has_no_key_collisions() {
    let names = [
        "Total Market Size (USD)",
        "Growth Rate",
        "Export Value",
        "Total Drugs",
        "Foreign Investment",
        "Regulatory Approvals",
        "Manufacturing Units",
        "Employment Generated",
        "Global Ranking",
        "Generic Market Share",
    ];
    let rows: Vec<RawMarketStatRow> = names
        .iter()
        .map(|name| RawMarketStatRow {
            metric_name: (*name).to_string(),
            metric_value: json!("x"),
            category: None,
        })
        .collect();
    let stats = normalize_market_stats(&rows);
    assert_eq!(stats.len(), names.len());
}

#[test]
fn market_stats_render_numbers_as_strings() {
    let rows = vec![RawMarketStatRow {
        metric_name: "Growth Rate".to_string(),
        metric_value: json!(12.3),
        category: Some("market".to_string()),
    }];
    let stats = normalize_market_stats(&rows);
    assert_eq!(stats.get("growth_rate").map(String::as_str), Some("12.3"));
}

proptest! {
    #[test]
    fn number_coercion_is_always_finite(s in "\\PC*") {
        let value = coerce_number(&Value::String(s));
        prop_assert!(value.is_finite());
    }

    #[test]
    fn count_coercion_never_panics(s in "\\PC*") {
        let _ = coerce_count(&Value::String(s));
    }

    #[test]
    fn normalized_drugs_never_carry_nan(price in prop::num::f64::ANY) {
        let row = RawDrugRow {
            current_price: serde_json::Number::from_f64(price)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ..Default::default()
        };
        let drug = normalize_drug(&row);
        prop_assert!(drug.current_price.is_finite());
    }
}
