use anyhow::{anyhow, Result};
use async_trait::async_trait;
use pharmalens::data::who::{collect_health_data, indicator_name, IndicatorSource, HEALTH_INDICATORS};
use serde_json::{json, Value};

/// Scripted indicator source: named codes fail, everything else returns one
/// observation echoing the request.
struct ScriptedSource {
    failing: Vec<&'static str>,
}

#[async_trait]
impl IndicatorSource for ScriptedSource {
    async fn indicator_values(&self, code: &str, country: &str) -> Result<Vec<Value>> {
        if self.failing.iter().any(|c| *c == code) {
            return Err(anyhow!("connection reset by peer"));
        }
        Ok(vec![json!({
            "IndicatorCode": code,
            "SpatialDim": country,
            "NumericValue": 67.4,
        })])
    }
}

#[tokio::test]
async fn one_failure_does_not_disturb_the_batch() {
    let third = HEALTH_INDICATORS[2].0;
    let source = ScriptedSource {
        failing: vec![third],
    };

    let results = collect_health_data(&source, "IND").await;
    assert_eq!(results.len(), 10);

    for (idx, result) in results.iter().enumerate() {
        if idx == 2 {
            assert!(!result.success);
            assert!(result.data.value.is_empty());
            assert!(result
                .error
                .as_deref()
                .unwrap_or_default()
                .contains("connection reset"));
        } else {
            assert!(result.success, "indicator {} should succeed", result.indicator);
            assert_eq!(result.data.value.len(), 1);
            assert!(result.error.is_none());
        }
    }
}

#[tokio::test]
async fn fully_failed_batch_still_returns_ten_entries() {
    let source = ScriptedSource {
        failing: HEALTH_INDICATORS.iter().map(|(code, _)| *code).collect(),
    };

    let results = collect_health_data(&source, "IND").await;
    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|r| !r.success));
    assert!(results.iter().all(|r| r.error.is_some()));
}

#[tokio::test]
async fn results_follow_table_order_with_resolved_names() {
    let source = ScriptedSource { failing: vec![] };

    let results = collect_health_data(&source, "BRA").await;
    for (result, (code, name)) in results.iter().zip(HEALTH_INDICATORS.iter()) {
        assert_eq!(result.indicator, *code);
        assert_eq!(result.name, *name);
    }
    assert_eq!(results[0].name, "Life Expectancy at Birth");
    assert_eq!(
        results[0].data.value[0]["SpatialDim"],
        json!("BRA")
    );
}

#[test]
fn unknown_codes_pass_through_as_names() {
    assert_eq!(indicator_name("WHOSIS_000001"), "Life Expectancy at Birth");
    assert_eq!(indicator_name("NOT_A_CODE"), "NOT_A_CODE");
}
