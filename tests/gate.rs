use std::time::Duration;

use pharmalens::config::{Settings, PLACEHOLDER_STORE_KEY, PLACEHOLDER_STORE_URL};

fn settings(url: Option<&str>, key: Option<&str>) -> Settings {
    Settings {
        store_url: url.map(str::to_string),
        store_key: key.map(str::to_string),
        store_access_token: None,
        store_user_id: None,
        request_timeout: Duration::from_secs(15),
        who_base_url: "https://ghoapi.azureedge.net/api".to_string(),
        default_country: "IND".to_string(),
    }
}

#[test]
fn gate_truth_table() {
    let cases = [
        (None, None, false),
        (Some("https://abc.supabase.co"), None, false),
        (None, Some("real-key"), false),
        (Some(PLACEHOLDER_STORE_URL), Some("real-key"), false),
        (Some("https://abc.supabase.co"), Some(PLACEHOLDER_STORE_KEY), false),
        (Some(PLACEHOLDER_STORE_URL), Some(PLACEHOLDER_STORE_KEY), false),
        (Some(""), Some("real-key"), false),
        (Some("https://abc.supabase.co"), Some(""), false),
        (Some("https://abc.supabase.co"), Some("real-key"), true),
    ];

    for (url, key, expected) in cases {
        assert_eq!(
            settings(url, key).is_store_configured(),
            expected,
            "url={url:?} key={key:?}"
        );
    }
}
