//! Runtime configuration utilities for pharmalens.

use std::{env, time::Duration};

/// Sentinel URL shipped in `.env.example`; treated as "not configured".
pub const PLACEHOLDER_STORE_URL: &str = "https://your-project.supabase.co";
/// Sentinel anon key shipped in `.env.example`; treated as "not configured".
pub const PLACEHOLDER_STORE_KEY: &str = "your-anon-key-here";

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the hosted relational store, if provided.
    pub store_url: Option<String>,
    /// Anon/API key for the hosted store, if provided.
    pub store_key: Option<String>,
    /// Bearer token of an authenticated session, required for profile writes.
    pub store_access_token: Option<String>,
    /// Row id of the authenticated profile, paired with the access token.
    pub store_user_id: Option<String>,
    /// Per-request timeout applied to every outbound HTTP call.
    pub request_timeout: Duration,
    /// Base URL of the WHO Global Health Observatory API.
    pub who_base_url: String,
    /// ISO3 country code used when a caller does not name one.
    pub default_country: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let store_url = non_empty_env("SUPABASE_URL");
        let store_key = non_empty_env("SUPABASE_ANON_KEY");
        let store_access_token = non_empty_env("SUPABASE_ACCESS_TOKEN");
        let store_user_id = non_empty_env("SUPABASE_USER_ID");
        let timeout_secs = env::var("STORE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15u64);
        let who_base_url = env::var("WHO_API_BASE")
            .unwrap_or_else(|_| "https://ghoapi.azureedge.net/api".to_string());
        let default_country = env::var("DEFAULT_COUNTRY").unwrap_or_else(|_| "IND".to_string());

        Ok(Self {
            store_url,
            store_key,
            store_access_token,
            store_user_id,
            request_timeout: Duration::from_secs(timeout_secs),
            who_base_url,
            default_country,
        })
    }

    /// True only when both store credentials are present and neither is a
    /// placeholder sentinel. Every aggregator entry point consults this gate
    /// before issuing a store query; `false` means demo data without any
    /// network traffic.
    pub fn is_store_configured(&self) -> bool {
        let url_ok = self
            .store_url
            .as_deref()
            .map(|url| !url.is_empty() && url != PLACEHOLDER_STORE_URL)
            .unwrap_or(false);
        let key_ok = self
            .store_key
            .as_deref()
            .map(|key| !key.is_empty() && key != PLACEHOLDER_STORE_KEY)
            .unwrap_or(false);
        url_ok && key_ok
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
