//! Shared DTOs for JSON responses.

use serde::Serialize;

/// Deployment status surfaced for the dashboard's trust badge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    /// Whether the store gate is open; `false` means every listing is demo
    /// data.
    pub store_configured: bool,
    /// Country used for health indicators when the caller names none.
    pub default_country: String,
}
