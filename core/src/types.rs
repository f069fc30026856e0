//! Wire DTOs for the short-link API.
//!
//! # Design
//! These mirror the backend's camelCase JSON but are defined independently of
//! the mock-server crate; the integration tests catch schema drift.

use serde::{Deserialize, Serialize};
use url::Url;

/// A short link as returned by the create operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShortLinkRecord {
    /// Original target URL.
    pub url: String,
    /// Fully qualified short link.
    pub short_url: String,
}

impl ShortLinkRecord {
    pub fn short_code(&self) -> String {
        short_code_from_url(&self.short_url)
    }
}

/// Click statistics for one short code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRecord {
    pub short_code: String,
    pub click_count: u64,
}

/// Body of create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetUrl {
    pub url: String,
}

/// Body the backend sends with any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: String,
}

/// Last path segment of a short URL.
///
/// Returns an empty string when the URL ends in a slash, has no path segment,
/// or does not parse.
pub fn short_code_from_url(short_url: &str) -> String {
    let Ok(parsed) = Url::parse(short_url) else {
        return String::new();
    };
    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}
