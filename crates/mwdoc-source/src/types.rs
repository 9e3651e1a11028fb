//! MediaWiki Action API response types (`formatversion=2`).
//!
//! Only includes fields that are actually used.
//! Serde ignores unknown fields from the API response.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level `action=query` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct QueryResponse {
    /// Query results (absent on errors).
    #[serde(default)]
    pub query: Option<Query>,
    /// Continuation parameters for the next request.
    #[serde(rename = "continue", default)]
    pub continuation: Option<Map<String, Value>>,
    /// API error object.
    #[serde(default)]
    pub error: Option<ApiError>,
}

impl QueryResponse {
    /// Continuation parameters as string pairs.
    pub fn continue_params(&self) -> Option<Vec<(String, String)>> {
        self.continuation.as_ref().map(|params| {
            params
                .iter()
                .filter_map(|(key, value)| match value {
                    Value::String(s) => Some((key.clone(), s.clone())),
                    Value::Number(n) => Some((key.clone(), n.to_string())),
                    _ => None,
                })
                .collect()
        })
    }
}

/// Query results.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Query {
    /// Title normalizations applied by the wiki (`Main_page` -> `Main page`).
    #[serde(default)]
    pub normalized: Vec<TitleMapping>,
    /// Redirects followed by the wiki.
    #[serde(default)]
    pub redirects: Vec<TitleMapping>,
    /// Pages.
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// A `from` -> `to` title mapping.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TitleMapping {
    pub from: String,
    pub to: String,
}

/// Page entry of a query response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Page {
    /// Page ID (absent for missing and invalid pages).
    #[serde(default)]
    pub pageid: Option<u64>,
    /// Canonical title.
    #[serde(default)]
    pub title: String,
    /// Page does not exist.
    #[serde(default)]
    pub missing: bool,
    /// Title is not a valid page title.
    #[serde(default)]
    pub invalid: bool,
    /// Revisions (`prop=revisions`).
    #[serde(default)]
    pub revisions: Vec<Revision>,
    /// Embedded files (`prop=images`).
    #[serde(default)]
    pub images: Vec<ImageRef>,
    /// File information (`prop=imageinfo`).
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
}

/// Page revision with slot content.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Revision {
    pub slots: Slots,
}

/// Revision slots.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Slots {
    pub main: Slot,
}

/// Main slot content.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Slot {
    #[serde(default)]
    pub content: String,
}

/// Reference to an embedded file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageRef {
    pub title: String,
}

/// File information.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImageInfo {
    /// Direct download URL.
    pub url: String,
}

/// API error object.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}
