//! MediaWiki Action API client.
//!
//! Provides a sync HTTP client for the `api.php` endpoint of a MediaWiki
//! installation. Anonymous read access is assumed.

mod files;
mod pages;

use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::source::{ContentSource, PageContent, PageId, SourceError};
use crate::types::QueryResponse;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Maximum number of titles or page IDs per API request.
const BATCH_SIZE: usize = 50;

/// User agent sent with every request (required by Wikimedia API etiquette).
const USER_AGENT: &str = concat!("mwdoc/", env!("CARGO_PKG_VERSION"));

/// MediaWiki API client.
pub struct MediaWikiClient {
    agent: Agent,
    api_url: String,
}

impl MediaWikiClient {
    /// Create client for an `api.php` endpoint.
    ///
    /// # Arguments
    /// * `api_url` - Full URL of `api.php` (e.g. `https://wiki.example.org/w/api.php`)
    #[must_use]
    pub fn new(api_url: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            api_url: api_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Get the API endpoint URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Run an `action=query` request with the given extra parameters.
    fn query(&self, params: &[(&str, &str)]) -> Result<QueryResponse, SourceError> {
        debug!("Querying {} with {:?}", self.api_url, params);

        let mut request = self
            .agent
            .get(&self.api_url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .query("action", "query")
            .query("format", "json")
            .query("formatversion", "2");
        for (key, value) in params {
            request = request.query(*key, *value);
        }

        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            return Err(SourceError::HttpResponse {
                status,
                body: error_body(&mut body_reader),
            });
        }

        let parsed: QueryResponse = serde_json::from_str(&body_reader.read_to_string()?)?;
        if let Some(error) = parsed.error {
            return Err(SourceError::Api {
                code: error.code,
                info: error.info,
            });
        }
        Ok(parsed)
    }
}

/// Read an error response body for diagnostics.
fn error_body(body: &mut ureq::Body) -> String {
    body.read_to_string()
        .unwrap_or_else(|_| "(unable to read error body)".to_owned())
}

/// Join page IDs with `|` for multi-value API parameters.
fn join_ids(ids: &[PageId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

impl ContentSource for MediaWikiClient {
    fn resolve_titles(&self, titles: &[&str]) -> Result<Vec<PageId>, SourceError> {
        let mut ids = Vec::with_capacity(titles.len());
        for chunk in titles.chunks(BATCH_SIZE) {
            ids.extend(self.resolve_chunk(chunk)?);
        }
        Ok(ids)
    }

    fn fetch_bodies(&self, ids: &[PageId]) -> Result<Vec<PageContent>, SourceError> {
        let mut pages = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(BATCH_SIZE) {
            pages.extend(self.fetch_bodies_chunk(chunk)?);
        }
        Ok(pages)
    }

    fn fetch_embedded_file_titles(&self, id: PageId) -> Result<Vec<String>, SourceError> {
        self.embedded_files(id)
    }

    fn fetch_file_urls(&self, ids: &[PageId]) -> Result<Vec<String>, SourceError> {
        let mut urls = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(BATCH_SIZE) {
            urls.extend(self.file_urls_chunk(chunk)?);
        }
        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = MediaWikiClient::new("https://wiki.example.org/w/api.php/");
        assert_eq!(client.api_url(), "https://wiki.example.org/w/api.php");
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[PageId(1), PageId(22), PageId(333)]), "1|22|333");
        assert_eq!(join_ids(&[]), "");
    }
}
