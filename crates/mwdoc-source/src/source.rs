//! Content source trait and error types.
//!
//! Provides the core [`ContentSource`] trait for abstracting wiki page and
//! file retrieval, along with [`SourceError`] for unified error handling
//! across backends.
//!
//! # Title Convention
//!
//! Titles are passed as written in wiki markup. Backends are responsible for
//! mapping equivalent spellings (`Main Page`, `Main_Page`, ` Main  Page `)
//! to the same page, so duplicate titles always resolve to the same
//! [`PageId`].

use std::fmt;

/// Stable identifier of a wiki page or file description page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Latest revision of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Page identifier.
    pub id: PageId,
    /// Canonical title as reported by the wiki (after redirects).
    pub title: String,
    /// Raw wiki markup of the latest revision.
    pub body: String,
}

/// Error from content source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Title does not resolve to an existing page or file.
    #[error("Page \"{title}\" is not found")]
    NotFound {
        /// Title as requested.
        title: String,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// The wiki API answered with an error object.
    #[error("API error {code}: {info}")]
    Api {
        /// Machine-readable error code.
        code: String,
        /// Human-readable error description.
        info: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Response was well-formed JSON but lacked expected data.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Create a not found error for a title.
    #[must_use]
    pub fn not_found(title: impl Into<String>) -> Self {
        Self::NotFound {
            title: title.into(),
        }
    }
}

/// Retrieval interface the document compiler needs from a wiki.
///
/// All batch operations return results in the order of their input.
pub trait ContentSource {
    /// Resolve titles to page identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::NotFound`] naming the first title that does not
    /// exist, or another [`SourceError`] if the backend fails.
    fn resolve_titles(&self, titles: &[&str]) -> Result<Vec<PageId>, SourceError>;

    /// Fetch the latest markup of each page.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if any page cannot be fetched.
    fn fetch_bodies(&self, ids: &[PageId]) -> Result<Vec<PageContent>, SourceError>;

    /// List titles of files embedded in a page (e.g. `File:Diagram.png`).
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the listing cannot be fetched.
    fn fetch_embedded_file_titles(&self, id: PageId) -> Result<Vec<String>, SourceError>;

    /// Fetch direct download URLs for file description pages.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if any file has no downloadable content.
    fn fetch_file_urls(&self, ids: &[PageId]) -> Result<Vec<String>, SourceError>;
}

impl<S: ContentSource + ?Sized> ContentSource for &S {
    fn resolve_titles(&self, titles: &[&str]) -> Result<Vec<PageId>, SourceError> {
        (**self).resolve_titles(titles)
    }

    fn fetch_bodies(&self, ids: &[PageId]) -> Result<Vec<PageContent>, SourceError> {
        (**self).fetch_bodies(ids)
    }

    fn fetch_embedded_file_titles(&self, id: PageId) -> Result<Vec<String>, SourceError> {
        (**self).fetch_embedded_file_titles(id)
    }

    fn fetch_file_urls(&self, ids: &[PageId]) -> Result<Vec<String>, SourceError> {
        (**self).fetch_file_urls(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_display() {
        assert_eq!(PageId(42).to_string(), "42");
    }

    #[test]
    fn test_not_found_message_names_title() {
        let err = SourceError::not_found("Missing Page");
        assert!(matches!(err, SourceError::NotFound { .. }));
        assert_eq!(err.to_string(), "Page \"Missing Page\" is not found");
    }

    #[test]
    fn test_api_error_message() {
        let err = SourceError::Api {
            code: "badvalue".to_owned(),
            info: "Unrecognized value".to_owned(),
        };
        assert_eq!(err.to_string(), "API error badvalue: Unrecognized value");
    }
}
