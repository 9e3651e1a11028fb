//! Mock content source implementation for testing.
//!
//! Provides [`MockSource`] for unit testing without network access.

use crate::source::{ContentSource, PageContent, PageId, SourceError};

/// Lookup key that treats `_` and whitespace runs as a single space.
///
/// Must stay in sync with `normalize_title` in `mwdoc-compiler`.
fn title_key(title: &str) -> String {
    title
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug)]
struct MockEntry {
    title: String,
    body: String,
    files: Vec<String>,
    url: Option<String>,
}

/// Mock content source for testing.
///
/// Stores pages and files in memory. Use the builder methods
/// to configure the mock with test data. Page IDs are assigned in
/// insertion order starting at 1.
///
/// # Example
///
/// ```ignore
/// use mwdoc_source::{ContentSource, MockSource};
///
/// let source = MockSource::new()
///     .with_page("Intro", "= Overview =\ntext")
///     .with_file("File:Diagram.png", "https://up.example.org/Diagram.png")
///     .with_embedded_files("Intro", &["File:Diagram.png"]);
///
/// let ids = source.resolve_titles(&["Intro"]).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    entries: Vec<MockEntry>,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given title and markup.
    #[must_use]
    pub fn with_page(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.entries.push(MockEntry {
            title: title.into(),
            body: body.into(),
            files: Vec::new(),
            url: None,
        });
        self
    }

    /// Add a file description page with its download URL.
    #[must_use]
    pub fn with_file(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        self.entries.push(MockEntry {
            title: title.into(),
            body: String::new(),
            files: Vec::new(),
            url: Some(url.into()),
        });
        self
    }

    /// Declare files embedded in a previously added page.
    ///
    /// # Panics
    ///
    /// Panics if the page has not been added.
    #[must_use]
    pub fn with_embedded_files(mut self, page: &str, files: &[&str]) -> Self {
        let index = self
            .find(page)
            .unwrap_or_else(|| panic!("mock page \"{page}\" not added"));
        self.entries[index]
            .files
            .extend(files.iter().map(|&f| f.to_owned()));
        self
    }

    fn find(&self, title: &str) -> Option<usize> {
        let key = title_key(title);
        self.entries.iter().position(|e| title_key(&e.title) == key)
    }

    fn entry(&self, id: PageId) -> Result<&MockEntry, SourceError> {
        usize::try_from(id.0)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.entries.get(index))
            .ok_or_else(|| SourceError::Malformed(format!("unknown page id {id}")))
    }
}

impl ContentSource for MockSource {
    fn resolve_titles(&self, titles: &[&str]) -> Result<Vec<PageId>, SourceError> {
        titles
            .iter()
            .map(|&title| {
                self.find(title)
                    .map(|index| PageId(index as u64 + 1))
                    .ok_or_else(|| SourceError::not_found(title))
            })
            .collect()
    }

    fn fetch_bodies(&self, ids: &[PageId]) -> Result<Vec<PageContent>, SourceError> {
        ids.iter()
            .map(|&id| {
                let entry = self.entry(id)?;
                Ok(PageContent {
                    id,
                    title: entry.title.clone(),
                    body: entry.body.clone(),
                })
            })
            .collect()
    }

    fn fetch_embedded_file_titles(&self, id: PageId) -> Result<Vec<String>, SourceError> {
        Ok(self.entry(id)?.files.clone())
    }

    fn fetch_file_urls(&self, ids: &[PageId]) -> Result<Vec<String>, SourceError> {
        ids.iter()
            .map(|&id| {
                let entry = self.entry(id)?;
                entry.url.clone().ok_or_else(|| {
                    SourceError::Malformed(format!("file \"{}\" has no URL", entry.title))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn source() -> MockSource {
        MockSource::new()
            .with_page("Intro", "= Overview =\ntext")
            .with_page("Methods", "more text")
            .with_file("File:Diagram.png", "https://up.example.org/Diagram.png")
            .with_embedded_files("Intro", &["File:Diagram.png"])
    }

    #[test]
    fn test_resolve_titles_ignores_whitespace_style() {
        let source = source();
        let ids = source
            .resolve_titles(&["Methods", " Intro ", "File:Diagram.png"])
            .unwrap();
        assert_eq!(ids, vec![PageId(2), PageId(1), PageId(3)]);
    }

    #[test]
    fn test_resolve_titles_not_found() {
        let err = source().resolve_titles(&["Intro", "Nope"]).unwrap_err();
        assert!(matches!(&err, SourceError::NotFound { title } if title == "Nope"));
    }

    #[test]
    fn test_fetch_bodies() {
        let pages = source().fetch_bodies(&[PageId(1)]).unwrap();
        assert_eq!(pages[0].title, "Intro");
        assert_eq!(pages[0].body, "= Overview =\ntext");
    }

    #[test]
    fn test_embedded_files_and_urls() {
        let source = source();
        let files = source.fetch_embedded_file_titles(PageId(1)).unwrap();
        assert_eq!(files, vec!["File:Diagram.png"]);

        let urls = source.fetch_file_urls(&[PageId(3)]).unwrap();
        assert_eq!(urls, vec!["https://up.example.org/Diagram.png"]);
    }

    #[test]
    fn test_file_url_of_plain_page_is_malformed() {
        let err = source().fetch_file_urls(&[PageId(2)]).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }

    #[test]
    fn test_unknown_id() {
        assert!(source().fetch_bodies(&[PageId(0)]).is_err());
        assert!(source().fetch_bodies(&[PageId(99)]).is_err());
    }
}
