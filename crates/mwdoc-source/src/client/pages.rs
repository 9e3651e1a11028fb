//! Page operations for MediaWiki API.

use tracing::info;

use super::{MediaWikiClient, join_ids};
use crate::source::{PageContent, PageId, SourceError};
use crate::types::{Page, Query};

impl MediaWikiClient {
    /// Resolve up to one batch of titles to page IDs.
    pub(super) fn resolve_chunk(&self, titles: &[&str]) -> Result<Vec<PageId>, SourceError> {
        let joined = titles.join("|");
        info!("Resolving {} title(s)", titles.len());

        let response = self.query(&[("titles", &joined), ("redirects", "1")])?;
        resolve_page_ids(titles, &response.query.unwrap_or_default())
    }

    /// Fetch latest revision content for up to one batch of page IDs.
    pub(super) fn fetch_bodies_chunk(&self, ids: &[PageId]) -> Result<Vec<PageContent>, SourceError> {
        let joined = join_ids(ids);
        info!("Getting content of page(s) {}", joined);

        let response = self.query(&[
            ("prop", "revisions"),
            ("rvprop", "content"),
            ("rvslots", "main"),
            ("pageids", &joined),
        ])?;
        collect_bodies(ids, &response.query.unwrap_or_default())
    }
}

/// Follow title normalization and redirects reported by the wiki.
fn canonical_title<'a>(title: &'a str, query: &'a Query) -> &'a str {
    let mut current = title;
    if let Some(mapping) = query.normalized.iter().find(|m| m.from == current) {
        current = &mapping.to;
    }
    // Bounded by the redirect count so loops terminate.
    for _ in 0..query.redirects.len() {
        match query.redirects.iter().find(|m| m.from == current) {
            Some(mapping) => current = &mapping.to,
            None => break,
        }
    }
    current
}

/// Map each requested title to the ID of the page it resolves to.
pub(super) fn resolve_page_ids(titles: &[&str], query: &Query) -> Result<Vec<PageId>, SourceError> {
    titles
        .iter()
        .map(|&title| {
            let canonical = canonical_title(title, query);
            query
                .pages
                .iter()
                .find(|page| page.title == canonical)
                .filter(|page| !page.missing && !page.invalid)
                .and_then(|page| page.pageid)
                .map(PageId)
                .ok_or_else(|| SourceError::not_found(title))
        })
        .collect()
}

/// Find a page entry by ID.
pub(super) fn find_page(query: &Query, id: PageId) -> Result<&Page, SourceError> {
    query
        .pages
        .iter()
        .find(|page| page.pageid == Some(id.0))
        .ok_or_else(|| SourceError::Malformed(format!("page {id} missing from response")))
}

/// Extract page content in the order of the requested IDs.
pub(super) fn collect_bodies(ids: &[PageId], query: &Query) -> Result<Vec<PageContent>, SourceError> {
    ids.iter()
        .map(|&id| {
            let page = find_page(query, id)?;
            let revision = page
                .revisions
                .first()
                .ok_or_else(|| SourceError::Malformed(format!("page {id} has no revisions")))?;
            Ok(PageContent {
                id,
                title: page.title.clone(),
                body: revision.slots.main.content.clone(),
            })
        })
        .collect()
}
