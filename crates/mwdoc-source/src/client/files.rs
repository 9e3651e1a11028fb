//! File operations for MediaWiki API.

use std::path::Path;

use tracing::info;

use super::pages::find_page;
use super::{MediaWikiClient, USER_AGENT, error_body, join_ids};
use crate::source::{PageId, SourceError};
use crate::types::Query;

impl MediaWikiClient {
    /// List files embedded in a page, following API continuation.
    pub(super) fn embedded_files(&self, id: PageId) -> Result<Vec<String>, SourceError> {
        let id_param = id.to_string();
        let mut titles = Vec::new();
        let mut continuation: Vec<(String, String)> = Vec::new();

        info!("Getting embedded files of page {}", id);

        loop {
            let mut params = vec![
                ("prop", "images"),
                ("imlimit", "max"),
                ("pageids", id_param.as_str()),
            ];
            params.extend(continuation.iter().map(|(k, v)| (k.as_str(), v.as_str())));

            let response = self.query(&params)?;
            if let Some(query) = &response.query {
                titles.extend(collect_image_titles(query));
            }

            match response.continue_params() {
                Some(next) if !next.is_empty() => continuation = next,
                _ => break,
            }
        }

        Ok(titles)
    }

    /// Fetch direct URLs for up to one batch of file pages.
    pub(super) fn file_urls_chunk(&self, ids: &[PageId]) -> Result<Vec<String>, SourceError> {
        let joined = join_ids(ids);
        info!("Getting file URLs of page(s) {}", joined);

        let response = self.query(&[
            ("prop", "imageinfo"),
            ("iiprop", "url"),
            ("pageids", &joined),
        ])?;
        collect_file_urls(ids, &response.query.unwrap_or_default())
    }

    /// Download a file to `path`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request fails or the file cannot be written.
    pub fn download(&self, url: &str, path: &Path) -> Result<u64, SourceError> {
        info!("Downloading {} to {}", url, path.display());

        let response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            return Err(SourceError::HttpResponse {
                status,
                body: error_body(&mut body),
            });
        }

        let mut reader = body.into_reader();
        let mut file = std::fs::File::create(path)?;
        Ok(std::io::copy(&mut reader, &mut file)?)
    }
}

/// Titles of embedded files across all pages of a response.
fn collect_image_titles(query: &Query) -> impl Iterator<Item = String> + '_ {
    query
        .pages
        .iter()
        .flat_map(|page| page.images.iter().map(|image| image.title.clone()))
}

/// Extract file URLs in the order of the requested IDs.
fn collect_file_urls(ids: &[PageId], query: &Query) -> Result<Vec<String>, SourceError> {
    ids.iter()
        .map(|&id| {
            let page = find_page(query, id)?;
            page.imageinfo
                .first()
                .map(|info| info.url.clone())
                .ok_or_else(|| SourceError::Malformed(format!("file \"{}\" has no URL", page.title)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::QueryResponse;

    fn parse(json: &str) -> QueryResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_collect_image_titles() {
        let response = parse(
            r#"{"query":{"pages":[{"pageid":5,"title":"Intro","images":[
                {"ns":6,"title":"File:Diagram.png"},
                {"ns":6,"title":"File:Data sheet.pdf"}
            ]}]}}"#,
        );

        let titles: Vec<String> = collect_image_titles(response.query.as_ref().unwrap()).collect();

        assert_eq!(titles, vec!["File:Diagram.png", "File:Data sheet.pdf"]);
    }

    #[test]
    fn test_continue_params() {
        let response = parse(
            r#"{"continue":{"imcontinue":"5|Zeta.png","continue":"||"},"query":{"pages":[]}}"#,
        );

        let mut params = response.continue_params().unwrap();
        params.sort();

        assert_eq!(
            params,
            vec![
                ("continue".to_owned(), "||".to_owned()),
                ("imcontinue".to_owned(), "5|Zeta.png".to_owned()),
            ]
        );
    }

    #[test]
    fn test_no_continue_params_when_complete() {
        let response = parse(r#"{"batchcomplete":true,"query":{"pages":[]}}"#);
        assert!(response.continue_params().is_none());
    }

    #[test]
    fn test_collect_file_urls_in_requested_order() {
        let response = parse(
            r#"{"query":{"pages":[
                {"pageid":21,"title":"File:B.png","imageinfo":[{"url":"https://up.example.org/b/B.png"}]},
                {"pageid":20,"title":"File:A.png","imageinfo":[{"url":"https://up.example.org/a/A.png"}]}
            ]}}"#,
        );

        let urls = collect_file_urls(&[PageId(20), PageId(21)], response.query.as_ref().unwrap())
            .unwrap();

        assert_eq!(
            urls,
            vec![
                "https://up.example.org/a/A.png",
                "https://up.example.org/b/B.png"
            ]
        );
    }

    #[test]
    fn test_collect_file_urls_without_imageinfo() {
        let response = parse(r#"{"query":{"pages":[{"pageid":30,"title":"File:Gone.png"}]}}"#);

        let err = collect_file_urls(&[PageId(30)], response.query.as_ref().unwrap()).unwrap_err();

        assert!(matches!(err, SourceError::Malformed(_)));
        assert!(err.to_string().contains("File:Gone.png"));
    }

    #[test]
    fn test_api_error_object_parses() {
        let response = parse(r#"{"error":{"code":"readapidenied","info":"You need read permission"}}"#);
        let error = response.error.unwrap();
        assert_eq!(error.code, "readapidenied");
        assert_eq!(error.info, "You need read permission");
    }
}
