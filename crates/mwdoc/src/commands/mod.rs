//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod outline;

pub(crate) use build::BuildArgs;
pub(crate) use outline::OutlineArgs;

use mwdoc_config::{Config, WikiConfig};
use mwdoc_source::MediaWikiClient;

/// Create a wiki client from the `[wiki]` section.
fn create_client(config: &Config) -> Result<(&WikiConfig, MediaWikiClient), crate::error::CliError> {
    let wiki = config.require_wiki()?;
    Ok((wiki, MediaWikiClient::new(&wiki.api_url)))
}
