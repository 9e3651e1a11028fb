//! `mwdoc outline` command implementation.

use std::path::PathBuf;

use clap::Args;
use mwdoc_compiler::{OutlineEntry, parse_outline};
use mwdoc_config::{CliSettings, Config};
use mwdoc_source::{ContentSource, SourceError};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Title of the root page (overrides config).
    root: Option<String>,

    /// Heading of the outline section (overrides config).
    #[arg(short, long)]
    keyword: Option<String>,

    /// Path to configuration file (default: auto-discover mwdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl OutlineArgs {
    /// Execute the outline command.
    ///
    /// # Errors
    ///
    /// Returns an error if the root page cannot be fetched.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root.clone(),
            keyword: self.keyword.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let (_, client) = super::create_client(&config)?;
        let root = config.require_root()?;
        let keyword = &config.document_resolved.keyword;

        let ids = client.resolve_titles(&[root])?;
        let page = client
            .fetch_bodies(&ids)?
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::not_found(root))?;

        let entries = parse_outline(&page.body, keyword);
        if entries.is_empty() {
            output.warning(&format!(
                "No outline entries under \"{keyword}\" in \"{}\"",
                page.title
            ));
            return Ok(());
        }

        output.highlight(&format!("{} ({} entries)", page.title, entries.len()));
        for entry in &entries {
            output.info(&format_entry(entry));
        }
        Ok(())
    }
}

/// Render an entry indented by its nesting level.
fn format_entry(entry: &OutlineEntry) -> String {
    let indent = "  ".repeat(entry.depth.saturating_sub(2));
    if entry.is_literal() {
        format!("{indent}{}", entry.label)
    } else if entry.label == entry.referenced_title {
        format!("{indent}{} (page)", entry.label)
    } else {
        format!("{indent}{} (page \"{}\")", entry.label, entry.referenced_title)
    }
}
