//! `mwdoc build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use mwdoc_compiler::{
    CompileOptions, DocumentCompiler, ImageManifest, ImageSuffixes, normalize_title,
};
use mwdoc_config::{CliSettings, Config};
use mwdoc_source::MediaWikiClient;
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Title of the root page (overrides config).
    root: Option<String>,

    /// Heading of the outline section (overrides config).
    #[arg(short, long)]
    keyword: Option<String>,

    /// Directory for the compiled document and images (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Keep root page text before and after the outline.
    #[arg(long)]
    include_root_text: bool,

    /// Do not download images.
    #[arg(long)]
    no_images: bool,

    /// Path to configuration file (default: auto-discover mwdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if any page cannot be fetched or files cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            root: self.root.clone(),
            keyword: self.keyword.clone(),
            output_dir: self.output_dir.clone(),
            include_root_text: self.include_root_text.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let (wiki, client) = super::create_client(&config)?;
        let root = config.require_root()?;
        let document = &config.document_resolved;

        let options = CompileOptions::new(root, wiki.external_base())
            .keyword(document.keyword.as_str())
            .include_root_text(document.include_root_text)
            .image_suffixes(ImageSuffixes::new(&document.image_suffixes));

        output.highlight(&format!("Compiling \"{root}\" from {}", wiki.api_url));
        let mut compiler = DocumentCompiler::new(&client, options);
        compiler.generate()?;
        let text = compiler.export()?;

        std::fs::create_dir_all(&document.output_dir)?;
        let document_path = document
            .output_dir
            .join(format!("{}.wiki", output_file_name(root)));
        std::fs::write(&document_path, text)?;
        let pages = compiler
            .outline()?
            .iter()
            .filter(|entry| !entry.is_literal())
            .count();
        output.info(&format!("Imported {pages} pages"));

        let manifest = compiler.image_manifest()?;
        if self.no_images {
            if !manifest.is_empty() {
                output.warning(&format!("Skipped {} images", manifest.len()));
            }
        } else {
            download_images(&client, manifest, &document.output_dir, &output)?;
        }

        output.success(&format!("Wrote {}", document_path.display()));
        Ok(())
    }
}

/// Download every manifest image into `dir`.
fn download_images(
    client: &MediaWikiClient,
    manifest: &ImageManifest,
    dir: &Path,
    output: &Output,
) -> Result<(), CliError> {
    info!("Downloading {} images to {}", manifest.len(), dir.display());
    for (name, url) in manifest.iter() {
        let path = dir.join(output_file_name(name));
        let bytes = client
            .download(url, &path)
            .map_err(|source| CliError::Download {
                name: name.to_owned(),
                source,
            })?;
        info!("Downloaded {} ({} bytes)", name, bytes);
        output.muted(&format!("  {name} ({bytes} bytes)"));
    }
    Ok(())
}

/// File name for a title: normalized, with path separators replaced.
fn output_file_name(title: &str) -> String {
    normalize_title(title).replace('/', "_")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("User Manual"), "User_Manual");
        assert_eq!(output_file_name("Manual/Install guide"), "Manual_Install_guide");
        assert_eq!(output_file_name("diagram.png"), "diagram.png");
    }
}
