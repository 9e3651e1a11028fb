//! Document compiler.
//!
//! [`DocumentCompiler`] runs the whole pipeline in outline order:
//!
//! 1. Fetch the root page and parse its outline
//! 2. For each entry, emit its heading and import the referenced page
//! 3. Register imported pages and their embedded files
//! 4. Freeze the resolution table
//!
//! [`DocumentCompiler::export`] then rewrites links against the frozen table.
//! Rewriting is deferred until every page is imported, so links to pages
//! that appear later in the outline still resolve as internal.

use mwdoc_source::{ContentSource, PageContent, PageId};
use tracing::info;

use crate::error::CompileError;
use crate::heading::format_heading;
use crate::import::import_page;
use crate::link::{RewriteOptions, rewrite};
use crate::outline::{OutlineEntry, split_root_page};
use crate::table::{ImageManifest, ResolutionTable, TableBuilder};
use crate::title::{ImageSuffixes, normalize_title};

/// Default outline heading.
const DEFAULT_KEYWORD: &str = "Contents";

/// Configuration for compiling a document.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Title of the root page holding the outline.
    pub root: String,
    /// Title of the outline heading (matched case-sensitively).
    pub keyword: String,
    /// Whether the root page's text around the outline is kept.
    pub include_root_text: bool,
    /// Link rewriting options.
    pub rewrite: RewriteOptions,
}

impl CompileOptions {
    /// Options for `root` citing external pages under `external_base`.
    #[must_use]
    pub fn new(root: impl Into<String>, external_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            keyword: DEFAULT_KEYWORD.to_owned(),
            include_root_text: false,
            rewrite: RewriteOptions::new(external_base),
        }
    }

    /// Set the outline heading title.
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Keep the root page's text before and after the outline.
    #[must_use]
    pub fn include_root_text(mut self, enabled: bool) -> Self {
        self.include_root_text = enabled;
        self
    }

    /// Set the suffixes of files embedded as images.
    #[must_use]
    pub fn image_suffixes(mut self, suffixes: ImageSuffixes) -> Self {
        self.rewrite.image_suffixes = suffixes;
        self
    }
}

/// Result of a successful [`DocumentCompiler::generate`].
#[derive(Debug)]
struct Compilation {
    outline: Vec<OutlineEntry>,
    table: ResolutionTable,
    manifest: ImageManifest,
    buffer: Vec<String>,
}

/// Compiles a tree of wiki pages into one document.
pub struct DocumentCompiler<S> {
    source: S,
    options: CompileOptions,
    compilation: Option<Compilation>,
}

impl<S: ContentSource> DocumentCompiler<S> {
    /// Create a new compiler.
    #[must_use]
    pub fn new(source: S, options: CompileOptions) -> Self {
        Self {
            source,
            options,
            compilation: None,
        }
    }

    /// Compiler options.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Fetch and import every page of the outline.
    ///
    /// Starts from scratch on every call. On error, no compiled state is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NotFound`] naming the first missing page or
    /// file, [`CompileError::OutlineNotFound`] / [`CompileError::EmptyOutline`]
    /// if the root page has no usable outline, or [`CompileError::Source`] if
    /// the content source fails.
    pub fn generate(&mut self) -> Result<(), CompileError> {
        self.compilation = None;

        let root_title = self.options.root.clone();
        let root = self.fetch_page(&root_title)?;
        let root_page = split_root_page(&root.body, &self.options.keyword);

        if !root_page.section_found {
            return Err(CompileError::OutlineNotFound {
                root: root_title,
                keyword: self.options.keyword.clone(),
            });
        }
        if root_page.entries.is_empty() {
            return Err(CompileError::EmptyOutline {
                root: root_title,
                keyword: self.options.keyword.clone(),
            });
        }

        info!(
            "Compiling \"{}\" with {} outline entries",
            root.title,
            root_page.entries.len()
        );

        let mut builder = TableBuilder::new(self.options.rewrite.image_suffixes.clone());
        let mut buffer = Vec::new();

        if self.options.include_root_text {
            buffer.extend(root_page.prelude.iter().cloned());
        }
        for entry in &root_page.entries {
            self.import_entry(entry, &mut builder, &mut buffer)?;
        }
        if self.options.include_root_text {
            buffer.extend(root_page.epilogue.iter().cloned());
        }

        let (table, manifest) = builder.freeze();
        info!(
            "Imported {} lines, {} table entries, {} images",
            buffer.len(),
            table.len(),
            manifest.len()
        );

        self.compilation = Some(Compilation {
            outline: root_page.entries,
            table,
            manifest,
            buffer,
        });
        Ok(())
    }

    /// Rewrite links and return the compiled document.
    ///
    /// Calling this repeatedly yields identical output.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NotGenerated`] if [`generate`](Self::generate)
    /// has not succeeded.
    pub fn export(&self) -> Result<String, CompileError> {
        let compilation = self.compiled()?;
        Ok(rewrite(
            &compilation.buffer,
            &compilation.table,
            &self.options.rewrite,
        ))
    }

    /// Parsed outline of the root page.
    pub fn outline(&self) -> Result<&[OutlineEntry], CompileError> {
        Ok(&self.compiled()?.outline)
    }

    /// Frozen resolution table.
    pub fn table(&self) -> Result<&ResolutionTable, CompileError> {
        Ok(&self.compiled()?.table)
    }

    /// Images to download alongside the document.
    pub fn image_manifest(&self) -> Result<&ImageManifest, CompileError> {
        Ok(&self.compiled()?.manifest)
    }

    /// Assembled lines before link rewriting.
    pub fn buffer(&self) -> Result<&[String], CompileError> {
        Ok(&self.compiled()?.buffer)
    }

    fn compiled(&self) -> Result<&Compilation, CompileError> {
        self.compilation.as_ref().ok_or(CompileError::NotGenerated)
    }

    /// Emit the entry heading and import its page.
    fn import_entry(
        &self,
        entry: &OutlineEntry,
        builder: &mut TableBuilder,
        buffer: &mut Vec<String>,
    ) -> Result<(), CompileError> {
        buffer.push(format_heading(entry.depth, &entry.label));
        if entry.is_literal() {
            return Ok(());
        }

        let page = self.fetch_page(&entry.referenced_title)?;
        info!(
            "Importing \"{}\" at depth {}",
            page.title, entry.depth
        );
        buffer.extend(import_page(&page.body, entry.depth));

        builder.register_page(&entry.referenced_title, &entry.label);
        if normalize_title(&page.title) != normalize_title(&entry.referenced_title) {
            builder.register_page(&page.title, &entry.label);
        }

        self.register_files(&page, builder)
    }

    /// Register files embedded in an imported page.
    fn register_files(
        &self,
        page: &PageContent,
        builder: &mut TableBuilder,
    ) -> Result<(), CompileError> {
        let titles = self
            .source
            .fetch_embedded_file_titles(page.id)
            .map_err(|e| CompileError::from_source(&page.title, e))?;
        if titles.is_empty() {
            return Ok(());
        }

        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let ids = self
            .source
            .resolve_titles(&refs)
            .map_err(|e| CompileError::from_source(&page.title, e))?;
        let urls = self
            .source
            .fetch_file_urls(&ids)
            .map_err(|e| CompileError::from_source(&page.title, e))?;

        for (title, url) in titles.iter().zip(&urls) {
            builder.register_file(title, url);
        }
        Ok(())
    }

    /// Resolve and fetch a single page.
    fn fetch_page(&self, title: &str) -> Result<PageContent, CompileError> {
        let ids: Vec<PageId> = self
            .source
            .resolve_titles(&[title])
            .map_err(|e| CompileError::from_source(title, e))?;
        let pages = self
            .source
            .fetch_bodies(&ids)
            .map_err(|e| CompileError::from_source(title, e))?;
        pages
            .into_iter()
            .next()
            .ok_or_else(|| CompileError::NotFound {
                title: title.to_owned(),
            })
    }
}
