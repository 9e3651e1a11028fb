//! Resolution table and image manifest.
//!
//! The [`TableBuilder`] is fed while pages are imported and then frozen into
//! a read-only [`ResolutionTable`] for the rewrite pass, so no link can be
//! resolved against a partially built table.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::title::{ImageSuffixes, file_key, normalize_title, strip_file_namespace};

/// Key of a resolution table entry.
///
/// Page keys keep the case of the title; file keys are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    /// Normalized page title.
    Page(String),
    /// Normalized, lower-cased file name without namespace.
    File(String),
}

impl TableKey {
    /// Key for a page title.
    #[must_use]
    pub fn page(title: &str) -> Self {
        Self::Page(normalize_title(title))
    }

    /// Key for a file title, with or without `File:` namespace.
    #[must_use]
    pub fn file(title: &str) -> Self {
        Self::File(file_key(title))
    }
}

/// Images to download alongside the compiled document.
///
/// Maps normalized file names (case preserved, namespace stripped) to their
/// source URLs. Iteration order is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageManifest {
    images: BTreeMap<String, String>,
}

impl ImageManifest {
    /// Source URL of an image.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.images.get(name).map(String::as_str)
    }

    /// Iterate over `(name, url)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.images
            .iter()
            .map(|(name, url)| (name.as_str(), url.as_str()))
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the manifest is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Accumulates resolution table entries during import.
#[derive(Debug)]
pub struct TableBuilder {
    entries: HashMap<TableKey, String>,
    file_names: HashMap<String, String>,
    manifest: ImageManifest,
    image_suffixes: ImageSuffixes,
}

impl TableBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new(image_suffixes: ImageSuffixes) -> Self {
        Self {
            entries: HashMap::new(),
            file_names: HashMap::new(),
            manifest: ImageManifest::default(),
            image_suffixes,
        }
    }

    /// Mark a page as part of the document, shown as `label`.
    ///
    /// A later registration of the same normalized title wins.
    pub fn register_page(&mut self, title: &str, label: &str) {
        let key = TableKey::page(title);
        debug!("Registering page {:?} as \"{}\"", key, label);
        self.entries.insert(key, label.to_owned());
    }

    /// Record a file embedded in an imported page.
    ///
    /// `title` is the canonical title reported by the wiki; its spelling is
    /// kept as the file name. Image files are also added to the manifest.
    pub fn register_file(&mut self, title: &str, url: &str) {
        let key = TableKey::file(title);
        debug!("Registering file {:?} at {}", key, url);
        let name = normalize_title(strip_file_namespace(title).unwrap_or(title));
        self.file_names.insert(file_key(title), name.clone());
        self.entries.insert(key, url.to_owned());

        if self.image_suffixes.matches(&name) {
            self.manifest.images.insert(name, url.to_owned());
        }
    }

    /// Finish building: the table becomes read-only.
    #[must_use]
    pub fn freeze(self) -> (ResolutionTable, ImageManifest) {
        (
            ResolutionTable {
                entries: self.entries,
                file_names: self.file_names,
            },
            self.manifest,
        )
    }
}

/// Read-only map deciding how links are rewritten.
///
/// A page present in the table is part of the compiled document; an absent
/// page is external and gets cited by URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionTable {
    entries: HashMap<TableKey, String>,
    file_names: HashMap<String, String>,
}

impl ResolutionTable {
    /// Label of a page that is part of the document.
    #[must_use]
    pub fn page_label(&self, title: &str) -> Option<&str> {
        self.entries.get(&TableKey::page(title)).map(String::as_str)
    }

    /// Source URL of a file embedded in an imported page.
    #[must_use]
    pub fn file_url(&self, title: &str) -> Option<&str> {
        self.entries.get(&TableKey::file(title)).map(String::as_str)
    }

    /// Canonical name of a registered file, as it is stored in the manifest.
    #[must_use]
    pub fn file_name(&self, title: &str) -> Option<&str> {
        self.file_names.get(&file_key(title)).map(String::as_str)
    }

    /// Raw entry lookup.
    #[must_use]
    pub fn get(&self, key: &TableKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries (pages and files).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn builder() -> TableBuilder {
        TableBuilder::new(ImageSuffixes::default())
    }

    #[test]
    fn test_page_lookup_ignores_whitespace_style() {
        let mut builder = builder();
        builder.register_page("Unlisted Page", "Label");
        let (table, _) = builder.freeze();

        assert_eq!(table.page_label("Unlisted_Page"), Some("Label"));
        assert_eq!(table.page_label(" Unlisted  Page "), Some("Label"));
    }

    #[test]
    fn test_page_lookup_is_case_sensitive() {
        let mut builder = builder();
        builder.register_page("Intro", "Intro");
        let (table, _) = builder.freeze();

        assert_eq!(table.page_label("intro"), None);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut builder = builder();
        builder.register_page("Foo", "First");
        builder.register_page("Foo ", "Second");
        let (table, _) = builder.freeze();

        assert_eq!(table.len(), 1);
        assert_eq!(table.page_label("Foo"), Some("Second"));
    }

    #[test]
    fn test_file_lookup_is_case_insensitive() {
        let mut builder = builder();
        builder.register_file("File:Diagram.PNG", "https://up.example.org/Diagram.PNG");
        let (table, _) = builder.freeze();

        assert_eq!(
            table.file_url("file:diagram.png"),
            Some("https://up.example.org/Diagram.PNG")
        );
        assert_eq!(
            table.file_url("Diagram.png"),
            Some("https://up.example.org/Diagram.PNG")
        );
    }

    #[test]
    fn test_file_name_keeps_canonical_spelling() {
        let mut builder = builder();
        builder.register_file("File:Diagram v2.png", "https://up.example.org/Diagram_v2.png");
        let (table, manifest) = builder.freeze();

        assert_eq!(table.file_name("diagram_v2.png"), Some("Diagram_v2.png"));
        assert!(manifest.get("Diagram_v2.png").is_some());
        assert_eq!(table.file_name("other.png"), None);
    }

    #[test]
    fn test_pages_and_files_do_not_collide() {
        let mut builder = builder();
        builder.register_page("report.pdf", "Report");
        builder.register_file("File:report.pdf", "https://up.example.org/report.pdf");
        let (table, _) = builder.freeze();

        assert_eq!(table.len(), 2);
        assert_eq!(table.page_label("report.pdf"), Some("Report"));
        assert_eq!(
            table.get(&TableKey::File("report.pdf".to_owned())),
            Some("https://up.example.org/report.pdf")
        );
    }

    #[test]
    fn test_only_images_enter_manifest() {
        let mut builder = builder();
        builder.register_file("File:My diagram.png", "https://up.example.org/a.png");
        builder.register_file("File:Handbook.pdf", "https://up.example.org/Handbook.pdf");
        let (_, manifest) = builder.freeze();

        assert_eq!(manifest.len(), 1);
        assert_eq!(
            manifest.get("My_diagram.png"),
            Some("https://up.example.org/a.png")
        );
        assert_eq!(manifest.get("Handbook.pdf"), None);
    }

    #[test]
    fn test_manifest_iterates_sorted() {
        let mut builder = builder();
        builder.register_file("File:b.png", "u2");
        builder.register_file("File:a.jpg", "u1");
        let (_, manifest) = builder.freeze();

        let names: Vec<&str> = manifest.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_custom_image_suffixes() {
        let mut builder = TableBuilder::new(ImageSuffixes::new([".svg"]));
        builder.register_file("File:logo.svg", "u1");
        builder.register_file("File:photo.png", "u2");
        let (_, manifest) = builder.freeze();

        assert_eq!(manifest.len(), 1);
        assert!(manifest.get("logo.svg").is_some());
    }
}
