//! Title normalization.
//!
//! Wiki titles are written with spaces or underscores interchangeably and
//! with arbitrary surrounding whitespace. Normalized titles collapse every run
//! of whitespace and underscores to a single `_`, so `Main Page`,
//! `Main_Page` and ` Main  Page ` share one key.

/// Namespaces that mark a link target as a file.
const FILE_NAMESPACES: [&str; 3] = ["file", "media", "image"];

/// Normalize a page or file title for use as a lookup key.
///
/// # Examples
///
/// ```
/// use mwdoc_compiler::normalize_title;
///
/// assert_eq!(normalize_title(" Main  Page "), "Main_Page");
/// assert_eq!(normalize_title("Main_Page"), "Main_Page");
/// ```
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Strip a leading `File:`, `Media:` or `Image:` namespace (any case).
///
/// Returns `None` if the title is not in a file namespace.
#[must_use]
pub fn strip_file_namespace(title: &str) -> Option<&str> {
    let trimmed = title.trim_start();
    let (namespace, rest) = trimmed.split_once(':')?;
    let namespace = namespace.trim();
    FILE_NAMESPACES
        .iter()
        .any(|ns| namespace.eq_ignore_ascii_case(ns))
        .then_some(rest)
}

/// Case-insensitive lookup key for a file title, with or without namespace.
#[must_use]
pub fn file_key(title: &str) -> String {
    let name = strip_file_namespace(title).unwrap_or(title);
    normalize_title(name).to_lowercase()
}

/// File name suffixes treated as raster images.
///
/// Images are embedded in the compiled document and downloaded alongside it;
/// every other file is cited by URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSuffixes(Vec<String>);

impl Default for ImageSuffixes {
    fn default() -> Self {
        Self::new([".png", ".jpeg", ".jpg"])
    }
}

impl ImageSuffixes {
    /// Create a suffix set. Suffixes are matched case-insensitively.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// Check whether a file name ends with one of the suffixes.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.0.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    /// Configured suffixes (lower-cased).
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace_styles_agree() {
        assert_eq!(normalize_title("Unlisted Page"), "Unlisted_Page");
        assert_eq!(normalize_title("Unlisted_Page"), "Unlisted_Page");
        assert_eq!(normalize_title("  Unlisted \t Page  "), "Unlisted_Page");
        assert_eq!(normalize_title("Unlisted__ _Page"), "Unlisted_Page");
    }

    #[test]
    fn test_normalize_preserves_case() {
        assert_eq!(normalize_title("iPhone Guide"), "iPhone_Guide");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_title(" a  b_c ");
        assert_eq!(normalize_title(&once), once);
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_title("   "), "");
    }

    #[test]
    fn test_strip_file_namespace() {
        assert_eq!(strip_file_namespace("File:diagram.png"), Some("diagram.png"));
        assert_eq!(strip_file_namespace("media:Clip.ogg"), Some("Clip.ogg"));
        assert_eq!(strip_file_namespace("IMAGE:Logo.jpg"), Some("Logo.jpg"));
        assert_eq!(strip_file_namespace("Help:Contents"), None);
        assert_eq!(strip_file_namespace("Plain page"), None);
    }

    #[test]
    fn test_file_key_is_case_insensitive() {
        assert_eq!(file_key("File:My Diagram.PNG"), "my_diagram.png");
        assert_eq!(file_key("my_diagram.png"), "my_diagram.png");
    }

    #[test]
    fn test_image_suffixes_default() {
        let suffixes = ImageSuffixes::default();
        assert!(suffixes.matches("diagram.png"));
        assert!(suffixes.matches("Photo.JPG"));
        assert!(suffixes.matches("scan.jpeg"));
        assert!(!suffixes.matches("report.pdf"));
        assert!(!suffixes.matches("vector.svg"));
    }

    #[test]
    fn test_image_suffixes_custom() {
        let suffixes = ImageSuffixes::new([".SVG"]);
        assert!(suffixes.matches("vector.svg"));
        assert!(!suffixes.matches("diagram.png"));
        assert_eq!(suffixes.as_slice(), [".svg".to_owned()]);
    }
}
