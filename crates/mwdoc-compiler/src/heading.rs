//! Heading lines (`== Title ==`).

use std::sync::LazyLock;

use regex::Regex;

// Trailing HTML comments after the closing markers still form a heading.
static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(=+)\s*(.+?)\s*(=+)\s*((?:<!--.*?-->\s*)*)$").unwrap()
});

/// A heading line split into depth and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Number of leading `=` markers.
    pub depth: usize,
    /// Heading text without markers and surrounding whitespace.
    pub title: &'a str,
    /// HTML comments following the closing markers, or empty.
    pub trailer: &'a str,
}

/// Parse a heading line. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_heading(line: &str) -> Option<Heading<'_>> {
    let caps = HEADING_PATTERN.captures(line.trim())?;
    Some(Heading {
        depth: caps.get(1)?.as_str().len(),
        title: caps.get(2)?.as_str(),
        trailer: caps.get(4).map_or("", |m| m.as_str().trim_end()),
    })
}

/// Render a heading with `depth` markers on both sides.
///
/// # Examples
///
/// ```
/// use mwdoc_compiler::format_heading;
///
/// assert_eq!(format_heading(2, "Intro"), "== Intro ==");
/// ```
#[must_use]
pub fn format_heading(depth: usize, title: &str) -> String {
    let tag = "=".repeat(depth);
    format!("{tag} {title} {tag}")
}
