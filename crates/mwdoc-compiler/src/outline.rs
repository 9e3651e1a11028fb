//! Outline section parsing.
//!
//! The root page names the pages of the document in a list that directly
//! follows a heading titled with the outline keyword:
//!
//! ```text
//! == Contents ==
//! # [[Intro]]
//! # [[Methods|Our Approach]]
//! ## Appendix
//! ```
//!
//! Each bullet (`#` or `*`) adds one nesting level below the document root,
//! so a single bullet yields depth 2.

use std::sync::LazyLock;

use regex::Regex;

use crate::heading::parse_heading;

static ITEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([#*]+)\s*(?:\[\[([^\[\]|]*)(?:\|([^\[\]]*))?\]\]|(.+))").unwrap()
});

/// One entry of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// Heading depth of the entry (always at least 2).
    pub depth: usize,
    /// Title of the page to import, or empty for a literal entry.
    pub referenced_title: String,
    /// Text shown as the entry's heading.
    pub label: String,
}

impl OutlineEntry {
    /// Whether the entry only contributes a heading.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.referenced_title.is_empty()
    }
}

/// Root page split around its outline section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootPage {
    /// Lines before the outline heading.
    pub prelude: Vec<String>,
    /// Outline entries in source order.
    pub entries: Vec<OutlineEntry>,
    /// Lines after the outline list.
    pub epilogue: Vec<String>,
    /// Whether the outline heading was present at all.
    pub section_found: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeSection,
    InSection { seen_entry: bool },
    AfterSection,
}

/// Parse one list item of the outline.
fn parse_item(line: &str) -> Option<OutlineEntry> {
    let caps = ITEM_PATTERN.captures(line.trim())?;
    let depth = caps.get(1)?.as_str().len() + 1;

    let entry = if let Some(literal) = caps.get(4) {
        OutlineEntry {
            depth,
            referenced_title: String::new(),
            label: literal.as_str().trim().to_owned(),
        }
    } else {
        let target = caps.get(2).map_or("", |m| m.as_str().trim());
        let label = caps
            .get(3)
            .map(|m| m.as_str().trim())
            .filter(|alias| !alias.is_empty())
            .unwrap_or(target);
        OutlineEntry {
            depth,
            referenced_title: target.to_owned(),
            label: label.to_owned(),
        }
    };
    Some(entry)
}

/// Split a root page into prelude, outline and epilogue.
///
/// The outline is the contiguous list directly below the first heading whose
/// title equals `keyword` exactly. Blank lines between that heading and the
/// first item are skipped, so `== Contents ==` may be followed by an empty
/// line. Once the first item is seen, any line that is not a list item,
/// blank lines included, ends the outline and starts the epilogue.
#[must_use]
pub fn split_root_page(body: &str, keyword: &str) -> RootPage {
    let mut root = RootPage::default();
    let mut state = ScanState::BeforeSection;

    for line in body.lines() {
        match state {
            ScanState::BeforeSection => {
                if parse_heading(line).is_some_and(|h| h.title == keyword) {
                    root.section_found = true;
                    state = ScanState::InSection { seen_entry: false };
                } else {
                    root.prelude.push(line.trim_end().to_owned());
                }
            }
            ScanState::InSection { seen_entry } => {
                if let Some(entry) = parse_item(line) {
                    root.entries.push(entry);
                    state = ScanState::InSection { seen_entry: true };
                } else if !seen_entry && line.trim().is_empty() {
                    continue;
                } else {
                    root.epilogue.push(line.trim_end().to_owned());
                    state = ScanState::AfterSection;
                }
            }
            ScanState::AfterSection => root.epilogue.push(line.trim_end().to_owned()),
        }
    }

    root
}

/// Extract the ordered outline below the `keyword` heading.
///
/// Returns an empty list if the section is missing or has no items.
#[must_use]
pub fn parse_outline(body: &str, keyword: &str) -> Vec<OutlineEntry> {
    split_root_page(body, keyword).entries
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(depth: usize, referenced_title: &str, label: &str) -> OutlineEntry {
        OutlineEntry {
            depth,
            referenced_title: referenced_title.to_owned(),
            label: label.to_owned(),
        }
    }

    #[test]
    fn test_parse_links_and_aliases() {
        let body = "== Contents ==\n# [[Intro]]\n# [[Methods|Our Approach]]";
        assert_eq!(
            parse_outline(body, "Contents"),
            vec![
                entry(2, "Intro", "Intro"),
                entry(2, "Methods", "Our Approach"),
            ]
        );
    }

    #[test]
    fn test_parse_literal_and_nesting() {
        let body = "== Contents ==\n* Part One\n** [[ Chapter 1 ]]\n### [[Deep | Deep Dive ]]";
        assert_eq!(
            parse_outline(body, "Contents"),
            vec![
                entry(2, "", "Part One"),
                entry(3, "Chapter 1", "Chapter 1"),
                entry(4, "Deep", "Deep Dive"),
            ]
        );
    }

    #[test]
    fn test_literal_entry_is_literal() {
        assert!(entry(2, "", "Part").is_literal());
        assert!(!entry(2, "Page", "Page").is_literal());
    }

    #[test]
    fn test_depths_are_not_renumbered() {
        let body = "== Contents ==\n### [[Deep]]\n# [[Shallow]]";
        let depths: Vec<usize> = parse_outline(body, "Contents")
            .iter()
            .map(|e| e.depth)
            .collect();
        assert_eq!(depths, vec![4, 2]);
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        let body = "== contents ==\n# [[Intro]]";
        let root = split_root_page(body, "Contents");
        assert!(!root.section_found);
        assert!(root.entries.is_empty());
    }

    #[test]
    fn test_outline_ends_at_first_non_item() {
        let body = "== Contents ==\n# [[A]]\nplain text\n# [[B]]";
        assert_eq!(parse_outline(body, "Contents"), vec![entry(2, "A", "A")]);
    }

    #[test]
    fn test_outline_ends_at_next_heading() {
        let body = "== Contents ==\n# [[A]]\n== Notes ==\n# [[B]]";
        let root = split_root_page(body, "Contents");
        assert_eq!(root.entries, vec![entry(2, "A", "A")]);
        assert_eq!(root.epilogue, vec!["== Notes ==", "# [[B]]"]);
    }

    #[test]
    fn test_blank_lines_before_first_item_are_skipped() {
        let body = "== Contents ==\n\n# [[A]]\n\n# [[B]]";
        assert_eq!(parse_outline(body, "Contents"), vec![entry(2, "A", "A")]);
    }

    #[test]
    fn test_lines_outside_section_are_ignored() {
        let body = "# [[Before]]\n== Contents ==\n# [[Inside]]";
        let root = split_root_page(body, "Contents");
        assert_eq!(root.entries, vec![entry(2, "Inside", "Inside")]);
        assert_eq!(root.prelude, vec!["# [[Before]]"]);
    }

    #[test]
    fn test_section_without_items() {
        let root = split_root_page("Intro text\n== Contents ==\nNo list here", "Contents");
        assert!(root.section_found);
        assert!(root.entries.is_empty());
        assert_eq!(root.prelude, vec!["Intro text"]);
        assert_eq!(root.epilogue, vec!["No list here"]);
    }

    #[test]
    fn test_link_followed_by_text_uses_link() {
        let body = "== Contents ==\n# [[Intro]] (draft)";
        assert_eq!(parse_outline(body, "Contents"), vec![entry(2, "Intro", "Intro")]);
    }

    #[test]
    fn test_empty_alias_falls_back_to_target() {
        let body = "== Contents ==\n# [[Intro|]]";
        assert_eq!(parse_outline(body, "Contents"), vec![entry(2, "Intro", "Intro")]);
    }
}
