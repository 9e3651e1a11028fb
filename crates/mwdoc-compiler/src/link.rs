//! Link tokenizing and rewriting.
//!
//! Every `[[...]]` link of the assembled document is rewritten in one pass
//! once all pages are imported:
//!
//! | Link                          | Condition            | Output                               |
//! |-------------------------------|----------------------|--------------------------------------|
//! | `[[Page]]`                    | page in table        | `[[#Label\|Label]]`                  |
//! | `[[Page]]`                    | page not in table    | `Page<ref>{base}Page</ref>`          |
//! | `[[File:a.png]]`              | image suffix         | `[[File:a.png]]`                     |
//! | `[[File:a.pdf]]`              | other file           | `a.pdf<ref>{base}File:a.pdf</ref>`   |
//!
//! An explicit alias (`[[Page|Shown]]`) is always the visible text.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::{Captures, Regex};
use tracing::warn;

use crate::table::ResolutionTable;
use crate::title::{ImageSuffixes, normalize_title};

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[\s*(?:(?i:(file|media|image))\s*:)?([^\[\]|#]*)(?:#([^\[\]|]*))?(?:\|([^\[\]]*))?\]\]")
        .unwrap()
});

/// Characters escaped when a title becomes part of a URL.
const TITLE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|');

/// Options for the rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// URL prefix for citations of pages outside the document
    /// (e.g. `https://wiki.example.org/wiki/`).
    pub external_base: String,
    /// Suffixes of files embedded as images.
    pub image_suffixes: ImageSuffixes,
}

impl RewriteOptions {
    /// Options with the default image suffixes.
    #[must_use]
    pub fn new(external_base: impl Into<String>) -> Self {
        Self {
            external_base: external_base.into(),
            image_suffixes: ImageSuffixes::default(),
        }
    }
}

/// A parsed `[[...]]` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkToken {
    /// Link target as written, without namespace prefix and fragment.
    pub target: String,
    /// Section after `#`.
    pub fragment: Option<String>,
    /// Text after the first `|`.
    pub alias: Option<String>,
    /// Whether the link had a `File:`/`Media:`/`Image:` prefix.
    pub is_file: bool,
}

impl LinkToken {
    /// Build a token from a link match; `None` for links without a target.
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let non_empty = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().trim())
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        let token = Self {
            target: caps.get(2).map_or("", |m| m.as_str()).trim().to_owned(),
            fragment: non_empty(3),
            alias: non_empty(4),
            is_file: caps.get(1).is_some(),
        };

        if token.target.is_empty() && (token.is_file || token.fragment.is_none()) {
            return None;
        }
        Some(token)
    }

    /// Visible text when no table label applies.
    #[must_use]
    pub fn display_text(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        match &self.fragment {
            Some(fragment) => format!("{}#{}", self.target, fragment),
            None => self.target.clone(),
        }
    }
}

/// Parse all links of a line.
pub fn tokenize(line: &str) -> impl Iterator<Item = LinkToken> + '_ {
    LINK_PATTERN
        .captures_iter(line)
        .filter_map(|caps| LinkToken::from_captures(&caps))
}

/// How a link is rendered.
enum LinkKind<'a> {
    /// Same-page section link (`[[#Section]]`).
    Anchor,
    /// Page that is part of the document, with its label.
    Internal(&'a str),
    /// Page outside the document.
    External,
    /// Image file, embedded.
    Image,
    /// Any other file, cited.
    ExternalFile,
}

fn classify<'a>(
    token: &LinkToken,
    table: &'a ResolutionTable,
    options: &RewriteOptions,
) -> LinkKind<'a> {
    if token.is_file {
        if options.image_suffixes.matches(&token.target) {
            LinkKind::Image
        } else {
            LinkKind::ExternalFile
        }
    } else if token.target.is_empty() {
        LinkKind::Anchor
    } else {
        table
            .page_label(&token.target)
            .map_or(LinkKind::External, LinkKind::Internal)
    }
}

/// Build the citation URL for a title.
fn external_url(base: &str, title: &str, fragment: Option<&str>) -> String {
    let mut url = format!("{base}{}", utf8_percent_encode(title, TITLE_ENCODE_SET));
    if let Some(fragment) = fragment {
        url.push('#');
        url.push_str(&utf8_percent_encode(&normalize_title(fragment), TITLE_ENCODE_SET).to_string());
    }
    url
}

/// File name to emit: the canonical spelling if the file was registered.
fn file_name(token: &LinkToken, table: &ResolutionTable) -> String {
    if let Some(name) = table.file_name(&token.target) {
        return name.to_owned();
    }
    let name = normalize_title(&token.target);
    warn!("File \"{}\" is not embedded in any imported page", name);
    name
}

fn cite(text: &str, url: &str) -> String {
    format!("{text}<ref>{url}</ref>")
}

/// Rewrite a single link.
#[must_use]
pub fn rewrite_link(token: &LinkToken, table: &ResolutionTable, options: &RewriteOptions) -> String {
    match classify(token, table, options) {
        LinkKind::Anchor => {
            let fragment = token.fragment.as_deref().unwrap_or_default();
            match &token.alias {
                Some(alias) => format!("[[#{fragment}|{alias}]]"),
                None => format!("[[#{fragment}]]"),
            }
        }
        LinkKind::Internal(label) => {
            let anchor = token.fragment.as_deref().unwrap_or(label);
            let text = token.alias.as_deref().unwrap_or(label);
            format!("[[#{anchor}|{text}]]")
        }
        LinkKind::External => {
            let url = external_url(
                &options.external_base,
                &normalize_title(&token.target),
                token.fragment.as_deref(),
            );
            cite(&token.display_text(), &url)
        }
        LinkKind::Image => {
            let name = file_name(token, table);
            match &token.alias {
                Some(alias) => format!("[[File:{name}|{alias}]]"),
                None => format!("[[File:{name}]]"),
            }
        }
        LinkKind::ExternalFile => {
            let title = format!("File:{}", file_name(token, table));
            let url = external_url(&options.external_base, &title, None);
            cite(&token.display_text(), &url)
        }
    }
}

/// Rewrite every link of a line.
#[must_use]
pub fn rewrite_line(line: &str, table: &ResolutionTable, options: &RewriteOptions) -> String {
    LINK_PATTERN
        .replace_all(line, |caps: &Captures<'_>| match LinkToken::from_captures(caps) {
            Some(token) => rewrite_link(&token, table, options),
            None => caps[0].to_owned(),
        })
        .into_owned()
}

/// Rewrite a whole buffer, producing the final text.
///
/// Lines are joined with `\n`; the result ends with a newline unless the
/// buffer is empty.
#[must_use]
pub fn rewrite(buffer: &[String], table: &ResolutionTable, options: &RewriteOptions) -> String {
    let mut text = String::new();
    for line in buffer {
        text.push_str(&rewrite_line(line, table, options));
        text.push('\n');
    }
    text
}
