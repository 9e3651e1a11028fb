//! Wiki document compiler.
//!
//! Assembles a single linear document out of a tree of wiki pages. The root
//! page carries an outline section (by default `== Contents ==`) whose list
//! items reference the pages to import:
//!
//! ```text
//! == Contents ==
//! # [[Intro]]
//! # [[Methods|Our Approach]]
//! ## Appendix
//! ```
//!
//! # Pipeline
//!
//! 1. [`parse_outline`] extracts the ordered outline from the root page.
//! 2. [`import_page`] retags each referenced page's headings so they nest
//!    under their outline entry.
//! 3. [`TableBuilder`] records which titles are part of the document and
//!    which embedded images must be downloaded ([`ImageManifest`]).
//! 4. [`rewrite`] turns every link into an internal cross-reference, an
//!    inline citation or an image embed, using the frozen
//!    [`ResolutionTable`].
//!
//! [`DocumentCompiler`] drives the whole pipeline against a
//! [`ContentSource`](mwdoc_source::ContentSource).
//!
//! # Example
//!
//! ```ignore
//! use mwdoc_compiler::{CompileOptions, DocumentCompiler};
//! use mwdoc_source::MediaWikiClient;
//!
//! let client = MediaWikiClient::new("https://wiki.example.org/w/api.php");
//! let options = CompileOptions::new("Manual", "https://wiki.example.org/wiki/");
//! let mut compiler = DocumentCompiler::new(&client, options);
//! compiler.generate()?;
//! let text = compiler.export()?;
//! ```

mod compiler;
mod error;
mod heading;
mod import;
mod link;
mod outline;
mod table;
mod title;

pub use compiler::{CompileOptions, DocumentCompiler};
pub use error::CompileError;
pub use heading::{Heading, format_heading, parse_heading};
pub use import::{import_page, shift_depth};
pub use link::{LinkToken, RewriteOptions, rewrite, rewrite_line, rewrite_link, tokenize};
pub use outline::{OutlineEntry, RootPage, parse_outline, split_root_page};
pub use table::{ImageManifest, ResolutionTable, TableBuilder, TableKey};
pub use title::{ImageSuffixes, file_key, normalize_title, strip_file_namespace};
