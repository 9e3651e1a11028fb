//! Wiki content source for the mwdoc document compiler.
//!
//! This crate provides a [`ContentSource`] trait for abstracting page and file
//! retrieval from the wiki that holds the document tree. This enables:
//!
//! - **Unit testing** of the compiler without a live wiki
//! - **Batching**: titles and identifiers are resolved in groups, so backends
//!   can keep the number of round trips low
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentSource`] trait with the four lookups the compiler needs
//! - [`MediaWikiClient`] implementation over the MediaWiki Action API
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mwdoc_source::{ContentSource, MediaWikiClient};
//!
//! let client = MediaWikiClient::new("https://wiki.example.org/w/api.php");
//! let ids = client.resolve_titles(&["Main Page"])?;
//! for page in client.fetch_bodies(&ids)? {
//!     println!("{}: {} bytes", page.title, page.body.len());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
#[cfg(feature = "mock")]
mod mock;
mod source;
mod types;

pub use client::MediaWikiClient;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{ContentSource, PageContent, PageId, SourceError};
