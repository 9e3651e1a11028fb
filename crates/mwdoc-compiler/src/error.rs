//! Error types for document compilation.

use mwdoc_source::SourceError;

/// Error that aborts a compilation.
///
/// There is no partial output: any error means no document.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A referenced page or file does not exist.
    #[error("Page \"{title}\" is not found")]
    NotFound {
        /// Title as referenced.
        title: String,
    },

    /// The root page has no outline heading.
    #[error("Section \"{keyword}\" not found in root page \"{root}\"")]
    OutlineNotFound {
        /// Root page title.
        root: String,
        /// Outline heading title.
        keyword: String,
    },

    /// The outline heading is not followed by any list item.
    #[error("Section \"{keyword}\" of root page \"{root}\" has no outline entries")]
    EmptyOutline {
        /// Root page title.
        root: String,
        /// Outline heading title.
        keyword: String,
    },

    /// The content source failed.
    #[error("Failed to fetch \"{title}\"")]
    Source {
        /// Title being fetched.
        title: String,
        /// Underlying source error.
        #[source]
        source: SourceError,
    },

    /// `export` was called before a successful `generate`.
    #[error("Document has not been generated")]
    NotGenerated,
}

impl CompileError {
    /// Wrap a source error, keeping not-found errors first-class.
    pub(crate) fn from_source(title: &str, err: SourceError) -> Self {
        match err {
            SourceError::NotFound { title } => Self::NotFound { title },
            source => Self::Source {
                title: title.to_owned(),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_not_found_is_promoted() {
        let err = CompileError::from_source("Intro", SourceError::not_found("Intro "));
        assert!(matches!(&err, CompileError::NotFound { title } if title == "Intro "));
    }

    #[test]
    fn test_other_source_errors_keep_cause() {
        let err = CompileError::from_source("Intro", SourceError::Malformed("bad".to_owned()));
        assert_eq!(err.to_string(), "Failed to fetch \"Intro\"");
        assert!(err.source().is_some());
    }
}
