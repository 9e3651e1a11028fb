//! CLI error types.

use mwdoc_compiler::CompileError;
use mwdoc_config::ConfigError;
use mwdoc_source::SourceError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("Failed to download \"{name}\": {source}")]
    Download {
        name: String,
        #[source]
        source: SourceError,
    },
}
