//! Error types for pathkit.

use std::path::PathBuf;

use thiserror::Error;

use crate::classify::PathType;
use crate::path::PathError;
use crate::runtime::RuntimeError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Configuration problems detected before a run touches any file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("converting {from} to {to} requires an alias prefix (e.g. \"@/\")")]
    MissingAliasPrefix { from: PathType, to: PathType },

    #[error("converting {from} to {to} requires at least one workspace library")]
    MissingLibraries { from: PathType, to: PathType },

    #[error("converting {from} to {to} requires a URL map")]
    MissingUrlMap { from: PathType, to: PathType },

    #[error("base directory does not exist: {0}")]
    BaseDirNotFound(PathBuf),

    #[error("base directory is not a directory: {0}")]
    BaseDirNotDirectory(PathBuf),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidInputType(#[from] PathError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("no conversion registered for {from} -> {to}")]
    UnsupportedConversion { from: PathType, to: PathType },

    #[error("failed to access {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },
}

impl Error {
    /// Whether this error aborts a run before any file is processed.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
