//! Errors surfaced by the `pathkit` binary.
//!
//! Library failures pass through [`CliError::Core`] untouched. Problems with
//! the layered configuration (file, environment, flags) are [`ConfigError`]s
//! and end in a hint line. `main` turns either into a `miette` report via
//! [`cli_error_to_miette`].

mod diagnostics;

pub use diagnostics::cli_error_to_miette;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] pathkit::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The run completed, but some files could not be rewritten.
    #[error("{failed} of {processed} file(s) could not be processed")]
    FilesFailed { failed: usize, processed: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}\n\nHint: Create pathkit.toml in the working directory or pass --config <path>", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read {} as configuration\n\nHint: pathkit understands .toml, .json, .yaml and .yml files", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit::PathType;

    #[test]
    fn missing_config_names_the_file() {
        let msg = ConfigError::NotFound(PathBuf::from("custom.toml")).to_string();
        assert!(msg.starts_with("Config file not found: custom.toml"));
        assert!(msg.contains("Hint: Create pathkit.toml"));
    }

    #[test]
    fn unsupported_format_lists_extensions() {
        let msg = ConfigError::UnsupportedFormat(PathBuf::from("pathkit.ini")).to_string();
        assert!(msg.contains("pathkit.ini"));
        assert!(msg.contains(".yaml"));
    }

    #[test]
    fn invalid_value_carries_hint() {
        let err = ConfigError::InvalidValue {
            field: "toType".to_string(),
            value: "unknown variant `sideways`".to_string(),
            hint: "Use one of relative, absolute, alias, bare, module, dynamic".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid value for 'toType': unknown variant `sideways`"));
        assert!(msg.ends_with("Hint: Use one of relative, absolute, alias, bare, module, dynamic"));
    }

    #[test]
    fn library_errors_display_unchanged() {
        let core = pathkit::Error::UnsupportedConversion {
            from: PathType::Bare,
            to: PathType::Relative,
        };
        let expected = core.to_string();
        let err = CliError::from(core);
        assert!(matches!(err, CliError::Core(_)));
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn failed_files_summary() {
        let err = CliError::FilesFailed {
            failed: 2,
            processed: 7,
        };
        assert_eq!(err.to_string(), "2 of 7 file(s) could not be processed");
    }
}
