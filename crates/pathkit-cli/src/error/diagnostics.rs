//! Conversion of CLI errors into `miette` reports.

use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a report, adding a hint for library
/// configuration errors.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        CliError::Core(pathkit::Error::Config(e)) => {
            let hint = config_hint(&e);
            miette::miette!("Configuration error: {}\n\nHint: {}", e, hint)
        }
        _ => miette::miette!("{}", err),
    }
}

fn config_hint(err: &pathkit::ConfigError) -> &'static str {
    use pathkit::ConfigError as E;

    match err {
        E::MissingAliasPrefix { .. } => "Pass --alias-prefix or set aliasPrefix in pathkit.toml",
        E::MissingLibraries { .. } => "Declare workspace libraries with --lib NAME=MAIN or [libs]",
        E::MissingUrlMap { .. } => "Map URLs to local files with --url URL=PATH or [urlMap]",
        E::BaseDirNotFound(_) | E::BaseDirNotDirectory(_) => {
            "Pass an existing directory as the first argument"
        }
        E::InvalidValue { .. } => "Check the value against `pathkit convert --help`",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathkit::PathType;

    #[test]
    fn test_library_config_error_gets_hint() {
        let err = CliError::Core(pathkit::Error::Config(pathkit::ConfigError::MissingAliasPrefix {
            from: PathType::Relative,
            to: PathType::Alias,
        }));
        let report = format!("{}", cli_error_to_miette(err));
        assert!(report.contains("alias prefix"));
        assert!(report.contains("Hint: Pass --alias-prefix"));
    }

    #[test]
    fn test_other_errors_keep_message() {
        let err = CliError::FilesFailed {
            failed: 1,
            processed: 3,
        };
        let report = format!("{}", cli_error_to_miette(err));
        assert_eq!(report, "1 of 3 file(s) could not be processed");
    }
}
