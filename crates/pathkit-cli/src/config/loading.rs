use crate::cli::ConvertArgs;
use crate::config::ConfigOverrides;
use crate::error::{CliError, ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml, Yaml},
};
use pathkit::RewriteOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "PATHKIT_";

/// Config files looked up in the working directory when `--config` is not
/// given, in order.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["pathkit.toml", "pathkit.json"];

/// Load rewrite options for `args` from the process working directory.
pub fn load_options(args: &ConvertArgs) -> Result<RewriteOptions> {
    let cwd = std::env::current_dir()?;
    load_options_in(args, &cwd)
}

/// Load rewrite options, looking up config files relative to `cwd`.
/// Priority: CLI args > environment variables > config file > defaults
pub fn load_options_in(args: &ConvertArgs, cwd: &Path) -> Result<RewriteOptions> {
    // Keys no source sets fall back to `RewriteOptions::default()`.
    let mut figment = Figment::new();

    if let Some(path) = find_config_file(args.config.as_deref(), cwd)? {
        debug!(path = %path.display(), "loading config file");
        figment = merge_file(figment, &path)?;
    }

    // PATHKIT_ALIAS_PREFIX, PATHKIT_DRY_RUN, ...
    let env: ConfigOverrides = Figment::from(Env::prefixed(ENV_PREFIX))
        .extract()
        .map_err(invalid_config)?;

    figment
        .merge(Serialized::defaults(env))
        .merge(Serialized::defaults(ConfigOverrides::from(args)))
        .extract()
        .map_err(invalid_config)
}

/// The config file to read: `explicit` (relative to `cwd`), which must
/// exist, or the first of [`DEFAULT_CONFIG_FILES`] present in `cwd`.
pub fn find_config_file(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) => {
            let resolved = cwd.join(path);
            if resolved.is_file() {
                Ok(Some(resolved))
            } else {
                Err(ConfigError::NotFound(path.to_path_buf()).into())
            }
        }
        None => Ok(DEFAULT_CONFIG_FILES
            .iter()
            .map(|name| cwd.join(name))
            .find(|candidate| candidate.is_file())),
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf()).into()),
    }
}

fn invalid_config(err: figment::Error) -> CliError {
    let field = if err.path.is_empty() {
        "configuration".to_string()
    } else {
        err.path.join(".")
    };
    ConfigError::InvalidValue {
        field,
        value: err.kind.to_string(),
        hint: "Check pathkit.toml and PATHKIT_* variables against `pathkit convert --help`"
            .to_string(),
    }
    .into()
}
