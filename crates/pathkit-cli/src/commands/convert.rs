//! Convert command implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use pathkit::{NativeRuntime, RunSummary};
use tracing::debug;

use crate::cli::ConvertArgs;
use crate::config;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the convert command.
///
/// 1. Layer defaults, config file, environment and flags into options
/// 2. Rewrite the tree
/// 3. Print a summary (or the raw results with `--json`)
///
/// # Errors
///
/// Configuration errors abort before any file is read. If individual files
/// fail, the run completes and [`CliError::FilesFailed`] is returned after
/// the summary is printed.
pub async fn execute(args: ConvertArgs, verbose: bool) -> Result<()> {
    let options = config::load_options(&args)?;
    debug!(?options, "resolved options");

    let base = base_for_display(&options.base_dir);
    let dry_run = options.dry_run;
    if !args.json {
        let verb = if dry_run { "Checking" } else { "Converting" };
        ui::info(&format!(
            "{} {} paths to {} in {}",
            verb,
            options.from_type,
            options.to_type,
            base.display()
        ));
    }

    let start = Instant::now();
    let results = pathkit::rewrite::run(options, Arc::new(NativeRuntime::new())).await?;
    let summary = RunSummary::from_results(&results);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        ui::print_convert_summary(&results, &base, start.elapsed(), verbose);
        if summary.errored == 0 {
            match (summary.modified, dry_run) {
                (0, _) => ui::success("Nothing to convert"),
                (n, true) => ui::success(&format!("{} file(s) would change (dry run)", n)),
                (n, false) => ui::success(&format!("Converted {} file(s)", n)),
            }
        } else {
            ui::warning(&format!(
                "{} file(s) left untouched because of errors",
                summary.errored
            ));
        }
    }

    if summary.errored > 0 {
        return Err(CliError::FilesFailed {
            failed: summary.errored,
            processed: summary.processed,
        });
    }
    Ok(())
}

/// Absolute form of the base directory, used to shorten printed paths.
fn base_for_display(base_dir: &std::path::Path) -> PathBuf {
    if base_dir.is_absolute() {
        return base_dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(base_dir))
        .unwrap_or_else(|_| base_dir.to_path_buf())
}
