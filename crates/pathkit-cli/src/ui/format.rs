//! Durations and the `convert` summary.

use console::Term;
use owo_colors::OwoColorize;
use pathkit::{FileChangeResult, RunSummary};
use std::path::Path;
use std::time::Duration;

use super::colors_enabled;

/// Elapsed time for the summary footer.
///
/// ```
/// use std::time::Duration;
/// use pathkit_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
/// assert_eq!(format_duration(Duration::from_millis(2_340)), "2.34s");
/// assert_eq!(format_duration(Duration::from_secs(61)), "1m 1s");
/// ```
pub fn format_duration(elapsed: Duration) -> String {
    match elapsed.as_secs() {
        0 => format!("{}ms", elapsed.as_millis()),
        secs @ 1..=59 => format!("{secs}.{:02}s", elapsed.subsec_millis() / 10),
        secs => format!("{}m {}s", secs / 60, secs % 60),
    }
}

/// One summary line for `result`, with its path shown relative to `base`.
///
/// Plain text; colors are added by [`print_convert_summary`].
pub fn render_file_line(result: &FileChangeResult, base: &Path) -> String {
    let path = Path::new(&result.file_path);
    let shown = path.strip_prefix(base).unwrap_or(path).display();
    format!("{} {}", shown, result.message)
}

/// Print modified and failed files, then totals, to stderr.
///
/// With `verbose`, every rewritten path is listed under its file.
pub fn print_convert_summary(
    results: &[FileChangeResult],
    base: &Path,
    elapsed: Duration,
    verbose: bool,
) {
    let summary = RunSummary::from_results(results);
    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let color = colors_enabled();

    let heading = "Conversion Summary";
    if color {
        eprintln!("\n{}", heading.bold().underline());
    } else {
        eprintln!("\n{}", heading);
    }
    eprintln!("{}", "─".repeat(width));

    for result in results.iter().filter(|r| r.is_modified() || !r.success) {
        let line = render_file_line(result, base);
        match (result.success, color) {
            (true, true) => eprintln!("  {} {}", "▸".blue(), line),
            (true, false) => eprintln!("  ▸ {}", line),
            (false, true) => eprintln!("  {} {}", "✗".red(), line.red()),
            (false, false) => eprintln!("  ✗ {}", line),
        }
        if verbose {
            for change in &result.changes {
                eprintln!("      {} → {}", change.from, change.to);
            }
        }
    }

    eprintln!("{}", "─".repeat(width));

    let totals = format!(
        "{} processed, {} modified, {} errored",
        summary.processed, summary.modified, summary.errored
    );
    let took = format_duration(elapsed);
    if color {
        let totals = if summary.errored > 0 {
            totals.red().to_string()
        } else {
            totals.green().to_string()
        };
        eprintln!("  {} {} in {}", "Total:".bold(), totals, took.dimmed());
    } else {
        eprintln!("  Total: {} in {}", totals, took);
    }
}
