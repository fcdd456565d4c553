//! Terminal output: status messages and the conversion summary.
//!
//! Everything here writes to stderr so stdout stays clean for `--json` and
//! the `path` command. Colors are decided once by [`init_colors`].

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, print_convert_summary, render_file_line};
pub use messages::{info, success, warning};

static COLORS: AtomicBool = AtomicBool::new(false);

const CI_MARKERS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE"];

/// True when one of the usual CI environment variables is set.
pub fn is_ci() -> bool {
    CI_MARKERS.iter().any(|name| std::env::var_os(name).is_some())
}

/// Whether color output should be used.
///
/// `--no-color` and `NO_COLOR` disable it, `FORCE_COLOR` enables it even
/// without a terminal; otherwise it follows whether stderr is a terminal
/// a user is looking at.
pub fn should_use_color(no_color: bool) -> bool {
    if no_color || std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    !is_ci() && console::user_attended_stderr()
}

/// Decide color support for the rest of the process. Call early in `main`.
pub fn init_colors(no_color: bool) {
    let enabled = should_use_color(no_color);
    console::set_colors_enabled_stderr(enabled);
    COLORS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_flag_wins() {
        unsafe { std::env::set_var("FORCE_COLOR", "1") };
        assert!(!should_use_color(true));
        unsafe { std::env::remove_var("FORCE_COLOR") };
    }

    #[test]
    #[serial]
    fn test_no_color_env() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_color(false));
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_force_color() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_color(false));
        unsafe { std::env::remove_var("FORCE_COLOR") };
    }

    #[test]
    #[serial]
    fn test_ci_marker_detected() {
        unsafe { std::env::set_var("CI", "true") };
        assert!(is_ci());
        unsafe { std::env::remove_var("CI") };
    }

    #[test]
    #[serial]
    fn test_init_colors_disabled() {
        init_colors(true);
        assert!(!colors_enabled());
    }
}
