//! Terminal output: status lines and the build summary.
//!
//! Everything goes to stderr so stdout stays free for piping.

mod format;
mod messages;

use owo_colors::Style;
use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, format_size, print_build_summary};
pub use messages::{success, warning};

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
}

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, otherwise asks whether stderr is a
/// terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr() && !is_ci()
}

static COLORS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Initialize color support based on flags and environment.
///
/// Call early in `main`. Status lines and the summary are plain text when
/// colors are off.
pub fn init_colors(no_color: bool) {
    COLORS_ENABLED.store(!no_color && should_use_color(), Ordering::Relaxed);
}

/// `style` if colors are on, otherwise a plain style.
pub(crate) fn paint(style: Style) -> Style {
    if COLORS_ENABLED.load(Ordering::Relaxed) {
        style
    } else {
        Style::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_is_ci_with_ci_var() {
        // SAFETY: serialised with the other env tests
        unsafe { std::env::set_var("CI", "true") };
        assert!(is_ci());
        unsafe { std::env::remove_var("CI") };
    }

    #[test]
    #[serial]
    fn test_should_use_color_no_color() {
        // SAFETY: serialised with the other env tests
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::remove_var("FORCE_COLOR");
        }
        assert!(!should_use_color());
        unsafe { std::env::remove_var("NO_COLOR") };
    }

    #[test]
    #[serial]
    fn test_should_use_color_force_color() {
        // SAFETY: serialised with the other env tests
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_color());
        unsafe { std::env::remove_var("FORCE_COLOR") };
    }

    #[test]
    #[serial]
    fn test_no_color_flag_disables_styles() {
        // SAFETY: serialised with the other env tests
        unsafe { std::env::set_var("FORCE_COLOR", "1") };
        init_colors(true);
        unsafe { std::env::remove_var("FORCE_COLOR") };

        use owo_colors::OwoColorize;
        let rendered = "ok".style(paint(Style::new().green())).to_string();
        assert_eq!(rendered, "ok");
    }

    #[test]
    #[serial]
    fn test_no_color_overrides_force() {
        // SAFETY: serialised with the other env tests
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_color());
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
