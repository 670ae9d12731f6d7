//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text; `display_*` functions print it.

use console::style;

use crate::domain::VersionInfo;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Build the previous → current summary for a run.
///
/// Shows the master version when it was supplied, and flags forced versions.
pub fn format_version_change(info: &VersionInfo) -> String {
    let mut lines = vec![format!("{}", style("Version Change:").bold())];
    lines.push(format!(
        "  From: {}",
        style(&info.previous_version).red()
    ));
    if let Some(master) = &info.master_version {
        lines.push(format!("  Master: {}", style(master).cyan()));
    }
    let forced = if info.force_version.is_some() {
        " (forced)"
    } else {
        ""
    };
    lines.push(format!(
        "  To:   {}{}",
        style(&info.current_version).green(),
        forced
    ));
    lines.join("\n")
}

/// Display the previous → current summary.
pub fn display_version_change(info: &VersionInfo) {
    println!("\n{}", format_version_change(info));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(force: Option<&str>) -> VersionInfo {
        VersionInfo {
            previous_version: "1.0.0".to_string(),
            master_version: Some("1.1.0".to_string()),
            force_version: force.map(str::to_string),
            current_version: "1.1.1".to_string(),
        }
    }

    #[test]
    fn test_format_version_change() {
        let text = console::strip_ansi_codes(&format_version_change(&info(None))).to_string();
        assert!(text.contains("From: 1.0.0"));
        assert!(text.contains("Master: 1.1.0"));
        assert!(text.contains("To:   1.1.1"));
        assert!(!text.contains("forced"));
    }

    #[test]
    fn test_format_forced_version_change() {
        let text = console::strip_ansi_codes(&format_version_change(&info(Some("1.1.1")))).to_string();
        assert!(text.contains("(forced)"));
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }
}
