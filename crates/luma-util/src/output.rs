//! Cargo-style status lines on stderr.

use std::io::Write;

use console::Style;

/// Severity of a status line; selects the label colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Something was done (bold green).
    Action,
    /// Informational, nothing changed (bold cyan).
    Info,
    /// Bold yellow.
    Warn,
    /// Bold red.
    Error,
}

impl StatusKind {
    fn style(self) -> Style {
        let style = Style::new().for_stderr().bold();
        match self {
            StatusKind::Action => style.green(),
            StatusKind::Info => style.cyan(),
            StatusKind::Warn => style.yellow(),
            StatusKind::Error => style.red(),
        }
    }
}

/// Render a status line: the label right-aligned to 12 columns, then the message.
pub fn format_status(kind: StatusKind, label: &str, message: &str) -> String {
    format!("{:>12} {message}", kind.style().apply_to(label))
}

/// Print a status line such as `   Validated 12 manifests` to stderr.
pub fn status(kind: StatusKind, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{}", format_status(kind, label, message));
}
