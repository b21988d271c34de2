//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with the command to
//! run next, and each error onto a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use ino_config::ConfigError;
use ino_core::{CoreError, StateKind};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const BAD_DATA: i32 = 6;
    pub const TOOL: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── arduino-cli ──────────────────────────────────────────────────

    #[error("`{tool}` failed: {reason}")]
    #[diagnostic(
        code(ino::tool_failed),
        help(
            "Run with -v to see the exact command line.\n\
             Point ino at another executable with --arduino-cli or INO_ARDUINO_CLI."
        )
    )]
    ToolFailed {
        tool: String,
        reason: String,
        status: Option<i32>,
    },

    #[error("Could not read the board listing (line {line}): {reason}")]
    #[diagnostic(
        code(ino::malformed_listing),
        help("Run `arduino-cli board list` directly to inspect its output.")
    )]
    MalformedListing { line: usize, reason: String },

    // ── Saved state ──────────────────────────────────────────────────

    #[error("No board list saved yet")]
    #[diagnostic(
        code(ino::no_board_list),
        help("Run: ino list-devices\nExpected at: {path}")
    )]
    NoBoardList { path: String },

    #[error("No active board selected")]
    #[diagnostic(
        code(ino::no_active_board),
        help("Run: ino list-devices, then ino select <POSITION>\nExpected at: {path}")
    )]
    NoActiveBoard { path: String },

    #[error("Saved {what} is unreadable: {reason}")]
    #[diagnostic(
        code(ino::corrupt_state),
        help("Delete {path} and run ino list-devices again.")
    )]
    CorruptState {
        what: String,
        path: String,
        reason: String,
    },

    // ── Selection ────────────────────────────────────────────────────

    #[error("There is no board at position {index} ({len} listed)")]
    #[diagnostic(
        code(ino::index_out_of_range),
        help("Run: ino list-devices to see available positions")
    )]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The active board (id '{id}') is not attached")]
    #[diagnostic(
        code(ino::device_not_found),
        help(
            "Plug the board back in, or pick another one:\n\
             ino list-devices && ino select <POSITION>"
        )
    )]
    DeviceNotFound { id: String },

    #[error("arduino-cli did not report a board type for '{name}'")]
    #[diagnostic(
        code(ino::missing_fqbn),
        help("Pass it explicitly, e.g. --fqbn arduino:avr:uno")
    )]
    MissingFqbn { name: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(ino::config))]
    Config(#[from] ConfigError),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    ///
    /// A downstream tool that exited non-zero passes its own status through.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolFailed {
                status: Some(code), ..
            } if *code != 0 => *code,
            Self::ToolFailed { .. } => exit_code::TOOL,
            Self::NoBoardList { .. }
            | Self::NoActiveBoard { .. }
            | Self::IndexOutOfRange { .. }
            | Self::DeviceNotFound { .. } => exit_code::NOT_FOUND,
            Self::MalformedListing { .. } | Self::CorruptState { .. } => exit_code::BAD_DATA,
            Self::MissingFqbn { .. } => exit_code::USAGE,
            Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ToolInvocationFailed {
                tool,
                reason,
                status,
            } => CliError::ToolFailed {
                tool,
                reason,
                status,
            },

            CoreError::MalformedListing { line, reason } => {
                CliError::MalformedListing { line, reason }
            }

            CoreError::NotFound {
                kind: StateKind::Registry,
                path,
            } => CliError::NoBoardList {
                path: path.display().to_string(),
            },

            CoreError::NotFound {
                kind: StateKind::ActiveSelection,
                path,
            } => CliError::NoActiveBoard {
                path: path.display().to_string(),
            },

            CoreError::CorruptState { kind, path, reason } => CliError::CorruptState {
                what: kind.to_string(),
                path: path.display().to_string(),
                reason,
            },

            CoreError::IndexOutOfRange { index, len } => CliError::IndexOutOfRange { index, len },

            CoreError::DeviceNotFound { id } => CliError::DeviceNotFound { id },

            CoreError::MissingFqbn { name } => CliError::MissingFqbn { name },

            CoreError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn tool_status_passes_through() {
        let err = CliError::from(CoreError::ToolInvocationFailed {
            tool: "arduino-cli upload".into(),
            reason: "exited with status 3".into(),
            status: Some(3),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_tool_uses_tool_code() {
        let err = CliError::from(CoreError::ToolInvocationFailed {
            tool: "arduino-cli board list".into(),
            reason: "not found".into(),
            status: None,
        });
        assert_eq!(err.exit_code(), exit_code::TOOL);
    }

    #[test]
    fn not_found_kinds_split_by_state() {
        let registry = CliError::from(CoreError::NotFound {
            kind: StateKind::Registry,
            path: PathBuf::from("/home/u/.ino/boards.json"),
        });
        assert!(matches!(registry, CliError::NoBoardList { .. }));

        let active = CliError::from(CoreError::NotFound {
            kind: StateKind::ActiveSelection,
            path: PathBuf::from("/home/u/.ino/active.json"),
        });
        assert!(matches!(active, CliError::NoActiveBoard { .. }));
        assert_eq!(active.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn selection_errors_are_not_found() {
        let err = CliError::from(CoreError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert_eq!(err.to_string(), "There is no board at position 5 (2 listed)");
    }
}
