// ── Core error types ──
//
// Every failure the board workflow can hit. The CLI maps these into
// diagnostics and exit codes; nothing in here knows about terminals.

use std::path::PathBuf;

use thiserror::Error;

/// Which piece of persisted state a `NotFound` / `CorruptState` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Registry,
    ActiveSelection,
}

impl std::fmt::Display for StateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry => f.write_str("board list"),
            Self::ActiveSelection => f.write_str("active board"),
        }
    }
}

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── External tools ───────────────────────────────────────────────
    #[error("`{tool}` failed: {reason}")]
    ToolInvocationFailed {
        tool: String,
        reason: String,
        /// Exit status of the tool, when it ran and exited non-zero.
        status: Option<i32>,
    },

    #[error("Unexpected board listing at line {line}: {reason}")]
    MalformedListing { line: usize, reason: String },

    // ── Persisted state ──────────────────────────────────────────────
    #[error("No saved {kind} at {}", path.display())]
    NotFound { kind: StateKind, path: PathBuf },

    #[error("Saved {kind} at {} is unreadable: {reason}", path.display())]
    CorruptState {
        kind: StateKind,
        path: PathBuf,
        reason: String,
    },

    // ── Selection / resolution ───────────────────────────────────────
    #[error("Board position {index} is out of range ({len} boards listed)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Board with id '{id}' is not attached")]
    DeviceNotFound { id: String },

    #[error("Board '{name}' has no FQBN")]
    MissingFqbn { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    pub(crate) fn tool(tool: &str, reason: impl Into<String>) -> Self {
        Self::ToolInvocationFailed {
            tool: tool.into(),
            reason: reason.into(),
            status: None,
        }
    }
}
