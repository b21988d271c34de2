// ── arduino-cli subprocess seam ──
//
// `BoardLister` and `Toolchain` are the two things the rest of the crate
// needs from the outside world. `ArduinoCli` implements both by spawning
// the real binary; tests substitute in-memory fakes.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::CoreError;

pub const DEFAULT_PROGRAM: &str = "arduino-cli";

/// Source of raw `board list` text.
pub trait BoardLister {
    /// Run one enumeration and return its standard output.
    fn list_boards(&self) -> Result<String, CoreError>;
}

/// Downstream build/flash operations.
pub trait Toolchain {
    fn compile(&self, fqbn: &str, sketch: &Path) -> Result<ToolOutput, CoreError>;

    fn upload(&self, port: &str, fqbn: &str, sketch: &Path) -> Result<ToolOutput, CoreError>;
}

/// Captured result of a downstream tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a non-zero exit into `ToolInvocationFailed`, keeping the status.
    pub fn into_result(self, tool: &str) -> Result<Self, CoreError> {
        if self.success() {
            return Ok(self);
        }
        Err(CoreError::ToolInvocationFailed {
            tool: tool.into(),
            reason: self.status.map_or_else(
                || "terminated by signal".to_owned(),
                |code| format!("exited with status {code}"),
            ),
            status: self.status,
        })
    }
}

impl From<Output> for ToolOutput {
    fn from(out: Output) -> Self {
        Self {
            status: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        }
    }
}

/// The `arduino-cli` executable.
#[derive(Debug, Clone)]
pub struct ArduinoCli {
    program: PathBuf,
}

impl ArduinoCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn display_name(&self, subcommand: &str) -> String {
        format!("{} {subcommand}", self.program.display())
    }

    fn run<I, S>(&self, subcommand: &str, args: I) -> Result<ToolOutput, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.arg(subcommand).args(args);
        debug!(command = ?cmd, "spawning arduino-cli");

        let out = cmd.output().map_err(|e| {
            let reason = if e.kind() == io::ErrorKind::NotFound {
                format!("{} not found on PATH", self.program.display())
            } else {
                e.to_string()
            };
            CoreError::tool(&self.display_name(subcommand), reason)
        })?;

        let out = ToolOutput::from(out);
        debug!(status = ?out.status, stdout_len = out.stdout.len(), "arduino-cli finished");
        Ok(out)
    }
}

impl Default for ArduinoCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl BoardLister for ArduinoCli {
    fn list_boards(&self) -> Result<String, CoreError> {
        let tool = self.display_name("board list");
        let out = self.run("board", ["list"])?;
        if !out.success() {
            let stderr = out.stderr.trim();
            return Err(CoreError::ToolInvocationFailed {
                reason: if stderr.is_empty() {
                    format!("exited with status {}", out.status.unwrap_or(-1))
                } else {
                    stderr.to_owned()
                },
                tool,
                status: out.status,
            });
        }
        Ok(out.stdout)
    }
}

impl Toolchain for ArduinoCli {
    fn compile(&self, fqbn: &str, sketch: &Path) -> Result<ToolOutput, CoreError> {
        self.run(
            "compile",
            [OsStr::new("--fqbn"), OsStr::new(fqbn), sketch.as_os_str()],
        )
    }

    fn upload(&self, port: &str, fqbn: &str, sketch: &Path) -> Result<ToolOutput, CoreError> {
        self.run(
            "upload",
            [
                OsStr::new("-p"),
                OsStr::new(port),
                OsStr::new("--fqbn"),
                OsStr::new(fqbn),
                sketch.as_os_str(),
            ],
        )
    }
}
