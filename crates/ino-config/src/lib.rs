//! Configuration for the `ino` CLI.
//!
//! A small TOML file plus `INO_*` environment overrides, layered with
//! figment. Decides which `arduino-cli` to run, where board state lives,
//! and how strictly listings are parsed.

use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ino_core::ArityPolicy;
use ino_core::arduino::DEFAULT_PROGRAM;

/// Directory name under `$HOME` holding `boards.json` / `active.json`.
pub const STATE_DIR_NAME: &str = ".ino";

/// Prefix for environment overrides (`INO_ARDUINO_CLI`, `INO_STATE_DIR`, ...).
pub const ENV_PREFIX: &str = "INO_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("config file already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Path or name of the `arduino-cli` executable.
    #[serde(default = "default_arduino_cli")]
    pub arduino_cli: PathBuf,

    /// Where board state is kept. Defaults to `~/.ino`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_dir: Option<PathBuf>,

    /// Short-row handling for `board list` output.
    #[serde(default)]
    pub arity: ArityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arduino_cli: default_arduino_cli(),
            state_dir: None,
            arity: ArityPolicy::default(),
        }
    }
}

fn default_arduino_cli() -> PathBuf {
    PathBuf::from(DEFAULT_PROGRAM)
}

impl Config {
    /// The state directory, falling back to `~/.ino`.
    pub fn resolved_state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "ino").map_or_else(
        || home_dir().join(".config").join("ino").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// `~/.ino`, the directory earlier releases wrote their state to.
pub fn default_state_dir() -> PathBuf {
    home_dir().join(STATE_DIR_NAME)
}

fn home_dir() -> PathBuf {
    BaseDirs::new().map_or_else(
        || PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into())),
        |dirs| dirs.home_dir().to_path_buf(),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Defaults < TOML file at `path` < `INO_*` environment.
pub fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    Ok(figment_for(&config_path()).extract()?)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Write `cfg` as TOML to `path`, refusing to clobber unless `force`.
pub fn write_config(path: &Path, cfg: &Config, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}
