//! CLI configuration -- `ino_config` plus `GlobalOpts` flag overrides.
//!
//! Handlers never read the config file themselves; they receive a
//! `Settings` with every override already applied.

use std::path::PathBuf;

use serde::Serialize;

use ino_core::{ArduinoCli, ArityPolicy, StateDir};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use ino_config::{Config, config_path, load_config, write_config};

/// Effective settings for one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub arduino_cli: PathBuf,
    pub state_dir: PathBuf,
    pub arity: ArityPolicy,
}

impl Settings {
    /// Apply flag overrides (flag > env > file > default).
    pub fn from_config(cfg: Config, global: &GlobalOpts) -> Self {
        let state_dir = global
            .state_dir
            .clone()
            .unwrap_or_else(|| cfg.resolved_state_dir());
        let arity = if global.strict {
            ArityPolicy::Strict
        } else {
            cfg.arity
        };

        Self {
            arduino_cli: global.arduino_cli.clone().unwrap_or(cfg.arduino_cli),
            state_dir,
            arity,
        }
    }

    pub fn arduino(&self) -> ArduinoCli {
        ArduinoCli::new(&self.arduino_cli)
    }

    pub fn state(&self) -> StateDir {
        StateDir::new(&self.state_dir)
    }
}

/// Load the config file + env and apply `global` on top.
pub fn resolve(global: &GlobalOpts) -> Result<Settings, CliError> {
    let cfg = load_config()?;
    Ok(Settings::from_config(cfg, global))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["ino"];
        argv.extend_from_slice(args);
        argv.push("active");
        Cli::parse_from(argv).global
    }

    #[test]
    fn flags_override_config() {
        let cfg = Config {
            arduino_cli: PathBuf::from("from-config"),
            state_dir: Some(PathBuf::from("/cfg/state")),
            arity: ArityPolicy::Tolerant,
        };
        let settings = Settings::from_config(
            cfg,
            &global(&["--arduino-cli", "/flag/arduino-cli", "--state-dir", "/flag/state", "--strict"]),
        );
        assert_eq!(settings.arduino_cli, PathBuf::from("/flag/arduino-cli"));
        assert_eq!(settings.state_dir, PathBuf::from("/flag/state"));
        assert_eq!(settings.arity, ArityPolicy::Strict);
    }

    #[test]
    fn config_used_without_flags() {
        let cfg = Config {
            arduino_cli: PathBuf::from("from-config"),
            state_dir: Some(PathBuf::from("/cfg/state")),
            arity: ArityPolicy::Strict,
        };
        let settings = Settings::from_config(cfg, &global(&[]));
        assert_eq!(settings.arduino_cli, PathBuf::from("from-config"));
        assert_eq!(settings.state_dir, PathBuf::from("/cfg/state"));
        assert_eq!(settings.arity, ArityPolicy::Strict);
    }
}
