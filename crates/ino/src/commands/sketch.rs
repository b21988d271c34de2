//! `ino build` / `ino deploy`: resolve the active board, then hand off to
//! arduino-cli.

use std::path::PathBuf;

use ino_core::{Toolchain, resolve};

use crate::cli::{GlobalOpts, SketchArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Build,
    Deploy,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Self::Build => "Compiling",
            Self::Deploy => "Uploading",
        }
    }

    fn tool(self) -> &'static str {
        match self {
            Self::Build => "arduino-cli compile",
            Self::Deploy => "arduino-cli upload",
        }
    }
}

pub fn handle(
    action: Action,
    args: SketchArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let sketch: PathBuf = match args.path {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let active = settings.state().selection().load()?;
    let arduino = settings.arduino();

    // The saved port may be stale; always look the board up by id.
    let resolution = resolve(&arduino, settings.arity, &active)?;
    let board = &resolution.device;
    if let Some(ref old) = resolution.moved_from {
        output::notice(
            global,
            &format!(
                "Board {} moved from {old} to {}; using the new port.",
                board.label(),
                board.port
            ),
        );
    }

    let fqbn = board.fqbn_or(args.fqbn.as_deref())?;
    output::status(
        global,
        &format!(
            "{} {} for {} ({fqbn}) on {}",
            action.verb(),
            sketch.display(),
            board.label(),
            board.port
        ),
    );

    let result = match action {
        Action::Build => arduino.compile(fqbn, &sketch)?,
        Action::Deploy => arduino.upload(&board.port, fqbn, &sketch)?,
    };
    output::passthrough(&result.stdout, &result.stderr, global.quiet);
    result.into_result(action.tool())?;
    Ok(())
}
