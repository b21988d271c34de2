//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod boards;
pub mod config_cmd;
pub mod select;
pub mod sketch;

use crate::cli::{Command, GlobalOpts};
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a board command to the appropriate handler.
pub fn dispatch(cmd: Command, settings: &Settings, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::ListDevices => boards::handle(settings, global),
        Command::Select { position } => select::handle_select(position, settings, global),
        Command::Active => select::handle_active(settings, global),
        Command::Build(args) => sketch::handle(sketch::Action::Build, args, settings, global),
        Command::Deploy(args) => sketch::handle(sketch::Action::Deploy, args, settings, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
