//! `ino select` and `ino active`.

use crate::cli::GlobalOpts;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::boards::detail;

/// Copy the board at `position` of the saved listing into the active slot.
pub fn handle_select(
    position: usize,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let state = settings.state();
    let registry = state.registry().load()?;
    let board = registry.get_by_position(position)?;

    state.selection().save(board)?;

    output::status(global, &format!("Selected board {}", board.display_index));
    if !board.has_durable_id() {
        output::notice(
            global,
            "This board reports no hardware id; ino cannot find it again once it is replugged.",
        );
    }

    let out = output::render_single(&global.output, board, detail, |b| b.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Print the saved selection without touching arduino-cli.
pub fn handle_active(settings: &Settings, global: &GlobalOpts) -> Result<(), CliError> {
    let board = settings.state().selection().load()?;
    let out = output::render_single(&global.output, &board, detail, |b| b.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
