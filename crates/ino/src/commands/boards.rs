//! `ino list-devices`: enumerate, remember, print.

use tabled::Tabled;

use ino_core::DeviceRecord;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BoardRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "FQBN")]
    fqbn: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
}

impl From<&DeviceRecord> for BoardRow {
    fn from(b: &DeviceRecord) -> Self {
        Self {
            index: b.display_index,
            fqbn: dash(&b.fqbn).to_owned(),
            port: b.port.clone(),
            id: dash(&b.id).to_owned(),
            name: dash(&b.name).to_owned(),
        }
    }
}

/// Multi-line detail view shared by `select` and `active`.
pub(crate) fn detail(b: &DeviceRecord) -> String {
    [
        format!("Board: {}", b.display_index),
        format!("FQBN:  {}", dash(&b.fqbn)),
        format!("ID:    {}", dash(&b.id)),
        format!("Name:  {}", dash(&b.name)),
        format!("Port:  {}", dash(&b.port)),
    ]
    .join("\n")
}

fn dash(s: &str) -> &str {
    if s.is_empty() { "-" } else { s }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(settings: &Settings, global: &GlobalOpts) -> Result<(), CliError> {
    let registry = ino_core::enumerate(&settings.arduino(), settings.arity)?;

    // Only a successfully parsed listing replaces the saved one.
    settings.state().registry().save(registry.records())?;
    tracing::debug!(count = registry.len(), "board list saved");

    if registry.is_empty() {
        output::status(global, "No boards found.");
        if matches!(global.output, OutputFormat::Table) {
            return Ok(());
        }
    }

    let out = output::render_list(
        &global.output,
        registry.records(),
        |b| BoardRow::from(b),
        |b| b.port.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
