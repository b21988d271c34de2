// ── Stable-identity resolution ──
//
// The active selection is a snapshot: its port was right when it was
// listed and may be wrong now. Every action re-enumerates and joins on
// the durable `id`, taking port/fqbn/name from the fresh row.

use tracing::{debug, info};

use crate::arduino::BoardLister;
use crate::error::CoreError;
use crate::model::{DeviceRecord, Registry};
use crate::parser::{ArityPolicy, parse_board_list};

/// A selection re-resolved against a fresh enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The current record for the selected board.
    pub device: DeviceRecord,
    /// The stale port, when the board is now on a different one.
    pub moved_from: Option<String>,
}

impl Resolution {
    pub fn port_changed(&self) -> bool {
        self.moved_from.is_some()
    }
}

/// Enumerate and parse once.
pub fn enumerate(lister: &dyn BoardLister, policy: ArityPolicy) -> Result<Registry, CoreError> {
    let raw = lister.list_boards()?;
    parse_board_list(&raw, policy).map(Registry::new)
}

/// Find `active` in a fresh enumeration by its durable id.
pub fn resolve(
    lister: &dyn BoardLister,
    policy: ArityPolicy,
    active: &DeviceRecord,
) -> Result<Resolution, CoreError> {
    if !active.has_durable_id() {
        debug!(port = %active.port, "active board has no id, cannot resolve");
        return Err(CoreError::DeviceNotFound {
            id: active.id.clone(),
        });
    }

    let current = enumerate(lister, policy)?;
    resolve_in(&current, active)
}

/// Match `active` against an already-enumerated registry.
pub fn resolve_in(current: &Registry, active: &DeviceRecord) -> Result<Resolution, CoreError> {
    let device = current
        .find_by_id(&active.id)
        .cloned()
        .ok_or_else(|| CoreError::DeviceNotFound {
            id: active.id.clone(),
        })?;

    let moved_from = (device.port != active.port).then(|| active.port.clone());
    if let Some(ref old) = moved_from {
        info!(id = %device.id, from = %old, to = %device.port, "board moved ports");
    } else {
        debug!(id = %device.id, port = %device.port, "board resolved");
    }

    Ok(Resolution { device, moved_from })
}
