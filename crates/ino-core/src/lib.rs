// ino-core: board listing, persisted selection, and re-resolution by id.

pub mod arduino;
pub mod error;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use arduino::{ArduinoCli, BoardLister, ToolOutput, Toolchain};
pub use error::{CoreError, StateKind};
pub use model::{DeviceRecord, Registry};
pub use parser::{ArityPolicy, parse_board_list};
pub use resolver::{Resolution, enumerate, resolve, resolve_in};
pub use store::{RegistryStore, SelectionStore, StateDir};
