// ── Persisted board state ──
//
// Two flat JSON documents in one per-user directory:
//
//   boards.json  -- the registry from the last `list-devices`
//   active.json  -- the record picked by the last `select`
//
// Every save is a full overwrite through a temp file + rename, so a
// failed command never leaves a half-written document behind. There is
// no locking: two concurrent invocations race, last writer wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{CoreError, StateKind};
use crate::model::{DeviceRecord, Registry};

pub const REGISTRY_FILE: &str = "boards.json";
pub const ACTIVE_FILE: &str = "active.json";

/// The directory holding both state documents.
#[derive(Debug, Clone)]
pub struct StateDir {
    root: PathBuf,
}

impl StateDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn registry(&self) -> RegistryStore {
        RegistryStore {
            path: self.root.join(REGISTRY_FILE),
        }
    }

    pub fn selection(&self) -> SelectionStore {
        SelectionStore {
            path: self.root.join(ACTIVE_FILE),
        }
    }
}

/// Registry persistence: `boards.json`, a JSON array of records.
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
}

impl RegistryStore {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the persisted registry with `records`.
    pub fn save(&self, records: &[DeviceRecord]) -> Result<(), CoreError> {
        write_json(&self.path, records)?;
        debug!(path = %self.path.display(), count = records.len(), "saved board registry");
        Ok(())
    }

    /// Load the last saved registry.
    pub fn load(&self) -> Result<Registry, CoreError> {
        read_json(&self.path, StateKind::Registry)
    }
}

/// Active selection persistence: `active.json`, a single record.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the persisted selection with `record`.
    pub fn save(&self, record: &DeviceRecord) -> Result<(), CoreError> {
        write_json(&self.path, record)?;
        debug!(path = %self.path.display(), id = %record.id, "saved active board");
        Ok(())
    }

    /// Load the active selection.
    pub fn load(&self) -> Result<DeviceRecord, CoreError> {
        read_json(&self.path, StateKind::ActiveSelection)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path, kind: StateKind) -> Result<T, CoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CoreError::NotFound {
                kind,
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&contents).map_err(|e| CoreError::CorruptState {
        kind,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let body = serde_json::to_vec(value).map_err(io::Error::other)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn board(index: usize, id: &str) -> DeviceRecord {
        DeviceRecord {
            display_index: index,
            fqbn: "arduino:samd:mkr1000".into(),
            port: format!("/dev/ttyACM{index}"),
            id: id.into(),
            name: "MKR1000".into(),
        }
    }

    #[test]
    fn registry_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateDir::new(dir.path()).registry();
        let records = vec![board(0, "2341:804e"), board(1, "")];

        store.save(&records).unwrap();
        assert_eq!(store.load().unwrap().records(), records.as_slice());
    }

    #[test]
    fn save_replaces_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateDir::new(dir.path()).registry();

        store.save(&[board(0, "a"), board(1, "b")]).unwrap();
        store.save(&[board(0, "c")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.records()[0].id, "c");
    }

    #[test]
    fn empty_registry_saves_and_loads() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateDir::new(dir.path()).registry();
        store.save(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn creates_missing_state_dir() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateDir::new(dir.path().join("nested").join(".ino"));
        state.selection().save(&board(0, "x")).unwrap();
        assert!(state.path().join(ACTIVE_FILE).is_file());
    }

    #[test]
    fn missing_files_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateDir::new(dir.path());

        assert!(matches!(
            state.registry().load(),
            Err(CoreError::NotFound {
                kind: StateKind::Registry,
                ..
            })
        ));
        assert!(matches!(
            state.selection().load(),
            Err(CoreError::NotFound {
                kind: StateKind::ActiveSelection,
                ..
            })
        ));
    }

    #[test]
    fn garbage_is_corrupt_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = StateDir::new(dir.path());
        fs::write(dir.path().join(ACTIVE_FILE), "{not json").unwrap();

        assert!(matches!(
            state.selection().load(),
            Err(CoreError::CorruptState { .. })
        ));
    }

    #[test]
    fn reads_files_written_by_older_releases() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(ACTIVE_FILE),
            r#"{"displayIndex":1,"fqbn":"arduino:avr:uno","port":"/dev/cu.usbmodem1411","id":"0x2341_0x0043","name":"Arduino/Genuino Uno"}"#,
        )
        .unwrap();

        let active = StateDir::new(dir.path()).selection().load().unwrap();
        assert_eq!(active.display_index, 1);
        assert_eq!(active.id, "0x2341_0x0043");
    }
}
