// ── Board domain types ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One attached board, as reported by a single enumeration.
///
/// Field names serialize in camelCase (`displayIndex`, `fqbn`, `port`,
/// `id`, `name`) so state files stay readable by older releases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    /// Position in the enumeration that produced this record. Only
    /// meaningful within that one enumeration.
    pub display_index: usize,
    /// Fully-qualified board name, e.g. `arduino:avr:uno`. May be empty.
    pub fqbn: String,
    /// Transport address, e.g. `/dev/ttyACM0`. Changes on replug.
    pub port: String,
    /// Hardware identifier that survives replugging. May be empty.
    pub id: String,
    /// Human-readable board name.
    pub name: String,
}

impl DeviceRecord {
    /// Whether this record can ever be matched again after a replug.
    pub fn has_durable_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// The board type to build for: `explicit` if given, else the
    /// enumerated FQBN. Errors when neither is available.
    pub fn fqbn_or<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str, CoreError> {
        match explicit.filter(|f| !f.is_empty()) {
            Some(fqbn) => Ok(fqbn),
            None if !self.fqbn.is_empty() => Ok(self.fqbn.as_str()),
            None => Err(CoreError::MissingFqbn {
                name: self.label().to_owned(),
            }),
        }
    }

    /// Name to show the user, falling back through id and port.
    pub fn label(&self) -> &str {
        [&self.name, &self.id, &self.port]
            .into_iter()
            .find(|s| !s.is_empty())
            .map_or("(unnamed board)", String::as_str)
    }
}

/// Ordered snapshot of one enumeration.
///
/// Replaced wholesale on every listing; positions index into it directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    records: Vec<DeviceRecord>,
}

impl Registry {
    pub fn new(records: Vec<DeviceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DeviceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by the position shown in the last listing.
    pub fn get_by_position(&self, index: usize) -> Result<&DeviceRecord, CoreError> {
        self.records.get(index).ok_or(CoreError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// First record carrying the given durable id. Empty ids never match.
    pub fn find_by_id(&self, id: &str) -> Option<&DeviceRecord> {
        if id.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(index: usize, id: &str, port: &str) -> DeviceRecord {
        DeviceRecord {
            display_index: index,
            fqbn: "arduino:avr:uno".into(),
            port: port.into(),
            id: id.into(),
            name: "Arduino Uno".into(),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(record(3, "2341:0043", "/dev/ttyACM0")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "displayIndex": 3,
                "fqbn": "arduino:avr:uno",
                "port": "/dev/ttyACM0",
                "id": "2341:0043",
                "name": "Arduino Uno",
            })
        );
    }

    #[test]
    fn registry_is_a_bare_json_array() {
        let registry = Registry::new(vec![record(0, "a", "COM3")]);
        let text = serde_json::to_string(&registry).unwrap();
        assert!(text.starts_with('['), "expected array, got {text}");
    }

    #[test]
    fn get_by_position_out_of_range() {
        let registry = Registry::new(vec![record(0, "a", "p0"), record(1, "b", "p1")]);
        assert_eq!(registry.get_by_position(1).unwrap().id, "b");
        match registry.get_by_position(5) {
            Err(CoreError::IndexOutOfRange { index, len }) => {
                assert_eq!((index, len), (5, 2));
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn find_by_id_skips_empty_ids() {
        let registry = Registry::new(vec![record(0, "", "p0"), record(1, "x", "p1")]);
        assert!(registry.find_by_id("").is_none());
        assert_eq!(registry.find_by_id("x").unwrap().port, "p1");
    }

    #[test]
    fn fqbn_override_wins_and_empty_fqbn_errors() {
        let mut r = record(0, "x", "p");
        assert_eq!(r.fqbn_or(None).unwrap(), "arduino:avr:uno");
        assert_eq!(r.fqbn_or(Some("esp32:esp32:esp32")).unwrap(), "esp32:esp32:esp32");

        r.fqbn.clear();
        assert!(matches!(r.fqbn_or(None), Err(CoreError::MissingFqbn { .. })));
        assert!(matches!(r.fqbn_or(Some("")), Err(CoreError::MissingFqbn { .. })));
    }

    #[test]
    fn label_falls_back_to_id_then_port() {
        let mut r = record(0, "", "/dev/ttyUSB0");
        r.name.clear();
        assert_eq!(r.label(), "/dev/ttyUSB0");
        r.id = "1a86:7523".into();
        assert_eq!(r.label(), "1a86:7523");
    }
}
