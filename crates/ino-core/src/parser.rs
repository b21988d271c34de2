// ── `arduino-cli board list` table parser ──
//
// The listing is a header row starting with `FQBN` followed by one
// tab-separated row per board: FQBN, port, id, name. Anything printed
// before the header (warnings, update notices) is ignored.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::CoreError;
use crate::model::DeviceRecord;

/// Column marker that starts the header row.
pub const HEADER_MARKER: &str = "FQBN";

/// What `arduino-cli` prints instead of a table when nothing is attached.
pub const NO_BOARDS_MARKER: &str = "No boards found";

const FIELD_COUNT: usize = 4;

/// How to treat rows with fewer than four tab-separated fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArityPolicy {
    /// Missing trailing fields become empty strings.
    #[default]
    Tolerant,
    /// Short rows are rejected as a malformed listing.
    Strict,
}

impl std::fmt::Display for ArityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tolerant => f.write_str("tolerant"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Parse raw `board list` output into records numbered in row order.
pub fn parse_board_list(text: &str, policy: ArityPolicy) -> Result<Vec<DeviceRecord>, CoreError> {
    let Some(start) = text.find(HEADER_MARKER) else {
        if text.trim().is_empty() || text.contains(NO_BOARDS_MARKER) {
            debug!("board listing reports no boards");
            return Ok(Vec::new());
        }
        return Err(CoreError::MalformedListing {
            line: 1,
            reason: format!("no `{HEADER_MARKER}` header found"),
        });
    };

    // Line numbers in errors count from the header row.
    let rows = text[start..]
        .split('\n')
        .enumerate()
        .map(|(n, line)| (n + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1);

    let mut records = Vec::new();
    for (line_no, line) in rows {
        let record = parse_row(line, line_no, records.len(), policy)?;
        trace!(index = record.display_index, port = %record.port, "parsed board row");
        records.push(record);
    }

    debug!(count = records.len(), %policy, "parsed board listing");
    Ok(records)
}

fn parse_row(
    line: &str,
    line_no: usize,
    display_index: usize,
    policy: ArityPolicy,
) -> Result<DeviceRecord, CoreError> {
    let fields: Vec<&str> = line.splitn(FIELD_COUNT, '\t').map(str::trim).collect();

    if fields.len() < FIELD_COUNT && policy == ArityPolicy::Strict {
        return Err(CoreError::MalformedListing {
            line: line_no,
            reason: format!(
                "expected {FIELD_COUNT} tab-separated fields, found {}",
                fields.len()
            ),
        });
    }

    let field = |i: usize| fields.get(i).copied().unwrap_or_default().to_owned();

    Ok(DeviceRecord {
        display_index,
        fqbn: field(0),
        port: field(1),
        id: field(2),
        name: field(3),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "FQBN\tPort\tID\tBoard Name\n";

    #[test]
    fn numbers_rows_in_order() {
        let text = format!(
            "{HEADER}arduino:avr:uno\t/dev/ttyACM0\t2341:0043\tArduino Uno\n\
             arduino:avr:mega\t/dev/ttyACM1\t2341:0042\tArduino Mega\n\
             \t/dev/ttyUSB0\t1a86:7523\tUnknown\n"
        );
        let records = parse_board_list(&text, ArityPolicy::Tolerant).unwrap();

        assert_eq!(records.len(), 3);
        let indexes: Vec<usize> = records.iter().map(|r| r.display_index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(
            records[0],
            DeviceRecord {
                display_index: 0,
                fqbn: "arduino:avr:uno".into(),
                port: "/dev/ttyACM0".into(),
                id: "2341:0043".into(),
                name: "Arduino Uno".into(),
            }
        );
        assert_eq!(records[2].fqbn, "");
        assert_eq!(records[2].port, "/dev/ttyUSB0");
    }

    #[test]
    fn skips_preamble_and_blank_lines() {
        let text = format!(
            "A new release of Arduino CLI is available\n\n{HEADER}\n\
             arduino:avr:uno\tCOM3\t2341:0043\tArduino Uno\n\n"
        );
        let records = parse_board_list(&text, ArityPolicy::Strict).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].port, "COM3");
        assert_eq!(records[0].display_index, 0);
    }

    #[test]
    fn trims_fields_and_carriage_returns() {
        let text = "FQBN\tPort\tID\tBoard Name\r\n \
                    arduino:avr:nano \t COM4 \t 0403:6001 \t Nano \r\n";
        let records = parse_board_list(text, ArityPolicy::Strict).unwrap();
        assert_eq!(records[0].fqbn, "arduino:avr:nano");
        assert_eq!(records[0].port, "COM4");
        assert_eq!(records[0].id, "0403:6001");
        assert_eq!(records[0].name, "Nano");
    }

    #[test]
    fn header_only_is_empty() {
        let records = parse_board_list(HEADER, ArityPolicy::Strict).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn no_boards_message_is_empty() {
        let records = parse_board_list("No boards found.\n", ArityPolicy::Strict).unwrap();
        assert!(records.is_empty());
        assert!(parse_board_list("  \n", ArityPolicy::Strict).unwrap().is_empty());
    }

    #[test]
    fn missing_header_is_malformed() {
        let err = parse_board_list("Error: something broke\n", ArityPolicy::Tolerant).unwrap_err();
        assert!(matches!(err, CoreError::MalformedListing { line: 1, .. }));
    }

    #[test]
    fn tolerant_fills_short_rows() {
        let text = format!("{HEADER}arduino:avr:uno\t/dev/ttyACM0\n");
        let records = parse_board_list(&text, ArityPolicy::Tolerant).unwrap();
        assert_eq!(records[0].port, "/dev/ttyACM0");
        assert_eq!(records[0].id, "");
        assert_eq!(records[0].name, "");
    }

    #[test]
    fn strict_rejects_short_rows() {
        let text = format!("{HEADER}arduino:avr:uno\tCOM1\t2341:0043\tUno\nbroken\tCOM2\n");
        match parse_board_list(&text, ArityPolicy::Strict) {
            Err(CoreError::MalformedListing { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("found 2"), "{reason}");
            }
            other => panic!("expected MalformedListing, got {other:?}"),
        }
    }

    #[test]
    fn name_keeps_extra_tabs() {
        let text = format!("{HEADER}f\tp\ti\tBoard\tRev 3\n");
        let records = parse_board_list(&text, ArityPolicy::Strict).unwrap();
        assert_eq!(records[0].name, "Board\tRev 3");
    }
}
