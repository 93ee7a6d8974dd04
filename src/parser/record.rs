//! IGC record classification
//!
//! Turns a single line of an IGC file into a [`Record`]. B-records are decoded
//! by fixed column position, H-records by `key:value` split (or a fixed
//! five-character key for headers such as `HFDTE160726`). Every other record
//! type is ignored.

use crate::conversion::parse_flight_date;
use crate::error::{IgcError, Result};
use crate::parser::helpers::{column, parse_coordinate, parse_int, parse_time_of_day};
use crate::types::{BRecord, MetadataEntry};
use chrono::NaiveDate;

/// Minimum length of a B-record: everything up to the GPS altitude column
pub const B_RECORD_MIN_LEN: usize = 35;

/// Column holding the `A`/`V` fix validity flag
pub const VALIDITY_COLUMN: usize = 24;

/// Why a line produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// B-record flagged `V` (or any flag other than `A`)
    InvalidFix,
    /// H-record whose code has no label
    UnknownHeader,
    /// Any other record type, or an empty line
    Other,
}

/// Result of classifying one IGC line
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Fix(BRecord),
    Metadata(MetadataEntry),
    Ignored(Ignored),
}

/// Classify and decode one IGC line (without its line terminator)
///
/// Returns an error only when a valid-looking B-record holds malformed
/// fixed-width content; unrecognized lines are `Record::Ignored`.
pub fn parse_line(line: &str) -> Result<Record> {
    let bytes = line.as_bytes();
    match bytes.first() {
        Some(b'B') => {
            if bytes.get(VALIDITY_COLUMN) == Some(&b'A') {
                parse_b_record(line).map(Record::Fix)
            } else {
                Ok(Record::Ignored(Ignored::InvalidFix))
            }
        }
        Some(b'H') => Ok(parse_h_record(line)
            .map(Record::Metadata)
            .unwrap_or(Record::Ignored(Ignored::UnknownHeader))),
        // TODO: C (task), E (event), I/J (B/K extension definitions) and K records
        _ => Ok(Record::Ignored(Ignored::Other)),
    }
}

/// Decode the fixed columns of a B-record
///
/// The validity flag is not checked here; see [`parse_line`].
pub fn parse_b_record(line: &str) -> Result<BRecord> {
    if line.len() < B_RECORD_MIN_LEN {
        return Err(IgcError::TooShort {
            expected: B_RECORD_MIN_LEN,
            actual: line.len(),
        });
    }

    let time = parse_time_of_day(column(line, "time", 1..7)?)?;
    let latitude = parse_coordinate("latitude", column(line, "latitude", 7..15)?, 'N', 'S')?;
    let longitude =
        parse_coordinate("longitude", column(line, "longitude", 15..24)?, 'E', 'W')?;
    let baro_altitude = parse_int("baro altitude", column(line, "baro altitude", 25..30)?)?;
    let gps_altitude = parse_int("gps altitude", column(line, "gps altitude", 30..35)?)?;

    Ok(BRecord {
        time,
        latitude,
        longitude,
        baro_altitude,
        gps_altitude,
    })
}

/// Decode an H-record into a labelled metadata entry
///
/// Returns `None` for codes outside the label table.
pub fn parse_h_record(line: &str) -> Option<MetadataEntry> {
    let (key, value) = split_header(line);
    MetadataEntry::from_key(key, value)
}

/// Extract the flight date from an `HFDTE` header line
///
/// Accepts both `HFDTEddmmyy` and the newer `HFDTEDATE:ddmmyy,nn` form.
pub fn header_date(line: &str) -> Option<NaiveDate> {
    let prefix = line.get(0..5)?;
    if !prefix.eq_ignore_ascii_case("HFDTE") {
        return None;
    }
    let (_, value) = split_header(line);
    parse_flight_date(value)
}

// Split at the first ':' when present, otherwise after five characters
fn split_header(line: &str) -> (&str, &str) {
    if let Some((key, value)) = line.split_once(':') {
        return (key, value);
    }
    let split = line
        .char_indices()
        .nth(5)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    line.split_at(split)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    const VALID_B: &str = "B1101355206343N00006198WA0058700558";

    #[test]
    fn test_parse_valid_b_record() {
        let record = match parse_line(VALID_B).unwrap() {
            Record::Fix(record) => record,
            other => panic!("expected fix, got {other:?}"),
        };
        assert_eq!(record.time, NaiveTime::from_hms_opt(11, 1, 35).unwrap());
        assert!((record.latitude - (52.0 + 6.343 / 60.0)).abs() < 1e-12);
        assert!((record.longitude + (0.0 + 6.198 / 60.0)).abs() < 1e-12);
        assert_eq!(record.baro_altitude, 587);
        assert_eq!(record.gps_altitude, 558);
    }

    #[test]
    fn test_b_record_with_extensions() {
        let line = format!("{VALID_B}0450123");
        assert!(matches!(parse_line(&line).unwrap(), Record::Fix(_)));
    }

    #[test]
    fn test_invalid_fix_is_ignored() {
        let line = VALID_B.replacen("WA", "WV", 1);
        assert_eq!(line.as_bytes()[VALIDITY_COLUMN], b'V');
        assert_eq!(
            parse_line(&line).unwrap(),
            Record::Ignored(Ignored::InvalidFix)
        );
    }

    #[test]
    fn test_short_b_record_without_validity_is_ignored() {
        assert_eq!(
            parse_line("B110135").unwrap(),
            Record::Ignored(Ignored::InvalidFix)
        );
    }

    #[test]
    fn test_malformed_b_record_is_an_error() {
        let line = "B1101355206343N00006198WA00587";
        assert!(matches!(
            parse_line(line),
            Err(IgcError::TooShort { expected: 35, .. })
        ));

        let line = "B11013552O6343N00006198WA0058700558";
        assert!(matches!(
            parse_line(line),
            Err(IgcError::InvalidField {
                field: "latitude",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_header_with_separator() {
        let entry = match parse_line("HFPLTPILOTINCHARGE:Jane Doe").unwrap() {
            Record::Metadata(entry) => entry,
            other => panic!("expected metadata, got {other:?}"),
        };
        assert_eq!(entry.title, "Pilot (P1)");
        assert_eq!(entry.value, "Jane Doe");
    }

    #[test]
    fn test_parse_header_value_keeps_later_colons() {
        let entry = parse_h_record("HFTZNTIMEZONE:UTC+01:00").unwrap();
        assert_eq!(entry.value, "UTC+01:00");
    }

    #[test]
    fn test_parse_header_without_separator() {
        let entry = parse_h_record("HFDTE160726").unwrap();
        assert_eq!(entry.code, "HFDTE");
        assert_eq!(entry.title, "Flight Date");
        assert_eq!(entry.value, "160726");

        let entry = parse_h_record("HFFXA035").unwrap();
        assert_eq!(entry.title, "Fix Accuracy");
        assert_eq!(entry.value, "035");
    }

    #[test]
    fn test_lowercase_header_key() {
        let entry = parse_h_record("hfgidgliderid:D-1234").unwrap();
        assert_eq!(entry.title, "Glider Reg");
    }

    #[test]
    fn test_unknown_header_is_ignored() {
        assert_eq!(
            parse_line("HFALGALTGPS:GEO").unwrap(),
            Record::Ignored(Ignored::UnknownHeader)
        );
        assert_eq!(
            parse_line("HFDTEDATE:160726,01").unwrap(),
            Record::Ignored(Ignored::UnknownHeader)
        );
        assert_eq!(parse_line("H").unwrap(), Record::Ignored(Ignored::UnknownHeader));
    }

    #[test]
    fn test_other_records_are_ignored() {
        for line in ["AXCSAAA", "I023638FXA3941ENL", "LXCSCOMMENT", "", "C0000000N"] {
            assert_eq!(parse_line(line).unwrap(), Record::Ignored(Ignored::Other));
        }
    }

    #[test]
    fn test_header_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 7, 16);
        assert_eq!(header_date("HFDTE160726"), expected);
        assert_eq!(header_date("HFDTEDATE:160726,01"), expected);
        assert_eq!(header_date("hfdte160726"), expected);
        assert_eq!(header_date("HFPLTPILOT:Jane"), None);
        assert_eq!(header_date("HFDTE"), None);
    }

    #[test]
    fn test_multibyte_char_in_b_record_is_invalid_field() {
        // 'é' replaces the last seconds digit and straddles column 7
        let line = VALID_B.replacen("110135", "11013é", 1);
        assert!(line.len() >= B_RECORD_MIN_LEN);
        assert!(matches!(
            parse_b_record(&line),
            Err(IgcError::InvalidField { field: "time", .. })
        ));
    }

    #[test]
    fn test_b_record_round_trip() {
        let record = parse_b_record(VALID_B).unwrap();
        let line = record.to_igc_line();
        assert_eq!(line, VALID_B);
        assert_eq!(parse_b_record(&line).unwrap(), record);
    }

    #[test]
    fn test_b_record_round_trip_across_columns() {
        let times = ["000000", "115959", "235959"];
        let altitudes = [("00000", "00000"), ("-0012", "00558"), ("09999", "-0005")];
        let mut checked = 0;

        for time in times {
            for lat_deg in [0, 45, 89] {
                for lat_min in [0, 30_500, 59_999] {
                    for lat_hemi in ['N', 'S'] {
                        for lon_deg in [0, 7, 179] {
                            for lon_min in [0, 59_999] {
                                for lon_hemi in ['E', 'W'] {
                                    for (baro, gps) in altitudes {
                                        let line = format!(
                                            "B{time}{lat_deg:02}{lat_min:05}{lat_hemi}\
                                             {lon_deg:03}{lon_min:05}{lon_hemi}A{baro}{gps}"
                                        );
                                        let record = parse_b_record(&line).unwrap();
                                        let written = record.to_igc_line();
                                        assert_eq!(
                                            parse_b_record(&written).unwrap(),
                                            record,
                                            "line {line} wrote {written}"
                                        );
                                        checked += 1;
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        assert_eq!(checked, 3 * 3 * 3 * 2 * 3 * 2 * 2 * 3);
    }

    #[test]
    fn test_zero_coordinate_hemisphere_normalizes() {
        // -0.0 and 0.0 compare equal, so a zero coordinate written as S/W
        // comes back as N/E with the same value
        let line = "B1200000000000S00000000WA0010000100";
        let record = parse_b_record(line).unwrap();
        let written = record.to_igc_line();
        assert_eq!(written, "B1200000000000N00000000EA0010000100");
        assert_eq!(parse_b_record(&written).unwrap(), record);
    }
}
