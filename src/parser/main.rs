use crate::error::Result;
use crate::parser::record::{header_date, parse_line, Ignored, Record};
use crate::types::{Fix, Flight};
use anyhow::Context;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use std::path::Path;
use tracing::{debug, trace, warn};

/// How fix times-of-day are turned into full timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeAnchor {
    /// Use the HFDTE date and advance it across midnight; today's date if
    /// the file has no date header before its first fix
    #[default]
    FlightDate,
    /// Every fix is dated today, no rollover handling
    Today,
}

/// What to do with a B-record whose fixed-width fields do not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Log a warning, count the line and keep going
    #[default]
    Skip,
    /// Abort ingestion with the line number of the bad record
    Strict,
}

/// Options controlling ingestion
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub time_anchor: TimeAnchor,
    pub malformed: MalformedPolicy,
}

/// Parse an IGC file from disk
pub fn parse_igc_file(file_path: &Path, options: ParseOptions) -> anyhow::Result<Flight> {
    debug!(path = ?file_path, "parsing IGC file");

    let file_data = std::fs::read(file_path)
        .with_context(|| format!("Failed to read IGC file: {:?}", file_path))?;

    parse_igc_bytes(&file_data, options)
        .with_context(|| format!("Failed to parse IGC file: {:?}", file_path))
}

/// Parse IGC data from memory
///
/// Bytes that are not valid UTF-8 (typically Latin-1 pilot names) are
/// replaced rather than rejected.
pub fn parse_igc_bytes(data: &[u8], options: ParseOptions) -> anyhow::Result<Flight> {
    debug!(bytes = data.len(), "parsing IGC data");
    let text = String::from_utf8_lossy(data);
    Ok(parse_igc_str(&text, options)?)
}

/// Parse IGC text and compute flight statistics
///
/// Every line is classified in file order, then statistics are derived once
/// over the complete trace.
pub fn parse_igc_str(text: &str, options: ParseOptions) -> Result<Flight> {
    let mut flight = Flight::new();
    let mut dates = DateTracker::new(options.time_anchor, Local::now().date_naive());

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        flight.stats.total_lines += 1;

        if let Some(date) = header_date(line) {
            debug!(%date, "flight date header");
            flight.flight_date = Some(date);
            dates.set_header_date(date);
        }

        let record = match parse_line(line) {
            Ok(record) => record,
            Err(err) => {
                flight.stats.b_records += 1;
                match options.malformed {
                    MalformedPolicy::Skip => {
                        warn!(line = line_number, error = %err, "skipping malformed record");
                        flight.stats.malformed_lines += 1;
                        continue;
                    }
                    MalformedPolicy::Strict => return Err(err.at_line(line_number)),
                }
            }
        };

        match record {
            Record::Fix(b_record) => {
                flight.stats.b_records += 1;
                let date = dates.date_for(b_record.time);
                flight.push_fix(Fix::from_record(&b_record, date));
            }
            Record::Metadata(entry) => {
                flight.stats.h_records += 1;
                trace!(line = line_number, title = %entry.title, "metadata");
                flight.push_metadata(entry);
            }
            Record::Ignored(Ignored::InvalidFix) => {
                flight.stats.b_records += 1;
                flight.stats.invalid_fixes += 1;
                trace!(line = line_number, "invalid fix dropped");
            }
            Record::Ignored(Ignored::UnknownHeader) => {
                flight.stats.h_records += 1;
                flight.stats.unknown_headers += 1;
            }
            Record::Ignored(Ignored::Other) => {
                flight.stats.ignored_lines += 1;
            }
        }
    }

    debug!(
        fixes = flight.trace.len(),
        metadata = flight.metadata.len(),
        "parsed records, computing statistics"
    );
    flight.compute_statistics();

    Ok(flight)
}

// Backwards jump between consecutive fixes treated as crossing midnight
const ROLLOVER_THRESHOLD_HOURS: i64 = 12;

/// Assigns calendar dates to B-record times
struct DateTracker {
    anchor: TimeAnchor,
    today: NaiveDate,
    current: Option<NaiveDate>,
    last_time: Option<NaiveTime>,
}

impl DateTracker {
    fn new(anchor: TimeAnchor, today: NaiveDate) -> Self {
        Self {
            anchor,
            today,
            current: None,
            last_time: None,
        }
    }

    fn set_header_date(&mut self, date: NaiveDate) {
        if self.anchor == TimeAnchor::FlightDate {
            self.current = Some(date);
        }
    }

    fn date_for(&mut self, time: NaiveTime) -> NaiveDate {
        if self.anchor == TimeAnchor::Today {
            return self.today;
        }

        let mut date = self.current.unwrap_or(self.today);
        if let Some(last) = self.last_time {
            if last - time > Duration::hours(ROLLOVER_THRESHOLD_HOURS) {
                date = date.succ_opt().unwrap_or(date);
                debug!(%date, "midnight rollover");
            }
        }

        self.current = Some(date);
        self.last_time = Some(time);
        date
    }
}
