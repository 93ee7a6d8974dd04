use crate::types::{Fix, MetadataEntry};
use chrono::{NaiveDate, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Line classification counters collected during ingestion
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParseStats {
    pub total_lines: u32,
    pub b_records: u32,
    /// B-records dropped for a `V` validity flag
    pub invalid_fixes: u32,
    pub h_records: u32,
    /// H-records whose code is not in the label table
    pub unknown_headers: u32,
    /// Lines skipped because a fixed-width field failed to parse
    pub malformed_lines: u32,
    /// Any other record type (A, C, E, G, I, L, ...)
    pub ignored_lines: u32,
}

/// Complete parsed IGC flight
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Flight {
    /// Fixes in file order
    pub trace: Vec<Fix>,
    /// Recognized header fields in file order
    pub metadata: Vec<MetadataEntry>,
    /// Date from the HFDTE header, if one was present
    pub flight_date: Option<NaiveDate>,
    pub stats: ParseStats,
    /// Launch time, once start/finish detection exists
    pub start_time: Option<NaiveDateTime>,
    /// Landing time, once start/finish detection exists
    pub finish_time: Option<NaiveDateTime>,
    /// Largest height gain in meters, once badge computation exists
    pub max_height_gain: Option<i32>,
}

impl Flight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_fix(&mut self, fix: Fix) {
        self.trace.push(fix);
    }

    pub fn push_metadata(&mut self, entry: MetadataEntry) {
        self.metadata.push(entry);
    }

    /// Check if any fixes were parsed
    pub fn has_fixes(&self) -> bool {
        !self.trace.is_empty()
    }

    /// First metadata value with the given title
    pub fn metadata_value(&self, title: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|entry| entry.title == title)
            .map(|entry| entry.value.as_str())
    }

    /// Time between first and last fix
    pub fn duration(&self) -> Option<chrono::Duration> {
        let first = self.trace.first()?;
        let last = self.trace.last()?;
        Some(last.time - first.time)
    }

    /// Get the duration of the trace in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.duration()
            .map(|d| d.num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0)
    }

    pub fn max_altitude(&self) -> Option<i32> {
        self.trace.iter().map(|fix| fix.altitude).max()
    }

    pub fn min_altitude(&self) -> Option<i32> {
        self.trace.iter().map(|fix| fix.altitude).min()
    }

    /// Highest smoothed ground speed, km/h
    pub fn max_ground_speed(&self) -> Option<f64> {
        max_finite(self.trace.iter().filter_map(|fix| fix.ground_speed))
    }

    /// Strongest climb, knots
    pub fn max_climb(&self) -> Option<f64> {
        max_finite(self.trace.iter().filter_map(|fix| fix.vario))
    }

    /// Strongest sink, knots (most negative vario)
    pub fn max_sink(&self) -> Option<f64> {
        max_finite(self.trace.iter().filter_map(|fix| fix.vario.map(|v| -v))).map(|v| -v)
    }

    /// Sum of point-to-point distances along the trace, meters
    pub fn total_distance_meters(&self) -> f64 {
        self.trace
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}

// NaN/infinite values from zero-length time steps are skipped
fn max_finite(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).reduce(f64::max)
}
