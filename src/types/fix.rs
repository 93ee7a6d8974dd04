use crate::conversion::{format_latitude, format_longitude};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One valid B-record exactly as read from its fixed-width columns
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BRecord {
    /// UTC time of day, whole seconds
    pub time: NaiveTime,
    /// Signed decimal degrees, positive north
    pub latitude: f64,
    /// Signed decimal degrees, positive east
    pub longitude: f64,
    /// Barometric (pressure) altitude in meters
    pub baro_altitude: i32,
    /// GPS altitude in meters
    pub gps_altitude: i32,
}

impl BRecord {
    /// Write the record back out in the B-record column layout
    ///
    /// Always writes validity `A`, since only valid fixes become records.
    pub fn to_igc_line(&self) -> String {
        format!(
            "B{:02}{:02}{:02}{}{}A{}{}",
            self.time.hour(),
            self.time.minute(),
            self.time.second(),
            format_latitude(self.latitude),
            format_longitude(self.longitude),
            format_altitude(self.baro_altitude),
            format_altitude(self.gps_altitude),
        )
    }
}

// Five columns, sign included for negative values (e.g. `-0012`)
fn format_altitude(alt: i32) -> String {
    if alt < 0 {
        format!("-{:04}", alt.unsigned_abs())
    } else {
        format!("{:05}", alt)
    }
}

/// A location fix in the flight trace
///
/// The derived fields (`speed`, `ground_speed`, `vario`, `track`) stay `None`
/// until [`Flight::compute_statistics`](crate::Flight::compute_statistics) runs,
/// and some remain `None` afterwards for boundary fixes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fix {
    pub time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub baro_altitude: i32,
    pub gps_altitude: i32,
    /// Consolidated altitude in meters (currently the GPS altitude)
    pub altitude: i32,
    /// Raw point-to-point speed to the next fix, km/h
    pub speed: Option<f64>,
    /// Three-sample moving average of `speed`, km/h
    pub ground_speed: Option<f64>,
    /// Vertical speed to the next fix, knots
    pub vario: Option<f64>,
    /// Initial bearing to the next fix, degrees [0, 360)
    pub track: Option<f64>,
}

impl Fix {
    /// Build a trace fix from a B-record on the given date
    pub fn from_record(record: &BRecord, date: NaiveDate) -> Self {
        Self {
            time: date.and_time(record.time),
            latitude: record.latitude,
            longitude: record.longitude,
            baro_altitude: record.baro_altitude,
            gps_altitude: record.gps_altitude,
            // TODO: fall back to baro altitude when the GPS loses its 3D fix
            altitude: record.gps_altitude,
            speed: None,
            ground_speed: None,
            vario: None,
            track: None,
        }
    }

    /// Whole seconds from this fix to `other`, floored
    pub fn seconds_until(&self, other: &Fix) -> i64 {
        (other.time - self.time)
            .num_milliseconds()
            .div_euclid(1000)
    }

    /// Great-circle distance to `other` in meters
    pub fn distance_to(&self, other: &Fix) -> f64 {
        crate::geodesy::distance_meters(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Initial bearing to `other` in degrees
    pub fn bearing_to(&self, other: &Fix) -> f64 {
        crate::geodesy::bearing_degrees(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}
