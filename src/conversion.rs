//! Unit conversion and IGC field formatting utilities
//!
//! Contains speed/altitude unit conversions used by the statistics engine and
//! exporters, the HFDTE date decoder, and the fixed-width coordinate encoders
//! used when writing B-records back out.

use chrono::NaiveDate;

/// Meters per second to knots
pub const KNOTS_PER_MPS: f64 = 1.94384449;

/// Meters to feet
pub const FEET_PER_METER: f64 = 3.2808399;

/// Convert meters per second to kilometers per hour
pub fn mps_to_kmh(mps: f64) -> f64 {
    mps / 1000.0 * 60.0 * 60.0
}

/// Convert meters per second to knots
pub fn mps_to_knots(mps: f64) -> f64 {
    mps * KNOTS_PER_MPS
}

/// Convert meters to feet
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Parse an HFDTE date value in the form `DDMMYY`
///
/// Trailing content after the six digits (e.g. the `,01` flight number of
/// newer loggers) is ignored. Two-digit years above 80 are taken as 19xx,
/// everything else as 20xx.
pub fn parse_flight_date(value: &str) -> Option<NaiveDate> {
    let digits = value.trim().get(0..6)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let day: u32 = digits[0..2].parse().ok()?;
    let month: u32 = digits[2..4].parse().ok()?;
    let half_year: i32 = digits[4..6].parse().ok()?;
    let year = if half_year > 80 {
        half_year + 1900
    } else {
        half_year + 2000
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Encode latitude as IGC `DDMMmmmN/S`
///
/// Example: 54.11868 -> `5407121N`
pub fn format_latitude(lat: f64) -> String {
    let (degrees, thousandths) = split_degrees(lat);
    let hemisphere = if lat >= 0.0 { 'N' } else { 'S' };
    format!("{:02}{:05}{}", degrees, thousandths, hemisphere)
}

/// Encode longitude as IGC `DDDMMmmmE/W`
///
/// Example: -2.82237 -> `00249342W`
pub fn format_longitude(lon: f64) -> String {
    let (degrees, thousandths) = split_degrees(lon);
    let hemisphere = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:03}{:05}{}", degrees, thousandths, hemisphere)
}

// Whole degrees and thousandths of a minute, rounded so that 59.9995' carries
// into the next degree instead of printing 60000.
fn split_degrees(value: f64) -> (u64, u64) {
    let total = (value.abs() * 60_000.0).round() as u64;
    (total / 60_000, total % 60_000)
}
