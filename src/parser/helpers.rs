//! Helper functions for IGC field decoding
//!
//! IGC B-records are fixed-width columns, so every field is a byte range of
//! the line. These helpers slice and decode those ranges, returning a typed
//! error instead of silently coercing bad digits.

use crate::error::{IgcError, Result};
use chrono::NaiveTime;
use std::ops::Range;

/// Slice the fixed-width column holding `field` out of a record line
///
/// A range past the end of the line is `TooShort`; a range that splits a
/// multibyte character is an invalid `field`.
pub fn column<'a>(line: &'a str, field: &'static str, range: Range<usize>) -> Result<&'a str> {
    if range.end > line.len() {
        return Err(IgcError::TooShort {
            expected: range.end,
            actual: line.len(),
        });
    }
    line.get(range.clone()).ok_or_else(|| {
        let lossy = String::from_utf8_lossy(line.as_bytes().get(range).unwrap_or_default());
        IgcError::invalid_field(field, &lossy)
    })
}

/// Parse a fixed-width signed integer field such as `01234` or `-0012`
pub fn parse_int(field: &'static str, text: &str) -> Result<i32> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IgcError::invalid_field(field, text));
    }
    text.parse()
        .map_err(|_| IgcError::invalid_field(field, text))
}

/// Parse a `D..DMMmmmH` coordinate into signed decimal degrees
///
/// Degrees are every digit before the last six characters, minutes are the
/// five digits before the hemisphere letter in thousandths of a minute.
pub fn parse_coordinate(
    field: &'static str,
    text: &str,
    positive: char,
    negative: char,
) -> Result<f64> {
    if text.len() < 7 || !text.is_ascii() {
        return Err(IgcError::invalid_field(field, text));
    }

    let split = text.len() - 6;
    let degrees = parse_unsigned(field, &text[..split])?;
    let thousandths = parse_unsigned(field, &text[split..text.len() - 1])?;
    let hemisphere = text[text.len() - 1..]
        .chars()
        .next()
        .ok_or_else(|| IgcError::invalid_field(field, text))?;

    let sign = match hemisphere {
        c if c == positive => 1.0,
        c if c == negative => -1.0,
        other => return Err(IgcError::InvalidHemisphere(other)),
    };

    let minutes = thousandths as f64 / 1000.0;
    Ok(sign * (degrees as f64 + minutes / 60.0))
}

/// Parse an `HHMMSS` time of day
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime> {
    if text.len() != 6 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IgcError::invalid_field("time", text));
    }

    let hours = parse_unsigned("time", &text[0..2])?;
    let minutes = parse_unsigned("time", &text[2..4])?;
    let seconds = parse_unsigned("time", &text[4..6])?;

    NaiveTime::from_hms_opt(hours, minutes, seconds)
        .ok_or_else(|| IgcError::InvalidTime(text.to_string()))
}

fn parse_unsigned(field: &'static str, text: &str) -> Result<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IgcError::invalid_field(field, text));
    }
    text.parse()
        .map_err(|_| IgcError::invalid_field(field, text))
}
