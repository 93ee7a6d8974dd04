//! Export functionality for parsed flights
//!
//! Writes the enriched trace and header metadata to CSV, the track to GPX 1.1
//! and, with the `json` feature, the whole flight to JSON. Output files sit
//! next to the input file unless `output_dir` is set.

use crate::types::{Fix, Flight};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub gpx: bool,
    pub json: bool,
    pub output_dir: Option<String>,
    /// Export even flights the skip heuristics would reject
    pub force_export: bool,
}

/// Paths of the files written by [`export_flight`]
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub headers_path: Option<PathBuf>,
    pub gpx_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

/// Compute (csv, headers csv, gpx, json) output paths for an input file
pub fn compute_export_paths(
    input_path: &Path,
    export_options: &ExportOptions,
) -> (PathBuf, PathBuf, PathBuf, PathBuf) {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("flight");

    let output_dir = match export_options.output_dir {
        Some(ref dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    (
        output_dir.join(format!("{base_name}.csv")),
        output_dir.join(format!("{base_name}.headers.csv")),
        output_dir.join(format!("{base_name}.gpx")),
        output_dir.join(format!("{base_name}.json")),
    )
}

/// Run every export enabled in `export_options`
pub fn export_flight(
    flight: &Flight,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    #[cfg(feature = "csv")]
    if export_options.csv {
        let (csv_path, headers_path) = export_to_csv(flight, input_path, export_options)?;
        report.csv_path = csv_path;
        report.headers_path = headers_path;
    }

    if export_options.gpx {
        report.gpx_path = export_to_gpx(flight, input_path, export_options)?;
    }

    #[cfg(feature = "json")]
    if export_options.json {
        report.json_path = export_to_json(flight, input_path, export_options)?;
    }

    Ok(report)
}

fn ensure_output_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {dir:?}"))?;
            debug!(?dir, "created output directory");
        }
    }
    Ok(())
}

fn format_optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_default()
}

/// Export the trace and header metadata to CSV
///
/// Writes `<name>.csv` (one row per fix, unset derived values as empty cells)
/// and `<name>.headers.csv` (`Field,Value`). Returns `(None, None)` without
/// touching the filesystem when the flight has neither fixes nor metadata.
#[cfg(feature = "csv")]
pub fn export_to_csv(
    flight: &Flight,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<(Option<PathBuf>, Option<PathBuf>)> {
    let (csv_path, headers_path, _, _) = compute_export_paths(input_path, export_options);

    let trace_path = if flight.has_fixes() {
        ensure_output_dir(&csv_path)?;
        export_trace_to_csv(&flight.trace, &csv_path)?;
        Some(csv_path)
    } else {
        None
    };

    let metadata_path = if flight.metadata.is_empty() {
        None
    } else {
        ensure_output_dir(&headers_path)?;
        export_metadata_to_csv(flight, &headers_path)?;
        Some(headers_path)
    };

    Ok((trace_path, metadata_path))
}

#[cfg(feature = "csv")]
fn export_trace_to_csv(trace: &[Fix], output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create trace CSV file: {output_path:?}"))?;

    writer.write_record([
        "time",
        "latitude",
        "longitude",
        "altitude (m)",
        "baro altitude (m)",
        "gps altitude (m)",
        "speed (km/h)",
        "ground speed (km/h)",
        "vario (kts)",
        "track (deg)",
    ])?;

    for fix in trace {
        writer.write_record([
            fix.time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            format!("{:.7}", fix.latitude),
            format!("{:.7}", fix.longitude),
            fix.altitude.to_string(),
            fix.baro_altitude.to_string(),
            fix.gps_altitude.to_string(),
            format_optional(fix.speed, 2),
            format_optional(fix.ground_speed, 2),
            format_optional(fix.vario, 2),
            format_optional(fix.track, 1),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush trace CSV file: {output_path:?}"))?;
    debug!(path = ?output_path, rows = trace.len(), "exported trace CSV");
    Ok(())
}

#[cfg(feature = "csv")]
fn export_metadata_to_csv(flight: &Flight, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("Failed to create headers CSV file: {output_path:?}"))?;

    writer.write_record(["Field", "Value"])?;
    for entry in &flight.metadata {
        writer.write_record([entry.title.as_str(), entry.value.trim()])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush headers CSV file: {output_path:?}"))?;
    Ok(())
}

/// Export the trace to a GPX 1.1 track
///
/// Returns `None` and writes nothing for a flight without fixes.
pub fn export_to_gpx(
    flight: &Flight,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    if !flight.has_fixes() {
        return Ok(None);
    }

    let (_, _, gpx_path, _) = compute_export_paths(input_path, export_options);
    ensure_output_dir(&gpx_path)?;

    let file = File::create(&gpx_path)
        .with_context(|| format!("Failed to create GPX file: {gpx_path:?}"))?;
    let mut gpx = BufWriter::new(file);

    let name = flight
        .metadata_value("Pilot (P1)")
        .map(|pilot| format!("IGC flight log - {}", pilot.trim()))
        .unwrap_or_else(|| "IGC flight log".to_string());
    let name = xml_escape(&name);

    writeln!(gpx, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        gpx,
        r#"<gpx creator="IGC Parser (Rust)" version="1.1" xmlns="http://www.topografix.com/GPX/1/1" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#
    )?;
    writeln!(gpx, "<metadata><name>{name}</name></metadata>")?;
    writeln!(gpx, "<trk><name>{name}</name><trkseg>")?;

    for fix in &flight.trace {
        writeln!(
            gpx,
            r#"  <trkpt lat="{:.7}" lon="{:.7}"><ele>{}</ele><time>{}</time></trkpt>"#,
            fix.latitude,
            fix.longitude,
            fix.altitude,
            fix.time.format("%Y-%m-%dT%H:%M:%SZ"),
        )?;
    }

    writeln!(gpx, "</trkseg></trk>")?;
    writeln!(gpx, "</gpx>")?;
    gpx.flush()
        .with_context(|| format!("Failed to flush GPX file: {gpx_path:?}"))?;

    debug!(path = ?gpx_path, points = flight.trace.len(), "exported GPX");
    Ok(Some(gpx_path))
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Export the whole flight, derived fields included, as pretty JSON
#[cfg(feature = "json")]
pub fn export_to_json(
    flight: &Flight,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<Option<PathBuf>> {
    let (_, _, _, json_path) = compute_export_paths(input_path, export_options);
    ensure_output_dir(&json_path)?;

    let file = File::create(&json_path)
        .with_context(|| format!("Failed to create JSON file: {json_path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, flight)
        .with_context(|| format!("Failed to serialize flight to {json_path:?}"))?;
    writer.flush()?;

    Ok(Some(json_path))
}
