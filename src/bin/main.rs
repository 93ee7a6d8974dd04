//! CLI binary for IGC Parser
//!
//! This provides the command-line interface for the IGC parser library.

use anyhow::Result;
use clap::{Arg, Command};
use glob::glob;
use igc_parser::{
    export_flight, meters_to_feet, parse_igc_file, should_skip_export, ExportOptions, Flight,
    MalformedPolicy, ParseOptions, TimeAnchor,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("VERGEN_GIT_COMMIT_DATE"),
    ")"
);

fn build_command() -> Command {
    Command::new("IGC Parser")
        .version(VERSION)
        .about("Read and parse IGC flight recorder logs. Exports the enriched trace to CSV (optionally GPX/JSON).")
        .arg(
            Arg::new("files")
                .help("IGC files to parse (.IGC extension, case-insensitive, supports globbing)")
                .required(false)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed parsing information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("gpx")
                .long("gpx")
                .help("Export the trace to GPX XML files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export the parsed flight to JSON files (requires the json feature)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("legacy-time")
                .long("legacy-time")
                .help("Date every fix today instead of using the HFDTE flight date")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Fail on malformed B-records instead of skipping them")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force-export")
                .long("force-export")
                .help("Force export of all files, including ones with fewer than 3 fixes or under 30s of track")
                .action(clap::ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);

    let file_patterns: Vec<&String> = match matches.get_many::<String>("files") {
        Some(files) => files.collect(),
        None => {
            build_command().print_help()?;
            println!();
            return Ok(());
        }
    };

    let export_options = ExportOptions {
        csv: true, // CSV export is always enabled for the CLI binary
        gpx: matches.get_flag("gpx"),
        json: matches.get_flag("json"),
        output_dir: matches.get_one::<String>("output-dir").cloned(),
        force_export: matches.get_flag("force-export"),
    };

    if export_options.json && !cfg!(feature = "json") {
        eprintln!("Warning: --json requires the 'json' feature; skipping JSON export");
    }

    let parse_options = ParseOptions {
        time_anchor: if matches.get_flag("legacy-time") {
            TimeAnchor::Today
        } else {
            TimeAnchor::FlightDate
        },
        malformed: if matches.get_flag("strict") {
            MalformedPolicy::Strict
        } else {
            MalformedPolicy::Skip
        },
    };

    tracing::debug!(?file_patterns, "input patterns");

    let valid_paths = collect_input_files(&file_patterns);
    tracing::debug!(count = valid_paths.len(), "valid files to process");

    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Supported extensions: .IGC (case-insensitive)");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut processed_files = 0;
    for (index, path) in valid_paths.iter().enumerate() {
        if index > 0 {
            println!();
        }

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        println!("Processing: {filename}");

        match parse_igc_file(path, parse_options) {
            Ok(flight) => {
                display_flight_info(&flight);

                let (skip, reason) = should_skip_export(&flight, export_options.force_export);
                if skip {
                    println!("Skipping export: {reason}");
                } else {
                    let report = export_flight(&flight, path, &export_options)?;
                    for exported in [
                        report.csv_path,
                        report.headers_path,
                        report.gpx_path,
                        report.json_path,
                    ]
                    .into_iter()
                    .flatten()
                    {
                        println!("Exported: {}", exported.display());
                    }
                }
                processed_files += 1;
            }
            Err(e) => {
                eprintln!("Error processing {filename}: {e:#}");
                eprintln!("Continuing with next file...");
            }
        }
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}

/// Expand glob patterns and keep existing files with an .igc extension
fn collect_input_files(file_patterns: &[&String]) -> Vec<PathBuf> {
    let mut valid_paths = Vec::new();

    for pattern in file_patterns {
        let paths: Vec<PathBuf> = if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => match glob_iter.collect::<Result<Vec<_>, _>>() {
                    Ok(paths) => {
                        tracing::debug!(pattern = %pattern, matched = paths.len(), "glob expanded");
                        paths
                    }
                    Err(e) => {
                        eprintln!("Error expanding glob pattern '{pattern}': {e}");
                        continue;
                    }
                },
                Err(e) => {
                    eprintln!("Invalid glob pattern '{pattern}': {e}");
                    continue;
                }
            }
        } else {
            vec![Path::new(pattern.as_str()).to_path_buf()]
        };

        for path in paths {
            if !path.exists() {
                eprintln!("Warning: File does not exist: {path:?}");
                continue;
            }

            let valid_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("igc"))
                .unwrap_or(false);

            if !valid_extension {
                let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("none");
                eprintln!("Warning: Skipping file with unsupported extension '{ext}': {path:?}");
                continue;
            }

            valid_paths.push(path);
        }
    }

    valid_paths
}

fn display_flight_info(flight: &Flight) {
    for entry in &flight.metadata {
        println!("{:<20}{}", entry.title, entry.value.trim());
    }

    let stats = &flight.stats;
    println!("\nStatistics");
    println!("Lines      {:6}", stats.total_lines);
    println!("B records  {:6}", stats.b_records);
    if stats.invalid_fixes > 0 {
        println!("Invalid    {:6}", stats.invalid_fixes);
    }
    if stats.malformed_lines > 0 {
        println!("Malformed  {:6}", stats.malformed_lines);
    }
    println!("Fixes      {:6}", flight.trace.len());

    if let (Some(first), Some(last)) = (flight.trace.first(), flight.trace.last()) {
        let total_seconds = flight.duration_seconds().max(0.0) as u64;
        println!(
            "Duration   {:02}h{:02}m{:02}s ({} - {})",
            total_seconds / 3600,
            (total_seconds % 3600) / 60,
            total_seconds % 60,
            first.time.format("%H:%M:%S"),
            last.time.format("%H:%M:%S"),
        );
    }
    if let (Some(min), Some(max)) = (flight.min_altitude(), flight.max_altitude()) {
        println!(
            "Altitude   {:6}m .. {}m ({:.0}ft max)",
            min,
            max,
            meters_to_feet(max as f64)
        );
    }
    println!(
        "Distance   {:9.1}km",
        flight.total_distance_meters() / 1000.0
    );
    if let Some(speed) = flight.max_ground_speed() {
        println!("Max speed  {:9.1}km/h", speed);
    }
    if let Some(climb) = flight.max_climb() {
        println!("Max climb  {:9.1}kts", climb);
    }
    if let Some(sink) = flight.max_sink() {
        println!("Max sink   {:9.1}kts", sink);
    }
}
