//! Example demonstrating IGC export functionality
//!
//! This example shows how to use the igc_parser crate to parse an IGC file
//! and export the enriched trace to CSV and GPX programmatically.

use anyhow::Result;
use igc_parser::{export_to_csv, export_to_gpx, parse_igc_file, ExportOptions, ParseOptions};
use std::path::Path;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <igc_file> [output_dir]", args[0]);
        eprintln!("\nExample:");
        eprintln!("  {} flight.igc", args[0]);
        eprintln!("  {} flight.igc ./output", args[0]);
        std::process::exit(1);
    }

    let input_file = &args[1];
    let output_dir = args.get(2).map(|s| s.to_string());

    println!("=== IGC Parser Export Demo ===");
    println!("Input file: {}", input_file);
    if let Some(ref dir) = output_dir {
        println!("Output directory: {}", dir);
    }
    println!();

    let export_opts = ExportOptions {
        csv: true,
        gpx: true,
        output_dir,
        ..ExportOptions::default()
    };

    println!("Parsing IGC file...");
    let input_path = Path::new(input_file);
    let flight = parse_igc_file(input_path, ParseOptions::default())?;

    println!("\n=== Flight Information ===");
    for entry in &flight.metadata {
        println!("{}: {}", entry.title, entry.value.trim());
    }
    println!();

    println!("=== Record Statistics ===");
    println!("Total lines: {}", flight.stats.total_lines);
    println!("B records: {}", flight.stats.b_records);
    if flight.stats.invalid_fixes > 0 {
        println!("Invalid fixes: {}", flight.stats.invalid_fixes);
    }
    println!("Fixes in trace: {}", flight.trace.len());
    println!();

    if let Some(duration) = flight.duration() {
        println!("Duration: {}s", duration.num_seconds());
        println!(
            "Distance: {:.1} km",
            flight.total_distance_meters() / 1000.0
        );
        if let Some(speed) = flight.max_ground_speed() {
            println!("Max ground speed: {:.1} km/h", speed);
        }
        println!();
    }

    println!("=== Exporting Data ===");
    let (csv_path, headers_path) = export_to_csv(&flight, input_path, &export_opts)?;
    for path in [csv_path, headers_path].into_iter().flatten() {
        println!("✓ Wrote {}", path.display());
    }

    match export_to_gpx(&flight, input_path, &export_opts)? {
        Some(path) => println!("✓ Wrote {}", path.display()),
        None => println!("⊘ No fixes to export"),
    }

    if let Some(first) = flight.trace.iter().find(|fix| fix.ground_speed.is_some()) {
        println!("\n=== First Smoothed Fix ===");
        println!(
            "  {} {:.1} km/h, vario {:.1} kts, track {:.0}°",
            first.time,
            first.ground_speed.unwrap_or_default(),
            first.vario.unwrap_or_default(),
            first.track.unwrap_or_default()
        );
    }

    println!("\n=== Export Complete ===");
    Ok(())
}
