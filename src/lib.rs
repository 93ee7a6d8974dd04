//! IGC Parser Library
//!
//! A Rust library for parsing IGC flight-recorder logs (the International
//! Gliding Commission track format) and deriving per-fix flight statistics:
//! ground speed, vertical speed and track.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable flight export in JSON format
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Parse a log file and access the enriched trace:
//! ```rust,no_run
//! use igc_parser::{parse_igc_file, ParseOptions};
//! use std::path::Path;
//!
//! let flight = parse_igc_file(Path::new("flight.igc"), ParseOptions::default()).unwrap();
//! println!("Parsed {} fixes", flight.trace.len());
//! for fix in &flight.trace {
//!     if let Some(speed) = fix.ground_speed {
//!         println!("{} {:.1} km/h", fix.time, speed);
//!     }
//! }
//! ```
//!
//! Export to CSV format:
//! ```rust,no_run
//! use igc_parser::{export_flight, parse_igc_file, ExportOptions, ParseOptions};
//! use std::path::Path;
//!
//! let export_options = ExportOptions {
//!     csv: true,
//!     ..ExportOptions::default()
//! };
//! let input = Path::new("flight.igc");
//! let flight = parse_igc_file(input, ParseOptions::default()).unwrap();
//! let report = export_flight(&flight, input, &export_options).unwrap();
//! if let Some(path) = report.csv_path {
//!     println!("Exported to: {}", path.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_igc_file`] - Parse an IGC file from disk
//! - [`parse_igc_bytes`] - Parse IGC data from memory
//! - [`parse_igc_str`] - Parse IGC text
//! - [`parse_line`] - Classify a single IGC line
//!
//! ## Data Types
//! - [`Flight`] - Parsed trace, metadata and parse counters
//! - [`Fix`] - One location fix with its derived statistics
//! - [`MetadataEntry`] - A recognized header field
//! - [`Record`] - Result of classifying one line
//!
//! ## Statistics
//! - [`Flight::compute_statistics`] - Derive speeds, vario and track
//! - [`distance_meters`] / [`bearing_degrees`] - Spherical geodesy
//!
//! ## Export Functions
//! - [`export_flight`] - Run every enabled export
//! - [`export_to_gpx`] - Export the trace as a GPX track
//! - [`compute_export_paths`] - Helper for consistent path computation
//! - [`should_skip_export`] - Skip logger files too small to be flights

// Module declarations
pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod geodesy;
pub mod parser;
pub mod stats;
pub mod types;

// Re-export everything from modules for convenience
pub use conversion::*;
pub use error::{IgcError, Result};
pub use export::*;
pub use filters::*;
pub use geodesy::*;
pub use parser::*;
pub use stats::*;
pub use types::*;
