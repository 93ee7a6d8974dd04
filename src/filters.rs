//! Export filtering heuristics for identifying flights worth exporting
//!
//! Logger files often contain only a few fixes from a ground test or a logger
//! switched on and off on the trailer. These filters flag such files so the
//! CLI can skip them unless `--force-export` is given.

use crate::types::Flight;

/// Fewer fixes than this leaves no smoothed ground speed at all
pub const MIN_FIXES_FOR_EXPORT: usize = 3;

/// Shortest trace worth exporting, seconds
pub const MIN_DURATION_SECONDS: f64 = 30.0;

/// Determines if a flight should be skipped for export
///
/// # Arguments
/// * `flight` - The parsed flight to evaluate
/// * `force_export` - If true, never skips (overrides all heuristics)
///
/// # Returns
/// Tuple of (should_skip, reason_description)
pub fn should_skip_export(flight: &Flight, force_export: bool) -> (bool, String) {
    if force_export {
        return (false, String::new());
    }

    let fixes = flight.trace.len();
    if fixes < MIN_FIXES_FOR_EXPORT {
        return (
            true,
            format!("too few fixes ({} < {})", fixes, MIN_FIXES_FOR_EXPORT),
        );
    }

    let duration_s = flight.duration_seconds();
    if duration_s < MIN_DURATION_SECONDS {
        return (
            true,
            format!(
                "too short ({:.1}s < {:.1}s)",
                duration_s, MIN_DURATION_SECONDS
            ),
        );
    }

    (false, String::new())
}
