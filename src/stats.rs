//! Flight statistics engine
//!
//! Derives per-fix kinematics from the completed trace. Each fix `i` gets the
//! values for the edge to fix `i + 1`: raw speed (km/h), vario (knots) and
//! track (degrees). Ground speed is a three-sample centered moving average of
//! the raw edge speeds, which damps the point-to-point noise of thermalling
//! flight.
//!
//! Two fixes with the same whole-second time give `dt == 0`; the resulting
//! infinite/NaN speeds are passed through unchanged rather than clamped.

use crate::conversion::{mps_to_kmh, mps_to_knots};
use crate::types::Flight;
use chrono::NaiveDateTime;
use tracing::trace;

/// Smoothed speed for edge `center` from its neighbours
///
/// `None` when `center` is the first or last edge, or out of range.
pub fn moving_average_3(speeds: &[f64], center: usize) -> Option<f64> {
    let window = speeds.get(center.checked_sub(1)?..=center.checked_add(1)?)?;
    Some(window.iter().sum::<f64>() / 3.0)
}

impl Flight {
    /// Run every statistic over the trace
    pub fn compute_statistics(&mut self) {
        self.compute_speeds();
        self.find_start_finish();
        self.find_max_height_gain();
    }

    /// Compute speed, ground speed, vario and track for each fix
    ///
    /// The last fix has no outgoing edge: its raw `speed` is 0 and its
    /// `vario`/`track` stay unset. Ground speed is only set for fixes
    /// `1..=N-3`.
    pub fn compute_speeds(&mut self) {
        let n = self.trace.len();
        if n == 0 {
            return;
        }

        let mut edge_speeds = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let (current, next) = (&self.trace[i], &self.trace[i + 1]);
            let dt = current.seconds_until(next) as f64;
            let distance = current.distance_to(next);
            let climb = (next.altitude - current.altitude) as f64;
            let track = current.bearing_to(next);

            let speed = mps_to_kmh(distance / dt);
            edge_speeds.push(speed);

            let fix = &mut self.trace[i];
            fix.speed = Some(speed);
            fix.vario = Some(mps_to_knots(climb / dt));
            fix.track = Some(track);
        }
        self.trace[n - 1].speed = Some(0.0);

        for i in 1..n.saturating_sub(2) {
            self.trace[i].ground_speed = moving_average_3(&edge_speeds, i);
        }

        trace!(fixes = n, "computed speeds");
    }

    /// Detect launch and landing times
    ///
    /// Not implemented yet: `start_time` and `finish_time` are left as `None`.
    pub fn find_start_finish(&mut self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.start_time.zip(self.finish_time)
    }

    /// Find the largest height gain, as used for height badge claims
    ///
    /// Not implemented yet: `max_height_gain` is left as `None`.
    pub fn find_max_height_gain(&mut self) -> Option<i32> {
        self.max_height_gain
    }
}
