//! Travel route policy.
//!
//! Trip length is a pure function of map distance: duration in whole
//! seconds at a fixed cruise speed, floored at a minimum so neighboring
//! planets still produce an observable countdown. Whole-second durations
//! keep the 1 Hz countdown and the ETA aligned.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CRUISE_SPEED, MIN_TRAVEL_SECS};

/// Tunable inputs of the duration function.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// Map units covered per second.
    pub cruise_speed: f32,
    /// Shortest allowed trip in whole seconds.
    pub min_travel_secs: i64,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            cruise_speed: DEFAULT_CRUISE_SPEED,
            min_travel_secs: MIN_TRAVEL_SECS,
        }
    }
}

/// Travel duration in milliseconds for a trip of `distance` map units.
///
/// Deterministic: the same policy and distance always produce the same
/// duration. Rounds up to the next whole second so a nonzero distance
/// never collapses to an instant trip.
pub fn travel_duration_ms(policy: &RoutePolicy, distance: f32) -> i64 {
    let secs = (distance / policy.cruise_speed).ceil() as i64;
    secs.max(policy.min_travel_secs) * 1_000
}

/// Normalized trip progress in [0, 1] for `elapsed_ms` of a
/// `duration_ms` trip. A non-positive duration counts as already there.
pub fn travel_progress(elapsed_ms: i64, duration_ms: i64) -> f32 {
    if duration_ms <= 0 {
        return 1.0;
    }
    (elapsed_ms as f32 / duration_ms as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_scales_with_distance() {
        let policy = RoutePolicy { cruise_speed: 50.0, min_travel_secs: 2 };

        assert_eq!(travel_duration_ms(&policy, 250.0), 5_000);
        assert_eq!(travel_duration_ms(&policy, 500.0), 10_000);
    }

    #[test]
    fn test_duration_rounds_up_to_whole_seconds() {
        let policy = RoutePolicy { cruise_speed: 50.0, min_travel_secs: 1 };

        // 130 units at 50/s = 2.6s, rounds to 3s
        assert_eq!(travel_duration_ms(&policy, 130.0), 3_000);
    }

    #[test]
    fn test_duration_floors_at_minimum() {
        let policy = RoutePolicy { cruise_speed: 50.0, min_travel_secs: 2 };

        assert_eq!(travel_duration_ms(&policy, 10.0), 2_000);
        assert_eq!(travel_duration_ms(&policy, 0.0), 2_000);
    }

    #[test]
    fn test_duration_is_deterministic() {
        let policy = RoutePolicy::default();
        let a = travel_duration_ms(&policy, 333.3);
        let b = travel_duration_ms(&policy, 333.3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(travel_progress(-100, 5_000), 0.0);
        assert_eq!(travel_progress(0, 5_000), 0.0);
        assert_eq!(travel_progress(2_500, 5_000), 0.5);
        assert_eq!(travel_progress(5_000, 5_000), 1.0);
        assert_eq!(travel_progress(9_000, 5_000), 1.0);
    }

    #[test]
    fn test_progress_zero_duration_is_done() {
        assert_eq!(travel_progress(0, 0), 1.0);
    }
}
