//! Calibration tables for the linear 5x5 progression
//!
//! Two ordered mappings from "max reps completed at 80% of 1RM" to a
//! percentage: one for the weekly load increase, one for the ramp-up starting
//! percentage of 1RM. The tables are versioned together as a unit and always
//! passed into calculations explicitly, so alternate calibrations can be
//! swapped without touching the algorithm and tests can inject synthetic ones.
//!
//! Lookups are total over all integers: reps below 1 resolve to key 1, reps
//! above 20 resolve to key 20. They never fail.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version stamped on every program the reference tables produce
pub const ALGORITHM_VERSION: &str = "v1.0.0";

/// Identifies the program builder these tables calibrate
pub const BUILDER_TYPE: &str = "strength_linear_5x5";

/// Rep-test domain covered by the tables
pub const TABLE_MIN_REPS: i64 = 1;
pub const TABLE_MAX_REPS: i64 = 20;

// ---------------------------------------------------------------------------
/// Calibration Tables: versioned, immutable, injected into every calculation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationTables {
    version: String,
    /// Indexed by reps - 1 for reps in 1..=20
    weekly_jump: [i64; 20],
    ramp_up: [i64; 20],
}

impl CalibrationTables {
    /// Reference calibration.
    ///
    /// Fewer reps at 80% means less rep capacity, which calls for bigger
    /// weekly jumps and a heavier ramp-up starting point.
    pub fn v1() -> Self {
        Self {
            version: ALGORITHM_VERSION.to_string(),
            // reps:    1  2  3  4  5  6  7  8  9 10 11 12 13 14 15 16 17 18 19 20
            weekly_jump: [5, 5, 5, 5, 5, 4, 4, 4, 4, 4, 3, 3, 3, 3, 3, 2, 2, 2, 2, 2],
            ramp_up: [
                51, 52, 53, 54, 55, 56, 57, 58, 59, 60, //
                61, 62, 63, 64, 65, 66, 67, 68, 69, 70,
            ],
        }
    }

    /// Construct an alternate calibration (synthetic tables for tests, or a
    /// future revision). Arrays are indexed by reps - 1.
    pub fn new(version: impl Into<String>, weekly_jump: [i64; 20], ramp_up: [i64; 20]) -> Self {
        Self {
            version: version.into(),
            weekly_jump,
            ramp_up,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Weekly progression percentage for a rep-test result.
    /// Total over all integers: out-of-domain reps clamp to the boundary key.
    pub fn lookup_weekly_jump_percent(&self, reps: i64) -> i64 {
        self.weekly_jump[Self::index(reps)]
    }

    /// Ramp-up starting percentage of 1RM for a rep-test result.
    /// Total over all integers: out-of-domain reps clamp to the boundary key.
    pub fn lookup_ramp_up_percent(&self, reps: i64) -> i64 {
        self.ramp_up[Self::index(reps)]
    }

    fn index(reps: i64) -> usize {
        (reps.clamp(TABLE_MIN_REPS, TABLE_MAX_REPS) - 1) as usize
    }

    /// Table contents as explicit reps -> percent maps, for export
    pub fn weekly_jump_map(&self) -> BTreeMap<i64, i64> {
        (TABLE_MIN_REPS..=TABLE_MAX_REPS)
            .map(|r| (r, self.lookup_weekly_jump_percent(r)))
            .collect()
    }

    pub fn ramp_up_map(&self) -> BTreeMap<i64, i64> {
        (TABLE_MIN_REPS..=TABLE_MAX_REPS)
            .map(|r| (r, self.lookup_ramp_up_percent(r)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_reference_values() {
        let tables = CalibrationTables::v1();
        assert_eq!(tables.version(), "v1.0.0");

        // Reference calibration endpoints and the documented fixture point
        assert_eq!(tables.lookup_weekly_jump_percent(1), 5);
        assert_eq!(tables.lookup_weekly_jump_percent(12), 3);
        assert_eq!(tables.lookup_weekly_jump_percent(20), 2);
        assert_eq!(tables.lookup_ramp_up_percent(1), 51);
        assert_eq!(tables.lookup_ramp_up_percent(12), 62);
        assert_eq!(tables.lookup_ramp_up_percent(20), 70);
    }

    #[test]
    fn test_lookups_are_total_over_all_integers() {
        let tables = CalibrationTables::v1();

        // Below the domain: clamp to key 1
        assert_eq!(
            tables.lookup_weekly_jump_percent(0),
            tables.lookup_weekly_jump_percent(1)
        );
        assert_eq!(
            tables.lookup_ramp_up_percent(-3),
            tables.lookup_ramp_up_percent(1)
        );

        // Above the domain: clamp to key 20
        assert_eq!(
            tables.lookup_weekly_jump_percent(25),
            tables.lookup_weekly_jump_percent(20)
        );
        assert_eq!(
            tables.lookup_ramp_up_percent(100),
            tables.lookup_ramp_up_percent(20)
        );

        // Extremes must not panic
        assert_eq!(tables.lookup_weekly_jump_percent(i64::MIN), 5);
        assert_eq!(tables.lookup_weekly_jump_percent(i64::MAX), 2);
    }

    #[test]
    fn test_monotonicity() {
        let tables = CalibrationTables::v1();

        // More reps at 80% = more capacity = smaller jumps, lighter ramp-up
        for reps in 2..=20 {
            assert!(
                tables.lookup_weekly_jump_percent(reps)
                    <= tables.lookup_weekly_jump_percent(reps - 1),
                "weekly jump must not increase with rep capacity (reps {})",
                reps
            );
            assert!(
                tables.lookup_ramp_up_percent(reps) >= tables.lookup_ramp_up_percent(reps - 1),
                "ramp-up must not decrease with rep capacity (reps {})",
                reps
            );
        }
    }

    #[test]
    fn test_map_export_matches_lookups() {
        let tables = CalibrationTables::v1();
        let jump = tables.weekly_jump_map();
        let ramp = tables.ramp_up_map();

        assert_eq!(jump.len(), 20);
        assert_eq!(ramp.len(), 20);
        assert_eq!(jump[&12], 3);
        assert_eq!(ramp[&12], 62);
    }
}
