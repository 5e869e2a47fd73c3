//! Whiteboard tuning constants.

use std::f32::consts::PI;

use serde::Deserialize;

/// Per-action bound on how many failure records are kept for one object.
/// The oldest record is evicted first.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FailureCaps {
    pub pick_up:     usize,
    pub stack_on:    usize,
    pub place_at:    usize,
    pub roll_or_pop: usize,
}

impl Default for FailureCaps {
    fn default() -> Self {
        Self {
            pick_up:     1,
            stack_on:    1,
            place_at:    10,
            roll_or_pop: 1,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WhiteboardConfig {
    /// Two possible objects closer than this are the same hypothesis.
    pub possible_object_close_mm: f32,
    /// Rotation tolerance for the same check; `PI` disables it.
    pub possible_object_close_angle: f32,
    /// Oldest hypotheses are dropped past this count.
    pub max_possible_objects: usize,
    /// Observations tilted more than this are not considered.
    pub possible_object_flat_tolerance_rad: f32,
    /// Observations higher than this above the robot are not considered.
    pub possible_object_max_height_mm: f32,

    /// How long a fruitless search suppresses new hypotheses at that spot.
    pub searched_empty_timeout_secs: f64,
    pub searched_empty_radius_mm:    f32,

    /// Recency / location window applied by the intention filters.
    pub failure_recent_secs:  f64,
    pub failure_dist_mm:      f32,
    pub failure_angle:        f32,
    pub failure_caps:         FailureCaps,

    /// Cubes must sit this far inside a beacon edge to count as gathered.
    pub beacon_inward_threshold_mm: f32,
}

impl Default for WhiteboardConfig {
    fn default() -> Self {
        Self {
            possible_object_close_mm:           50.0,
            possible_object_close_angle:        PI,
            max_possible_objects:               10,
            possible_object_flat_tolerance_rad: 10f32.to_radians(),
            possible_object_max_height_mm:      30.0,
            searched_empty_timeout_secs:        30.0,
            searched_empty_radius_mm:           100.0,
            failure_recent_secs:                10.0,
            failure_dist_mm:                    60.0,
            failure_angle:                      PI,
            failure_caps:                       FailureCaps::default(),
            beacon_inward_threshold_mm:         10.0,
        }
    }
}
