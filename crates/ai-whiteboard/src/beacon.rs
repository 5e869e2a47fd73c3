use ai_core::{Pose3d, Timestamp};

/// Circular ground region where gathered cubes belong.
#[derive(Clone, Debug, PartialEq)]
pub struct Beacon {
    pub pose:      Pose3d,
    pub radius_mm: f32,
    last_failed_to_find_location_at: Option<Timestamp>,
}

impl Beacon {
    pub fn new(pose: Pose3d, radius_mm: f32) -> Self {
        Self { pose, radius_mm, last_failed_to_find_location_at: None }
    }

    /// Inclusive membership test.  Poses in other origins are outside.
    #[inline]
    pub fn is_loc_within(&self, pose: &Pose3d) -> bool {
        self.is_loc_within_threshold(pose, 0.0)
    }

    /// Membership with the boundary pulled `inward_mm` towards the center.
    pub fn is_loc_within_threshold(&self, pose: &Pose3d, inward_mm: f32) -> bool {
        self.pose.same_origin(pose)
            && self.pose.distance_xy_mm(pose) <= (self.radius_mm - inward_mm).max(0.0)
    }

    pub fn failed_to_find_location(&mut self, now: Timestamp) {
        self.last_failed_to_find_location_at = Some(now);
    }

    /// `true` if a free spot could not be found within the last `secs`.
    pub fn failed_to_find_location_within(&self, now: Timestamp, secs: f64) -> bool {
        self.last_failed_to_find_location_at
            .is_some_and(|t| now <= t + secs)
    }
}
