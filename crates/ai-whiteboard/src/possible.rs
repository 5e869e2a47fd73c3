use ai_core::{ObjectType, Pose3d, Timestamp};

/// An unconfirmed detection hypothesis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PossibleObject {
    pub pose:        Pose3d,
    pub object_type: ObjectType,
}

impl PossibleObject {
    pub fn new(object_type: ObjectType, pose: Pose3d) -> Self {
        Self { pose, object_type }
    }

    #[inline]
    pub fn matches(&self, object_type: ObjectType, pose: &Pose3d, dist_mm: f32, angle: f32) -> bool {
        self.object_type == object_type && self.pose.is_same_as(pose, dist_mm, angle)
    }
}

/// A spot that was searched without finding the hypothesized object.
/// New hypotheses of the same type near it are ignored until it expires.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SearchedEmpty {
    pub pose:        Pose3d,
    pub object_type: ObjectType,
    pub at:          Timestamp,
}

impl SearchedEmpty {
    #[inline]
    pub fn is_expired(&self, now: Timestamp, timeout_secs: f64) -> bool {
        now > self.at + timeout_secs
    }
}
