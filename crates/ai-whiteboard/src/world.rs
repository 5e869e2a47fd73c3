//! The world-model collaborator the whiteboard and strategies query.

use ai_core::{ObjectId, OriginId, Pose3d};

use crate::object::WorldObject;

/// Objects resting closer than this to the robot's floor height count as
/// "on the ground".
pub const ON_GROUND_TOLERANCE_MM: f32 = 30.0;

/// Horizontal distance under which one cube is considered stacked on another.
pub const STACKED_XY_TOLERANCE_MM: f32 = 30.0;

/// Read-only view of located objects and robot state.
///
/// Only [`objects`](BlockWorld::objects), [`robot_pose`](BlockWorld::robot_pose)
/// and [`is_zombie_origin`](BlockWorld::is_zombie_origin) are required; the
/// manipulation checks have geometric defaults that a richer world model can
/// override.
pub trait BlockWorld {
    /// Every located object, in any origin.
    fn objects(&self) -> &[WorldObject];

    fn robot_pose(&self) -> Pose3d;

    /// `true` once an origin can no longer be connected to the robot's
    /// current one.
    fn is_zombie_origin(&self, origin: OriginId) -> bool;

    fn object(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects().iter().find(|o| o.id == id)
    }

    fn carrying_object(&self) -> Option<ObjectId> {
        None
    }

    /// Object resting on top of `id`, if any.
    fn object_on_top(&self, id: ObjectId) -> Option<ObjectId> {
        let below = self.object(id)?;
        self.objects()
            .iter()
            .find(|o| {
                o.id != id
                    && o.pose.same_origin(&below.pose)
                    && o.pose.z > below.pose.z
                    && o.pose.distance_xy_mm(&below.pose) <= STACKED_XY_TOLERANCE_MM
            })
            .map(|o| o.id)
    }

    fn can_pick_up(&self, object: &WorldObject) -> bool {
        object.is_cube()
            && self.carrying_object().is_none()
            && self.object_on_top(object.id).is_none()
    }

    fn can_pick_up_from_ground(&self, object: &WorldObject) -> bool {
        self.can_pick_up(object)
            && (object.pose.z - self.robot_pose().z).abs() <= ON_GROUND_TOLERANCE_MM
    }

    fn can_roll(&self, object: &WorldObject) -> bool {
        object.is_cube()
            && self.carrying_object().is_none()
            && self.object_on_top(object.id).is_none()
    }

    fn is_roll_unlocked(&self) -> bool {
        true
    }

    fn is_wheelie_unlocked(&self) -> bool {
        true
    }

    /// Navigation memory reports unexplored edges worth visiting.
    fn has_interesting_edges(&self) -> bool {
        false
    }
}

// ── MemoryWorld ───────────────────────────────────────────────────────────────

/// Plain in-memory [`BlockWorld`], for scripted runs and tests.
#[derive(Clone, Debug)]
pub struct MemoryWorld {
    pub objects:           Vec<WorldObject>,
    pub robot_pose:        Pose3d,
    pub carrying:          Option<ObjectId>,
    pub zombie_origins:    Vec<OriginId>,
    pub roll_unlocked:     bool,
    pub wheelie_unlocked:  bool,
    pub interesting_edges: bool,
}

impl MemoryWorld {
    pub fn new(robot_pose: Pose3d) -> Self {
        Self {
            objects:           Vec::new(),
            robot_pose,
            carrying:          None,
            zombie_origins:    Vec::new(),
            roll_unlocked:     true,
            wheelie_unlocked:  true,
            interesting_edges: false,
        }
    }

    pub fn with_object(mut self, object: WorldObject) -> Self {
        self.upsert(object);
        self
    }

    /// Insert `object`, replacing any object with the same id.
    pub fn upsert(&mut self, object: WorldObject) {
        match self.objects.iter_mut().find(|o| o.id == object.id) {
            Some(slot) => *slot = object,
            None => self.objects.push(object),
        }
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<WorldObject> {
        let idx = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(idx))
    }

    /// Move the robot to a fresh origin; the old one becomes a zombie and
    /// every object located in it is forgotten.
    pub fn delocalize(&mut self, new_origin: OriginId) {
        let old = self.robot_pose.origin;
        self.zombie_origins.push(old);
        self.objects.retain(|o| o.pose.origin != old);
        self.robot_pose.origin = new_origin;
    }
}

impl BlockWorld for MemoryWorld {
    fn objects(&self) -> &[WorldObject] {
        &self.objects
    }

    fn robot_pose(&self) -> Pose3d {
        self.robot_pose
    }

    fn is_zombie_origin(&self, origin: OriginId) -> bool {
        self.zombie_origins.contains(&origin)
    }

    fn carrying_object(&self) -> Option<ObjectId> {
        self.carrying
    }

    fn is_roll_unlocked(&self) -> bool {
        self.roll_unlocked
    }

    fn is_wheelie_unlocked(&self) -> bool {
        self.wheelie_unlocked
    }

    fn has_interesting_edges(&self) -> bool {
        self.interesting_edges
    }
}
