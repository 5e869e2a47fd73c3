use ai_core::{ObjectId, ObjectType, Pose3d};

/// Coarse grouping the whiteboard filters on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectFamily {
    LightCube,
    Charger,
    Other,
}

/// A located object as reported by the block world.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldObject {
    pub id:          ObjectId,
    pub object_type: ObjectType,
    pub family:      ObjectFamily,
    pub pose:        Pose3d,
}

impl WorldObject {
    pub fn new(id: ObjectId, object_type: ObjectType, family: ObjectFamily, pose: Pose3d) -> Self {
        Self { id, object_type, family, pose }
    }

    /// Shorthand for a light cube.
    pub fn cube(id: ObjectId, object_type: ObjectType, pose: Pose3d) -> Self {
        Self::new(id, object_type, ObjectFamily::LightCube, pose)
    }

    #[inline]
    pub fn is_cube(&self) -> bool {
        self.family == ObjectFamily::LightCube
    }
}
