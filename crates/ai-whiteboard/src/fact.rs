use ai_core::{ObjectType, Pose3d, Quad2};

/// Sensor and engine observations the whiteboard consumes.
///
/// Facts are queued as they arrive and applied at the next tick boundary via
/// [`Whiteboard::handle_fact`][crate::Whiteboard::handle_fact].
#[derive(Clone, Debug, PartialEq)]
pub enum WhiteboardFact {
    /// A real object was located; any hypothesis at that spot is confirmed.
    ObservedObject { object_type: ObjectType, pose: Pose3d },
    /// Something marker-like was seen but not confirmed.
    ObservedPossibleObject { object_type: ObjectType, pose: Pose3d },
    /// A known object was not where it was expected to be.
    MarkedObjectPoseUnknown { object_type: ObjectType, pose: Pose3d },
    OffTreadsStateChanged { on_treads: bool },
    RobotDelocalized,
    /// The robot drove through (or saw through) an area; nothing is there.
    ClearedArea { quad: Quad2 },
    GotOffCharger,
    EdgeInfo { closest_edge_mm: f32 },
}
