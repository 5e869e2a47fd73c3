use serde::Deserialize;

/// Goal to request when the robot is put down, by what it sees.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PutDownDispatch {
    pub face_and_cube: Option<String>,
    pub face_only:     Option<String>,
    pub cube_only:     Option<String>,
    pub neither:       Option<String>,
}

impl PutDownDispatch {
    pub fn goal_for(&self, sees_face: bool, sees_cube: bool) -> Option<&str> {
        let slot = match (sees_face, sees_cube) {
            (true, true)   => &self.face_and_cube,
            (true, false)  => &self.face_only,
            (false, true)  => &self.cube_only,
            (false, false) => &self.neither,
        };
        slot.as_deref()
    }
}
