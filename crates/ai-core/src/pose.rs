//! Robot-frame poses and the geometry helpers the whiteboard matches with.
//!
//! Positions are millimetres, angles radians.  Every pose carries the
//! [`OriginId`] of the map frame it was observed in; two poses from different
//! origins are never considered "the same place".

use std::f32::consts::{FRAC_PI_4, PI};

use crate::ids::OriginId;

/// Angle threshold sentinel meaning "don't check rotation".
pub const ANY_ANGLE: f32 = PI;

/// Wrap an angle into `(-PI, PI]`.
pub fn normalize_angle(a: f32) -> f32 {
    let mut r = a % (2.0 * PI);
    if r <= -PI {
        r += 2.0 * PI;
    } else if r > PI {
        r -= 2.0 * PI;
    }
    r
}

// ── Pose3d ────────────────────────────────────────────────────────────────────

/// A 3-D pose: translation plus yaw (rotation about Z) and tilt (rotation away
/// from Z-up, used for flatness checks).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose3d {
    pub x:      f32,
    pub y:      f32,
    pub z:      f32,
    pub yaw:    f32,
    pub tilt:   f32,
    pub origin: OriginId,
}

impl Pose3d {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, yaw: f32, origin: OriginId) -> Self {
        Self { x, y, z, yaw, tilt: 0.0, origin }
    }

    /// Ground-level pose with zero rotation.
    #[inline]
    pub fn at(x: f32, y: f32, origin: OriginId) -> Self {
        Self::new(x, y, 0.0, 0.0, origin)
    }

    #[inline]
    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    /// Translate by `(dx, dy, dz)`, keeping rotation and origin.
    #[inline]
    pub fn shifted(mut self, dx: f32, dy: f32, dz: f32) -> Self {
        self.x += dx;
        self.y += dy;
        self.z += dz;
        self
    }

    /// Euclidean distance in millimetres.  Ignores origins.
    #[inline]
    pub fn distance_mm(&self, other: &Pose3d) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Distance projected on the ground plane.
    #[inline]
    pub fn distance_xy_mm(&self, other: &Pose3d) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Absolute yaw difference, wrapped into `[0, PI]`.
    #[inline]
    pub fn angular_distance(&self, other: &Pose3d) -> f32 {
        normalize_angle(self.yaw - other.yaw).abs()
    }

    #[inline]
    pub fn same_origin(&self, other: &Pose3d) -> bool {
        self.origin == other.origin
    }

    /// Same place within `dist_mm` and, unless `angle >= ANY_ANGLE`, same
    /// heading within `angle`.  Poses in different origins never match.
    pub fn is_same_as(&self, other: &Pose3d, dist_mm: f32, angle: f32) -> bool {
        self.same_origin(other)
            && self.distance_mm(other) <= dist_mm
            && (angle >= ANY_ANGLE || self.angular_distance(other) <= angle)
    }

    /// Tilt strictly under `tolerance` radians.
    #[inline]
    pub fn is_flat(&self, tolerance: f32) -> bool {
        self.tilt.abs() < tolerance
    }

    /// Upright means the top face is still closer to up than to sideways.
    #[inline]
    pub fn is_upright(&self) -> bool {
        self.tilt.abs() < FRAC_PI_4
    }
}

impl std::fmt::Display for Pose3d {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1}) yaw={:.2} @{}",
            self.x, self.y, self.z, self.yaw, self.origin
        )
    }
}

// ── Quad2 ─────────────────────────────────────────────────────────────────────

/// Convex ground-plane quadrilateral, corners in either winding order.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quad2 {
    pub corners: [[f32; 2]; 4],
    pub origin:  OriginId,
}

impl Quad2 {
    pub fn new(corners: [[f32; 2]; 4], origin: OriginId) -> Self {
        Self { corners, origin }
    }

    /// Axis-aligned rectangle from two opposite corners.
    pub fn rect(min: [f32; 2], max: [f32; 2], origin: OriginId) -> Self {
        Self::new(
            [[min[0], min[1]], [max[0], min[1]], [max[0], max[1]], [min[0], max[1]]],
            origin,
        )
    }

    /// Inclusive point-in-quad test on the pose's XY projection.  A pose in a
    /// different origin is never contained.
    pub fn contains(&self, pose: &Pose3d) -> bool {
        if pose.origin != self.origin {
            return false;
        }
        let (px, py) = (pose.x, pose.y);
        let mut sign = 0.0f32;
        for i in 0..4 {
            let [ax, ay] = self.corners[i];
            let [bx, by] = self.corners[(i + 1) % 4];
            let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
            if cross == 0.0 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }
}
