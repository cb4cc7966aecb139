//! Euler-angle camera rotation in degrees.
//!
//! Convention: Y is up, an unrotated camera looks along +Z, positive pitch
//! leans the view downward. Rotations compose yaw, then pitch, then roll
//! (`EulerRot::YXZ`).

use glam::{EulerRot, Quat, Vec3};

/// Signed difference from 0° to `angle`, wrapped into `(-180, 180]`.
///
/// Every pitch clamp goes through this first so that 350° compares as -10°
/// rather than as a large positive angle. Non-finite input maps to 0.
#[must_use]
pub fn delta_angle_to_zero(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Pitch/yaw/roll in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    /// Lean around the local right axis (positive looks down).
    pub pitch: f32,
    /// Heading around the world up axis.
    pub yaw: f32,
    /// Twist around the local forward axis.
    pub roll: f32,
}

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Construct from degrees.
    #[must_use]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Rotation that looks from `eye` toward `target` with world up, or
    /// `None` when the two points coincide.
    #[must_use]
    pub fn look_at(eye: Vec3, target: Vec3) -> Option<Self> {
        Self::from_direction(target - eye)
    }

    /// Rotation whose forward axis is `direction`, or `None` for a zero
    /// vector. Roll is always zero.
    #[must_use]
    pub fn from_direction(direction: Vec3) -> Option<Self> {
        let dir = direction.try_normalize()?;
        let yaw = dir.x.atan2(dir.z).to_degrees();
        let pitch = (-dir.y).clamp(-1.0, 1.0).asin().to_degrees();
        Some(Self::new(pitch, yaw, 0.0))
    }

    /// Recover Euler angles from a quaternion.
    #[must_use]
    pub fn from_quat(rotation: Quat) -> Self {
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        Self::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
    }

    /// Quaternion for this rotation.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Unit forward vector.
    #[must_use]
    pub fn forward(self) -> Vec3 {
        self.to_quat() * Vec3::Z
    }

    /// Unit backward vector (the orbit arm direction).
    #[must_use]
    pub fn backward(self) -> Vec3 {
        self.to_quat() * Vec3::NEG_Z
    }

    /// Copy with every component wrapped into `(-180, 180]`.
    #[must_use]
    pub fn wrapped(self) -> Self {
        Self::new(
            delta_angle_to_zero(self.pitch),
            delta_angle_to_zero(self.yaw),
            delta_angle_to_zero(self.roll),
        )
    }
}
