//! Orbit solver: where the camera wants to be before collision.
//!
//! Each render tick the solver re-derives yaw from the current camera
//! estimate (looking at the facing point, or at the lock target while
//! locked), applies turn input or the fixed locked pitch, and damps the
//! uncollided destination toward the point `radius` units behind the
//! facing point along that rotation.

use glam::Vec3;

use super::angles::{delta_angle_to_zero, Rotation};
use super::follow::damp_toward;
use super::input::TurnOffset;
use crate::error::CameraError;

/// Pitch magnitude at which the camera looks straight up or down.
const MAX_PITCH_MAGNITUDE: f32 = 90.0;

/// Pitch range and the fixed lean used while locked, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchLimits {
    /// Lowest allowed pitch (most upward lean).
    pub min: f32,
    /// Highest allowed pitch (most downward lean).
    pub max: f32,
    /// Pitch held while a lock target is set.
    pub locked: f32,
}

impl PitchLimits {
    /// Build limits, rejecting any ordering where the locked pitch is not
    /// reachable and any limit at or past vertical, where yaw is undefined.
    pub fn new(min: f32, max: f32, locked: f32) -> Result<Self, CameraError> {
        if ![min, max, locked].iter().all(|v| v.is_finite()) {
            return Err(CameraError::InvalidConfig(
                "pitch limits must be finite".to_owned(),
            ));
        }
        if min <= -MAX_PITCH_MAGNITUDE || max >= MAX_PITCH_MAGNITUDE {
            return Err(CameraError::InvalidConfig(format!(
                "pitch limits must lie strictly within \
                 (-{MAX_PITCH_MAGNITUDE}, {MAX_PITCH_MAGNITUDE}) \
                 (got [{min}, {max}])"
            )));
        }
        if !(min <= locked && locked <= max) {
            return Err(CameraError::InvalidConfig(format!(
                "pitch limits must satisfy min <= locked <= max \
                 (got {min} <= {locked} <= {max})"
            )));
        }
        Ok(Self { min, max, locked })
    }

    /// Wrap `pitch` to a signed angle and clamp it into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, pitch: f32) -> f32 {
        delta_angle_to_zero(pitch).clamp(self.min, self.max)
    }
}

/// Orbit state carried from one render tick to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    /// Target rotation. Pitch persists across ticks; yaw and roll are
    /// re-derived every tick.
    pub rotation: Rotation,
    /// Damped, uncollided camera position estimate.
    pub raw_destination: Vec3,
}

/// Computes the raw camera destination from the target rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSolver {
    radius: f32,
    movement_damping: f32,
    limits: PitchLimits,
}

impl OrbitSolver {
    /// Create a solver for the given orbit radius, movement damping in
    /// `[0, 1]`, and pitch limits.
    #[must_use]
    pub fn new(radius: f32, movement_damping: f32, limits: PitchLimits) -> Self {
        Self {
            radius,
            movement_damping,
            limits,
        }
    }

    /// Orbit radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Pitch limits.
    #[must_use]
    pub fn limits(&self) -> PitchLimits {
        self.limits
    }

    /// Undamped destination for `rotation` around `facing_point`.
    #[must_use]
    pub fn destination(&self, facing_point: Vec3, rotation: Rotation) -> Vec3 {
        facing_point + rotation.backward() * self.radius
    }

    /// Target rotation for this tick.
    ///
    /// Yaw and roll come from looking at `lock_target` (if any) or the
    /// facing point from the previous camera estimate; when the two points
    /// coincide the previous yaw and roll are kept.
    #[must_use]
    pub fn target_rotation(
        &self,
        previous: OrbitPose,
        facing_point: Vec3,
        lock_target: Option<Vec3>,
        offset: TurnOffset,
    ) -> Rotation {
        let aim = lock_target.unwrap_or(facing_point);
        let baseline = Rotation::look_at(previous.raw_destination, aim)
            .unwrap_or(previous.rotation);

        let mut rotation = Rotation {
            pitch: previous.rotation.pitch,
            yaw: baseline.yaw,
            roll: baseline.roll,
        };

        if lock_target.is_some() {
            rotation.pitch = self.limits.locked;
        } else {
            // Wrap before applying the delta: a pointer flick can exceed 180.
            rotation.pitch = (delta_angle_to_zero(rotation.pitch)
                - offset.vertical)
                .clamp(self.limits.min, self.limits.max);
            rotation.yaw += offset.horizontal;
        }

        rotation.yaw = delta_angle_to_zero(rotation.yaw);
        rotation
    }

    /// Advance the orbit one render tick.
    ///
    /// Free-look turn input swings the current estimate around the facing
    /// point immediately, keeping its arm length, so input is never eaten by
    /// position damping. The estimate then damps toward the destination.
    #[must_use]
    pub fn solve(
        &self,
        previous: OrbitPose,
        facing_point: Vec3,
        lock_target: Option<Vec3>,
        offset: TurnOffset,
        dt: f32,
    ) -> OrbitPose {
        let rotation =
            self.target_rotation(previous, facing_point, lock_target, offset);

        let mut raw = previous.raw_destination;
        if lock_target.is_none() && !offset.is_zero() {
            let arm = raw.distance(facing_point);
            raw = facing_point + rotation.backward() * arm;
        }

        let destination = self.destination(facing_point, rotation);
        OrbitPose {
            rotation,
            raw_destination: damp_toward(
                raw,
                destination,
                self.movement_damping,
                dt,
            ),
        }
    }
}
