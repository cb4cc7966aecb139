//! Lagged follow point.
//!
//! The camera orbits and looks at a point that trails the subject's anchor
//! (position plus height offset). The same exponential approach law is
//! reused by the orbit solver for camera position damping.

use glam::Vec3;

/// Rate scale of the damping law. With damping 0.9 a 60 Hz frame closes
/// about 1.7% of the remaining gap, which reads as a gentle trail.
pub const DAMPING_RATE: f32 = 10.0;

/// Interpolation fraction for one frame of the damping law, in `[0, 1]`.
///
/// `fraction = (1 - damping) * dt * DAMPING_RATE`, clamped so a long frame
/// can land on the target but never overshoot it.
#[must_use]
pub fn damping_fraction(damping: f32, dt: f32) -> f32 {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    ((1.0 - damping.clamp(0.0, 1.0)) * dt * DAMPING_RATE).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by one frame of the damping law.
/// Zero damping snaps exactly.
#[must_use]
pub fn damp_toward(current: Vec3, target: Vec3, damping: f32, dt: f32) -> Vec3 {
    if damping == 0.0 {
        return target;
    }
    current.lerp(target, damping_fraction(damping, dt))
}

/// Tracks the damped facing point behind a moving subject.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowPointTracker {
    /// Undamped anchor from the most recent update.
    origin: Vec3,
    /// Damped point the camera orbits around.
    facing: Vec3,
    /// Vertical offset added to the subject position.
    height_offset: f32,
    /// Damping factor in `[0, 1]`; 0 means no lag.
    damping: f32,
}

impl FollowPointTracker {
    /// Start snapped to the anchor of `subject_position`.
    #[must_use]
    pub fn new(subject_position: Vec3, height_offset: f32, damping: f32) -> Self {
        let origin = subject_position + Vec3::Y * height_offset;
        Self {
            origin,
            facing: origin,
            height_offset,
            damping,
        }
    }

    /// Anchor point for a subject position.
    #[must_use]
    pub fn anchor_for(&self, subject_position: Vec3) -> Vec3 {
        subject_position + Vec3::Y * self.height_offset
    }

    /// Advance the facing point one render frame and return it.
    pub fn update(&mut self, subject_position: Vec3, dt: f32) -> Vec3 {
        self.origin = self.anchor_for(subject_position);
        self.facing = damp_toward(self.facing, self.origin, self.damping, dt);
        self.facing
    }

    /// Undamped anchor (subject position plus height offset).
    #[must_use]
    pub fn origin_point(&self) -> Vec3 {
        self.origin
    }

    /// Damped point the camera orbits and looks at.
    #[must_use]
    pub fn facing_point(&self) -> Vec3 {
        self.facing
    }
}
