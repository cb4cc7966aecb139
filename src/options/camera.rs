use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{PitchLimits, Projection};
use crate::error::CameraError;
use crate::util::easing::Easing;
use crate::world::LayerMask;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Follow, orbit, lock-on, and projection parameters. Fixed for the
/// lifetime of a rig.
pub struct CameraOptions {
    /// Height of the facing point above the subject position.
    #[schemars(title = "Height Offset", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub height_offset: f32,
    /// Distance from the facing point to the camera.
    #[schemars(title = "Orbit Radius", range(min = 1.0, max = 50.0), extend("step" = 0.5))]
    pub orbit_radius: f32,
    /// Lag of the facing point behind the subject (0 = none).
    #[schemars(title = "Follow Damping", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub facing_point_damping: f32,
    /// Lag of the camera position behind its destination (0 = none).
    #[schemars(title = "Movement Damping", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub movement_damping: f32,
    /// Pitch at activation, in degrees. Clamped into the pitch limits.
    #[schemars(skip)]
    pub initial_pitch: f32,
    /// Lowest pitch (looking up), in degrees.
    #[schemars(title = "Min Pitch", range(min = -89.0, max = 0.0), extend("step" = 1.0))]
    pub min_pitch: f32,
    /// Highest pitch (looking down), in degrees.
    #[schemars(title = "Max Pitch", range(min = 0.0, max = 89.0), extend("step" = 1.0))]
    pub max_pitch: f32,
    /// Pitch held while locked, in degrees.
    #[schemars(title = "Locked Pitch", range(min = -89.0, max = 89.0), extend("step" = 1.0))]
    pub locked_pitch: f32,
    /// Radius of the lock-on candidate scan and of lock validation.
    #[schemars(title = "Lock Range", range(min = 1.0, max = 200.0), extend("step" = 1.0))]
    pub lock_search_radius: f32,
    /// Half-angle of the lock-on cone, in degrees.
    #[schemars(title = "Lock Cone", range(min = 1.0, max = 180.0), extend("step" = 1.0))]
    pub lock_cone_half_angle: f32,
    /// Seconds a lost target is tolerated before the lock drops.
    #[schemars(title = "Lost Target Grace", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub lost_target_recovery: f32,
    /// Facing-blend progress per second after a lock transition.
    #[schemars(title = "Facing Adaption Rate", range(min = 0.05, max = 10.0), extend("step" = 0.05))]
    pub facing_adaption_rate: f32,
    /// Layers that obstruct the camera and line of sight.
    #[schemars(skip)]
    pub collision_mask: LayerMask,
    /// Layers holding lockable entities.
    #[schemars(skip)]
    pub lock_candidate_mask: LayerMask,
    /// Maximum candidates considered per lock scan.
    #[schemars(skip)]
    pub scan_capacity: usize,
    /// Simulation tick length in seconds.
    #[schemars(skip)]
    pub fixed_timestep: f32,
    /// Curve applied to the facing blend.
    #[schemars(skip)]
    pub facing_blend_easing: Easing,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            height_offset: 2.0,
            orbit_radius: 10.0,
            facing_point_damping: 0.2,
            movement_damping: 0.8,
            initial_pitch: 20.0,
            min_pitch: -30.0,
            max_pitch: 60.0,
            locked_pitch: 20.0,
            lock_search_radius: 50.0,
            lock_cone_half_angle: 90.0,
            lost_target_recovery: 2.0,
            facing_adaption_rate: 0.2,
            collision_mask: LayerMask::layer(0),
            lock_candidate_mask: LayerMask::layer(5),
            scan_capacity: 50,
            fixed_timestep: 1.0 / 50.0,
            facing_blend_easing: Easing::Linear,
            fovy: 60.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

impl CameraOptions {
    /// Pitch limits, validated.
    pub fn pitch_limits(&self) -> Result<PitchLimits, CameraError> {
        PitchLimits::new(self.min_pitch, self.max_pitch, self.locked_pitch)
    }

    /// Projection for a viewport with the given aspect ratio.
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Projection {
        Projection {
            fovy: self.fovy,
            aspect,
            znear: self.znear,
            zfar: self.zfar,
        }
    }

    /// Check ranges and orderings. Called by the rig builder.
    pub fn validate(&self) -> Result<(), CameraError> {
        let _ = self.pitch_limits()?;

        for (name, value) in [
            ("facing_point_damping", self.facing_point_damping),
            ("movement_damping", self.movement_damping),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!(
                    "{name} must be within [0, 1] (got {value})"
                )));
            }
        }

        for (name, value) in [
            ("orbit_radius", self.orbit_radius),
            ("lock_search_radius", self.lock_search_radius),
            ("fixed_timestep", self.fixed_timestep),
            ("facing_adaption_rate", self.facing_adaption_rate),
            ("fovy", self.fovy),
            ("znear", self.znear),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!(
                    "{name} must be positive (got {value})"
                )));
            }
        }

        if !(self.lost_target_recovery.is_finite()
            && self.lost_target_recovery >= 0.0)
        {
            return Err(invalid(format!(
                "lost_target_recovery must be non-negative (got {})",
                self.lost_target_recovery
            )));
        }
        if !(self.lock_cone_half_angle > 0.0
            && self.lock_cone_half_angle <= 180.0)
        {
            return Err(invalid(format!(
                "lock_cone_half_angle must be within (0, 180] (got {})",
                self.lock_cone_half_angle
            )));
        }
        if !self.height_offset.is_finite() || !self.initial_pitch.is_finite() {
            return Err(invalid(
                "height_offset and initial_pitch must be finite".to_owned(),
            ));
        }
        if self.zfar <= self.znear {
            return Err(invalid("zfar must be beyond znear".to_owned()));
        }
        if self.scan_capacity == 0 {
            return Err(invalid("scan_capacity must be at least 1".to_owned()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> CameraError {
    CameraError::InvalidConfig(msg)
}
