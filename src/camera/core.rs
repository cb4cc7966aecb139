use glam::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};

use super::angles::Rotation;
use crate::world::EntityId;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Projection {
    /// Projection matrix. Uses a left-handed view space (the camera looks
    /// along its local +Z) with a `[0, 1]` depth range.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fovy: 60.0,
            aspect: 16.0 / 9.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }
}

/// Snapshot of what the rig published for the current frame.
///
/// Collaborators read this; none of them can write camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Collision-resolved camera position.
    pub position: Vec3,
    /// Published orientation (facing blend applied).
    pub orientation: Quat,
    /// Euler angles of `orientation`, in degrees.
    pub rotation: Rotation,
    /// Locked entity, if any.
    pub lock_target: Option<EntityId>,
}

impl CameraView {
    /// Heading around the world up axis, in degrees.
    ///
    /// Movement controllers rotate their local input by this angle.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.rotation.yaw
    }

    /// Whether a lock target is set.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock_target.is_some()
    }

    /// Unit forward vector.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    /// Convert local planar movement input (`x` right, `y` forward) into a
    /// world-space direction on the ground plane, relative to the camera
    /// heading.
    #[must_use]
    pub fn movement_direction(&self, local: Vec2) -> Vec3 {
        Quat::from_rotation_y(self.yaw().to_radians())
            * Vec3::new(local.x, 0.0, local.y)
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }

    /// Screen position of `world` in pixels (origin top-left), or `None`
    /// when the point is behind the camera.
    #[must_use]
    pub fn project_to_screen(
        &self,
        world: Vec3,
        projection: &Projection,
        viewport: Vec2,
    ) -> Option<Vec2> {
        let clip = projection.matrix()
            * self.view_matrix()
            * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }
}
