//! Screen-space lock-on marker.

use glam::{Vec2, Vec3};

use super::core::{CameraView, Projection};
use super::lock::LockChange;
use crate::world::{EntityId, EntityLocator};

/// Tracks the locked entity from [`LockChange`] notifications and projects
/// it to the screen every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LockIndicator {
    projection: Projection,
    target: Option<EntityId>,
    last_known: Option<Vec3>,
    screen: Option<Vec2>,
}

impl LockIndicator {
    /// Hidden indicator using `projection` for screen mapping.
    #[must_use]
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            target: None,
            last_known: None,
            screen: None,
        }
    }

    /// Apply a lock notification.
    pub fn on_lock_change(&mut self, change: LockChange) {
        self.target = change.target();
        self.last_known = None;
        self.screen = None;
    }

    /// Entity the indicator is following.
    #[must_use]
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Whether the marker should be drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.screen.is_some()
    }

    /// Marker position from the last update.
    #[must_use]
    pub fn screen_position(&self) -> Option<Vec2> {
        self.screen
    }

    /// Reposition the marker for this frame. Returns the marker position,
    /// or `None` when nothing is locked or the target is behind the camera.
    pub fn update<W: EntityLocator + ?Sized>(
        &mut self,
        view: &CameraView,
        world: &W,
        viewport: Vec2,
    ) -> Option<Vec2> {
        let target = self.target?;
        if let Some(position) = world.position_of(target) {
            self.last_known = Some(position);
        }
        self.screen = self.last_known.and_then(|position| {
            view.project_to_screen(position, &self.projection, viewport)
        });
        self.screen
    }
}
