//! Line-of-sight clamp between the facing point and the camera.

use glam::Vec3;

use crate::world::{LayerMask, LineOfSight, ProbeHit};

/// Outcome of a collision probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Collision-safe camera position.
    pub position: Vec3,
    /// Obstruction that pulled the camera in, if any.
    pub hit: Option<ProbeHit>,
}

impl Resolved {
    fn clear(position: Vec3) -> Self {
        Self {
            position,
            hit: None,
        }
    }
}

/// Pulls the camera in front of the first obstruction between the facing
/// point and its desired position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResolver {
    mask: LayerMask,
}

impl CollisionResolver {
    /// Resolver probing colliders on `mask`.
    #[must_use]
    pub fn new(mask: LayerMask) -> Self {
        Self { mask }
    }

    /// Collision mask used for probes.
    #[must_use]
    pub fn mask(&self) -> LayerMask {
        self.mask
    }

    /// Collision-safe position for a camera that wants to sit at
    /// `destination` while looking at `facing_point`.
    ///
    /// The position is the first hit on the segment, or `destination` when
    /// the segment is clear. Hits past `destination` are ignored, so the
    /// result is never farther from the facing point than `destination`.
    #[must_use]
    pub fn resolve<W: LineOfSight + ?Sized>(
        &self,
        world: &W,
        facing_point: Vec3,
        destination: Vec3,
    ) -> Resolved {
        if self.mask.is_empty() {
            return Resolved::clear(destination);
        }

        match world.probe(facing_point, destination, self.mask) {
            Some(hit) if hit.point.is_finite() => {
                let max = facing_point.distance(destination);
                if (hit.point - facing_point).length() > max {
                    return Resolved::clear(destination);
                }
                log::trace!("camera probe hit {:?} at {}", hit.entity, hit.point);
                Resolved {
                    position: hit.point,
                    hit: Some(hit),
                }
            }
            _ => Resolved::clear(destination),
        }
    }
}
