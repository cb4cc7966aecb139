//! Services the camera consumes from the surrounding world.
//!
//! The rig never owns geometry. It asks a [`CameraWorld`] for line-of-sight
//! probes, bounded candidate scans, and the current position of whatever it
//! is locked onto. [`StaticWorld`] is a small self-contained implementation
//! backed by sphere and box colliders.

mod static_world;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use static_world::{Collider, Shape, StaticWorld};

/// Opaque handle for a world entity (obstacle or lock candidate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Bit set of collision layers. Bit `n` set means layer `n` is included.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask matching no layer.
    pub const NONE: Self = Self(0);
    /// Mask matching every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing only `layer` (0..32). Out-of-range layers give
    /// [`LayerMask::NONE`].
    #[must_use]
    pub const fn layer(layer: u32) -> Self {
        if layer < 32 {
            Self(1 << layer)
        } else {
            Self::NONE
        }
    }

    /// Whether `layer` is part of this mask.
    #[must_use]
    pub const fn contains(self, layer: u32) -> bool {
        layer < 32 && self.0 & (1 << layer) != 0
    }

    /// Whether the two masks share any layer.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no layer is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Nearest obstruction reported by a line-of-sight probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// World-space hit point on the segment.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// Entity that was hit.
    pub entity: EntityId,
    /// Distance from the probe origin to `point`.
    pub distance: f32,
}

/// An entity returned by a candidate scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// The scanned entity.
    pub entity: EntityId,
    /// Its world position at scan time.
    pub position: Vec3,
}

/// Parameters for a bounded sphere scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereQuery {
    /// Sphere center.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: f32,
    /// Viewing direction at scan time. Services may use it for ordering;
    /// the selector applies its own cone test either way.
    pub direction: Vec3,
    /// Only entities on these layers are returned.
    pub mask: LayerMask,
    /// Upper bound on the number of results.
    pub capacity: usize,
}

/// Segment obstruction queries.
pub trait LineOfSight {
    /// Return the obstruction nearest to `from` on the segment `from → to`
    /// among colliders on `mask`, or `None` if the segment is clear.
    fn probe(&self, from: Vec3, to: Vec3, mask: LayerMask) -> Option<ProbeHit>;
}

/// Bounded proximity scans for lock-on candidates.
pub trait CandidateScan {
    /// Return at most `query.capacity` entities inside the query sphere, in
    /// a stable scan order.
    fn scan_sphere(&self, query: &SphereQuery) -> Vec<Candidate>;
}

/// Position lookup for entities the camera holds on to across ticks.
pub trait EntityLocator {
    /// Current world position of `entity`, or `None` if it no longer exists.
    fn position_of(&self, entity: EntityId) -> Option<Vec3>;
}

/// Everything the camera rig needs from the world.
pub trait CameraWorld: LineOfSight + CandidateScan + EntityLocator {}

impl<T: LineOfSight + CandidateScan + EntityLocator + ?Sized> CameraWorld
    for T
{
}

/// Whether the segment `from → to` is clear on `mask`, ignoring hits on
/// `ignore` (typically the entity being looked at).
pub fn has_line_of_sight<W: LineOfSight + ?Sized>(
    world: &W,
    from: Vec3,
    to: Vec3,
    mask: LayerMask,
    ignore: EntityId,
) -> bool {
    world
        .probe(from, to, mask)
        .is_none_or(|hit| hit.entity == ignore)
}
