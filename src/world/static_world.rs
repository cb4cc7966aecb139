use glam::Vec3;
use rustc_hash::FxHashMap;

use super::{
    Candidate, CandidateScan, EntityId, EntityLocator, LayerMask, LineOfSight,
    ProbeHit, SphereQuery,
};

/// Collision shape, centered on its entity's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Sphere with the given radius.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
    /// Axis-aligned box with the given half extents.
    Cuboid {
        /// Half size along each axis.
        half_extents: Vec3,
    },
}

/// A positioned collision shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// World-space center.
    pub center: Vec3,
    /// Shape around the center.
    pub shape: Shape,
}

impl Collider {
    /// Sphere collider.
    #[must_use]
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            shape: Shape::Sphere { radius },
        }
    }

    /// Axis-aligned box collider.
    #[must_use]
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            shape: Shape::Cuboid {
                half_extents: half_extents.abs(),
            },
        }
    }

    /// Entry distance fraction `t ∈ [0, 1]` and normal where the segment
    /// `from → from + delta` first enters this collider. Segments starting
    /// inside the collider never hit it.
    fn intersect(&self, from: Vec3, delta: Vec3) -> Option<(f32, Vec3)> {
        match self.shape {
            Shape::Sphere { radius } => {
                intersect_sphere(self.center, radius, from, delta)
            }
            Shape::Cuboid { half_extents } => intersect_cuboid(
                self.center - half_extents,
                self.center + half_extents,
                from,
                delta,
            ),
        }
    }
}

fn intersect_sphere(
    center: Vec3,
    radius: f32,
    from: Vec3,
    delta: Vec3,
) -> Option<(f32, Vec3)> {
    let a = delta.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let m = from - center;
    let c = m.length_squared() - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = m.dot(delta);
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / a;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    let normal = (from + delta * t - center).normalize_or_zero();
    Some((t, normal))
}

fn intersect_cuboid(
    min: Vec3,
    max: Vec3,
    from: Vec3,
    delta: Vec3,
) -> Option<(f32, Vec3)> {
    if from.cmpge(min).all() && from.cmple(max).all() {
        return None;
    }

    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let (o, d, lo, hi) = (from[axis], delta[axis], min[axis], max[axis]);
        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
        let mut sign = -1.0;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
            sign = 1.0;
        }
        if t0 > t_enter {
            t_enter = t0;
            normal = Vec3::ZERO;
            normal[axis] = sign;
        }
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }

    Some((t_enter, normal))
}

#[derive(Debug, Clone)]
struct Entry {
    entity: EntityId,
    position: Vec3,
    layer: u32,
    shape: Option<Shape>,
}

impl Entry {
    fn collider(&self) -> Option<Collider> {
        self.shape.map(|shape| Collider {
            center: self.position,
            shape,
        })
    }
}

/// In-memory world of colliders and point entities.
///
/// Entities keep insertion order, which is also the scan order reported to
/// the lock selector.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    entries: Vec<Entry>,
    index: FxHashMap<EntityId, usize>,
    next_id: u64,
}

impl StaticWorld {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid entity on `layer`. Its position is the collider center.
    pub fn add_collider(&mut self, collider: Collider, layer: u32) -> EntityId {
        self.insert(collider.center, layer, Some(collider.shape))
    }

    /// Add a point entity without collision on `layer`.
    pub fn add_point(&mut self, position: Vec3, layer: u32) -> EntityId {
        self.insert(position, layer, None)
    }

    /// Move an entity. Returns `false` if it does not exist.
    pub fn set_position(&mut self, entity: EntityId, position: Vec3) -> bool {
        match self.index.get(&entity) {
            Some(&slot) => {
                self.entries[slot].position = position;
                true
            }
            None => false,
        }
    }

    /// Remove an entity. Returns `false` if it does not exist.
    pub fn remove(&mut self, entity: EntityId) -> bool {
        let Some(slot) = self.index.remove(&entity) else {
            return false;
        };
        let _ = self.entries.remove(slot);
        for (i, entry) in self.entries.iter().enumerate().skip(slot) {
            let _ = self.index.insert(entry.entity, i);
        }
        true
    }

    /// Number of entities in the world.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the world holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(
        &mut self,
        position: Vec3,
        layer: u32,
        shape: Option<Shape>,
    ) -> EntityId {
        let entity = EntityId(self.next_id);
        self.next_id += 1;
        let _ = self.index.insert(entity, self.entries.len());
        self.entries.push(Entry {
            entity,
            position,
            layer,
            shape,
        });
        entity
    }
}

impl LineOfSight for StaticWorld {
    fn probe(&self, from: Vec3, to: Vec3, mask: LayerMask) -> Option<ProbeHit> {
        let delta = to - from;
        let length = delta.length();

        self.entries
            .iter()
            .filter(|entry| mask.contains(entry.layer))
            .filter_map(|entry| {
                let (t, normal) = entry.collider()?.intersect(from, delta)?;
                Some(ProbeHit {
                    point: from + delta * t,
                    normal,
                    entity: entry.entity,
                    distance: length * t,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl CandidateScan for StaticWorld {
    fn scan_sphere(&self, query: &SphereQuery) -> Vec<Candidate> {
        let radius_sq = query.radius * query.radius;
        self.entries
            .iter()
            .filter(|entry| query.mask.contains(entry.layer))
            .filter(|entry| {
                entry.position.distance_squared(query.center) <= radius_sq
            })
            .take(query.capacity)
            .map(|entry| Candidate {
                entity: entry.entity,
                position: entry.position,
            })
            .collect()
    }
}

impl EntityLocator for StaticWorld {
    fn position_of(&self, entity: EntityId) -> Option<Vec3> {
        self.index
            .get(&entity)
            .map(|&slot| self.entries[slot].position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALL_LAYER: u32 = 0;
    const ENEMY_LAYER: u32 = 3;

    fn query(center: Vec3, radius: f32, capacity: usize) -> SphereQuery {
        SphereQuery {
            center,
            radius,
            direction: Vec3::Z,
            mask: LayerMask::layer(ENEMY_LAYER),
            capacity,
        }
    }

    #[test]
    fn probe_reports_nearest_hit() {
        let mut world = StaticWorld::new();
        let far = world
            .add_collider(Collider::sphere(Vec3::new(0.0, 0.0, 8.0), 1.0), 0);
        let near = world
            .add_collider(Collider::sphere(Vec3::new(0.0, 0.0, 4.0), 1.0), 0);

        let hit = world
            .probe(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), LayerMask::ALL)
            .unwrap();
        assert_eq!(hit.entity, near);
        assert_ne!(hit.entity, far);
        assert!((hit.point.z - 3.0).abs() < 1e-4);
        assert!((hit.distance - 3.0).abs() < 1e-4);
        assert!((hit.normal - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn probe_respects_mask_and_segment_length() {
        let mut world = StaticWorld::new();
        let _ = world.add_collider(
            Collider::cuboid(Vec3::new(0.0, 0.0, 5.0), Vec3::splat(1.0)),
            WALL_LAYER,
        );

        let to = Vec3::new(0.0, 0.0, 10.0);
        assert!(world.probe(Vec3::ZERO, to, LayerMask::layer(1)).is_none());
        assert!(world
            .probe(Vec3::ZERO, Vec3::new(0.0, 0.0, 3.0), LayerMask::ALL)
            .is_none());

        let hit = world.probe(Vec3::ZERO, to, LayerMask::ALL).unwrap();
        assert!((hit.point.z - 4.0).abs() < 1e-4);
        assert_eq!(hit.normal, Vec3::NEG_Z);
    }

    #[test]
    fn probe_starting_inside_collider_is_clear() {
        let mut world = StaticWorld::new();
        let _ = world.add_collider(Collider::sphere(Vec3::ZERO, 2.0), 0);
        let _ = world
            .add_collider(Collider::cuboid(Vec3::ZERO, Vec3::splat(2.0)), 0);
        assert!(world
            .probe(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), LayerMask::ALL)
            .is_none());
    }

    #[test]
    fn probe_misses_offset_box() {
        let mut world = StaticWorld::new();
        let _ = world.add_collider(
            Collider::cuboid(Vec3::new(5.0, 0.0, 5.0), Vec3::splat(1.0)),
            0,
        );
        assert!(world
            .probe(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), LayerMask::ALL)
            .is_none());
    }

    #[test]
    fn scan_filters_by_layer_and_radius_in_insertion_order() {
        let mut world = StaticWorld::new();
        let a = world.add_point(Vec3::new(0.0, 0.0, 5.0), ENEMY_LAYER);
        let _wall = world.add_point(Vec3::new(0.0, 0.0, 2.0), WALL_LAYER);
        let _far = world.add_point(Vec3::new(0.0, 0.0, 80.0), ENEMY_LAYER);
        let b = world.add_point(Vec3::new(3.0, 0.0, 0.0), ENEMY_LAYER);

        let found = world.scan_sphere(&query(Vec3::ZERO, 50.0, 50));
        let ids: Vec<_> = found.iter().map(|c| c.entity).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn scan_is_bounded_by_capacity() {
        let mut world = StaticWorld::new();
        for i in 0..10 {
            let _ = world.add_point(Vec3::new(i as f32, 0.0, 0.0), ENEMY_LAYER);
        }
        assert_eq!(world.scan_sphere(&query(Vec3::ZERO, 50.0, 4)).len(), 4);
    }

    #[test]
    fn locator_tracks_moves_and_removals() {
        let mut world = StaticWorld::new();
        let a = world.add_point(Vec3::ONE, ENEMY_LAYER);
        let b = world.add_point(Vec3::ZERO, ENEMY_LAYER);
        assert!(world.set_position(a, Vec3::X));
        assert_eq!(world.position_of(a), Some(Vec3::X));

        assert!(world.remove(a));
        assert!(!world.remove(a));
        assert_eq!(world.position_of(a), None);
        assert_eq!(world.position_of(b), Some(Vec3::ZERO));
        assert_eq!(world.len(), 1);
        assert!(!world.set_position(a, Vec3::ONE));
    }
}
