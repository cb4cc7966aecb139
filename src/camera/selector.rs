//! Lock-on target selection.

use glam::Vec3;

use crate::world::{
    has_line_of_sight, CandidateScan, EntityId, LayerMask, LineOfSight,
    SphereQuery,
};

/// Parameters for picking a lock-on target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetLockSelector {
    /// Scan radius around the subject.
    pub search_radius: f32,
    /// Half-angle of the forward cone, in degrees.
    pub cone_half_angle: f32,
    /// Layers that hold lockable entities.
    pub candidate_mask: LayerMask,
    /// Layers that block line of sight.
    pub collision_mask: LayerMask,
    /// Maximum number of scan results considered.
    pub capacity: usize,
}

/// Where the selection is made from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOrigin {
    /// Subject position (scan center and distance reference).
    pub subject: Vec3,
    /// Camera position (line-of-sight origin).
    pub camera: Vec3,
    /// Camera forward direction (cone axis).
    pub forward: Vec3,
}

/// A chosen lock target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockCandidate {
    /// The entity to lock onto.
    pub entity: EntityId,
    /// Its position at selection time.
    pub position: Vec3,
}

impl TargetLockSelector {
    /// Nearest candidate to the subject that lies inside the forward cone
    /// and is visible from the camera. Ties keep the first one scanned.
    #[must_use]
    pub fn select<W>(
        &self,
        world: &W,
        origin: SelectionOrigin,
    ) -> Option<LockCandidate>
    where
        W: CandidateScan + LineOfSight + ?Sized,
    {
        let query = SphereQuery {
            center: origin.subject,
            radius: self.search_radius,
            direction: origin.forward,
            mask: self.candidate_mask,
            capacity: self.capacity,
        };

        let mut best: Option<(LockCandidate, f32)> = None;
        for candidate in world.scan_sphere(&query).into_iter().take(self.capacity)
        {
            if !self.in_cone(origin, candidate.position) {
                continue;
            }
            if !self.collision_mask.is_empty()
                && !has_line_of_sight(
                    world,
                    origin.camera,
                    candidate.position,
                    self.collision_mask,
                    candidate.entity,
                )
            {
                continue;
            }

            let distance = origin.subject.distance(candidate.position);
            if best.is_none_or(|(_, closest)| distance < closest) {
                best = Some((
                    LockCandidate {
                        entity: candidate.entity,
                        position: candidate.position,
                    },
                    distance,
                ));
            }
        }

        best.map(|(candidate, _)| candidate)
    }

    /// Whether `position` lies within the cone around the camera forward
    /// axis, measured from the subject.
    fn in_cone(&self, origin: SelectionOrigin, position: Vec3) -> bool {
        let Some(forward) = origin.forward.try_normalize() else {
            return false;
        };
        let Some(to_target) = (position - origin.subject).try_normalize()
        else {
            // Standing on the candidate: direction is undefined, accept it.
            return true;
        };
        let angle = forward.dot(to_target).clamp(-1.0, 1.0).acos().to_degrees();
        angle <= self.cone_half_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Collider, StaticWorld};

    const WALLS: u32 = 0;
    const ENEMIES: u32 = 5;

    fn selector() -> TargetLockSelector {
        TargetLockSelector {
            search_radius: 50.0,
            cone_half_angle: 90.0,
            candidate_mask: LayerMask::layer(ENEMIES),
            collision_mask: LayerMask::layer(WALLS),
            capacity: 50,
        }
    }

    fn origin() -> SelectionOrigin {
        SelectionOrigin {
            subject: Vec3::ZERO,
            camera: Vec3::new(0.0, 2.0, -10.0),
            forward: Vec3::Z,
        }
    }

    #[test]
    fn empty_world_selects_nothing() {
        assert!(selector().select(&StaticWorld::new(), origin()).is_none());
    }

    #[test]
    fn picks_nearest_visible_candidate_in_front() {
        let mut world = StaticWorld::new();
        let _behind = world.add_point(Vec3::new(0.0, 0.0, -3.0), ENEMIES);
        let far = world.add_point(Vec3::new(0.0, 0.0, 20.0), ENEMIES);
        let near = world.add_point(Vec3::new(4.0, 0.0, 8.0), ENEMIES);

        let picked = selector().select(&world, origin()).unwrap();
        assert_eq!(picked.entity, near);
        assert_ne!(picked.entity, far);
        assert_eq!(picked.position, Vec3::new(4.0, 0.0, 8.0));
    }

    #[test]
    fn occluded_candidates_are_skipped() {
        let mut world = StaticWorld::new();
        let hidden = world.add_point(Vec3::new(0.0, 0.0, 8.0), ENEMIES);
        let visible = world.add_point(Vec3::new(-20.0, 0.0, 20.0), ENEMIES);
        let _wall = world.add_collider(
            Collider::cuboid(Vec3::new(0.0, 1.0, 4.0), Vec3::new(2.0, 3.0, 0.5)),
            WALLS,
        );

        let picked = selector().select(&world, origin()).unwrap();
        assert_ne!(picked.entity, hidden);
        assert_eq!(picked.entity, visible);
    }

    #[test]
    fn candidate_own_collider_does_not_occlude_it() {
        let mut world = StaticWorld::new();
        let enemy = world.add_collider(
            Collider::sphere(Vec3::new(0.0, 0.0, 10.0), 1.0),
            ENEMIES,
        );
        let mut sel = selector();
        sel.collision_mask = LayerMask(LayerMask::layer(WALLS).0 | LayerMask::layer(ENEMIES).0);
        assert_eq!(sel.select(&world, origin()).unwrap().entity, enemy);
    }

    #[test]
    fn narrow_cone_rejects_off_axis() {
        let mut world = StaticWorld::new();
        let _side = world.add_point(Vec3::new(10.0, 0.0, 2.0), ENEMIES);
        let ahead = world.add_point(Vec3::new(1.0, 0.0, 30.0), ENEMIES);
        let mut sel = selector();
        sel.cone_half_angle = 20.0;
        assert_eq!(sel.select(&world, origin()).unwrap().entity, ahead);
    }

    #[test]
    fn equal_distance_keeps_first_scanned() {
        let mut world = StaticWorld::new();
        let first = world.add_point(Vec3::new(5.0, 0.0, 5.0), ENEMIES);
        let _second = world.add_point(Vec3::new(-5.0, 0.0, 5.0), ENEMIES);
        assert_eq!(selector().select(&world, origin()).unwrap().entity, first);
    }

    #[test]
    fn out_of_radius_is_ignored() {
        let mut world = StaticWorld::new();
        let _far = world.add_point(Vec3::new(0.0, 0.0, 60.0), ENEMIES);
        assert!(selector().select(&world, origin()).is_none());
    }
}
