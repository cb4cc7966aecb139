//! Lock-on state machine.
//!
//! ```text
//!   FreeLook ──toggle (candidate found)──▶ Locked
//!      ▲                                   │  ▲
//!      │                     validation    │  │ validation
//!      │                       fails       ▼  │ succeeds
//!      └──toggle / timer expires──── LockRecovering
//! ```
//!
//! Validation runs on the fixed simulation tick so the recovery window does
//! not depend on render frame rate. Every transition starts a facing blend
//! that eases the published orientation from where it was to where the new
//! mode wants it.

use glam::{Quat, Vec3};

use super::selector::LockCandidate;
use crate::util::easing::Easing;
use crate::world::{
    has_line_of_sight, EntityId, EntityLocator, LayerMask, LineOfSight,
};

/// Coarse lock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockState {
    /// No lock target; turn input drives the orbit.
    FreeLook,
    /// Locked and the target currently validates.
    Locked,
    /// Locked, but the target failed validation and the recovery timer runs.
    LockRecovering,
}

/// One-shot notification emitted on every lock transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockChange {
    /// A new target was locked.
    Acquired(EntityId),
    /// The lock was dropped (manually or by the recovery timer).
    Released,
}

impl LockChange {
    /// The newly locked entity, or `None` for a release.
    #[must_use]
    pub fn target(self) -> Option<EntityId> {
        match self {
            Self::Acquired(entity) => Some(entity),
            Self::Released => None,
        }
    }
}

/// Timed orientation smoothing after a lock transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacingBlend {
    /// Linear progress; the blend ends once this reaches 1.
    pub elapsed: f32,
    /// Published orientation at the moment of the transition.
    pub origin: Quat,
}

/// The entity currently locked and where it was last seen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockTarget {
    /// Locked entity.
    pub entity: EntityId,
    /// Last known position; kept when the entity cannot be located.
    pub position: Vec3,
}

/// Tuning for [`LockStateMachine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockSettings {
    /// Maximum subject-to-target distance before validation fails.
    pub max_distance: f32,
    /// Seconds a failing target is tolerated before release.
    pub recovery_duration: f32,
    /// Facing-blend progress per second.
    pub adaption_rate: f32,
    /// Curve applied to the blend fraction.
    pub easing: Easing,
    /// Layers that block line of sight to the target.
    pub collision_mask: LayerMask,
}

/// Owns lock/unlock transitions, the recovery timer, and the facing blend.
#[derive(Debug, Clone, PartialEq)]
pub struct LockStateMachine {
    settings: LockSettings,
    target: Option<LockTarget>,
    lost_timer: Option<f32>,
    blend: Option<FacingBlend>,
}

impl LockStateMachine {
    /// Start in free-look with no blend running.
    #[must_use]
    pub fn new(settings: LockSettings) -> Self {
        Self {
            settings,
            target: None,
            lost_timer: None,
            blend: None,
        }
    }

    /// Current coarse state.
    #[must_use]
    pub fn state(&self) -> LockState {
        match (self.target, self.lost_timer) {
            (None, _) => LockState::FreeLook,
            (Some(_), None) => LockState::Locked,
            (Some(_), Some(_)) => LockState::LockRecovering,
        }
    }

    /// Locked target, if any.
    #[must_use]
    pub fn target(&self) -> Option<LockTarget> {
        self.target
    }

    /// Remaining recovery time while the target is failing validation.
    #[must_use]
    pub fn lost_timer(&self) -> Option<f32> {
        self.lost_timer
    }

    /// Facing blend in progress, if any.
    #[must_use]
    pub fn facing_blend(&self) -> Option<FacingBlend> {
        self.blend
    }

    /// Tuning in use.
    #[must_use]
    pub fn settings(&self) -> LockSettings {
        self.settings
    }

    /// Lock onto `candidate`, restarting the facing blend from `current`.
    pub fn acquire(&mut self, candidate: LockCandidate, current: Quat) -> LockChange {
        log::debug!("camera locked onto {:?}", candidate.entity);
        self.target = Some(LockTarget {
            entity: candidate.entity,
            position: candidate.position,
        });
        self.lost_timer = None;
        self.start_blend(current);
        LockChange::Acquired(candidate.entity)
    }

    /// Drop the lock, restarting the facing blend from `current`.
    ///
    /// Returns `None` when nothing was locked.
    pub fn release(&mut self, current: Quat) -> Option<LockChange> {
        let target = self.target.take()?;
        log::debug!("camera released lock on {:?}", target.entity);
        self.lost_timer = None;
        self.start_blend(current);
        Some(LockChange::Released)
    }

    /// Refresh the target position from the world. Returns the position the
    /// orbit should aim at this tick.
    pub fn track<W: EntityLocator + ?Sized>(&mut self, world: &W) -> Option<Vec3> {
        let target = self.target.as_mut()?;
        if let Some(position) = world.position_of(target.entity) {
            target.position = position;
        }
        Some(target.position)
    }

    /// Fixed-tick validation.
    ///
    /// The target must exist, be within `max_distance` of `subject`, and be
    /// visible from `camera`. A failure starts (or continues) the recovery
    /// countdown; a success clears it outright. When the countdown runs out
    /// the lock is released exactly as a manual toggle would, with the blend
    /// starting from `current`.
    pub fn fixed_update<W>(
        &mut self,
        world: &W,
        subject: Vec3,
        camera: Vec3,
        fixed_dt: f32,
        current: Quat,
    ) -> Option<LockChange>
    where
        W: EntityLocator + LineOfSight + ?Sized,
    {
        let target = self.target?;

        if self.target_is_valid(world, target.entity, subject, camera) {
            if self.lost_timer.take().is_some() {
                log::debug!("camera lock on {:?} recovered", target.entity);
            }
            return None;
        }

        let dt = if fixed_dt.is_finite() { fixed_dt.max(0.0) } else { 0.0 };
        let remaining = self
            .lost_timer
            .unwrap_or(self.settings.recovery_duration)
            - dt;

        if remaining > 0.0 {
            if self.lost_timer.is_none() {
                log::debug!("camera lost sight of {:?}", target.entity);
            }
            self.lost_timer = Some(remaining);
            None
        } else {
            log::debug!("camera lock on {:?} timed out", target.entity);
            self.release(current)
        }
    }

    /// Advance the facing blend one render frame and return the orientation
    /// to publish.
    ///
    /// Without a blend running this is `computed` unchanged. The blend clears
    /// itself on the first frame its progress reaches 1.
    pub fn blend(&mut self, computed: Quat, dt: f32) -> Quat {
        let Some(blend) = self.blend.as_mut() else {
            return computed;
        };

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        blend.elapsed += dt * self.settings.adaption_rate;

        if blend.elapsed >= 1.0 {
            log::debug!("camera facing blend complete");
            self.blend = None;
            return computed;
        }

        let t = self.settings.easing.evaluate(blend.elapsed.min(1.0));
        blend.origin.slerp(computed, t)
    }

    fn start_blend(&mut self, current: Quat) {
        self.blend = Some(FacingBlend {
            elapsed: 0.0,
            origin: current,
        });
    }

    fn target_is_valid<W>(
        &self,
        world: &W,
        entity: EntityId,
        subject: Vec3,
        camera: Vec3,
    ) -> bool
    where
        W: EntityLocator + LineOfSight + ?Sized,
    {
        let Some(position) = world.position_of(entity) else {
            return false;
        };
        if subject.distance(position) > self.settings.max_distance {
            return false;
        }
        self.settings.collision_mask.is_empty()
            || has_line_of_sight(
                world,
                camera,
                position,
                self.settings.collision_mask,
                entity,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Collider, StaticWorld};

    const WALLS: u32 = 0;
    const ENEMIES: u32 = 5;

    fn settings() -> LockSettings {
        LockSettings {
            max_distance: 50.0,
            recovery_duration: 2.0,
            adaption_rate: 2.0,
            easing: Easing::Linear,
            collision_mask: LayerMask::layer(WALLS),
        }
    }

    fn locked_on(world: &mut StaticWorld, at: Vec3) -> (LockStateMachine, EntityId) {
        let entity = world.add_point(at, ENEMIES);
        let mut machine = LockStateMachine::new(settings());
        let change = machine.acquire(
            LockCandidate {
                entity,
                position: at,
            },
            Quat::IDENTITY,
        );
        assert_eq!(change, LockChange::Acquired(entity));
        (machine, entity)
    }

    #[test]
    fn starts_in_free_look() {
        let machine = LockStateMachine::new(settings());
        assert_eq!(machine.state(), LockState::FreeLook);
        assert!(machine.facing_blend().is_none());
        assert!(machine.lost_timer().is_none());
    }

    #[test]
    fn acquire_and_release_start_blends() {
        let mut world = StaticWorld::new();
        let (mut machine, _) = locked_on(&mut world, Vec3::Z * 10.0);
        assert_eq!(machine.state(), LockState::Locked);
        assert_eq!(machine.facing_blend().unwrap().elapsed, 0.0);

        let origin = Quat::from_rotation_y(1.0);
        assert_eq!(machine.release(origin), Some(LockChange::Released));
        assert_eq!(machine.state(), LockState::FreeLook);
        assert_eq!(machine.facing_blend().unwrap().origin, origin);
        assert_eq!(machine.release(origin), None);
    }

    #[test]
    fn blend_is_monotonic_and_clears_once() {
        let mut world = StaticWorld::new();
        let (mut machine, _) = locked_on(&mut world, Vec3::Z * 10.0);
        let target = Quat::from_rotation_y(1.2);

        let mut last = 0.0;
        let mut cleared_at = None;
        for frame in 0..40 {
            let published = machine.blend(target, 0.0625);
            match machine.facing_blend() {
                Some(blend) => {
                    assert!(blend.elapsed >= last);
                    assert!(blend.elapsed < 1.0);
                    last = blend.elapsed;
                    assert!(published.angle_between(target) > 0.0);
                }
                None => {
                    if cleared_at.is_none() {
                        cleared_at = Some(frame);
                    }
                    assert_eq!(published, target);
                }
            }
        }
        // 2.0/s * 0.0625 s per frame reaches 1.0 on the eighth frame.
        assert_eq!(cleared_at, Some(7));
    }

    #[test]
    fn blend_interpolates_between_origin_and_target() {
        let mut machine = LockStateMachine::new(settings());
        let _ = machine.release(Quat::IDENTITY);
        assert!(machine.facing_blend().is_none());

        let mut world = StaticWorld::new();
        let (mut machine, _) = locked_on(&mut world, Vec3::Z);
        let target = Quat::from_rotation_y(1.0);
        let half = machine.blend(target, 0.25);
        assert!((half.angle_between(Quat::IDENTITY) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn continuous_failure_releases_exactly_once() {
        let mut world = StaticWorld::new();
        let (mut machine, entity) = locked_on(&mut world, Vec3::Z * 10.0);
        assert!(world.set_position(entity, Vec3::Z * 100.0));

        let mut changes = Vec::new();
        let mut previous_timer = f32::INFINITY;
        for _ in 0..6 {
            if let Some(change) =
                machine.fixed_update(&world, Vec3::ZERO, Vec3::ZERO, 0.5, Quat::IDENTITY)
            {
                changes.push(change);
            }
            if let Some(timer) = machine.lost_timer() {
                assert!(timer > 0.0);
                assert!(timer < previous_timer);
                previous_timer = timer;
            }
        }
        assert_eq!(changes, vec![LockChange::Released]);
        assert_eq!(machine.state(), LockState::FreeLook);
        assert!(machine.lost_timer().is_none());
    }

    #[test]
    fn release_fires_after_recovery_duration_of_ticks() {
        let mut world = StaticWorld::new();
        let (mut machine, entity) = locked_on(&mut world, Vec3::Z * 10.0);
        assert!(world.remove(entity));

        // 2.0 s at 1.0 s per tick: two failing ticks release.
        assert!(machine
            .fixed_update(&world, Vec3::ZERO, Vec3::ZERO, 1.0, Quat::IDENTITY)
            .is_none());
        assert_eq!(machine.state(), LockState::LockRecovering);
        assert_eq!(
            machine.fixed_update(&world, Vec3::ZERO, Vec3::ZERO, 1.0, Quat::IDENTITY),
            Some(LockChange::Released)
        );
    }

    #[test]
    fn recovery_resets_timer_fully() {
        let mut world = StaticWorld::new();
        let wall = world.add_collider(
            Collider::cuboid(Vec3::Z * 5.0, Vec3::new(3.0, 3.0, 0.5)),
            WALLS,
        );
        let (mut machine, _) = locked_on(&mut world, Vec3::Z * 10.0);

        for _ in 0..3 {
            assert!(machine
                .fixed_update(&world, Vec3::ZERO, Vec3::ZERO, 0.5, Quat::IDENTITY)
                .is_none());
        }
        assert_eq!(machine.state(), LockState::LockRecovering);

        assert!(world.remove(wall));
        assert!(machine
            .fixed_update(&world, Vec3::ZERO, Vec3::ZERO, 0.5, Quat::IDENTITY)
            .is_none());
        assert_eq!(machine.state(), LockState::Locked);
        assert!(machine.lost_timer().is_none());
    }

    #[test]
    fn track_keeps_last_known_position() {
        let mut world = StaticWorld::new();
        let (mut machine, entity) = locked_on(&mut world, Vec3::Z * 10.0);
        assert!(world.set_position(entity, Vec3::X * 4.0));
        assert_eq!(machine.track(&world), Some(Vec3::X * 4.0));
        assert!(world.remove(entity));
        assert_eq!(machine.track(&world), Some(Vec3::X * 4.0));
    }
}
