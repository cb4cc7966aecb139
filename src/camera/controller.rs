//! The camera rig: composes the follow, orbit, collision, and lock-on
//! components each tick and publishes a [`CameraView`].
//!
//! Two clocks drive the rig. [`CameraRig::late_update`] runs once per
//! rendered frame after the subject has moved and does all visual
//! interpolation. [`CameraRig::fixed_update`] runs on the simulation tick
//! and only validates the lock, so lock-loss timing does not depend on
//! frame rate. [`CameraRig::advance`] drives both from a single frame delta.

use glam::{Vec2, Vec3};

use super::angles::{delta_angle_to_zero, Rotation};
use super::collision::CollisionResolver;
use super::command::CameraCommand;
use super::core::{CameraView, Projection};
use super::follow::FollowPointTracker;
use super::input::{DeviceCapability, TurnInputNormalizer};
use super::lock::{LockChange, LockSettings, LockState, LockStateMachine};
use super::orbit::{OrbitPose, OrbitSolver};
use super::selector::{SelectionOrigin, TargetLockSelector};
use crate::error::CameraError;
use crate::options::CameraOptions;
use crate::util::fixed_step::FixedTimestep;
use crate::world::{
    CameraWorld, CandidateScan, EntityLocator, LineOfSight, ProbeHit,
};

/// Subject transform supplied by the movement controller each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubjectPose {
    /// World position of the subject's feet/root.
    pub position: Vec3,
    /// Heading around the world up axis, in degrees.
    pub yaw: f32,
}

impl SubjectPose {
    /// Construct from a position and heading.
    #[must_use]
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }
}

/// Builder for [`CameraRig`].
#[derive(Debug, Clone, Default)]
pub struct CameraRigBuilder {
    options: CameraOptions,
    subject: Option<SubjectPose>,
    aspect: Option<f32>,
}

impl CameraRigBuilder {
    /// Start from the given options.
    #[must_use]
    pub fn new(options: CameraOptions) -> Self {
        Self {
            options,
            subject: None,
            aspect: None,
        }
    }

    /// Subject to follow. Required.
    #[must_use]
    pub fn subject(mut self, subject: SubjectPose) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Viewport aspect ratio for the projection (default 16:9).
    #[must_use]
    pub fn aspect(mut self, aspect: f32) -> Self {
        self.aspect = Some(aspect);
        self
    }

    /// Validate the options and activate the rig, snapped to a pose behind
    /// the subject.
    pub fn build(self) -> Result<CameraRig, CameraError> {
        let subject = self.subject.ok_or(CameraError::MissingSubject)?;
        if !subject.position.is_finite() || !subject.yaw.is_finite() {
            return Err(CameraError::InvalidConfig(
                "subject pose must be finite".to_owned(),
            ));
        }
        self.options.validate()?;
        let opts = &self.options;
        let limits = opts.pitch_limits()?;

        let follow = FollowPointTracker::new(
            subject.position,
            opts.height_offset,
            opts.facing_point_damping,
        );
        let orbit =
            OrbitSolver::new(opts.orbit_radius, opts.movement_damping, limits);
        let rotation = Rotation::new(
            limits.clamp(opts.initial_pitch),
            delta_angle_to_zero(subject.yaw),
            0.0,
        );
        let raw_destination =
            orbit.destination(follow.facing_point(), rotation);

        log::info!(
            "camera rig activated: radius {}, pitch {:.1}, yaw {:.1}",
            opts.orbit_radius,
            rotation.pitch,
            rotation.yaw
        );

        Ok(CameraRig {
            follow,
            orbit,
            collision: CollisionResolver::new(opts.collision_mask),
            selector: TargetLockSelector {
                search_radius: opts.lock_search_radius,
                cone_half_angle: opts.lock_cone_half_angle,
                candidate_mask: opts.lock_candidate_mask,
                collision_mask: opts.collision_mask,
                capacity: opts.scan_capacity,
            },
            lock: LockStateMachine::new(LockSettings {
                max_distance: opts.lock_search_radius,
                recovery_duration: opts.lost_target_recovery,
                adaption_rate: opts.facing_adaption_rate,
                easing: opts.facing_blend_easing,
                collision_mask: opts.collision_mask,
            }),
            timestep: FixedTimestep::new(opts.fixed_timestep),
            pose: OrbitPose {
                rotation,
                raw_destination,
            },
            subject: subject.position,
            obstruction: None,
            view: CameraView {
                position: raw_destination,
                orientation: rotation.to_quat(),
                rotation,
                lock_target: None,
            },
            projection: opts.projection(self.aspect.unwrap_or(16.0 / 9.0)),
        })
    }
}

/// Third-person follow camera with lock-on.
///
/// All camera state lives here and is only mutated through the rig's own
/// tick and command methods; collaborators read [`CameraRig::view`].
#[derive(Debug, Clone)]
pub struct CameraRig {
    follow: FollowPointTracker,
    orbit: OrbitSolver,
    collision: CollisionResolver,
    selector: TargetLockSelector,
    lock: LockStateMachine,
    timestep: FixedTimestep,
    pose: OrbitPose,
    /// Subject position from the most recent render tick.
    subject: Vec3,
    /// Obstruction that clamped the camera on the last render tick.
    obstruction: Option<ProbeHit>,
    view: CameraView,
    projection: Projection,
}

impl CameraRig {
    /// Shorthand for [`CameraRigBuilder::new`].
    #[must_use]
    pub fn builder(options: CameraOptions) -> CameraRigBuilder {
        CameraRigBuilder::new(options)
    }

    /// Activate a rig following `subject` with the given options.
    pub fn new(
        options: CameraOptions,
        subject: SubjectPose,
    ) -> Result<Self, CameraError> {
        CameraRigBuilder::new(options).subject(subject).build()
    }

    /// What the rig published on the last tick.
    #[must_use]
    pub fn view(&self) -> CameraView {
        self.view
    }

    /// Projection parameters.
    #[must_use]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Update the viewport aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.projection.aspect = aspect;
        }
    }

    /// Target rotation (pitch within limits, or the locked pitch).
    #[must_use]
    pub fn target_rotation(&self) -> Rotation {
        self.pose.rotation
    }

    /// Damped point the camera orbits and looks at.
    #[must_use]
    pub fn facing_point(&self) -> Vec3 {
        self.follow.facing_point()
    }

    /// Undamped anchor (subject position plus height offset).
    #[must_use]
    pub fn origin_point(&self) -> Vec3 {
        self.follow.origin_point()
    }

    /// Uncollided camera position estimate.
    #[must_use]
    pub fn raw_destination(&self) -> Vec3 {
        self.pose.raw_destination
    }

    /// Collider that pulled the camera in on the last render tick, or
    /// `None` when the arm was clear.
    #[must_use]
    pub fn obstruction(&self) -> Option<ProbeHit> {
        self.obstruction
    }

    /// Coarse lock state.
    #[must_use]
    pub fn lock_state(&self) -> LockState {
        self.lock.state()
    }

    /// Lock-on state machine, read-only.
    #[must_use]
    pub fn lock_machine(&self) -> &LockStateMachine {
        &self.lock
    }

    /// Render tick. Call once per frame after the subject has moved.
    ///
    /// `turn` is the raw turn vector; `capability` says whether it came from
    /// an analog device (a rate) or a pointer (a delta).
    pub fn late_update<C, W>(
        &mut self,
        subject: SubjectPose,
        turn: Vec2,
        capability: &C,
        world: &W,
        dt: f32,
    ) -> CameraView
    where
        C: DeviceCapability + ?Sized,
        W: CameraWorld + ?Sized,
    {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        if subject.position.is_finite() {
            self.subject = subject.position;
        }

        let facing = self.follow.update(self.subject, dt);
        let offset = TurnInputNormalizer::offset(turn, capability, dt);
        let lock_target = self.lock.track(world);

        self.pose =
            self.orbit.solve(self.pose, facing, lock_target, offset, dt);
        // Orientation never moves the camera, so this one probe also covers
        // the published segment once facing is resolved below.
        let resolved =
            self.collision.resolve(world, facing, self.pose.raw_destination);
        let position = resolved.position;
        let previous = self.obstruction.map(|hit| hit.entity);
        if let Some(hit) = resolved.hit.filter(|h| Some(h.entity) != previous) {
            log::debug!("camera obstructed by {:?}", hit.entity);
        }
        self.obstruction = resolved.hit;

        let aim = lock_target.unwrap_or(facing);
        let computed = Rotation {
            pitch: self.pose.rotation.pitch,
            ..Rotation::look_at(position, aim)
                .map_or(self.pose.rotation, Rotation::wrapped)
        };

        let orientation = self.lock.blend(computed.to_quat(), dt);
        let rotation = if self.lock.facing_blend().is_some() {
            Rotation::from_quat(orientation)
        } else {
            computed
        };

        self.view = CameraView {
            position,
            orientation,
            rotation,
            lock_target: self.lock.target().map(|t| t.entity),
        };
        self.view
    }

    /// Simulation tick: validate the lock and run the recovery timer.
    pub fn fixed_update<W>(
        &mut self,
        world: &W,
        fixed_dt: f32,
    ) -> Option<LockChange>
    where
        W: EntityLocator + LineOfSight + ?Sized,
    {
        let change = self.lock.fixed_update(
            world,
            self.subject,
            self.view.position,
            fixed_dt,
            self.view.orientation,
        );
        self.sync_lock_target();
        change
    }

    /// Run the fixed ticks due for `frame_dt`, then the render tick.
    ///
    /// Returns the lock change produced by the fixed ticks, if any.
    pub fn advance<C, W>(
        &mut self,
        subject: SubjectPose,
        turn: Vec2,
        capability: &C,
        world: &W,
        frame_dt: f32,
    ) -> Option<LockChange>
    where
        C: DeviceCapability + ?Sized,
        W: CameraWorld + ?Sized,
    {
        let mut change = None;
        let step = self.timestep.step();
        for _ in 0..self.timestep.advance(frame_dt) {
            if let Some(c) = self.fixed_update(world, step) {
                change = Some(c);
            }
        }
        let _ = self.late_update(subject, turn, capability, world, frame_dt);
        change
    }

    /// Lock onto the best visible candidate, or release the current lock.
    ///
    /// Returns `None` when nothing changed (no candidate qualified).
    pub fn toggle_lock<W>(&mut self, world: &W) -> Option<LockChange>
    where
        W: CandidateScan + LineOfSight + ?Sized,
    {
        let change = if self.lock.target().is_some() {
            self.lock.release(self.view.orientation)
        } else {
            let origin = SelectionOrigin {
                subject: self.subject,
                camera: self.view.position,
                forward: self.view.forward(),
            };
            self.selector
                .select(world, origin)
                .map(|candidate| {
                    self.lock.acquire(candidate, self.view.orientation)
                })
        };
        self.sync_lock_target();
        change
    }

    /// Apply a discrete command.
    pub fn execute<W>(
        &mut self,
        command: CameraCommand,
        world: &W,
    ) -> Option<LockChange>
    where
        W: CameraWorld + ?Sized,
    {
        match command {
            CameraCommand::ToggleLock => self.toggle_lock(world),
        }
    }

    fn sync_lock_target(&mut self) {
        self.view.lock_target = self.lock.target().map(|t| t.entity);
    }
}
