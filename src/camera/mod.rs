//! Third-person follow camera.
//!
//! [`CameraRig`] composes the leaf components below each tick:
//!
//! ```text
//! subject anchor → FollowPointTracker → OrbitSolver (turn input or lock
//! target) → CollisionResolver → facing blend → CameraView
//! ```
//!
//! Lock-on is handled by [`TargetLockSelector`] (picking) and
//! [`LockStateMachine`] (validation, recovery timer, facing blend).

/// Signed angle wrapping and Euler rotations in degrees.
pub mod angles;
/// Line-of-sight clamp of the camera position.
pub mod collision;
/// Discrete camera commands.
pub mod command;
/// The rig that composes every component.
pub mod controller;
/// Published camera snapshot and projection.
pub mod core;
/// Lagged follow point and the shared damping law.
pub mod follow;
/// Screen-space lock indicator.
pub mod hud;
/// Turn input normalization and device capability.
pub mod input;
/// Lock-on state machine.
pub mod lock;
/// Orbit destination solver.
pub mod orbit;
/// Lock-on target selection.
pub mod selector;

pub use angles::{delta_angle_to_zero, Rotation};
pub use collision::{CollisionResolver, Resolved};
pub use command::CameraCommand;
pub use controller::{CameraRig, CameraRigBuilder, SubjectPose};
pub use self::core::{CameraView, Projection};
pub use follow::FollowPointTracker;
pub use hud::LockIndicator;
pub use input::{DeviceCapability, DeviceClass, TurnInputNormalizer, TurnOffset};
pub use lock::{LockChange, LockState, LockStateMachine};
pub use orbit::{OrbitPose, OrbitSolver, PitchLimits};
pub use selector::{LockCandidate, SelectionOrigin, TargetLockSelector};
