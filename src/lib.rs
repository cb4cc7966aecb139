// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Third-person follow camera with lag, collision, and lock-on.
//!
//! The camera trails a moving subject, orbits it under analog-stick or
//! pointer turn input, pulls in front of obstructions, and can lock onto a
//! nearby target with a grace period before a lost lock is dropped.
//!
//! # Key entry points
//!
//! - [`camera::CameraRig`] - the orchestrator; call
//!   [`late_update`](camera::CameraRig::late_update) every frame and
//!   [`fixed_update`](camera::CameraRig::fixed_update) every simulation
//!   tick, or [`advance`](camera::CameraRig::advance) for both
//! - [`world::CameraWorld`] - the probe, scan, and lookup services the rig
//!   consumes, with [`world::StaticWorld`] as a reference implementation
//! - [`input::InputProcessor`] - turns raw events into turn input and
//!   [`camera::CameraCommand`]s
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! All camera state is owned by the rig. Collaborators read the published
//! [`camera::CameraView`] and receive [`camera::LockChange`] notifications;
//! none of them mutate the camera. World access is injected per call, so
//! the crate holds no global state.

pub mod camera;
pub mod error;
pub mod input;
pub mod options;
pub mod util;
pub mod world;

pub use camera::{CameraCommand, CameraRig, CameraView, SubjectPose};
pub use error::CameraError;
pub use options::Options;
