//! Shared utilities: the fixed simulation clock and easing curves.

pub mod easing;
/// Fixed-rate simulation clock.
pub mod fixed_step;
