//! Turn input normalization.
//!
//! Analog sticks report a turn *rate* (degrees per second) that must be
//! scaled by the frame time; pointer devices report a per-event *delta*
//! that is already frame independent. The normalizer picks the rule from a
//! capability query made every tick.

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Class of device currently driving the turn input.
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
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Continuous analog device (gamepad stick): value is a rate.
    Analog,
    /// Discrete pointer device (mouse): value is a delta.
    #[default]
    Pointer,
}

/// Per-tick query for which device class is active.
pub trait DeviceCapability {
    /// Whether the active turn device is a continuous analog device.
    fn is_using_analog_device(&self) -> bool;
}

impl DeviceCapability for DeviceClass {
    fn is_using_analog_device(&self) -> bool {
        matches!(self, Self::Analog)
    }
}

/// Pitch/yaw change for one frame, in degrees.
///
/// `horizontal` is added to yaw; `vertical` is subtracted from pitch, so
/// pushing up raises the view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TurnOffset {
    /// Yaw change.
    pub horizontal: f32,
    /// Upward pitch change.
    pub vertical: f32,
}

impl TurnOffset {
    /// No turn.
    pub const ZERO: Self = Self {
        horizontal: 0.0,
        vertical: 0.0,
    };

    /// Whether both components are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.horizontal == 0.0 && self.vertical == 0.0
    }
}

/// Converts raw turn vectors into frame-scaled offsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnInputNormalizer;

impl TurnInputNormalizer {
    /// Offset for this frame.
    ///
    /// Zero or non-finite input yields [`TurnOffset::ZERO`] without
    /// consulting the device.
    #[must_use]
    pub fn offset<C: DeviceCapability + ?Sized>(
        raw: Vec2,
        capability: &C,
        dt: f32,
    ) -> TurnOffset {
        if !raw.is_finite() || raw.length_squared() == 0.0 {
            return TurnOffset::ZERO;
        }

        let scaled = if capability.is_using_analog_device() {
            let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
            raw * dt
        } else {
            raw
        };

        TurnOffset {
            horizontal: scaled.x,
            vertical: scaled.y,
        }
    }
}
