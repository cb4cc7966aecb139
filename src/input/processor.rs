//! Converts raw platform events into turn input and camera commands.
//!
//! The `InputProcessor` owns all transient input state (accumulated pointer
//! motion, the latest stick deflection, the active device class) and the
//! key-binding map. It sits between raw window/gamepad events and the rig.

use std::collections::HashMap;

use glam::Vec2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::event::InputEvent;
use crate::camera::{CameraCommand, DeviceCapability, DeviceClass};
use crate::options::InputOptions;

/// Serializable tag for the camera commands that can be key-bound.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CameraAction {
    /// Lock onto the best target, or release the current lock.
    ToggleLock,
}

impl CameraAction {
    fn to_command(self) -> CameraCommand {
        match self {
            Self::ToggleLock => CameraCommand::ToggleLock,
        }
    }
}

/// Maps key strings to [`CameraAction`]s.
///
/// Serializes as a plain table so presets stay readable:
/// ```toml
/// [input.bindings]
/// KeyQ = "toggle_lock"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct KeyBindings {
    bindings: HashMap<String, CameraAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyQ".into(), CameraAction::ToggleLock),
            ("GamepadRightStick".into(), CameraAction::ToggleLock),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the action bound to a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<CameraAction> {
        self.bindings.get(key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: impl Into<String>, action: CameraAction) {
        let _ = self.bindings.insert(key.into(), action);
    }

    /// Remove the binding for `key`. Returns the action it was bound to.
    pub fn unbind(&mut self, key: &str) -> Option<CameraAction> {
        self.bindings.remove(key)
    }
}

/// Turn input collected for one render frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnInput {
    /// Raw turn vector: a rate in degrees per second for analog devices, a
    /// delta in degrees for pointer devices.
    pub vector: Vec2,
    /// Device that produced `vector`.
    pub device: DeviceClass,
}

impl DeviceCapability for TurnInput {
    fn is_using_analog_device(&self) -> bool {
        self.device.is_using_analog_device()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw input events into [`TurnInput`] and [`CameraCommand`]s.
///
/// # Usage
///
/// ```ignore
/// for event in events {
///     if let Some(cmd) = input.handle_event(event) {
///         let _ = rig.execute(cmd, &world);
///     }
/// }
/// let turn = input.take_turn_input();
/// rig.late_update(subject, turn.vector, &turn, &world, dt);
/// ```
#[derive(Debug, Clone)]
pub struct InputProcessor {
    /// Pointer motion (in degrees) since the last poll.
    pointer: Vec2,
    /// Latest stick deflection after the deadzone.
    stick: Vec2,
    /// Device class of the most recent turn event.
    device: DeviceClass,
    pointer_sensitivity: f32,
    stick_turn_rate: f32,
    stick_deadzone: f32,
    invert_vertical: bool,
    /// Turn events are dropped while false.
    input_enabled: bool,
    /// Key string → action mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a processor with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&InputOptions::default())
    }

    /// Create a processor from input options.
    #[must_use]
    pub fn with_options(options: &InputOptions) -> Self {
        Self {
            pointer: Vec2::ZERO,
            stick: Vec2::ZERO,
            device: DeviceClass::default(),
            pointer_sensitivity: options.pointer_sensitivity,
            stick_turn_rate: options.stick_turn_rate,
            stick_deadzone: options.stick_deadzone,
            invert_vertical: options.invert_vertical,
            input_enabled: true,
            key_bindings: options.bindings.clone(),
        }
    }

    /// Device class of the most recent turn event.
    #[must_use]
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Whether turn events are being collected.
    #[must_use]
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Enable or disable turn input (e.g. during cutscenes or menus).
    ///
    /// Either way, accumulated pointer motion and the held stick deflection
    /// are cleared. Key bindings keep working.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        if self.input_enabled != enabled {
            log::debug!("camera turn input enabled: {enabled}");
        }
        self.input_enabled = enabled;
        self.pointer = Vec2::ZERO;
        self.stick = Vec2::ZERO;
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<CameraCommand> {
        match event {
            InputEvent::PointerDelta { .. } | InputEvent::StickMoved { .. }
                if !self.input_enabled =>
            {
                None
            }
            InputEvent::PointerDelta { dx, dy } => {
                let delta = Vec2::new(dx, -dy);
                if delta.is_finite() {
                    self.pointer += delta * self.pointer_sensitivity;
                    self.device = DeviceClass::Pointer;
                }
                None
            }
            InputEvent::StickMoved { x, y } => {
                self.handle_stick(Vec2::new(x, y));
                None
            }
            InputEvent::KeyPressed(key) => self.handle_key_press(&key),
        }
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<CameraCommand> {
        self.key_bindings.lookup(key).map(CameraAction::to_command)
    }

    /// Turn input for this frame. Resets the pointer accumulator; the stick
    /// deflection persists until the next stick event.
    pub fn take_turn_input(&mut self) -> TurnInput {
        let pointer = std::mem::take(&mut self.pointer);
        let mut vector = match self.device {
            DeviceClass::Analog => self.stick * self.stick_turn_rate,
            DeviceClass::Pointer => pointer,
        };
        if self.invert_vertical {
            vector.y = -vector.y;
        }
        TurnInput {
            vector,
            device: self.device,
        }
    }

    fn handle_stick(&mut self, raw: Vec2) {
        if !raw.is_finite() {
            return;
        }
        let raw = raw.clamp_length_max(1.0);
        if raw.length() < self.stick_deadzone {
            self.stick = Vec2::ZERO;
            return;
        }
        self.stick = raw;
        self.device = DeviceClass::Analog;
    }
}

impl DeviceCapability for InputProcessor {
    fn is_using_analog_device(&self) -> bool {
        self.device.is_using_analog_device()
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_deltas_accumulate_until_taken() {
        let mut input = InputProcessor::new();
        assert!(input
            .handle_event(InputEvent::PointerDelta { dx: 10.0, dy: 5.0 })
            .is_none());
        let _ = input.handle_event(InputEvent::PointerDelta { dx: 5.0, dy: 0.0 });

        let turn = input.take_turn_input();
        assert_eq!(turn.device, DeviceClass::Pointer);
        assert!(!turn.is_using_analog_device());
        assert!((turn.vector - Vec2::new(6.0, -2.0)).length() < 1e-5);

        // Accumulator resets between polls.
        assert_eq!(input.take_turn_input().vector, Vec2::ZERO);
    }

    #[test]
    fn stick_switches_device_and_scales_by_rate() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::StickMoved { x: 0.5, y: 0.0 });
        assert!(input.is_using_analog_device());

        let turn = input.take_turn_input();
        assert_eq!(turn.device, DeviceClass::Analog);
        assert!((turn.vector - Vec2::new(180.0, 0.0)).length() < 1e-3);
        // Stick deflection is a held state, not consumed by polling.
        assert_eq!(input.take_turn_input().vector, turn.vector);
    }

    #[test]
    fn deadzone_zeroes_small_deflection() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::StickMoved { x: 0.6, y: 0.0 });
        let _ = input.handle_event(InputEvent::StickMoved { x: 0.05, y: 0.02 });
        assert_eq!(input.take_turn_input().vector, Vec2::ZERO);
        assert!(input.is_using_analog_device());
    }

    #[test]
    fn pointer_motion_takes_over_from_stick() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::StickMoved { x: 1.0, y: 0.0 });
        let _ = input.handle_event(InputEvent::PointerDelta { dx: 1.0, dy: 0.0 });
        assert!(!input.is_using_analog_device());
    }

    #[test]
    fn invert_vertical_flips_y() {
        let options = InputOptions {
            invert_vertical: true,
            pointer_sensitivity: 1.0,
            ..InputOptions::default()
        };
        let mut input = InputProcessor::with_options(&options);
        let _ = input.handle_event(InputEvent::PointerDelta { dx: 0.0, dy: -4.0 });
        assert_eq!(input.take_turn_input().vector, Vec2::new(0.0, -4.0));
    }

    #[test]
    fn disabling_input_clears_and_drops_turn_events() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(InputEvent::PointerDelta { dx: 10.0, dy: 0.0 });
        input.set_input_enabled(false);
        assert!(!input.is_input_enabled());
        assert_eq!(input.take_turn_input().vector, Vec2::ZERO);

        let _ = input.handle_event(InputEvent::PointerDelta { dx: 7.0, dy: 3.0 });
        let _ = input.handle_event(InputEvent::StickMoved { x: 1.0, y: 0.0 });
        assert_eq!(input.take_turn_input().vector, Vec2::ZERO);
        assert!(!input.is_using_analog_device());
        // Commands still go through.
        assert_eq!(
            input.handle_event(InputEvent::KeyPressed("KeyQ".into())),
            Some(CameraCommand::ToggleLock)
        );

        input.set_input_enabled(true);
        let _ = input.handle_event(InputEvent::StickMoved { x: 0.5, y: 0.0 });
        assert!(input.take_turn_input().vector.x > 0.0);

        // A held stick does not survive a disable.
        input.set_input_enabled(false);
        input.set_input_enabled(true);
        assert_eq!(input.take_turn_input().vector, Vec2::ZERO);
    }

    #[test]
    fn bound_keys_produce_toggle_lock() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::KeyPressed("KeyQ".into())),
            Some(CameraCommand::ToggleLock)
        );
        assert_eq!(
            input.handle_key_press("GamepadRightStick"),
            Some(CameraCommand::ToggleLock)
        );
        assert_eq!(input.handle_key_press("KeyW"), None);

        assert_eq!(
            input.key_bindings_mut().unbind("KeyQ"),
            Some(CameraAction::ToggleLock)
        );
        input.key_bindings_mut().bind("Tab", CameraAction::ToggleLock);
        assert_eq!(input.handle_key_press("KeyQ"), None);
        assert_eq!(
            input.handle_key_press("Tab"),
            Some(CameraCommand::ToggleLock)
        );
    }
}
