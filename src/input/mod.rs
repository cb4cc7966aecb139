//! Input handling: event types and the input processor that converts raw
//! window and gamepad events into turn input and camera commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into turn input and camera commands.
pub mod processor;

pub use event::InputEvent;
pub use processor::{CameraAction, InputProcessor, KeyBindings, TurnInput};
