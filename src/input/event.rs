/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor), which
/// accumulates turn input and turns bound keys into
/// [`CameraCommand`](crate::camera::CameraCommand) values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(InputEvent::KeyPressed("KeyQ".into())) {
///     let _ = rig.execute(cmd, &world);
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Relative pointer motion since the previous event.
    PointerDelta {
        /// Horizontal motion in pixels (positive = right).
        dx: f32,
        /// Vertical motion in pixels (positive = down).
        dy: f32,
    },
    /// Current analog stick deflection.
    StickMoved {
        /// Horizontal deflection in `[-1, 1]` (positive = right).
        x: f32,
        /// Vertical deflection in `[-1, 1]` (positive = up).
        y: f32,
    },
    /// A key or button was pressed. Uses key-code strings such as `"KeyQ"`
    /// or `"GamepadRightStick"`.
    KeyPressed(String),
}
