use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::input::KeyBindings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Input", inline)]
#[serde(default)]
/// Turn input scaling and key bindings.
pub struct InputOptions {
    /// Degrees of turn per unit of pointer movement.
    #[schemars(title = "Pointer Sensitivity", range(min = 0.05, max = 2.0), extend("step" = 0.05))]
    pub pointer_sensitivity: f32,
    /// Turn rate at full stick deflection, in degrees per second.
    #[schemars(title = "Stick Turn Rate", range(min = 30.0, max = 720.0), extend("step" = 10.0))]
    pub stick_turn_rate: f32,
    /// Stick magnitude below which input is ignored.
    #[schemars(title = "Stick Deadzone", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub stick_deadzone: f32,
    /// Flip the vertical turn axis.
    #[schemars(title = "Invert Vertical")]
    pub invert_vertical: bool,
    /// Key string to action mapping.
    #[schemars(skip)]
    pub bindings: KeyBindings,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            pointer_sensitivity: 0.4,
            stick_turn_rate: 360.0,
            stick_deadzone: 0.1,
            invert_vertical: false,
            bindings: KeyBindings::default(),
        }
    }
}
