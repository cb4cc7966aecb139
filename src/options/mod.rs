//! Camera and input options with TOML preset support.
//!
//! Options serialize to/from TOML so rigs can be tuned per game mode
//! without recompiling. Every section uses `#[serde(default)]`, so a preset
//! only needs the fields it overrides.

mod camera;
mod input;

use std::path::Path;

pub use camera::CameraOptions;
pub use input::InputOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CameraError;

/// Top-level options container.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Follow, orbit, lock-on, and projection parameters.
    pub camera: CameraOptions,
    /// Turn input scaling and key bindings.
    pub input: InputOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CameraError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CameraError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CameraError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(CameraError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), CameraError> {
        self.camera.validate()?;
        let input = &self.input;
        if !(input.pointer_sensitivity.is_finite()
            && input.stick_turn_rate.is_finite()
            && (0.0..1.0).contains(&input.stick_deadzone))
        {
            return Err(CameraError::InvalidConfig(
                "input scaling must be finite with a deadzone in [0, 1)"
                    .to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CameraAction;
    use crate::util::easing::Easing;
    use crate::world::LayerMask;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
orbit_radius = 6.5
collision_mask = 3
facing_blend_easing = { kind = "smooth_step" }

[input.bindings]
KeyF = "toggle_lock"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.orbit_radius, 6.5);
        assert_eq!(opts.camera.collision_mask, LayerMask(3));
        assert_eq!(opts.camera.facing_blend_easing, Easing::SmoothStep);
        // Everything else should be default
        assert_eq!(opts.camera.height_offset, 2.0);
        assert_eq!(opts.input.pointer_sensitivity, 0.4);
        assert_eq!(
            opts.input.bindings.lookup("KeyF"),
            Some(CameraAction::ToggleLock)
        );
        assert_eq!(opts.input.bindings.lookup("KeyQ"), None);
    }

    #[test]
    fn default_bindings_toggle_lock() {
        let opts = Options::default();
        assert_eq!(
            opts.input.bindings.lookup("KeyQ"),
            Some(CameraAction::ToggleLock)
        );
        assert_eq!(
            opts.input.bindings.lookup("GamepadRightStick"),
            Some(CameraAction::ToggleLock)
        );
        assert_eq!(opts.input.bindings.lookup("KeyZ"), None);
    }

    #[test]
    fn unreachable_locked_pitch_is_rejected() {
        let mut opts = Options::default();
        opts.camera.locked_pitch = 75.0;
        assert!(matches!(
            opts.validate(),
            Err(CameraError::InvalidConfig(_))
        ));

        let mut opts = Options::default();
        opts.camera.movement_damping = 1.5;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.camera.orbit_radius = 0.0;
        assert!(opts.validate().is_err());
    }

    #[test]
    fn vertical_pitch_limits_are_rejected() {
        let mut opts = Options::default();
        opts.camera.max_pitch = 90.0;
        assert!(matches!(
            opts.validate(),
            Err(CameraError::InvalidConfig(_))
        ));

        let mut opts = Options::default();
        opts.camera.min_pitch = -95.0;
        assert!(opts.validate().is_err());

        let mut opts = Options::default();
        opts.camera.max_pitch = 89.0;
        opts.camera.min_pitch = -89.0;
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("followcam-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.camera.orbit_radius = 4.0;
        opts.save(&dir.join("close.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["close", "default"]);
        let loaded = Options::load(&dir.join("close.toml")).unwrap();
        assert_eq!(loaded, opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_reports_missing_file() {
        let missing = std::env::temp_dir().join("followcam-no-such-file.toml");
        assert!(matches!(Options::load(&missing), Err(CameraError::Io(_))));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("input"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("orbit_radius").is_some());
        assert!(camera.get("locked_pitch").is_some());
        assert!(camera.get("collision_mask").is_none());
        assert!(camera.get("znear").is_none());

        let input = &props["input"]["properties"];
        assert!(input.get("stick_deadzone").is_some());
        assert!(input.get("bindings").is_none());
    }
}
