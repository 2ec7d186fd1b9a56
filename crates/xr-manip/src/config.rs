//! Engine configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Load with [`ManipulationConfig::load`] or
//! [`ManipulationConfig::from_toml_str`]; both validate before returning.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ManipError, Result};

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulationConfig {
    /// Master switch; a disabled engine never writes the target
    pub enabled: bool,
    /// Report grab points for gizmo visualization
    pub gizmo_enabled: bool,
    /// Require new grabs to touch the target's bounding box
    pub collision_enabled: bool,
    /// Grab individual sub-objects of the root instead of the whole root
    pub per_object_enabled: bool,
    pub input: InputConfig,
    pub two_hand: TwoHandConfig,
    pub smoothing: SmoothingConfig,
    pub haptics: HapticsConfig,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            gizmo_enabled: true,
            collision_enabled: true,
            per_object_enabled: false,
            input: InputConfig::default(),
            two_hand: TwoHandConfig::default(),
            smoothing: SmoothingConfig::default(),
            haptics: HapticsConfig::default(),
        }
    }
}

/// Input sampling thresholds. Distances in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Index-tip to thumb-tip distance below which a hand is pinching
    pub pinch_distance: f32,
    /// Palm normal's Y component must be at or below this to grab
    pub palm_down_threshold: f32,
    /// Trigger/squeeze value at or above which a controller grabs
    pub press_threshold: f32,
    /// Interaction radius of a pinching hand
    pub hand_grab_radius: f32,
    /// Interaction radius of an idle hand (wrist presence)
    pub hand_idle_radius: f32,
    /// Interaction radius of a gripping controller
    pub controller_grab_radius: f32,
    /// Interaction radius of an idle controller
    pub controller_idle_radius: f32,
}

impl InputConfig {
    pub const DEFAULT_PINCH_DISTANCE: f32 = 0.035;
    pub const DEFAULT_PALM_DOWN_THRESHOLD: f32 = -0.15;
    pub const DEFAULT_PRESS_THRESHOLD: f32 = 0.5;
    pub const DEFAULT_HAND_GRAB_RADIUS: f32 = 0.03;
    pub const DEFAULT_HAND_IDLE_RADIUS: f32 = 0.045;
    pub const DEFAULT_CONTROLLER_GRAB_RADIUS: f32 = 0.05;
    pub const DEFAULT_CONTROLLER_IDLE_RADIUS: f32 = 0.04;
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pinch_distance: Self::DEFAULT_PINCH_DISTANCE,
            palm_down_threshold: Self::DEFAULT_PALM_DOWN_THRESHOLD,
            press_threshold: Self::DEFAULT_PRESS_THRESHOLD,
            hand_grab_radius: Self::DEFAULT_HAND_GRAB_RADIUS,
            hand_idle_radius: Self::DEFAULT_HAND_IDLE_RADIUS,
            controller_grab_radius: Self::DEFAULT_CONTROLLER_GRAB_RADIUS,
            controller_idle_radius: Self::DEFAULT_CONTROLLER_IDLE_RADIUS,
        }
    }
}

/// Two-point scale/rotate limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoHandConfig {
    /// Floor for the anchor distance between the two points
    pub min_anchor_distance: f32,
    pub min_scale_factor: f32,
    pub max_scale_factor: f32,
}

impl TwoHandConfig {
    pub const DEFAULT_MIN_ANCHOR_DISTANCE: f32 = 1e-4;
    pub const DEFAULT_MIN_SCALE_FACTOR: f32 = 0.01;
    pub const DEFAULT_MAX_SCALE_FACTOR: f32 = 50.0;
}

impl Default for TwoHandConfig {
    fn default() -> Self {
        Self {
            min_anchor_distance: Self::DEFAULT_MIN_ANCHOR_DISTANCE,
            min_scale_factor: Self::DEFAULT_MIN_SCALE_FACTOR,
            max_scale_factor: Self::DEFAULT_MAX_SCALE_FACTOR,
        }
    }
}

/// Low-pass filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Per-frame interpolation weight α in (0, 1]; 1 snaps
    pub factor: f32,
    /// Frame rate at which `factor` was tuned. When set and a frame carries
    /// its delta time, α is rescaled to that frame's actual duration.
    pub reference_fps: Option<f32>,
}

impl SmoothingConfig {
    pub const DEFAULT_FACTOR: f32 = 0.28;
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            factor: Self::DEFAULT_FACTOR,
            reference_fps: None,
        }
    }
}

/// A single vibration pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseConfig {
    /// 0.0 - 1.0
    pub strength: f32,
    pub duration_ms: u64,
}

impl PulseConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Grab/release haptic pulses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    pub enabled: bool,
    pub grab: PulseConfig,
    pub release: PulseConfig,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            grab: PulseConfig {
                strength: 0.3,
                duration_ms: 50,
            },
            release: PulseConfig {
                strength: 0.15,
                duration_ms: 30,
            },
        }
    }
}

impl ManipulationConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ManipError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded manipulation config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ManipError {
            ManipError::InvalidConfig {
                field,
                reason: reason.into(),
            }
        }

        let s = &self.smoothing;
        if !(s.factor > 0.0 && s.factor <= 1.0) {
            return Err(invalid("smoothing.factor", format!("{} is outside (0, 1]", s.factor)));
        }
        if let Some(fps) = s.reference_fps {
            if !(fps > 0.0 && fps.is_finite()) {
                return Err(invalid("smoothing.reference_fps", format!("{} must be positive", fps)));
            }
        }

        let i = &self.input;
        let positive = [
            ("input.pinch_distance", i.pinch_distance),
            ("input.press_threshold", i.press_threshold),
            ("input.hand_grab_radius", i.hand_grab_radius),
            ("input.hand_idle_radius", i.hand_idle_radius),
            ("input.controller_grab_radius", i.controller_grab_radius),
            ("input.controller_idle_radius", i.controller_idle_radius),
            ("two_hand.min_anchor_distance", self.two_hand.min_anchor_distance),
            ("two_hand.min_scale_factor", self.two_hand.min_scale_factor),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(invalid(field, format!("{} must be positive", value)));
            }
        }
        if !(-1.0..=1.0).contains(&i.palm_down_threshold) {
            return Err(invalid(
                "input.palm_down_threshold",
                format!("{} is outside [-1, 1]", i.palm_down_threshold),
            ));
        }

        let t = &self.two_hand;
        if t.max_scale_factor <= t.min_scale_factor {
            return Err(invalid(
                "two_hand.max_scale_factor",
                format!("{} must exceed min_scale_factor {}", t.max_scale_factor, t.min_scale_factor),
            ));
        }

        for (field, pulse) in [("haptics.grab", &self.haptics.grab), ("haptics.release", &self.haptics.release)] {
            if !(0.0..=1.0).contains(&pulse.strength) {
                return Err(invalid(field, format!("strength {} is outside [0, 1]", pulse.strength)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ManipulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.smoothing.factor, 0.28);
        assert_eq!(config.input.pinch_distance, 0.035);
        assert_eq!(config.haptics.grab.duration(), Duration::from_millis(50));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ManipulationConfig::from_toml_str(
            r#"
            per_object_enabled = true

            [smoothing]
            factor = 1.0
            "#,
        )
        .unwrap();
        assert!(config.per_object_enabled);
        assert!(config.collision_enabled);
        assert_eq!(config.smoothing.factor, 1.0);
        assert_eq!(config.two_hand.max_scale_factor, 50.0);
    }

    #[test]
    fn test_rejects_out_of_range_smoothing() {
        let err = ManipulationConfig::from_toml_str("[smoothing]\nfactor = 0.0\n").unwrap_err();
        assert!(matches!(err, ManipError::InvalidConfig { field: "smoothing.factor", .. }));
    }

    #[test]
    fn test_rejects_inverted_scale_clamp() {
        let mut config = ManipulationConfig::default();
        config.two_hand.max_scale_factor = 0.001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = ManipulationConfig::from_toml_str("enabled = \"yes\"").unwrap_err();
        assert!(matches!(err, ManipError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gizmo_enabled = false\n[haptics]\nenabled = false").unwrap();
        let config = ManipulationConfig::load(file.path()).unwrap();
        assert!(!config.gizmo_enabled);
        assert!(!config.haptics.enabled);
        assert_eq!(config.haptics.grab.strength, 0.3);
    }

    #[test]
    fn test_missing_file() {
        let err = ManipulationConfig::load("/nonexistent/xr-manip.toml").unwrap_err();
        assert!(matches!(err, ManipError::ConfigIo { .. }));
    }
}
