/// Viewer configuration and control-panel constants
use crate::color::{Rgb, DEFAULT_COLOR};
use crate::shape::ShapeKind;

/// Bounds shared by every speed control; the slider, the presets and the
/// keyboard increments all clamp into the same range.
pub const SPEED_MIN: f32 = 0.0;
pub const SPEED_MAX: f32 = 0.1;
/// Keyboard `+`/`-` increment
pub const SPEED_STEP: f32 = 0.005;
/// Fixed rotation applied by directional buttons and arrow keys (radians)
pub const ROTATE_STEP: f32 = 0.1;

/// A named single-click speed shortcut
pub struct SpeedPreset {
    pub name: &'static str,
    pub value: f32,
}

/// The four fixed preset buttons of the controls panel
pub const SPEED_PRESETS: &[SpeedPreset] = &[
    SpeedPreset {
        name: "Slow",
        value: 0.003,
    },
    SpeedPreset {
        name: "Medium",
        value: 0.01,
    },
    SpeedPreset {
        name: "Fast",
        value: 0.03,
    },
    SpeedPreset {
        name: "Very Fast",
        value: 0.05,
    },
];

pub fn clamp_speed(speed: f32) -> f32 {
    speed.clamp(SPEED_MIN, SPEED_MAX)
}

/// The renderable properties of the viewer, replaced wholesale on every
/// control edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub color: Rgb,
    pub rotation_speed: f32,
    pub wireframe: bool,
    pub shape: ShapeKind,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            rotation_speed: 0.01,
            wireframe: false,
            shape: ShapeKind::Cube,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.color.to_hex(), "#00ff00");
        assert_eq!(config.rotation_speed, 0.01);
        assert!(!config.wireframe);
        assert_eq!(config.shape, ShapeKind::Cube);
    }

    #[test]
    fn test_presets_inside_speed_bounds() {
        for preset in SPEED_PRESETS {
            assert_eq!(clamp_speed(preset.value), preset.value);
        }
    }

    #[test]
    fn test_clamp_speed() {
        assert_eq!(clamp_speed(-0.01), SPEED_MIN);
        assert_eq!(clamp_speed(0.2), SPEED_MAX);
        assert_eq!(clamp_speed(0.05), 0.05);
    }
}
