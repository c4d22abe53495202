/// The viewer: single source of truth for configuration, rotation state and
/// scene lifecycle, driven by control actions from whatever surface hosts it.
use log::debug;

use crate::color::Rgb;
use crate::config::{clamp_speed, ViewerConfig, SPEED_STEP};
use crate::geometry::Mesh;
use crate::shape::ShapeKind;
use crate::transform::{RotationMode, RotationState};

/// One control-panel or keyboard operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    SetColor(Rgb),
    SetSpeed(f32),
    SetWireframe(bool),
    ToggleWireframe,
    SetShape(ShapeKind),
    Rotate { dx: f32, dy: f32 },
    ResetRotation,
    SpeedUp,
    SpeedDown,
    ToggleHelp,
    ToggleLightMode,
}

/// Read-only mirror of the externally observable viewer state, published to
/// observers after every applied action.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub color: String,
    pub shape: ShapeKind,
    pub wireframe: bool,
}

/// Injectable hook for test harnesses and host shells that want to watch
/// state changes without reaching into the viewer.
pub trait StateObserver {
    fn state_changed(&mut self, snapshot: &StateSnapshot);
}

pub struct Viewer {
    config: ViewerConfig,
    rotation: RotationState,
    mesh: Mesh,
    help_visible: bool,
    light_mode: bool,
    scene_generation: u64,
    observers: Vec<Box<dyn StateObserver>>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let mesh = Mesh::from_shape(config.shape);
        Self {
            config,
            rotation: RotationState::new(),
            mesh,
            help_visible: false,
            light_mode: false,
            scene_generation: 0,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn rotation_mode(&self) -> RotationMode {
        self.rotation.mode()
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn light_mode(&self) -> bool {
        self.light_mode
    }

    /// Bumped whenever color, wireframe or shape change. Frontends compare
    /// generations and rebuild their drawing surface from scratch instead of
    /// patching it.
    pub fn scene_generation(&self) -> u64 {
        self.scene_generation
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            color: self.config.color.to_hex(),
            shape: self.config.shape,
            wireframe: self.config.wireframe,
        }
    }

    /// Advance auto-rotation by one frame
    pub fn tick(&mut self) {
        self.rotation.advance(self.config.rotation_speed);
    }

    pub fn apply(&mut self, action: ControlAction) {
        debug!("applying {:?}", action);
        match action {
            ControlAction::SetColor(color) => {
                if self.config.color != color {
                    self.config.color = color;
                    self.scene_generation += 1;
                }
            }
            ControlAction::SetSpeed(speed) => {
                self.config.rotation_speed = clamp_speed(speed);
            }
            ControlAction::SetWireframe(wireframe) => {
                if self.config.wireframe != wireframe {
                    self.config.wireframe = wireframe;
                    self.scene_generation += 1;
                }
            }
            ControlAction::ToggleWireframe => {
                self.config.wireframe = !self.config.wireframe;
                self.scene_generation += 1;
            }
            ControlAction::SetShape(shape) => {
                if self.config.shape != shape {
                    self.config.shape = shape;
                    self.mesh = Mesh::from_shape(shape);
                    self.scene_generation += 1;
                }
            }
            ControlAction::Rotate { dx, dy } => {
                self.rotation.apply_delta(dx, dy);
            }
            ControlAction::ResetRotation => {
                self.rotation.reset();
            }
            ControlAction::SpeedUp => {
                self.config.rotation_speed = clamp_speed(self.config.rotation_speed + SPEED_STEP);
            }
            ControlAction::SpeedDown => {
                self.config.rotation_speed = clamp_speed(self.config.rotation_speed - SPEED_STEP);
            }
            ControlAction::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }
            ControlAction::ToggleLightMode => {
                self.light_mode = !self.light_mode;
            }
        }

        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.state_changed(&snapshot);
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SPEED_MAX;

    #[test]
    fn test_rotate_then_reset_round_trip() {
        let mut viewer = Viewer::default();
        assert_eq!(viewer.rotation_mode(), RotationMode::Auto);

        viewer.apply(ControlAction::Rotate { dx: 0.1, dy: 0.0 });
        assert_eq!(viewer.rotation_mode(), RotationMode::Manual);

        viewer.apply(ControlAction::ResetRotation);
        assert_eq!(viewer.rotation_mode(), RotationMode::Auto);
        assert_eq!(viewer.rotation().x, 0.0);
        assert_eq!(viewer.rotation().y, 0.0);
    }

    #[test]
    fn test_tick_advances_only_in_auto() {
        let mut viewer = Viewer::default();
        viewer.tick();
        assert!(viewer.rotation().x > 0.0);

        viewer.apply(ControlAction::Rotate { dx: 0.0, dy: 0.1 });
        let frozen = viewer.rotation().x;
        viewer.tick();
        assert_eq!(viewer.rotation().x, frozen);
    }

    #[test]
    fn test_shape_change_replaces_mesh_and_bumps_generation() {
        let mut viewer = Viewer::default();
        let cube_triangles = viewer.mesh().triangle_count();
        let generation = viewer.scene_generation();

        viewer.apply(ControlAction::SetShape(ShapeKind::Sphere));
        assert_ne!(viewer.mesh().triangle_count(), cube_triangles);
        assert_eq!(viewer.scene_generation(), generation + 1);

        // Re-selecting the current shape must not rebuild the scene
        viewer.apply(ControlAction::SetShape(ShapeKind::Sphere));
        assert_eq!(viewer.scene_generation(), generation + 1);
    }

    #[test]
    fn test_speed_up_clamps_at_max() {
        let mut viewer = Viewer::default();
        viewer.apply(ControlAction::SetSpeed(0.098));
        for _ in 0..5 {
            viewer.apply(ControlAction::SpeedUp);
        }
        assert!(viewer.config().rotation_speed <= SPEED_MAX);
    }

    #[test]
    fn test_help_and_light_mode_toggles() {
        let mut viewer = Viewer::default();
        assert!(!viewer.help_visible());
        viewer.apply(ControlAction::ToggleHelp);
        assert!(viewer.help_visible());

        assert!(!viewer.light_mode());
        viewer.apply(ControlAction::ToggleLightMode);
        assert!(viewer.light_mode());
        viewer.apply(ControlAction::ToggleLightMode);
        assert!(!viewer.light_mode());
    }
}
