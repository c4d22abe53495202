/// Rotation state machine and transformation matrices
use nalgebra::{Matrix4, Vector3};

/// Who is driving the rotation right now.
///
/// Any manual delta switches to `Manual`; only an explicit reset returns to
/// `Auto`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    Auto,
    Manual,
}

/// Accumulated rotation around the X and Y axes (radians)
#[derive(Debug, Clone, Copy)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    mode: RotationMode,
}

impl RotationState {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            mode: RotationMode::Auto,
        }
    }

    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    pub fn is_auto(&self) -> bool {
        self.mode == RotationMode::Auto
    }

    /// Apply a manual rotation delta. Disables auto-rotation until reset.
    pub fn apply_delta(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
        self.mode = RotationMode::Manual;
    }

    /// Advance auto-rotation by one frame. No-op while under manual control.
    pub fn advance(&mut self, speed: f32) {
        if self.mode == RotationMode::Auto {
            self.x += speed;
            self.y += speed;
        }
    }

    /// Zero the rotation and hand control back to auto-rotation.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform builder for model matrices
pub struct Transform;

impl Transform {
    /// Rotation matrix for a rotation state, Y applied after X
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));

        ry * rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_starts_in_auto() {
        let state = RotationState::new();
        assert!(state.is_auto());
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
    }

    #[test]
    fn test_manual_delta_disables_auto() {
        let mut state = RotationState::new();
        state.apply_delta(0.1, -0.1);
        assert_eq!(state.mode(), RotationMode::Manual);
        assert_relative_eq!(state.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(state.y, -0.1, epsilon = 1e-6);

        // Auto advance must not move a manually controlled rotation
        state.advance(0.05);
        assert_relative_eq!(state.x, 0.1, epsilon = 1e-6);
        assert_relative_eq!(state.y, -0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_reset_returns_to_auto() {
        let mut state = RotationState::new();
        state.apply_delta(1.0, 2.0);
        state.reset();
        assert!(state.is_auto());
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);

        state.advance(0.01);
        assert_relative_eq!(state.x, 0.01, epsilon = 1e-6);
        assert_relative_eq!(state.y, 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::new();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }
}
