/// Camera and screen projection
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera framing the shape from `(0, 0, 5)`, matching the
/// viewer's fixed scene layout.
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75.0_f32.to_radians(),
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Track a surface resize by updating the aspect ratio
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a model-space point to screen space. Returns screen x/y plus
    /// a depth value for z-buffering, or `None` when the point is clipped.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let clip = mvp * point.to_homogeneous();

        if clip.w.abs() < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let ndc_z = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&ndc_x)
            || !(-1.0..=1.0).contains(&ndc_y)
            || !(-1.0..=1.0).contains(&ndc_z)
        {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc_z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_relative_eq!(camera.aspect, 800.0 / 600.0, epsilon = 1e-6);
        assert_relative_eq!(camera.position.z, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::new(800, 600);
        camera.resize(400, 400);
        assert_relative_eq!(camera.aspect, 1.0, epsilon = 1e-6);

        // Degenerate sizes are ignored
        camera.resize(0, 400);
        assert_relative_eq!(camera.aspect, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = Camera::new(200, 100);
        let (x, y, _depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 200, 100)
            .expect("origin is inside the frustum");
        assert_relative_eq!(x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(y, 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::new(200, 100);
        let behind = Point3::new(0.0, 0.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 200, 100)
            .is_none());
    }

    #[test]
    fn test_nearer_points_have_smaller_depth() {
        let camera = Camera::new(100, 100);
        let near = camera
            .project_to_screen(&Point3::new(0.0, 0.0, 2.0), &Matrix4::identity(), 100, 100)
            .expect("inside frustum");
        let far = camera
            .project_to_screen(&Point3::new(0.0, 0.0, -2.0), &Matrix4::identity(), 100, 100)
            .expect("inside frustum");
        assert!(near.2 < far.2);
    }
}
