/// Spinview Web - WASM bindings for a browser canvas
///
/// The JavaScript host owns the canvas and the requestAnimationFrame loop:
/// each frame it calls `tick()` and draws the flat vertex buffers returned by
/// `frame_triangles()` / `frame_edges()`. Input events are forwarded as
/// control calls, and browser test harnesses poll the snapshot accessors
/// instead of a global test-state object.

use nalgebra::Vector3;
use wasm_bindgen::prelude::*;

use spinview_core::{
    Camera, ControlAction, Rgb, RotationMode, ShapeKind, Transform, Viewer,
};

/// Floats emitted per shaded triangle: three screen vertices plus a shade
const TRIANGLE_STRIDE: usize = 7;
/// Floats emitted per wireframe edge segment
const EDGE_STRIDE: usize = 4;

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer,
    camera: Camera,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl WebViewer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> WebViewer {
        WebViewer {
            viewer: Viewer::default(),
            camera: Camera::new(width, height),
            width,
            height,
        }
    }

    /// Advance auto-rotation by one animation frame
    pub fn tick(&mut self) {
        self.viewer.tick();
    }

    /// Track a canvas resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.camera.resize(width, height);
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.viewer.apply(ControlAction::Rotate { dx, dy });
    }

    pub fn reset_rotation(&mut self) {
        self.viewer.apply(ControlAction::ResetRotation);
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), JsValue> {
        let color = Rgb::parse(color).map_err(js_err)?;
        self.viewer.apply(ControlAction::SetColor(color));
        Ok(())
    }

    pub fn set_shape(&mut self, shape: &str) -> Result<(), JsValue> {
        let shape: ShapeKind = shape.parse().map_err(js_err)?;
        self.viewer.apply(ControlAction::SetShape(shape));
        Ok(())
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.viewer.apply(ControlAction::SetWireframe(wireframe));
    }

    pub fn toggle_wireframe(&mut self) {
        self.viewer.apply(ControlAction::ToggleWireframe);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.viewer.apply(ControlAction::SetSpeed(speed));
    }

    pub fn speed_up(&mut self) {
        self.viewer.apply(ControlAction::SpeedUp);
    }

    pub fn speed_down(&mut self) {
        self.viewer.apply(ControlAction::SpeedDown);
    }

    pub fn toggle_help(&mut self) {
        self.viewer.apply(ControlAction::ToggleHelp);
    }

    pub fn toggle_light_mode(&mut self) {
        self.viewer.apply(ControlAction::ToggleLightMode);
    }

    // Snapshot accessors polled by browser test harnesses

    pub fn current_color(&self) -> String {
        self.viewer.config().color.to_hex()
    }

    pub fn current_shape(&self) -> String {
        self.viewer.config().shape.as_str().to_string()
    }

    pub fn is_wireframe(&self) -> bool {
        self.viewer.config().wireframe
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.viewer.rotation_mode() == RotationMode::Auto
    }

    pub fn rotation_x(&self) -> f32 {
        self.viewer.rotation().x
    }

    pub fn rotation_y(&self) -> f32 {
        self.viewer.rotation().y
    }

    pub fn rotation_speed(&self) -> f32 {
        self.viewer.config().rotation_speed
    }

    pub fn help_visible(&self) -> bool {
        self.viewer.help_visible()
    }

    pub fn light_mode(&self) -> bool {
        self.viewer.light_mode()
    }

    /// Bumps on every color/wireframe/shape change; the host compares
    /// generations and rebuilds its drawing surface instead of patching it.
    pub fn scene_generation(&self) -> u32 {
        self.viewer.scene_generation() as u32
    }

    /// Projected, shaded triangles for the filled material:
    /// `[x0, y0, x1, y1, x2, y2, shade]` per triangle, screen coordinates.
    pub fn frame_triangles(&self) -> Vec<f32> {
        let model = Transform::rotation_matrix(self.viewer.rotation());
        let light_dir = Vector3::new(0.4, 0.6, 1.0).normalize();
        let mut out = Vec::with_capacity(self.viewer.mesh().triangle_count() * TRIANGLE_STRIDE);

        'triangles: for triangle in &self.viewer.mesh().triangles {
            let mut screen = [(0.0_f32, 0.0_f32); 3];
            for (i, vertex) in triangle.vertices.iter().enumerate() {
                match self.camera.project_to_screen(
                    &vertex.position,
                    &model,
                    self.width,
                    self.height,
                ) {
                    Some((x, y, _)) => screen[i] = (x, y),
                    None => continue 'triangles,
                }
            }
            let normal = model.transform_vector(&triangle.face_normal());
            let shade = normal.dot(&light_dir).max(0.0);

            for (x, y) in screen {
                out.push(x);
                out.push(y);
            }
            out.push(shade);
        }
        out
    }

    /// Projected edge segments for the wireframe material:
    /// `[x0, y0, x1, y1]` per segment, screen coordinates.
    pub fn frame_edges(&self) -> Vec<f32> {
        let model = Transform::rotation_matrix(self.viewer.rotation());
        let mut out = Vec::with_capacity(self.viewer.mesh().triangle_count() * 3 * EDGE_STRIDE);

        'triangles: for triangle in &self.viewer.mesh().triangles {
            let mut screen = [(0.0_f32, 0.0_f32); 3];
            for (i, vertex) in triangle.vertices.iter().enumerate() {
                match self.camera.project_to_screen(
                    &vertex.position,
                    &model,
                    self.width,
                    self.height,
                ) {
                    Some((x, y, _)) => screen[i] = (x, y),
                    None => continue 'triangles,
                }
            }
            for i in 0..3 {
                let (x0, y0) = screen[i];
                let (x1, y1) = screen[(i + 1) % 3];
                out.push(x0);
                out.push(y0);
                out.push(x1);
                out.push(y1);
            }
        }
        out
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    web_sys::console::log_1(&"spinview-web ready".into());
}
