/// Depth-buffered ASCII rasterizer for the viewer page
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;

use spinview_core::{Camera, Mesh, Rgb, Triangle};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Glyph used for wireframe edges
const WIRE_GLYPH: char = '#';

/// Minimum ambient term so unlit faces stay visible
const AMBIENT: f32 = 0.15;

/// Converts the current mesh into a grid of colored characters. The whole
/// renderer is rebuilt whenever the surface resizes or the scene changes;
/// it is never patched in place.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Option<Rgb>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        for i in 0..self.char_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = None;
        }
    }

    /// Rasterize the mesh with diffuse shading in the configured color
    pub fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera, color: Rgb) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera, color);
        }
    }

    /// Draw every triangle edge in the flat configured color, no hidden-line
    /// removal, matching a wireframe material.
    pub fn render_wireframe(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        color: Rgb,
    ) {
        'triangles: for triangle in &mesh.triangles {
            let mut screen = Vec::with_capacity(3);
            for vertex in &triangle.vertices {
                match camera.project_to_screen(
                    &vertex.position,
                    model_matrix,
                    self.width as u32,
                    self.height as u32,
                ) {
                    Some(coords) => screen.push(coords),
                    None => continue 'triangles,
                }
            }
            for i in 0..3 {
                let (x0, y0, _) = screen[i];
                let (x1, y1, _) = screen[(i + 1) % 3];
                self.draw_line(x0, y0, x1, y1, color);
            }
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        color: Rgb,
    ) {
        // Project vertices to screen space
        let mut screen_coords = Vec::with_capacity(3);
        for vertex in &triangle.vertices {
            if let Some(coords) = camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                screen_coords.push(coords);
            } else {
                return; // Triangle is clipped
            }
        }

        // Shade with the rotated face normal so brightness follows the spin
        let normal = model_matrix.transform_vector(&triangle.face_normal());
        let light_dir = Vector3::new(0.4, 0.6, 1.0).normalize();
        let brightness = normal.dot(&light_dir).max(0.0);

        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];
        let shaded = color.scale(AMBIENT + (1.0 - AMBIENT) * brightness);

        self.rasterize_triangle(&screen_coords, character, shaded);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32)], character: char, color: Rgb) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box, clipped to the surface
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = Some(color);
                        }
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb) {
        let mut x = x0 as i32;
        let mut y = y0 as i32;
        let x_end = x1 as i32;
        let y_end = y1 as i32;

        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                let idx = y as usize * self.width + x as usize;
                self.char_buffer[idx] = WIRE_GLYPH;
                self.color_buffer[idx] = Some(color);
            }
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    /// Count of cells something was rasterized into
    pub fn filled_cells(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W, light_mode: bool) -> std::io::Result<()> {
        let blank = if light_mode {
            Color::Rgb {
                r: 0x22,
                g: 0x22,
                b: 0x22,
            }
        } else {
            Color::DarkGrey
        };

        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = match self.color_buffer[idx] {
                    Some(rgb) => Color::Rgb {
                        r: rgb.r,
                        g: rgb.g,
                        b: rgb.b,
                    },
                    None => blank,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Matrix4;
    use spinview_core::ShapeKind;

    #[test]
    fn test_clear_resets_buffers() {
        let mut renderer = AsciiRenderer::new(8, 4);
        renderer.draw_line(0.0, 0.0, 7.0, 3.0, Rgb::new(255, 0, 0));
        assert!(renderer.filled_cells() > 0);

        renderer.clear();
        assert_eq!(renderer.filled_cells(), 0);
    }

    #[test]
    fn test_filled_cube_rasterizes_cells() {
        let mesh = Mesh::from_shape(ShapeKind::Cube);
        let camera = Camera::new(40, 20);
        let mut renderer = AsciiRenderer::new(40, 20);

        renderer.render_mesh(&mesh, &Matrix4::identity(), &camera, Rgb::new(0, 255, 0));
        assert!(renderer.filled_cells() > 0);
    }

    #[test]
    fn test_wireframe_leaves_triangle_interior_empty() {
        let color = Rgb::new(0, 255, 0);
        let corners = [(0.0, 0.0, 0.5), (18.0, 0.0, 0.5), (0.0, 18.0, 0.5)];

        let mut filled = AsciiRenderer::new(20, 20);
        filled.rasterize_triangle(&corners, '#', color);

        let mut wire = AsciiRenderer::new(20, 20);
        for i in 0..3 {
            let (x0, y0, _) = corners[i];
            let (x1, y1, _) = corners[(i + 1) % 3];
            wire.draw_line(x0, y0, x1, y1, color);
        }

        // (6, 6) is inside the triangle but on none of its edges
        let interior = 6 * 20 + 6;
        assert_ne!(filled.char_buffer[interior], ' ');
        assert_eq!(wire.char_buffer[interior], ' ');
        assert!(wire.filled_cells() > 0);
    }

    #[test]
    fn test_wireframe_cube_rasterizes_cells() {
        let mesh = Mesh::from_shape(ShapeKind::Cube);
        let camera = Camera::new(40, 20);
        let mut wire = AsciiRenderer::new(40, 20);
        wire.render_wireframe(&mesh, &Matrix4::identity(), &camera, Rgb::new(0, 255, 0));
        assert!(wire.filled_cells() > 0);
    }

    #[test]
    fn test_depth_test_keeps_nearer_triangle() {
        let mut renderer = AsciiRenderer::new(10, 10);
        let near = [(0.0, 0.0, 0.1), (9.0, 0.0, 0.1), (0.0, 9.0, 0.1)];
        let far = [(0.0, 0.0, 0.9), (9.0, 0.0, 0.9), (0.0, 9.0, 0.9)];

        renderer.rasterize_triangle(&far, 'f', Rgb::new(1, 1, 1));
        renderer.rasterize_triangle(&near, 'n', Rgb::new(2, 2, 2));
        assert!(renderer.char_buffer.contains(&'n'));
        assert!(!renderer.char_buffer.contains(&'f'));

        // Drawing the far triangle again must not overwrite the near one
        renderer.rasterize_triangle(&far, 'f', Rgb::new(1, 1, 1));
        assert!(!renderer.char_buffer.contains(&'f'));
    }

    #[test]
    fn test_draw_emits_theme_background() {
        let renderer = AsciiRenderer::new(4, 2);
        let mut dark = Vec::new();
        let mut light = Vec::new();
        renderer.draw(&mut dark, false).unwrap();
        renderer.draw(&mut light, true).unwrap();
        assert_ne!(dark, light);
    }
}
