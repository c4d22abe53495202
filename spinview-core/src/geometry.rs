/// Geometry primitives for mesh construction and rendering
use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    pub fn from_parts(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Build a flat-shaded triangle: every vertex carries the face normal
    /// implied by the winding order.
    pub fn flat(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Self::new(
            Vertex::from_parts(a, normal),
            Vertex::from_parts(b, normal),
            Vertex::from_parts(c, normal),
        )
    }

    /// Face normal from the triangle's winding order
    pub fn face_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Add a quad as two triangles sharing one normal
    pub fn add_quad(&mut self, corners: [Point3<f32>; 4], normal: Vector3<f32>) {
        let v0 = Vertex::from_parts(corners[0], normal);
        let v1 = Vertex::from_parts(corners[1], normal);
        let v2 = Vertex::from_parts(corners[2], normal);
        let v3 = Vertex::from_parts(corners[3], normal);
        self.add_triangle(Triangle::new(v0, v1, v2));
        self.add_triangle(Triangle::new(v0, v2, v3));
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_triangle_normal() {
        let t = Triangle::flat(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        for v in &t.vertices {
            assert_relative_eq!(v.normal.z, 1.0, epsilon = 1e-6);
        }
        assert_relative_eq!(t.face_normal().z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quad_splits_into_two_triangles() {
        let mut mesh = Mesh::new();
        mesh.add_quad(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            Vector3::new(0.0, 0.0, 1.0),
        );
        assert_eq!(mesh.triangle_count(), 2);
    }
}
