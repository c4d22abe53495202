/// Shape catalog: the seven selectable solids and their mesh builders
use nalgebra::{Point3, Vector3};
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::geometry::{Mesh, Triangle, Vertex};

/// Lateral tessellation for the curved solids
const SEGMENTS: u32 = 24;
/// Latitude bands for the sphere, tube segments for the torus
const RINGS: u32 = 16;

/// The selectable solids, in dropdown order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Pyramid,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Dodecahedron,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Cube,
        ShapeKind::Pyramid,
        ShapeKind::Sphere,
        ShapeKind::Cylinder,
        ShapeKind::Cone,
        ShapeKind::Torus,
        ShapeKind::Dodecahedron,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Cone => "cone",
            ShapeKind::Torus => "torus",
            ShapeKind::Dodecahedron => "dodecahedron",
        }
    }

    /// The next shape in dropdown order, wrapping around
    pub fn next(&self) -> ShapeKind {
        let index = Self::ALL.iter().position(|k| k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|k| k.as_str() == s.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| Error::UnknownShape(s.to_string()))
    }
}

impl Mesh {
    /// Build the mesh for a shape. Each call produces a fresh mesh; shape
    /// selection replaces the previous geometry wholesale.
    pub fn from_shape(kind: ShapeKind) -> Mesh {
        match kind {
            ShapeKind::Cube => cube(2.0),
            ShapeKind::Pyramid => pyramid(2.0),
            ShapeKind::Sphere => sphere(1.4),
            ShapeKind::Cylinder => cylinder(1.0, 2.0),
            ShapeKind::Cone => cone(1.2, 2.0),
            ShapeKind::Torus => torus(1.0, 0.4),
            ShapeKind::Dodecahedron => dodecahedron(1.4),
        }
    }
}

fn cube(size: f32) -> Mesh {
    let h = size / 2.0;
    let mut mesh = Mesh::with_capacity(12);

    // Front
    mesh.add_quad(
        [
            Point3::new(-h, -h, h),
            Point3::new(h, -h, h),
            Point3::new(h, h, h),
            Point3::new(-h, h, h),
        ],
        Vector3::new(0.0, 0.0, 1.0),
    );
    // Back
    mesh.add_quad(
        [
            Point3::new(h, -h, -h),
            Point3::new(-h, -h, -h),
            Point3::new(-h, h, -h),
            Point3::new(h, h, -h),
        ],
        Vector3::new(0.0, 0.0, -1.0),
    );
    // Right
    mesh.add_quad(
        [
            Point3::new(h, -h, h),
            Point3::new(h, -h, -h),
            Point3::new(h, h, -h),
            Point3::new(h, h, h),
        ],
        Vector3::new(1.0, 0.0, 0.0),
    );
    // Left
    mesh.add_quad(
        [
            Point3::new(-h, -h, -h),
            Point3::new(-h, -h, h),
            Point3::new(-h, h, h),
            Point3::new(-h, h, -h),
        ],
        Vector3::new(-1.0, 0.0, 0.0),
    );
    // Top
    mesh.add_quad(
        [
            Point3::new(-h, h, h),
            Point3::new(h, h, h),
            Point3::new(h, h, -h),
            Point3::new(-h, h, -h),
        ],
        Vector3::new(0.0, 1.0, 0.0),
    );
    // Bottom
    mesh.add_quad(
        [
            Point3::new(-h, -h, -h),
            Point3::new(h, -h, -h),
            Point3::new(h, -h, h),
            Point3::new(-h, -h, h),
        ],
        Vector3::new(0.0, -1.0, 0.0),
    );

    mesh
}

fn pyramid(size: f32) -> Mesh {
    let h = size / 2.0;
    let apex = Point3::new(0.0, h, 0.0);
    let base = [
        Point3::new(-h, -h, -h),
        Point3::new(h, -h, -h),
        Point3::new(h, -h, h),
        Point3::new(-h, -h, h),
    ];

    let mut mesh = Mesh::with_capacity(6);
    mesh.add_quad(base, Vector3::new(0.0, -1.0, 0.0));
    for i in 0..4 {
        mesh.add_triangle(Triangle::flat(apex, base[(i + 1) % 4], base[i]));
    }
    mesh
}

fn sphere_vertex(radius: f32, phi: f32, theta: f32) -> Vertex {
    let normal = Vector3::new(
        phi.sin() * theta.cos(),
        phi.cos(),
        phi.sin() * theta.sin(),
    );
    Vertex::from_parts(Point3::from(normal * radius), normal)
}

fn sphere(radius: f32) -> Mesh {
    let mut mesh = Mesh::with_capacity((RINGS * SEGMENTS * 2) as usize);

    for ring in 0..RINGS {
        let phi0 = PI * ring as f32 / RINGS as f32;
        let phi1 = PI * (ring + 1) as f32 / RINGS as f32;

        for seg in 0..SEGMENTS {
            let theta0 = TAU * seg as f32 / SEGMENTS as f32;
            let theta1 = TAU * (seg + 1) as f32 / SEGMENTS as f32;

            let v00 = sphere_vertex(radius, phi0, theta0);
            let v01 = sphere_vertex(radius, phi0, theta1);
            let v10 = sphere_vertex(radius, phi1, theta0);
            let v11 = sphere_vertex(radius, phi1, theta1);

            // Pole bands collapse to single triangles
            if ring > 0 {
                mesh.add_triangle(Triangle::new(v00, v10, v11));
            }
            if ring < RINGS - 1 {
                mesh.add_triangle(Triangle::new(v00, v11, v01));
            }
        }
    }

    mesh
}

fn cylinder(radius: f32, height: f32) -> Mesh {
    let h = height / 2.0;
    let mut mesh = Mesh::with_capacity((SEGMENTS * 4) as usize);
    let top_center = Point3::new(0.0, h, 0.0);
    let bottom_center = Point3::new(0.0, -h, 0.0);

    for seg in 0..SEGMENTS {
        let theta0 = TAU * seg as f32 / SEGMENTS as f32;
        let theta1 = TAU * (seg + 1) as f32 / SEGMENTS as f32;
        let n0 = Vector3::new(theta0.cos(), 0.0, theta0.sin());
        let n1 = Vector3::new(theta1.cos(), 0.0, theta1.sin());
        let b0 = Point3::new(radius * theta0.cos(), -h, radius * theta0.sin());
        let b1 = Point3::new(radius * theta1.cos(), -h, radius * theta1.sin());
        let t0 = Point3::new(radius * theta0.cos(), h, radius * theta0.sin());
        let t1 = Point3::new(radius * theta1.cos(), h, radius * theta1.sin());

        // Smooth-shaded wall
        let v00 = Vertex::from_parts(b0, n0);
        let v01 = Vertex::from_parts(b1, n1);
        let v10 = Vertex::from_parts(t0, n0);
        let v11 = Vertex::from_parts(t1, n1);
        mesh.add_triangle(Triangle::new(v00, v10, v11));
        mesh.add_triangle(Triangle::new(v00, v11, v01));

        // Caps
        let up = Vector3::new(0.0, 1.0, 0.0);
        mesh.add_triangle(Triangle::new(
            Vertex::from_parts(top_center, up),
            Vertex::from_parts(t1, up),
            Vertex::from_parts(t0, up),
        ));
        let down = Vector3::new(0.0, -1.0, 0.0);
        mesh.add_triangle(Triangle::new(
            Vertex::from_parts(bottom_center, down),
            Vertex::from_parts(b0, down),
            Vertex::from_parts(b1, down),
        ));
    }

    mesh
}

fn cone(radius: f32, height: f32) -> Mesh {
    let h = height / 2.0;
    let apex = Point3::new(0.0, h, 0.0);
    let base_center = Point3::new(0.0, -h, 0.0);
    let mut mesh = Mesh::with_capacity((SEGMENTS * 2) as usize);

    for seg in 0..SEGMENTS {
        let theta0 = TAU * seg as f32 / SEGMENTS as f32;
        let theta1 = TAU * (seg + 1) as f32 / SEGMENTS as f32;
        let b0 = Point3::new(radius * theta0.cos(), -h, radius * theta0.sin());
        let b1 = Point3::new(radius * theta1.cos(), -h, radius * theta1.sin());

        mesh.add_triangle(Triangle::flat(apex, b1, b0));

        let down = Vector3::new(0.0, -1.0, 0.0);
        mesh.add_triangle(Triangle::new(
            Vertex::from_parts(base_center, down),
            Vertex::from_parts(b0, down),
            Vertex::from_parts(b1, down),
        ));
    }

    mesh
}

fn torus(ring_radius: f32, tube_radius: f32) -> Mesh {
    let mut mesh = Mesh::with_capacity((SEGMENTS * RINGS * 2) as usize);

    let vertex = |u: f32, v: f32| {
        let normal = Vector3::new(v.cos() * u.cos(), v.sin(), v.cos() * u.sin());
        let position = Point3::new(
            (ring_radius + tube_radius * v.cos()) * u.cos(),
            tube_radius * v.sin(),
            (ring_radius + tube_radius * v.cos()) * u.sin(),
        );
        Vertex::from_parts(position, normal)
    };

    for seg in 0..SEGMENTS {
        let u0 = TAU * seg as f32 / SEGMENTS as f32;
        let u1 = TAU * (seg + 1) as f32 / SEGMENTS as f32;
        for ring in 0..RINGS {
            let v0 = TAU * ring as f32 / RINGS as f32;
            let v1 = TAU * (ring + 1) as f32 / RINGS as f32;

            let v00 = vertex(u0, v0);
            let v01 = vertex(u0, v1);
            let v10 = vertex(u1, v0);
            let v11 = vertex(u1, v1);
            mesh.add_triangle(Triangle::new(v00, v10, v11));
            mesh.add_triangle(Triangle::new(v00, v11, v01));
        }
    }

    mesh
}

/// Dodecahedron from the golden-ratio vertex set. Faces are recovered by
/// clustering the five vertices nearest each icosahedral direction, so no
/// hard-coded face index table is needed.
fn dodecahedron(radius: f32) -> Mesh {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let inv = 1.0 / phi;
    // Every canonical vertex sits at distance sqrt(3) from the origin
    let scale = radius / 3.0_f32.sqrt();

    let mut vertices: Vec<Point3<f32>> = Vec::with_capacity(20);
    for &x in &[-1.0_f32, 1.0] {
        for &y in &[-1.0_f32, 1.0] {
            for &z in &[-1.0_f32, 1.0] {
                vertices.push(Point3::new(x, y, z));
            }
        }
    }
    for &a in &[-1.0_f32, 1.0] {
        for &b in &[-1.0_f32, 1.0] {
            vertices.push(Point3::new(0.0, a * inv, b * phi));
            vertices.push(Point3::new(a * inv, b * phi, 0.0));
            vertices.push(Point3::new(a * phi, 0.0, b * inv));
        }
    }
    let vertices: Vec<Point3<f32>> = vertices
        .iter()
        .map(|p| Point3::from(p.coords * scale))
        .collect();

    // Face normals of the dodecahedron are the vertex directions of the
    // icosahedron
    let mut face_dirs: Vec<Vector3<f32>> = Vec::with_capacity(12);
    for &a in &[-1.0_f32, 1.0] {
        for &b in &[-1.0_f32, 1.0] {
            face_dirs.push(Vector3::new(0.0, a, b * phi).normalize());
            face_dirs.push(Vector3::new(a, b * phi, 0.0).normalize());
            face_dirs.push(Vector3::new(b * phi, 0.0, a).normalize());
        }
    }

    let mut mesh = Mesh::with_capacity(36);
    for dir in face_dirs {
        // The five vertices closest to this direction form one pentagon
        let mut ranked: Vec<usize> = (0..vertices.len()).collect();
        ranked.sort_by(|&i, &j| {
            let di = vertices[i].coords.normalize().dot(&dir);
            let dj = vertices[j].coords.normalize().dot(&dir);
            dj.partial_cmp(&di).unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut face: Vec<usize> = ranked[..5].to_vec();

        // Order the pentagon counter-clockwise around the face normal
        let anchor = vertices[face[0]].coords;
        let t1 = (anchor - dir * anchor.dot(&dir)).normalize();
        let t2 = dir.cross(&t1);
        let angle = |idx: usize| {
            let v = vertices[idx].coords;
            v.dot(&t2).atan2(v.dot(&t1))
        };
        face.sort_by(|&i, &j| {
            angle(i)
                .partial_cmp(&angle(j))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for k in 1..4 {
            mesh.add_triangle(Triangle::new(
                Vertex::from_parts(vertices[face[0]], dir),
                Vertex::from_parts(vertices[face[k]], dir),
                Vertex::from_parts(vertices[face[k + 1]], dir),
            ));
        }
    }

    mesh
}
