//! Flat triangle geometry: vertex positions, vertex normals and an index buffer.
//!
//! [`Mesh`] is the storage layer underneath the dynamic mesh. It knows nothing about
//! free slots or adjacency; every three consecutive indices form one triangle.

use std::collections::HashMap;

use glam::Vec3;

use crate::error::{DynameshError, Result};
use crate::primitive::PrimAABox;

/// Contiguous vertex and index arrays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

/// Snapshot of a mesh as plain arrays, ready to hand to an upload sink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (every 3 consecutive indices form a triangle).
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Positions as raw bytes.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as raw bytes.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Indices as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from external positions and a flat index buffer.
    ///
    /// Normals start at zero.
    pub fn from_buffers(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(DynameshError::IncompleteTriangle(indices.len()));
        }
        if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
            return Err(DynameshError::NonFiniteVertex(i));
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(DynameshError::IndexOutOfRange {
                index,
                num_vertices: positions.len(),
            });
        }
        let normals = vec![Vec3::ZERO; positions.len()];
        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    /// Like [`Mesh::from_buffers`], with one normal per position.
    pub fn from_buffers_with_normals(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Result<Self> {
        if normals.len() != positions.len() {
            return Err(DynameshError::SizeMismatch {
                expected: positions.len(),
                actual: normals.len(),
            });
        }
        if let Some(i) = normals.iter().position(|n| !n.is_finite()) {
            return Err(DynameshError::NonFiniteVertex(i));
        }
        let mut mesh = Self::from_buffers(positions, indices)?;
        mesh.normals = normals;
        Ok(mesh)
    }

    /// Returns the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of indices (three per triangle).
    pub fn num_indices(&self) -> usize {
        self.indices.len()
    }

    /// Returns the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns true if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the position of vertex `i`.
    pub fn vertex(&self, i: u32) -> Vec3 {
        self.positions[i as usize]
    }

    /// Returns the normal of vertex `i`.
    pub fn normal(&self, i: u32) -> Vec3 {
        self.normals[i as usize]
    }

    /// Returns the index stored at slot `i` of the index buffer.
    pub fn index(&self, i: usize) -> u32 {
        self.indices[i]
    }

    /// Returns the three vertex indices of triangle `t`.
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        [
            self.indices[3 * t],
            self.indices[3 * t + 1],
            self.indices[3 * t + 2],
        ]
    }

    /// Appends a vertex with a zero normal and returns its index.
    pub fn add_vertex(&mut self, position: Vec3) -> u32 {
        self.add_vertex_with_normal(position, Vec3::ZERO)
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex_with_normal(&mut self, position: Vec3, normal: Vec3) -> u32 {
        self.positions.push(position);
        self.normals.push(normal);
        to_u32(self.positions.len() - 1)
    }

    /// Appends one index and returns its slot in the index buffer.
    pub fn add_index(&mut self, index: u32) -> usize {
        self.indices.push(index);
        self.indices.len() - 1
    }

    /// Appends one triangle.
    pub fn add_triangle(&mut self, i1: u32, i2: u32, i3: u32) {
        self.indices.extend_from_slice(&[i1, i2, i3]);
    }

    pub fn set_vertex(&mut self, i: u32, position: Vec3) {
        self.positions[i as usize] = position;
    }

    pub fn set_normal(&mut self, i: u32, normal: Vec3) {
        self.normals[i as usize] = normal;
    }

    pub fn set_index(&mut self, slot: usize, index: u32) {
        self.indices[slot] = index;
    }

    /// Truncates the vertex arrays to `n` vertices.
    pub fn shrink_vertices(&mut self, n: usize) {
        assert!(n <= self.positions.len(), "cannot grow vertices by shrinking");
        self.positions.truncate(n);
        self.normals.truncate(n);
    }

    /// Truncates the index buffer to `n` indices.
    pub fn shrink_indices(&mut self, n: usize) {
        assert!(n <= self.indices.len(), "cannot grow indices by shrinking");
        self.indices.truncate(n);
    }

    /// Removes all geometry.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.normals.clear();
        self.indices.clear();
    }

    /// Returns the bounding box of the vertices, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<PrimAABox> {
        let first = *self.positions.first()?;
        let (min, max) = self
            .positions
            .iter()
            .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p)));
        Some(PrimAABox::new(min, max))
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> Vec3 {
        self.bounds().map_or(Vec3::ZERO, |b| b.center())
    }

    /// Centres the mesh at the origin and scales it so its largest dimension is 2.
    pub fn normalize(&mut self) {
        let Some(bounds) = self.bounds() else {
            return;
        };
        let center = bounds.center();
        let extent = bounds.max_dim_extent();
        let scale = if extent > 0.0 { 2.0 / extent } else { 1.0 };

        for p in &mut self.positions {
            *p = (*p - center) * scale;
        }
    }

    /// Copies the geometry into plain arrays.
    pub fn buffers(&self) -> MeshBuffers {
        MeshBuffers {
            positions: self.positions.iter().map(|p| p.to_array()).collect(),
            normals: self.normals.iter().map(|n| n.to_array()).collect(),
            indices: self.indices.clone(),
        }
    }

    /// Sets every vertex normal to its normalized position, as for shapes centred at the origin.
    fn set_radial_normals(&mut self) {
        for (n, p) in self.normals.iter_mut().zip(&self.positions) {
            *n = p.normalize_or_zero();
        }
    }

    /// Appends a quad as two triangles `(i1, i2, i3)` and `(i4, i1, i3)`.
    fn add_quad(&mut self, i1: u32, i2: u32, i3: u32, i4: u32) {
        self.add_triangle(i1, i2, i3);
        self.add_triangle(i4, i1, i3);
    }

    /// Creates an axis-aligned cube of width 1 centred at the origin.
    pub fn cube() -> Self {
        let mut mesh = Self::new();
        let d = 0.5;
        for b in 0..8u32 {
            // corner b: z from bit 0, y from bit 1, x from bit 2
            let x = if b & 4 == 0 { -d } else { d };
            let y = if b & 2 == 0 { -d } else { d };
            let z = if b & 1 == 0 { -d } else { d };
            mesh.add_vertex(Vec3::new(x, y, z));
        }
        mesh.add_quad(0, 1, 3, 2);
        mesh.add_quad(1, 5, 7, 3);
        mesh.add_quad(5, 4, 6, 7);
        mesh.add_quad(4, 0, 2, 6);
        mesh.add_quad(3, 7, 6, 2);
        mesh.add_quad(0, 4, 5, 1);
        mesh.set_radial_normals();
        mesh
    }

    /// Creates a unit UV sphere with `rings` latitude bands and `sectors` longitude bands.
    ///
    /// # Panics
    ///
    /// Panics if `rings < 2` or `sectors < 3`.
    pub fn sphere(rings: u32, sectors: u32) -> Self {
        assert!(rings > 1 && sectors > 2, "sphere needs at least 2 rings and 3 sectors");
        let mut mesh = Self::new();

        let ring_step = std::f32::consts::PI / rings as f32;
        let sector_step = std::f32::consts::TAU / sectors as f32;

        for r in 1..rings {
            let phi = ring_step * r as f32;
            for s in 0..sectors {
                let theta = sector_step * s as f32;
                mesh.add_vertex(Vec3::new(
                    theta.sin() * phi.sin(),
                    phi.cos(),
                    theta.cos() * phi.sin(),
                ));
            }
        }
        let top = mesh.add_vertex(Vec3::Y);
        let bottom = mesh.add_vertex(-Vec3::Y);

        for r in 0..rings - 2 {
            for s in 0..sectors {
                let next = (s + 1) % sectors;
                mesh.add_quad(
                    sectors * r + s,
                    sectors * (r + 1) + s,
                    sectors * (r + 1) + next,
                    sectors * r + next,
                );
            }
        }
        let last = sectors * (rings - 2);
        for s in 0..sectors {
            let next = (s + 1) % sectors;
            mesh.add_triangle(top, s, next);
            mesh.add_triangle(bottom, last + next, last + s);
        }
        mesh.set_radial_normals();
        mesh
    }

    /// Creates a cone of height 1 and base radius 1 centred at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `num_base_vertices < 3`.
    pub fn cone(num_base_vertices: u32) -> Self {
        assert!(num_base_vertices >= 3, "cone needs at least 3 base vertices");
        let n = num_base_vertices;
        let mut mesh = Self::new();
        let step = std::f32::consts::TAU / n as f32;

        for i in 0..n {
            let a = step * i as f32;
            mesh.add_vertex(Vec3::new(a.sin(), -0.5, a.cos()));
        }
        let base = mesh.add_vertex(Vec3::new(0.0, -0.5, 0.0));
        let apex = mesh.add_vertex(Vec3::new(0.0, 0.5, 0.0));

        for i in 0..n {
            let next = (i + 1) % n;
            mesh.add_triangle(i, next, apex);
            mesh.add_triangle(next, i, base);
        }
        mesh.set_radial_normals();
        mesh
    }

    /// Creates a cylinder of height 1 and radius 1 centred at the origin.
    ///
    /// # Panics
    ///
    /// Panics if `num_vertices < 3`.
    pub fn cylinder(num_vertices: u32) -> Self {
        assert!(num_vertices >= 3, "cylinder needs at least 3 vertices per ring");
        let n = num_vertices;
        let mut mesh = Self::new();
        let step = std::f32::consts::TAU / n as f32;

        for y in [-0.5, 0.5] {
            for i in 0..n {
                let a = step * i as f32;
                mesh.add_vertex(Vec3::new(a.sin(), y, a.cos()));
            }
        }
        let bottom = mesh.add_vertex(Vec3::new(0.0, -0.5, 0.0));
        let top = mesh.add_vertex(Vec3::new(0.0, 0.5, 0.0));

        for i in 0..n {
            let next = (i + 1) % n;
            mesh.add_quad(i, next, next + n, i + n);
            mesh.add_triangle(next, i, bottom);
            mesh.add_triangle(i + n, next + n, top);
        }
        mesh.set_radial_normals();
        mesh
    }

    /// Creates a unit icosphere by subdividing an icosahedron `num_subdivisions` times.
    pub fn icosphere(num_subdivisions: u32) -> Self {
        let mut mesh = Self::new();
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();

        let t = (1.0 + 5.0_f32.sqrt()) * 0.5;
        for p in [
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ] {
            mesh.add_vertex(p.normalize());
        }

        #[rustfmt::skip]
        const FACES: [[u32; 3]; 20] = [
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];
        for [i1, i2, i3] in FACES {
            mesh.subdivide_ico_face(&mut midpoints, num_subdivisions, i1, i2, i3);
        }
        mesh.set_radial_normals();
        mesh
    }

    fn subdivide_ico_face(
        &mut self,
        midpoints: &mut HashMap<(u32, u32), u32>,
        level: u32,
        i1: u32,
        i2: u32,
        i3: u32,
    ) {
        if level == 0 {
            self.add_triangle(i1, i2, i3);
            return;
        }
        let i12 = self.ico_midpoint(midpoints, i1, i2);
        let i23 = self.ico_midpoint(midpoints, i2, i3);
        let i31 = self.ico_midpoint(midpoints, i3, i1);

        self.subdivide_ico_face(midpoints, level - 1, i1, i12, i31);
        self.subdivide_ico_face(midpoints, level - 1, i2, i23, i12);
        self.subdivide_ico_face(midpoints, level - 1, i3, i31, i23);
        self.subdivide_ico_face(midpoints, level - 1, i12, i23, i31);
    }

    fn ico_midpoint(&mut self, midpoints: &mut HashMap<(u32, u32), u32>, a: u32, b: u32) -> u32 {
        let key = (a.min(b), a.max(b));
        if let Some(&i) = midpoints.get(&key) {
            return i;
        }
        let position = ((self.vertex(key.0) + self.vertex(key.1)) * 0.5).normalize();
        let i = self.add_vertex(position);
        midpoints.insert(key, i);
        i
    }
}

/// Converts a container length to a `u32` index.
///
/// # Panics
///
/// Panics if the value does not fit, i.e. the mesh outgrew 32-bit indices.
pub fn to_u32(i: usize) -> u32 {
    u32::try_from(i).expect("mesh exceeds 32-bit indices")
}
