//! Sampling lattice and per-cube dual vertices.

use dynamesh_core::{DynameshError, Mesh, PrimAABox, Result, INVALID_INDEX};
use glam::{UVec3, Vec3};

use super::tables::{
    CORNERS_BY_EDGE, EDGES_BY_FACE, NON_MANIFOLD_CONFIG, VERTEX_SLOTS_BY_CONFIGURATION,
};

/// Returns whether the surface crosses between two samples.
pub(super) fn is_intersecting(s1: f32, s2: f32) -> bool {
    (s1 < 0.0 && s2 >= 0.0) || (s1 >= 0.0 && s2 < 0.0)
}

/// Number of dual vertices a configuration needs when it is not collapsed.
fn num_vertices(configuration: u8) -> usize {
    VERTEX_SLOTS_BY_CONFIGURATION[configuration as usize]
        .iter()
        .map(|&slot| slot + 1)
        .max()
        .map_or(0, |n| n as usize)
}

/// Index of `(x, y, z)` in a row-major lattice of size `n`, x varying fastest.
fn linear_index(n: UVec3, x: u32, y: u32, z: u32) -> usize {
    let (nx, ny) = (n.x as usize, n.y as usize);
    z as usize * nx * ny + y as usize * nx + x as usize
}

/// Opposite face of each cube face, by face index.
fn opposite_face(face: usize) -> usize {
    match face {
        0 => 1,
        1 => 0,
        2 => 3,
        3 => 2,
        4 => 5,
        _ => 4,
    }
}

#[derive(Debug, Clone, Default)]
pub(super) struct Cube {
    pub(super) configuration: u8,
    pub(super) vertex: Vec3,
    /// Mesh vertex per slot; empty if no edge of the cube crosses the surface.
    pub(super) mesh_vertices: Vec<u32>,
    pub(super) non_manifold: bool,
}

impl Cube {
    pub(super) fn is_non_manifold_config(&self) -> bool {
        NON_MANIFOLD_CONFIG[self.configuration as usize]
    }

    /// Flagged configurations share a single vertex unless a neighbour forbids it.
    pub(super) fn collapses(&self) -> bool {
        self.is_non_manifold_config() && !self.non_manifold
    }

    /// Returns the mesh vertex placed for the crossing at `edge`.
    fn mesh_vertex(&self, edge: usize) -> u32 {
        let slot = VERTEX_SLOTS_BY_CONFIGURATION[self.configuration as usize][edge];
        assert!(slot >= 0, "edge {edge} does not cross the surface");
        let slot = if self.collapses() { 0 } else { slot as usize };
        self.mesh_vertices[slot]
    }

    /// Returns the face whose four edges all carry a vertex.
    pub(super) fn ambiguous_face(&self) -> Option<usize> {
        let slots = &VERTEX_SLOTS_BY_CONFIGURATION[self.configuration as usize];
        EDGES_BY_FACE
            .iter()
            .position(|edges| edges.iter().all(|&e| slots[e] != -1))
    }
}

/// Regular sampling lattice padded around a bounding box.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    resolution: f32,
    sample_min: Vec3,
    num_samples: UVec3,
    num_cubes: UVec3,
    pub(super) samples: Vec<f32>,
    pub(super) cubes: Vec<Cube>,
}

impl Grid {
    /// Pads `bounds` by one cell plus `epsilon` on every side.
    ///
    /// Fails if the padded bounds are not finite or the lattice has more than
    /// `u32::MAX` samples.
    pub(super) fn new(bounds: &PrimAABox, resolution: f32, epsilon: f32) -> Result<Self> {
        let padding = Vec3::splat(epsilon + resolution);
        let min = bounds.minimum() - padding;
        let max = bounds.maximum() + padding;
        let invalid = || DynameshError::InvalidBounds {
            minimum: bounds.minimum(),
            maximum: bounds.maximum(),
        };
        if !(min.is_finite() && max.is_finite()) {
            return Err(invalid());
        }

        let counts = Vec3::ONE + ((max - min) / resolution).ceil();
        if !counts.is_finite() || counts.max_element() >= u32::MAX as f32 {
            return Err(invalid());
        }
        let num_samples = UVec3::new(counts.x as u32, counts.y as u32, counts.z as u32);
        let num_cubes = num_samples - UVec3::ONE;

        let total_samples = num_samples
            .x
            .checked_mul(num_samples.y)
            .and_then(|n| n.checked_mul(num_samples.z))
            .ok_or_else(invalid)?;
        let total_cubes = num_cubes.x * num_cubes.y * num_cubes.z;

        Ok(Self {
            resolution,
            sample_min: min,
            num_samples,
            num_cubes,
            samples: vec![f32::MAX; total_samples as usize],
            cubes: vec![Cube::default(); total_cubes as usize],
        })
    }

    pub(super) fn num_samples(&self) -> UVec3 {
        self.num_samples
    }

    pub(super) fn num_cubes(&self) -> UVec3 {
        self.num_cubes
    }

    pub(super) fn sample_pos(&self, x: u32, y: u32, z: u32) -> Vec3 {
        debug_assert!(UVec3::new(x, y, z).cmplt(self.num_samples).all());
        self.sample_min + Vec3::new(x as f32, y as f32, z as f32) * self.resolution
    }

    pub(super) fn sample_index(&self, x: u32, y: u32, z: u32) -> usize {
        linear_index(self.num_samples, x, y, z)
    }

    pub(super) fn cube_index(&self, x: u32, y: u32, z: u32) -> usize {
        linear_index(self.num_cubes, x, y, z)
    }

    /// Sample indices of the 8 corners of cube `(x, y, z)`.
    pub(super) fn corner_sample_indices(&self, x: u32, y: u32, z: u32) -> [usize; 8] {
        std::array::from_fn(|corner| {
            let corner = corner as u32;
            self.sample_index(x + (corner & 1), y + ((corner >> 1) & 1), z + ((corner >> 2) & 1))
        })
    }

    /// Iterates all cube coordinates in index order.
    pub(super) fn cube_coords(&self) -> impl Iterator<Item = (u32, u32, u32)> {
        let n = self.num_cubes;
        (0..n.z).flat_map(move |z| (0..n.y).flat_map(move |y| (0..n.x).map(move |x| (x, y, z))))
    }

    /// Iterates all sample coordinates in index order.
    pub(super) fn sample_coords(&self) -> impl Iterator<Item = (u32, u32, u32)> {
        let n = self.num_samples;
        (0..n.z).flat_map(move |z| (0..n.y).flat_map(move |y| (0..n.x).map(move |x| (x, y, z))))
    }

    // === Classification ===

    fn set_cube_vertex(&mut self, x: u32, y: u32, z: u32) {
        let indices = self.corner_sample_indices(x, y, z);
        let samples = indices.map(|i| self.samples[i]);
        let origin = self.sample_pos(x, y, z);
        let positions: [Vec3; 8] = std::array::from_fn(|corner| {
            let offset = UVec3::new(corner as u32 & 1, (corner as u32 >> 1) & 1, corner as u32 >> 2);
            origin + offset.as_vec3() * self.resolution
        });

        let mut configuration = 0u8;
        for (corner, &sample) in samples.iter().enumerate() {
            if sample < 0.0 {
                configuration |= 1 << corner;
            }
        }

        let mut vertex = Vec3::ZERO;
        let mut num_crossed_edges = 0;
        for [c1, c2] in CORNERS_BY_EDGE {
            let (s1, s2) = (samples[c1], samples[c2]);
            if is_intersecting(s1, s2) {
                let factor = s1 / (s1 - s2);
                vertex += positions[c1] + (positions[c2] - positions[c1]) * factor;
                num_crossed_edges += 1;
            }
        }

        let i = self.cube_index(x, y, z);
        let cube = &mut self.cubes[i];
        cube.configuration = configuration;
        cube.non_manifold = false;
        if num_crossed_edges > 0 {
            cube.vertex = vertex / num_crossed_edges as f32;
            cube.mesh_vertices = vec![INVALID_INDEX; num_vertices(configuration)];
        } else {
            cube.mesh_vertices.clear();
        }
    }

    /// Classifies every cube and places its dual vertex.
    pub(super) fn set_cube_vertices(&mut self) {
        let coords: Vec<_> = self.cube_coords().collect();
        for (x, y, z) in coords {
            self.set_cube_vertex(x, y, z);
        }
    }

    /// Returns the neighbour of cube `(x, y, z)` across `face`, if inside the grid.
    fn neighbour_across(&self, x: u32, y: u32, z: u32, face: usize) -> Option<usize> {
        let n = self.num_cubes;
        let (x, y, z) = match face {
            0 => (x, y.checked_sub(1)?, z),
            1 => (x, (y + 1 < n.y).then_some(y + 1)?, z),
            2 => (x.checked_sub(1)?, y, z),
            3 => ((x + 1 < n.x).then_some(x + 1)?, y, z),
            4 => (x, y, z.checked_sub(1)?),
            _ => (x, y, (z + 1 < n.z).then_some(z + 1)?),
        };
        Some(self.cube_index(x, y, z))
    }

    /// Keeps flagged cubes split when the face-adjacent cube is flagged across the same face.
    pub(super) fn resolve_non_manifolds(&mut self) {
        let coords: Vec<_> = self.cube_coords().collect();
        let mut num_split = 0;

        for (x, y, z) in coords {
            let i = self.cube_index(x, y, z);
            let cube = &self.cubes[i];
            if !cube.is_non_manifold_config() {
                continue;
            }
            let Some(face) = cube.ambiguous_face() else {
                continue;
            };
            let split = self.neighbour_across(x, y, z, face).is_some_and(|j| {
                let other = &self.cubes[j];
                other.is_non_manifold_config() && other.ambiguous_face() == Some(opposite_face(face))
            });
            self.cubes[i].non_manifold = split;
            num_split += usize::from(split);
        }
        if num_split > 0 {
            log::debug!("kept {num_split} ambiguous cubes split");
        }
    }

    // === Meshing ===

    fn add_cube_vertices(&mut self, mesh: &mut Mesh) {
        for cube in &mut self.cubes {
            let count = if cube.collapses() { 1 } else { cube.mesh_vertices.len() };
            for i in 0..count.min(cube.mesh_vertices.len()) {
                cube.mesh_vertices[i] = mesh.add_vertex(cube.vertex);
            }
        }
    }

    fn add_quad(&self, mesh: &mut Mesh, dim: usize, lower_outside: bool, cubes: [usize; 4]) {
        let [i, iu, iuv, iv] = cubes;
        let [e1, e2, e3, e4] = match dim {
            0 => [0, 3, 9, 6],
            1 => [1, 7, 10, 4],
            _ => [2, 5, 11, 8],
        };
        let v1 = self.cubes[i].mesh_vertex(e1);
        let mut v2 = self.cubes[iu].mesh_vertex(e2);
        let v3 = self.cubes[iuv].mesh_vertex(e3);
        let mut v4 = self.cubes[iv].mesh_vertex(e4);

        if lower_outside {
            std::mem::swap(&mut v2, &mut v4);
        }
        let d13 = mesh.vertex(v1).distance_squared(mesh.vertex(v3));
        let d24 = mesh.vertex(v2).distance_squared(mesh.vertex(v4));
        if d13 <= d24 {
            mesh.add_triangle(v1, v2, v3);
            mesh.add_triangle(v1, v3, v4);
        } else {
            mesh.add_triangle(v2, v3, v4);
            mesh.add_triangle(v2, v4, v1);
        }
    }

    /// Emits a quad around the lattice edge leaving sample `(x, y, z)` along `dim`.
    fn add_faces(&self, mesh: &mut Mesh, dim: usize, x: u32, y: u32, z: u32) {
        let mut next = [x, y, z];
        next[dim] += 1;
        let s1 = self.samples[self.sample_index(x, y, z)];
        let s2 = self.samples[self.sample_index(next[0], next[1], next[2])];
        if !is_intersecting(s1, s2) {
            return;
        }

        let step_back = |axes: &[usize]| {
            let mut c = [x, y, z];
            for &axis in axes {
                c[axis] -= 1;
            }
            self.cube_index(c[0], c[1], c[2])
        };
        let u = (dim + 1) % 3;
        let v = (dim + 2) % 3;
        let cubes = [step_back(&[]), step_back(&[u]), step_back(&[u, v]), step_back(&[v])];
        self.add_quad(mesh, dim, s1 >= 0.0, cubes);
    }

    /// Builds the triangle soup from the classified cubes.
    pub(super) fn make_mesh(&mut self) -> Mesh {
        let mut mesh = Mesh::new();
        self.add_cube_vertices(&mut mesh);

        for (x, y, z) in self.cube_coords() {
            if y > 0 && z > 0 {
                self.add_faces(&mut mesh, 0, x, y, z);
            }
            if x > 0 && z > 0 {
                self.add_faces(&mut mesh, 1, x, y, z);
            }
            if x > 0 && y > 0 {
                self.add_faces(&mut mesh, 2, x, y, z);
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_signs(configuration: u8) -> [f32; 8] {
        std::array::from_fn(|c| if configuration & (1 << c) != 0 { -1.0 } else { 1.0 })
    }

    #[test]
    fn test_lattice_dimensions() {
        let bounds = PrimAABox::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0));
        let grid = Grid::new(&bounds, 0.5, 0.0).unwrap();
        assert_eq!(grid.num_samples(), UVec3::new(5, 7, 3));
        assert_eq!(grid.num_cubes(), UVec3::new(4, 6, 2));
        assert_eq!(grid.samples.len(), 5 * 7 * 3);
        assert_eq!(grid.cubes.len(), 4 * 6 * 2);
        assert_eq!(grid.sample_pos(0, 0, 0), Vec3::new(-0.5, -0.5, -0.5));
        assert_eq!(grid.sample_pos(2, 2, 1), Vec3::new(0.5, 0.5, 0.0));
        assert!(grid.samples.iter().all(|&s| s == f32::MAX));
    }

    #[test]
    fn test_unsampleable_bounds() {
        let unit = PrimAABox::new(Vec3::ZERO, Vec3::ONE);
        assert!(Grid::new(&unit, f32::NAN, 0.0).is_err());

        let infinite = PrimAABox::new(Vec3::splat(f32::NEG_INFINITY), Vec3::splat(f32::INFINITY));
        assert!(matches!(
            Grid::new(&infinite, 0.5, 0.0),
            Err(DynameshError::InvalidBounds { .. })
        ));

        // 2e8 samples per axis fit a u32, their product does not
        let huge = PrimAABox::from_center(Vec3::ZERO, 2e5);
        assert!(matches!(
            Grid::new(&huge, 1e-3, 0.0),
            Err(DynameshError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_indices() {
        let bounds = PrimAABox::new(Vec3::ZERO, Vec3::ONE);
        let grid = Grid::new(&bounds, 1.0, 0.0).unwrap();
        let n = grid.num_samples();
        assert_eq!(n, UVec3::splat(4));
        assert_eq!(grid.sample_index(1, 2, 3), 3 * 16 + 2 * 4 + 1);
        assert_eq!(grid.cube_index(1, 2, 0), 2 * 3 + 1);

        let corners = grid.corner_sample_indices(0, 0, 0);
        assert_eq!(corners, [0, 1, 4, 5, 16, 17, 20, 21]);

        let coords: Vec<_> = grid.sample_coords().collect();
        assert_eq!(coords.len(), 64);
        for (i, &(x, y, z)) in coords.iter().enumerate() {
            assert_eq!(grid.sample_index(x, y, z), i);
        }
    }

    /// Test that the slot table marks exactly the edges whose corner signs differ.
    #[test]
    fn test_slot_table_matches_corner_signs() {
        for configuration in 0..=255u8 {
            let signs = corner_signs(configuration);
            let slots = &VERTEX_SLOTS_BY_CONFIGURATION[configuration as usize];
            for (edge, [c1, c2]) in CORNERS_BY_EDGE.iter().enumerate() {
                let crosses = is_intersecting(signs[*c1], signs[*c2]);
                assert_eq!(crosses, slots[edge] != -1, "configuration {configuration}");
            }
        }
    }

    /// Test that every flagged configuration has an ambiguous face and two vertices.
    #[test]
    fn test_non_manifold_configurations() {
        let flagged: Vec<u8> = (0..=255u8)
            .filter(|&c| NON_MANIFOLD_CONFIG[c as usize])
            .collect();
        assert_eq!(flagged.len(), 36);

        for configuration in flagged {
            let cube = Cube {
                configuration,
                ..Cube::default()
            };
            assert!(cube.ambiguous_face().is_some(), "configuration {configuration}");
            assert_eq!(num_vertices(configuration), 2);
        }
        assert_eq!(num_vertices(0), 0);
        assert_eq!(num_vertices(255), 0);
        assert_eq!(num_vertices(1), 1);
    }

    #[test]
    fn test_cube_vertex_is_average_of_crossings() {
        let bounds = PrimAABox::new(Vec3::ZERO, Vec3::ZERO);
        let mut grid = Grid::new(&bounds, 1.0, 0.0).unwrap();
        grid.samples.fill(1.0);
        // corner 0 of cube (1,1,1) is inside
        let i = grid.sample_index(1, 1, 1);
        grid.samples[i] = -1.0;
        grid.set_cube_vertices();

        let cube = &grid.cubes[grid.cube_index(1, 1, 1)];
        assert_eq!(cube.configuration, 1);
        assert_eq!(cube.mesh_vertices.len(), 1);
        // crossings halfway along the three edges leaving corner 0
        let corner = grid.sample_pos(1, 1, 1);
        let expected = corner + Vec3::splat(0.5 / 3.0);
        assert!(cube.vertex.distance(expected) < 1e-6);

        // the same sample is corner 7 of cube (0,0,0)
        let opposite = &grid.cubes[grid.cube_index(0, 0, 0)];
        assert_eq!(opposite.configuration, 1 << 7);
    }

    #[test]
    fn test_single_inside_sample_gives_closed_surface() {
        let bounds = PrimAABox::new(Vec3::ZERO, Vec3::ZERO);
        let mut grid = Grid::new(&bounds, 1.0, 0.0).unwrap();
        grid.samples.fill(1.0);
        let i = grid.sample_index(1, 1, 1);
        grid.samples[i] = -1.0;
        grid.set_cube_vertices();
        grid.resolve_non_manifolds();
        let mesh = grid.make_mesh();

        // one quad per lattice edge leaving the inside sample
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_triangles(), 12);
        assert!(dynamesh_core::mesh_util::check_consistency(&mesh));

        let center = grid.sample_pos(1, 1, 1);
        for t in 0..mesh.num_triangles() {
            let [i1, i2, i3] = mesh.triangle(t);
            let tri = dynamesh_core::PrimTriangle::new(mesh.vertex(i1), mesh.vertex(i2), mesh.vertex(i3));
            assert!(tri.normal().dot(tri.center() - center) > 0.0, "triangle {t} faces inwards");
        }
    }
}
