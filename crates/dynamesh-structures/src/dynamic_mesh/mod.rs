//! Triangle mesh with incremental topology edits.
//!
//! [`DynamicMesh`] wraps a [`Mesh`] and adds per-vertex face adjacency, free-slot reuse
//! and an [`Octree`] over its faces. Vertex and face indices stay valid until the mesh is
//! pruned; [`DynamicMesh::prune_with_maps`] reports how they moved.
//!
//! Using a freed index as a live one is a programming error and panics.

mod faces;
mod geometry;
mod iteration;
mod prune;
mod query;

use dynamesh_core::mesh_util;
use dynamesh_core::{Mesh, MeshBuffers, Options, PrimPlane, PrimTriangle};
use glam::Vec3;

use crate::octree::Octree;

pub use faces::DynamicFaces;
pub use prune::compact;
pub use query::MeshIntersection;

#[derive(Debug, Clone, Default)]
struct VertexData {
    is_free: bool,
    adjacent_faces: Vec<u32>,
}

impl VertexData {
    fn live() -> Self {
        Self {
            is_free: false,
            adjacent_faces: Vec::new(),
        }
    }

    fn free() -> Self {
        Self {
            is_free: true,
            adjacent_faces: Vec::new(),
        }
    }

    fn delete_adjacent_face(&mut self, face: u32) {
        let Some(pos) = self.adjacent_faces.iter().position(|&f| f == face) else {
            panic!("face {face} is not adjacent");
        };
        self.adjacent_faces.swap_remove(pos);
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FaceData {
    is_free: bool,
}

/// Indexed triangle mesh with adjacency, free lists and a face octree.
#[derive(Debug, Clone)]
pub struct DynamicMesh {
    mesh: Mesh,
    vertex_data: Vec<VertexData>,
    vertex_visited: Vec<bool>,
    free_vertex_indices: Vec<u32>,
    face_data: Vec<FaceData>,
    face_visited: Vec<bool>,
    free_face_indices: Vec<u32>,
    octree: Octree,
    options: Options,
}

impl Default for DynamicMesh {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicMesh {
    /// Creates an empty mesh with default options.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Creates an empty mesh.
    pub fn with_options(options: Options) -> Self {
        Self {
            mesh: Mesh::new(),
            vertex_data: Vec::new(),
            vertex_visited: Vec::new(),
            free_vertex_indices: Vec::new(),
            face_data: Vec::new(),
            face_visited: Vec::new(),
            free_face_indices: Vec::new(),
            octree: Octree::with_options(&options.octree),
            options,
        }
    }

    /// Creates a mesh from a triangle soup, see [`DynamicMesh::from_mesh`].
    pub fn with_mesh(mesh: &Mesh) -> Self {
        let mut dynamic = Self::new();
        dynamic.from_mesh(mesh);
        dynamic
    }

    // === Accessors ===

    /// Returns the number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices() - self.free_vertex_indices.len()
    }

    /// Returns the number of live faces.
    pub fn num_faces(&self) -> usize {
        self.face_data.len() - self.free_face_indices.len()
    }

    /// Returns true if the mesh has no live faces.
    pub fn is_empty(&self) -> bool {
        self.num_faces() == 0
    }

    pub fn is_free_vertex(&self, i: u32) -> bool {
        self.vertex_data[i as usize].is_free
    }

    pub fn is_free_face(&self, i: u32) -> bool {
        self.face_data[i as usize].is_free
    }

    /// Returns true if there are no free vertex or face slots.
    pub fn is_pruned(&self) -> bool {
        self.free_vertex_indices.is_empty() && self.free_face_indices.is_empty()
    }

    pub fn free_vertex_indices(&self) -> &[u32] {
        &self.free_vertex_indices
    }

    pub fn free_face_indices(&self) -> &[u32] {
        &self.free_face_indices
    }

    pub fn vertex(&self, i: u32) -> Vec3 {
        self.mesh.vertex(i)
    }

    pub fn vertex_normal(&self, i: u32) -> Vec3 {
        self.mesh.normal(i)
    }

    /// Returns the number of faces adjacent to vertex `i`.
    pub fn valence(&self, i: u32) -> usize {
        self.adjacent_faces(i).len()
    }

    /// Returns the faces adjacent to vertex `i`.
    pub fn adjacent_faces(&self, i: u32) -> &[u32] {
        assert!(!self.is_free_vertex(i), "vertex {i} is free");
        &self.vertex_data[i as usize].adjacent_faces
    }

    /// Returns the vertex indices of face `i`.
    pub fn vertex_indices(&self, i: u32) -> [u32; 3] {
        assert!(!self.is_free_face(i), "face {i} is free");
        self.mesh.triangle(i as usize)
    }

    /// Returns the geometry of face `i`.
    pub fn face(&self, i: u32) -> PrimTriangle {
        let [i1, i2, i3] = self.vertex_indices(i);
        PrimTriangle::new(self.mesh.vertex(i1), self.mesh.vertex(i2), self.mesh.vertex(i3))
    }

    /// Returns the underlying geometry store, free slots included.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn octree(&self) -> &Octree {
        &self.octree
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    // === Mutation ===

    /// Adds a vertex, reusing the most recently freed slot, and returns its index.
    ///
    /// The vertex has no adjacent faces until one is added.
    pub fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        assert!(position.is_finite(), "vertex position must be finite");
        assert!(normal.is_finite(), "vertex normal must be finite");

        if let Some(index) = self.free_vertex_indices.pop() {
            self.mesh.set_vertex(index, position);
            self.mesh.set_normal(index, normal);
            self.vertex_data[index as usize] = VertexData::live();
            self.vertex_visited[index as usize] = false;
            index
        } else {
            self.vertex_data.push(VertexData::live());
            self.vertex_visited.push(false);
            self.mesh.add_vertex_with_normal(position, normal)
        }
    }

    /// Adds a face, reusing the most recently freed slot, and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if one of the vertices is free or out of range.
    pub fn add_face(&mut self, i1: u32, i2: u32, i3: u32) -> u32 {
        for i in [i1, i2, i3] {
            assert!(
                (i as usize) < self.vertex_data.len() && !self.is_free_vertex(i),
                "face references free or missing vertex {i}"
            );
        }

        let index = if let Some(index) = self.free_face_indices.pop() {
            let slot = 3 * index as usize;
            self.mesh.set_index(slot, i1);
            self.mesh.set_index(slot + 1, i2);
            self.mesh.set_index(slot + 2, i3);
            self.face_visited[index as usize] = false;
            index
        } else {
            let index = dynamesh_core::to_u32(self.face_data.len());
            self.face_data.push(FaceData::default());
            self.face_visited.push(false);
            self.mesh.add_triangle(i1, i2, i3);
            index
        };
        self.face_data[index as usize].is_free = false;

        for i in [i1, i2, i3] {
            self.vertex_data[i as usize].adjacent_faces.push(index);
        }
        self.add_face_to_octree(index);
        index
    }

    fn add_face_to_octree(&mut self, i: u32) {
        let tri = self.face(i);
        self.octree.add_element(i, tri.center(), tri.max_dim_extent());
    }

    /// Deletes all faces adjacent to vertex `i`, then frees the vertex.
    pub fn delete_vertex(&mut self, i: u32) {
        assert!(!self.is_free_vertex(i), "vertex {i} is already free");

        let mut adjacent = std::mem::take(&mut self.vertex_data[i as usize].adjacent_faces);
        // a degenerate face lists its repeated vertex twice
        adjacent.sort_unstable();
        adjacent.dedup();
        for f in adjacent {
            // the vertex' own entry was already taken
            let [i1, i2, i3] = self.mesh.triangle(f as usize);
            for v in [i1, i2, i3] {
                if v != i {
                    self.vertex_data[v as usize].delete_adjacent_face(f);
                }
            }
            self.free_face(f);
        }
        self.vertex_data[i as usize] = VertexData::free();
        self.vertex_visited[i as usize] = false;
        self.free_vertex_indices.push(i);
    }

    /// Deletes face `i`, keeping its vertices.
    pub fn delete_face(&mut self, i: u32) {
        assert!(!self.is_free_face(i), "face {i} is already free");

        let [i1, i2, i3] = self.mesh.triangle(i as usize);
        for v in [i1, i2, i3] {
            self.vertex_data[v as usize].delete_adjacent_face(i);
        }
        self.free_face(i);
    }

    fn free_face(&mut self, i: u32) {
        self.face_data[i as usize].is_free = true;
        self.face_visited[i as usize] = false;
        self.free_face_indices.push(i);
        self.octree.delete_element(i);
    }

    /// Moves vertex `i`. Adjacent faces keep their octree placement until realigned.
    pub fn set_vertex(&mut self, i: u32, position: Vec3) {
        assert!(!self.is_free_vertex(i), "vertex {i} is free");
        assert!(position.is_finite(), "vertex position must be finite");
        self.mesh.set_vertex(i, position);
    }

    /// Sets the normal of vertex `i`.
    pub fn set_vertex_normal_to(&mut self, i: u32, normal: Vec3) {
        assert!(!self.is_free_vertex(i), "vertex {i} is free");
        self.mesh.set_normal(i, normal);
    }

    /// Re-inserts face `i` into the octree after its vertices moved.
    pub fn realign_face(&mut self, i: u32) {
        let tri = self.face(i);
        self.octree.realign_element(i, tri.center(), tri.max_dim_extent());
    }

    pub fn realign_all_faces(&mut self) {
        let faces: Vec<u32> = self.live_faces().collect();
        for i in faces {
            self.realign_face(i);
        }
    }

    // === Whole-mesh operations ===

    /// Removes all vertices and faces.
    pub fn reset(&mut self) {
        self.mesh.reset();
        self.vertex_data.clear();
        self.vertex_visited.clear();
        self.free_vertex_indices.clear();
        self.face_data.clear();
        self.face_visited.clear();
        self.free_face_indices.clear();
        self.octree.reset();
    }

    fn setup_octree_root(&mut self, mesh: &Mesh) {
        if let Some(bounds) = mesh.bounds() {
            self.octree.setup_root(bounds.center(), bounds.max_dim_extent());
        }
    }

    /// Rebuilds the mesh from a triangle soup and recomputes all vertex normals.
    pub fn from_mesh(&mut self, mesh: &Mesh) {
        self.reset();
        self.setup_octree_root(mesh);

        for i in 0..dynamesh_core::to_u32(mesh.num_vertices()) {
            self.add_vertex(mesh.vertex(i), mesh.normal(i));
        }
        for t in 0..mesh.num_triangles() {
            let [i1, i2, i3] = mesh.triangle(t);
            self.add_face(i1, i2, i3);
        }
        self.set_all_normals();
        log::debug!(
            "built dynamic mesh with {} vertices and {} faces",
            self.num_vertices(),
            self.num_faces()
        );
    }

    /// Drops empty octree subtrees and shrinks the octree root.
    pub fn sanitize(&mut self) {
        self.octree.delete_empty_children();
        self.octree.shrink_root();
    }

    /// Prunes the mesh and checks that it is a closed 2-manifold.
    ///
    /// Failures are logged as warnings.
    pub fn check_consistency(&mut self) -> bool {
        self.prune();
        self.buffer_data();

        if !mesh_util::check_consistency(&self.mesh) {
            return false;
        }
        if let Some(i) = self
            .live_vertices()
            .find(|&i| self.vertex_data[i as usize].adjacent_faces.is_empty())
        {
            log::warn!("vertex {i} is not free but has no adjacent faces");
            return false;
        }
        true
    }

    /// Deletes faces with a repeated vertex or zero area, then vertices without faces.
    pub fn delete_degenerated_faces(&mut self) {
        let degenerated: Vec<u32> = self
            .live_faces()
            .filter(|&f| {
                let [i1, i2, i3] = self.vertex_indices(f);
                i1 == i2 || i2 == i3 || i1 == i3 || self.face(f).is_degenerated()
            })
            .collect();
        for f in &degenerated {
            self.delete_face(*f);
        }

        let orphans: Vec<u32> = self
            .live_vertices()
            .filter(|&i| self.vertex_data[i as usize].adjacent_faces.is_empty())
            .collect();
        for i in &orphans {
            self.delete_vertex(*i);
        }
        if !degenerated.is_empty() || !orphans.is_empty() {
            log::debug!(
                "deleted {} degenerated faces and {} orphaned vertices",
                degenerated.len(),
                orphans.len()
            );
        }
    }

    /// Replaces the mesh by its mirrored positive half, see [`mesh_util::mirror`].
    pub fn mirror(&mut self, plane: &PrimPlane) {
        self.delete_degenerated_faces();
        self.prune();
        let mirrored = mesh_util::mirror(&self.mesh, plane, self.options.mirror.epsilon);
        self.from_mesh(&mirrored);
    }

    /// Centres the live vertices at the origin, scales them to a largest dimension
    /// of 2 and rebuilds the octree.
    pub fn normalize(&mut self) {
        let Some(bounds) = self.live_bounds() else {
            return;
        };
        let center = bounds.center();
        let extent = bounds.max_dim_extent();
        let scale = if extent > 0.0 { 2.0 / extent } else { 1.0 };

        let vertices: Vec<u32> = self.live_vertices().collect();
        for i in vertices {
            self.mesh.set_vertex(i, (self.mesh.vertex(i) - center) * scale);
        }

        self.octree.reset();
        if let Some(bounds) = self.live_bounds() {
            self.octree.setup_root(bounds.center(), bounds.max_dim_extent());
        }
        let faces: Vec<u32> = self.live_faces().collect();
        for i in faces {
            self.add_face_to_octree(i);
        }
    }

    /// Points free face slots at a live face and returns the buffers for upload.
    pub fn buffer_data(&mut self) -> MeshBuffers {
        let live = self.live_faces().next();
        if let Some(live) = live {
            let [i1, i2, i3] = self.mesh.triangle(live as usize);
            for &f in &self.free_face_indices {
                let slot = 3 * f as usize;
                self.mesh.set_index(slot, i1);
                self.mesh.set_index(slot + 1, i2);
                self.mesh.set_index(slot + 2, i3);
            }
        }
        self.mesh.buffers()
    }

    /// Logs the octree statistics.
    pub fn print_statistics(&self) {
        log::info!(
            "dynamic mesh: {} vertices, {} faces",
            self.num_vertices(),
            self.num_faces()
        );
        self.octree.print_statistics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn tetrahedron() -> DynamicMesh {
        let mut mesh = DynamicMesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::Z);
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0), Vec3::Z);
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
        mesh.add_vertex(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        mesh.add_face(0, 2, 1);
        mesh.add_face(0, 1, 3);
        mesh.add_face(0, 3, 2);
        mesh.add_face(1, 2, 3);
        mesh
    }

    /// Test building and deleting from a tetrahedron.
    #[test]
    fn test_tetrahedron() {
        let mut mesh = tetrahedron();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.valence(0), 3);
        assert!(mesh.check_consistency());

        mesh.delete_vertex(0);
        assert_eq!(mesh.num_faces(), 1);
        assert!(mesh.is_free_vertex(0));
        assert!(!mesh.check_consistency());

        // check_consistency pruned the mesh
        assert!(mesh.is_pruned());
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.mesh().num_vertices(), 3);
        assert_eq!(mesh.mesh().num_indices(), 3);
    }

    /// Test that freed slots are reused last-in first-out.
    #[test]
    fn test_slot_reuse() {
        let mut mesh = tetrahedron();
        mesh.delete_face(1);
        mesh.delete_face(3);
        assert_eq!(mesh.free_face_indices(), &[1, 3]);
        assert_eq!(mesh.add_face(1, 2, 3), 3);
        assert_eq!(mesh.add_face(0, 1, 3), 1);
        assert!(mesh.is_pruned());

        let v = mesh.add_vertex(Vec3::splat(2.0), Vec3::Z);
        assert_eq!(v, 4);
        mesh.add_face(v, 1, 2);
        mesh.delete_vertex(v);
        assert_eq!(mesh.add_vertex(Vec3::splat(3.0), Vec3::Z), 4);
        assert_eq!(mesh.vertex(4), Vec3::splat(3.0));
    }

    /// Test that live indices stay valid across unrelated deletions.
    #[test]
    fn test_index_stability() {
        let mut mesh = tetrahedron();
        let before = mesh.vertex_indices(3);
        mesh.delete_face(0);
        mesh.delete_face(2);
        assert_eq!(mesh.vertex_indices(3), before);
        assert_eq!(mesh.vertex(2), Vec3::new(0.0, 1.0, 0.0));
        assert!(mesh.octree().contains_element(3));
        assert!(!mesh.octree().contains_element(0));
    }

    #[test]
    fn test_from_mesh() {
        let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(1));
        assert_eq!(mesh.num_vertices(), 42);
        assert_eq!(mesh.num_faces(), 80);
        assert_eq!(mesh.octree().num_elements(), 80);
        assert!(mesh.octree().check_integrity());
        assert!(mesh.check_consistency());

        // normals point outwards on a sphere around the origin
        for i in 0..42 {
            assert!(mesh.vertex_normal(i).dot(mesh.vertex(i)) > 0.9);
        }
    }

    #[test]
    fn test_from_empty_mesh() {
        let mut mesh = DynamicMesh::with_mesh(&Mesh::new());
        assert!(mesh.is_empty());
        assert!(!mesh.octree().has_root());
        assert!(!mesh.check_consistency());
    }

    #[test]
    fn test_delete_degenerated_faces() {
        let mut mesh = tetrahedron();
        let a = mesh.add_vertex(Vec3::splat(5.0), Vec3::Z);
        let b = mesh.add_vertex(Vec3::new(5.0, 6.0, 5.0), Vec3::Z);
        mesh.add_face(a, b, 1);
        mesh.add_face(a, a, 2);
        assert_eq!(mesh.num_faces(), 6);

        mesh.delete_degenerated_faces();
        // (a, b, 1) has non-zero area and is kept
        assert_eq!(mesh.num_faces(), 5);
        assert_eq!(mesh.num_vertices(), 6);

        mesh.delete_face(4);
        mesh.delete_degenerated_faces();
        assert_eq!(mesh.num_vertices(), 4);
        assert!(mesh.check_consistency());
    }

    #[test]
    fn test_buffer_data_fills_free_slots() {
        let mut mesh = tetrahedron();
        mesh.delete_face(0);
        let buffers = mesh.buffer_data();
        assert_eq!(buffers.indices.len(), 12);
        assert_eq!(&buffers.indices[0..3], &buffers.indices[3..6]);
        assert!(buffers.indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn test_mirror() {
        let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(2));
        mesh.mirror(&PrimPlane::new(Vec3::new(0.3, 0.0, 0.0), Vec3::X));
        assert!(mesh.check_consistency());
        for i in mesh.live_vertices() {
            assert!(mesh.vertex(i).x < 1.0 + 1e-5);
            assert!(mesh.vertex(i).x > 0.3 - 0.7 - 1e-5);
        }
    }

    #[test]
    fn test_normalize() {
        let mut cube = Mesh::cube();
        for i in 0..8 {
            cube.set_vertex(i, cube.vertex(i) * 3.0 + Vec3::new(10.0, 0.0, 0.0));
        }
        let mut mesh = DynamicMesh::with_mesh(&cube);
        mesh.normalize();

        let bounds = mesh.live_bounds().unwrap();
        assert!(bounds.center().length() < 1e-5);
        assert!((bounds.max_dim_extent() - 2.0).abs() < 1e-5);
        assert!(mesh.octree().check_integrity());
        assert_eq!(mesh.octree().num_elements(), 12);
    }

    #[test]
    fn test_realign_after_move() {
        let mut mesh = tetrahedron();
        mesh.set_vertex(3, Vec3::new(0.0, 0.0, 50.0));
        for &f in &mesh.adjacent_faces(3).to_vec() {
            mesh.realign_face(f);
        }
        assert!(mesh.octree().check_integrity());
        assert!(mesh.octree().root_width().unwrap() >= 50.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mesh = tetrahedron();
        let mut copy = mesh.clone();
        copy.delete_vertex(0);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(copy.num_faces(), 1);
        assert!(mesh.octree().check_integrity());
        assert!(copy.octree().check_integrity());
    }

    #[test]
    #[should_panic(expected = "free or missing vertex")]
    fn test_face_on_free_vertex_panics() {
        let mut mesh = tetrahedron();
        mesh.delete_vertex(0);
        mesh.add_face(0, 1, 2);
    }
}
