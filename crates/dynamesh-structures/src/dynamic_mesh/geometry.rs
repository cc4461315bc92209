use dynamesh_core::PrimAABox;
use glam::Vec3;

use super::{DynamicFaces, DynamicMesh};

impl DynamicMesh {
    /// Sum of the unnormalized normals of the given faces.
    fn face_normal_sum(&self, faces: impl IntoIterator<Item = u32>) -> Vec3 {
        faces
            .into_iter()
            .map(|f| {
                let [i1, i2, i3] = self.vertex_indices(f);
                let v1 = self.vertex(i1);
                (self.vertex(i2) - v1).cross(self.vertex(i3) - v1)
            })
            .sum()
    }

    /// Returns the area-weighted normal of the faces around vertex `i`.
    ///
    /// The result is zero for a vertex without faces or with degenerate surroundings.
    pub fn average_normal_of_vertex(&self, i: u32) -> Vec3 {
        self.face_normal_sum(self.adjacent_faces(i).iter().copied())
            .normalize_or_zero()
    }

    /// Returns the mean position of the neighbours of vertex `i`.
    ///
    /// Each adjacent face contributes its two other vertices, so neighbours shared by two
    /// faces are counted twice.
    pub fn average_position_of_vertex(&self, i: u32) -> Vec3 {
        let adjacent = self.adjacent_faces(i);
        assert!(!adjacent.is_empty(), "vertex {i} has no adjacent faces");

        let sum: Vec3 = adjacent
            .iter()
            .flat_map(|&f| self.vertex_indices(f))
            .filter(|&v| v != i)
            .map(|v| self.vertex(v))
            .sum();
        sum / (adjacent.len() * 2) as f32
    }

    /// Recomputes the normal of vertex `i` from its adjacent faces.
    pub fn set_vertex_normal(&mut self, i: u32) {
        let normal = self.average_normal_of_vertex(i);
        self.mesh.set_normal(i, normal);
    }

    /// Recomputes the normals of all live vertices.
    pub fn set_all_normals(&mut self) {
        let vertices: Vec<u32> = self.live_vertices().collect();
        for i in vertices {
            self.set_vertex_normal(i);
        }
    }

    /// Returns the mean vertex position and the area-weighted normal of `faces`.
    pub fn average(&self, faces: &DynamicFaces) -> (Vec3, Vec3) {
        (self.average_position(faces), self.average_normal(faces))
    }

    pub fn average_position(&self, faces: &DynamicFaces) -> Vec3 {
        assert!(faces.num_elements() > 0, "average of an empty face set");
        let sum: Vec3 = faces
            .iter()
            .flat_map(|f| self.vertex_indices(f))
            .map(|v| self.vertex(v))
            .sum();
        sum / (faces.num_elements() * 3) as f32
    }

    pub fn average_normal(&self, faces: &DynamicFaces) -> Vec3 {
        assert!(faces.num_elements() > 0, "average of an empty face set");
        self.face_normal_sum(faces.iter()).normalize_or_zero()
    }

    /// Returns the mean squared edge length of face `i`.
    pub fn average_edge_length_sqr_of_face(&self, i: u32) -> f32 {
        let [i1, i2, i3] = self.vertex_indices(i);
        let (v1, v2, v3) = (self.vertex(i1), self.vertex(i2), self.vertex(i3));
        (v1.distance_squared(v2) + v1.distance_squared(v3) + v2.distance_squared(v3)) / 3.0
    }

    /// Returns the mean of [`DynamicMesh::average_edge_length_sqr_of_face`] over `faces`.
    pub fn average_edge_length_sqr(&self, faces: &DynamicFaces) -> f32 {
        assert!(faces.num_elements() > 0, "average of an empty face set");
        let sum: f32 = faces.iter().map(|f| self.average_edge_length_sqr_of_face(f)).sum();
        sum / faces.num_elements() as f32
    }

    /// Returns the bounding box of the live vertices.
    pub fn live_bounds(&self) -> Option<PrimAABox> {
        let mut vertices = self.live_vertices().map(|i| self.vertex(i));
        let first = vertices.next()?;
        let (min, max) = vertices.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(PrimAABox::new(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::tetrahedron;
    use super::*;

    #[test]
    fn test_average_normal() {
        let mesh = tetrahedron();
        let n = mesh.average_normal_of_vertex(0);
        let expected = Vec3::splat(-1.0).normalize();
        assert!(n.distance(expected) < 1e-5);

        // faces of vertex 3 are (0,1,3), (0,3,2) and (1,2,3)
        assert!(mesh.average_normal_of_vertex(3).z > 0.0);
    }

    #[test]
    fn test_average_position() {
        let mesh = tetrahedron();
        // every neighbour of vertex 0 appears in two of its faces
        let p = mesh.average_position_of_vertex(0);
        assert!(p.distance(Vec3::splat(1.0 / 3.0)) < 1e-6);
    }

    #[test]
    fn test_set_all_normals() {
        let mut mesh = tetrahedron();
        mesh.set_vertex_normal_to(1, Vec3::Y);
        mesh.set_all_normals();
        assert!(mesh.vertex_normal(1).x > 0.0);
        assert!((mesh.vertex_normal(1).length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_face_set_averages() {
        let mesh = tetrahedron();
        let faces: DynamicFaces = [0, 1].into_iter().collect();
        let (position, normal) = mesh.average(&faces);

        // faces (0,2,1) and (0,1,3)
        let expected = (Vec3::new(1.0, 1.0, 0.0) + Vec3::new(1.0, 0.0, 1.0)) / 6.0;
        assert!(position.distance(expected) < 1e-6);
        assert!(normal.distance(Vec3::new(0.0, -1.0, -1.0).normalize()) < 1e-5);

        // face 0 has edges of squared length 1, 1 and 2
        assert!((mesh.average_edge_length_sqr_of_face(0) - 4.0 / 3.0).abs() < 1e-6);
        let edges: DynamicFaces = [0, 3].into_iter().collect();
        let expected = (4.0 / 3.0 + 2.0) / 2.0;
        assert!((mesh.average_edge_length_sqr(&edges) - expected).abs() < 1e-6);
    }
}
