//! Whole-mesh utilities operating on a [`Mesh`].

mod mirror;
mod obj;

use std::collections::HashMap;

use crate::mesh::Mesh;

pub use mirror::mirror;
pub use obj::{from_obj, to_obj};

/// Checks that `mesh` is a closed 2-manifold.
///
/// Every vertex needs at least 3 adjacent faces and every undirected edge exactly 2.
/// The first violation is logged as a warning and `false` is returned. An empty mesh
/// is inconsistent.
pub fn check_consistency(mesh: &Mesh) -> bool {
    if mesh.num_vertices() == 0 {
        log::warn!("empty mesh");
        return false;
    }
    let mut edge_faces: HashMap<(u32, u32), u32> = HashMap::new();
    let mut vertex_faces = vec![0u32; mesh.num_vertices()];

    for t in 0..mesh.num_triangles() {
        let [i1, i2, i3] = mesh.triangle(t);
        for i in [i1, i2, i3] {
            vertex_faces[i as usize] += 1;
        }
        for (a, b) in [(i1, i2), (i2, i3), (i1, i3)] {
            *edge_faces.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    if let Some((v, n)) = vertex_faces.iter().enumerate().find(|(_, &n)| n < 3) {
        log::warn!("inconsistent vertex {v} with {n} adjacent faces");
        return false;
    }
    if let Some(((a, b), n)) = edge_faces.iter().find(|(_, &n)| n != 2) {
        log::warn!("inconsistent edge ({a},{b}) with {n} adjacent faces");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn tetrahedron() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
        mesh.add_vertex(Vec3::new(0.0, 0.0, 1.0));
        mesh.add_triangle(0, 2, 1);
        mesh.add_triangle(0, 1, 3);
        mesh.add_triangle(0, 3, 2);
        mesh.add_triangle(1, 2, 3);
        mesh
    }

    /// Test that closed generated meshes are consistent.
    #[test]
    fn test_generated_meshes_are_consistent() {
        assert!(check_consistency(&tetrahedron()));
        assert!(check_consistency(&Mesh::cube()));
        assert!(check_consistency(&Mesh::sphere(6, 8)));
        assert!(check_consistency(&Mesh::icosphere(1)));
        assert!(check_consistency(&Mesh::cone(6)));
        assert!(check_consistency(&Mesh::cylinder(6)));
    }

    #[test]
    fn test_empty_mesh_is_inconsistent() {
        assert!(!check_consistency(&Mesh::new()));
    }

    #[test]
    fn test_open_mesh_is_inconsistent() {
        let mut mesh = tetrahedron();
        mesh.shrink_indices(9);
        assert!(!check_consistency(&mesh));
    }

    #[test]
    fn test_isolated_vertex_is_inconsistent() {
        let mut mesh = tetrahedron();
        mesh.add_vertex(Vec3::splat(5.0));
        assert!(!check_consistency(&mesh));
    }
}
