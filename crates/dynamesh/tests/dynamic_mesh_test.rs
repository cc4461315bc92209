//! Integration tests for editing a dynamic mesh through the public API.

use dynamesh::*;
use proptest::prelude::*;

fn build_tetrahedron() -> DynamicMesh {
    let mut mesh = DynamicMesh::new();
    for p in [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z] {
        mesh.add_vertex(p, Vec3::ONE);
    }
    mesh.add_face(0, 1, 2);
    mesh.add_face(0, 2, 3);
    mesh.add_face(0, 3, 1);
    mesh.add_face(1, 3, 2);
    mesh
}

/// Test the tetrahedron scenario: build, delete a vertex, prune.
#[test]
fn test_tetrahedron_scenario() {
    init();
    let mut mesh = build_tetrahedron();
    assert_eq!(mesh.num_vertices(), 4);
    assert_eq!(mesh.num_faces(), 4);
    assert!(mesh.check_consistency());

    mesh.delete_vertex(0);
    assert_eq!(mesh.num_faces(), 1);
    assert_eq!(mesh.vertex_indices(3), [1, 3, 2]);
    assert!(!mesh.check_consistency());

    mesh.prune();
    assert_eq!(mesh.num_vertices(), 3);
    assert_eq!(mesh.num_faces(), 1);
    assert!(mesh.free_vertex_indices().is_empty());
    assert!(mesh.free_face_indices().is_empty());
    assert_eq!(mesh.mesh().num_vertices(), 3);
    assert_eq!(mesh.mesh().num_triangles(), 1);
}

#[test]
fn test_boundary_edge_is_inconsistent() {
    let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(1));
    assert!(mesh.check_consistency());

    mesh.delete_face(7);
    assert!(!mesh.check_consistency());
}

#[test]
fn test_generators_are_consistent() {
    for source in [Mesh::cube(), Mesh::icosphere(0), Mesh::icosphere(2)] {
        let mut mesh = DynamicMesh::with_mesh(&source);
        assert_eq!(mesh.num_faces(), source.num_triangles());
        assert!(mesh.check_consistency());
        assert!(mesh.octree().check_integrity());
    }
}

#[test]
fn test_buffers_have_no_dangling_slots() {
    let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(1));
    for f in [0, 5, 9] {
        mesh.delete_face(f);
    }
    let buffers = mesh.buffer_data();
    assert_eq!(buffers.indices.len(), 3 * 80);
    let live = mesh.live_faces().next().unwrap();
    assert_eq!(&buffers.indices[0..3], &mesh.vertex_indices(live));
    assert_eq!(buffers.position_bytes().len(), buffers.positions.len() * 12);
}

#[test]
fn test_prune_maps_rename_cached_indices() {
    let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(2));
    let tracked = [17_u32, 151, 319];
    let before: Vec<PrimTriangle> = tracked.iter().map(|&f| mesh.face(f)).collect();

    for f in (0..320).filter(|f| f % 3 == 0) {
        mesh.delete_face(f);
    }
    let (_, face_map) = mesh.prune_with_maps().unwrap();

    for (&old, tri) in tracked.iter().zip(&before) {
        let new = face_map[old as usize];
        assert_ne!(new, INVALID_INDEX);
        assert_eq!(mesh.face(new), *tri);
    }
    assert_eq!(face_map[0], INVALID_INDEX);
}

#[test]
fn test_mirror_is_symmetric() {
    let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(2));
    let plane = PrimPlane::new(Vec3::ZERO, Vec3::Y);
    mesh.mirror(&plane);
    assert!(mesh.check_consistency());

    for i in mesh.live_vertices() {
        let p = mesh.vertex(i);
        let reflected = plane.mirror(p);
        let found = mesh
            .live_vertices()
            .any(|j| mesh.vertex(j).distance(reflected) < 1e-3);
        assert!(found, "no mirror image of {p}");
    }
}

#[derive(Debug, Clone)]
enum Edit {
    DeleteFace(usize),
    DeleteVertex(usize),
    AddFace(usize),
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        any::<usize>().prop_map(Edit::DeleteFace),
        any::<usize>().prop_map(Edit::DeleteVertex),
        any::<usize>().prop_map(Edit::AddFace),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Test that live indices keep referring to the same geometry under random edits.
    #[test]
    fn index_stability(edits in prop::collection::vec(edit(), 1..40)) {
        let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(1));
        let mut faces: Vec<(u32, [Vec3; 3])> = mesh
            .live_faces()
            .map(|f| (f, mesh.vertex_indices(f).map(|i| mesh.vertex(i))))
            .collect();

        for edit in edits {
            match edit {
                Edit::DeleteFace(k) if !faces.is_empty() => {
                    let (f, _) = faces.swap_remove(k % faces.len());
                    mesh.delete_face(f);
                }
                Edit::DeleteVertex(k) => {
                    let live: Vec<u32> = mesh.live_vertices().collect();
                    if !live.is_empty() {
                        let v = live[k % live.len()];
                        mesh.delete_vertex(v);
                        faces.retain(|&(f, _)| !mesh.is_free_face(f));
                    }
                }
                Edit::AddFace(k) => {
                    let v = mesh.add_vertex(Vec3::new(0.0, 3.0 + k as f32 % 5.0, 0.0), Vec3::Y);
                    let live: Vec<u32> = mesh.live_vertices().filter(|&i| i != v).collect();
                    if live.len() >= 2 {
                        let (a, b) = (live[k % live.len()], live[(k / 7 + 1) % live.len()]);
                        if a != b {
                            let f = mesh.add_face(a, b, v);
                            faces.push((f, [a, b, v].map(|i| mesh.vertex(i))));
                        }
                    }
                }
                Edit::DeleteFace(_) => {}
            }
            prop_assert_eq!(mesh.num_faces(), faces.len());
            prop_assert!(mesh.octree().check_integrity());
            for (f, positions) in &faces {
                prop_assert!(!mesh.is_free_face(*f));
                let now = mesh.vertex_indices(*f).map(|i| mesh.vertex(i));
                prop_assert_eq!(&now, positions);
            }
        }
    }

    /// Test that pruning twice changes nothing after the first prune.
    #[test]
    fn prune_idempotence(deleted in prop::collection::vec(0u32..80, 0..30)) {
        let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(1));
        for f in deleted {
            if !mesh.is_free_face(f) {
                mesh.delete_face(f);
            }
        }
        mesh.prune();
        let once = mesh.mesh().clone();
        mesh.prune();

        prop_assert_eq!(mesh.mesh(), &once);
        prop_assert!(mesh.free_vertex_indices().is_empty());
        prop_assert!(mesh.free_face_indices().is_empty());
        prop_assert_eq!(mesh.num_vertices(), mesh.mesh().num_vertices());
        prop_assert_eq!(mesh.num_faces(), mesh.mesh().num_triangles());
        prop_assert_eq!(mesh.octree().num_elements(), mesh.num_faces());
    }
}

