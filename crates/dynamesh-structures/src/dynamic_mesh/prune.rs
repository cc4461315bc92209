use dynamesh_core::INVALID_INDEX;

use super::DynamicMesh;

/// Removes free elements from `data` by moving trailing live elements into free slots.
///
/// Element order is not preserved. Returns the map from old to new index: live elements
/// that did not move map to themselves, free elements map to [`INVALID_INDEX`].
pub fn compact<T>(data: &mut Vec<T>, is_free: impl Fn(&T) -> bool) -> Vec<u32> {
    let mut map = vec![INVALID_INDEX; data.len()];
    let mut front = 0;
    let mut back = data.len();

    loop {
        while front < back && !is_free(&data[front]) {
            map[front] = dynamesh_core::to_u32(front);
            front += 1;
        }
        while back > front && is_free(&data[back - 1]) {
            back -= 1;
        }
        if back <= front {
            break;
        }
        // data[front] is free and data[back - 1] is live
        back -= 1;
        data.swap(front, back);
        map[back] = dynamesh_core::to_u32(front);
        front += 1;
    }
    data.truncate(front);
    map
}

impl DynamicMesh {
    /// Removes all free slots. See [`DynamicMesh::prune_with_maps`].
    pub fn prune(&mut self) {
        self.prune_with_maps();
    }

    /// Removes all free vertex and face slots, invalidating indices.
    ///
    /// Returns the old to new vertex and face maps, or `None` if the mesh had no free
    /// slots and nothing moved. The octree is renamed through the face map before
    /// returning.
    pub fn prune_with_maps(&mut self) -> Option<(Vec<u32>, Vec<u32>)> {
        if self.is_pruned() {
            return None;
        }
        let vertex_map = compact(&mut self.vertex_data, |data| data.is_free);
        let face_map = compact(&mut self.face_data, |data| data.is_free);

        for data in &mut self.vertex_data {
            for face in &mut data.adjacent_faces {
                *face = face_map[*face as usize];
            }
        }

        // destination slots were free, so moving in place never overwrites a source
        for (old, &new) in vertex_map.iter().enumerate() {
            if new != INVALID_INDEX && new as usize != old {
                let old = dynamesh_core::to_u32(old);
                self.mesh.set_vertex(new, self.mesh.vertex(old));
                self.mesh.set_normal(new, self.mesh.normal(old));
            }
        }
        self.mesh.shrink_vertices(self.vertex_data.len());

        for (old, &new) in face_map.iter().enumerate() {
            if new != INVALID_INDEX && new as usize != old {
                let triangle = self.mesh.triangle(old);
                for (k, i) in triangle.into_iter().enumerate() {
                    self.mesh.set_index(3 * new as usize + k, i);
                }
            }
        }
        self.mesh.shrink_indices(3 * self.face_data.len());
        for slot in 0..self.mesh.num_indices() {
            let i = self.mesh.index(slot);
            self.mesh.set_index(slot, vertex_map[i as usize]);
        }

        self.vertex_visited = vec![false; self.vertex_data.len()];
        self.face_visited = vec![false; self.face_data.len()];
        self.free_vertex_indices.clear();
        self.free_face_indices.clear();
        self.octree.update_indices(&face_map);

        log::debug!(
            "pruned mesh to {} vertices and {} faces",
            self.vertex_data.len(),
            self.face_data.len()
        );
        Some((vertex_map, face_map))
    }
}

#[cfg(test)]
mod tests {
    use dynamesh_core::Mesh;
    use glam::Vec3;

    use super::super::tests::tetrahedron;
    use super::*;

    const X: u32 = INVALID_INDEX;

    fn compact_ints(mut data: Vec<i32>) -> (Vec<i32>, Vec<u32>) {
        let map = compact(&mut data, |&v| v < 0);
        (data, map)
    }

    /// Test the swap-compaction on interleaved free slots.
    #[test]
    fn test_compact_interleaved() {
        let (data, map) = compact_ints(vec![-1, 2, -3, 4, -5, 6, -7, 8, -9]);
        assert_eq!(data, vec![8, 2, 6, 4]);
        assert_eq!(map, vec![X, 1, X, 3, X, 2, X, 0, X]);
    }

    #[test]
    fn test_compact_runs() {
        let (data, map) = compact_ints(vec![-1, -2, -3, -4, -5, -6, -7, -8, 9]);
        assert_eq!(data, vec![9]);
        assert_eq!(map, vec![X, X, X, X, X, X, X, X, 0]);

        let (data, map) = compact_ints(vec![1, -2, -3, -4, -5, -6, -7, -8, 9]);
        assert_eq!(data, vec![1, 9]);
        assert_eq!(map, vec![0, X, X, X, X, X, X, X, 1]);

        let (data, map) = compact_ints(vec![-1, 2, -3, -4, -5, -6, -7, -8, 9]);
        assert_eq!(data, vec![9, 2]);
        assert_eq!(map, vec![X, 1, X, X, X, X, X, X, 0]);

        let (data, map) = compact_ints(vec![-1, -2, -3, -4, -5, -6, 7, 8, 9]);
        assert_eq!(data, vec![9, 8, 7]);
        assert_eq!(map, vec![X, X, X, X, X, X, 2, 1, 0]);
    }

    #[test]
    fn test_compact_trivial() {
        assert_eq!(compact_ints(vec![]), (vec![], vec![]));
        assert_eq!(compact_ints(vec![1, 2]), (vec![1, 2], vec![0, 1]));
        assert_eq!(compact_ints(vec![-1, -2]), (vec![], vec![X, X]));
    }

    #[test]
    fn test_prune_tetrahedron() {
        let mut mesh = tetrahedron();
        assert!(mesh.prune_with_maps().is_none());

        mesh.delete_vertex(0);
        let (vertex_map, face_map) = mesh.prune_with_maps().unwrap();
        assert_eq!(vertex_map, vec![X, 1, 2, 0]);
        assert_eq!(face_map, vec![X, X, X, 0]);

        assert!(mesh.is_pruned());
        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        // face (1,2,3) became (1,2,0)
        assert_eq!(mesh.vertex_indices(0), [1, 2, 0]);
        assert_eq!(mesh.vertex(0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.adjacent_faces(0), &[0]);
        assert!(mesh.octree().contains_element(0));
        assert_eq!(mesh.octree().num_elements(), 1);
        assert!(mesh.octree().check_integrity());
    }

    #[test]
    fn test_prune_keeps_geometry() {
        let mut mesh = DynamicMesh::with_mesh(&Mesh::icosphere(2));
        let mut removed = 0;
        for f in (0..320).step_by(7) {
            mesh.delete_face(f);
            removed += 1;
        }
        let triangles: Vec<[Vec3; 3]> = mesh
            .live_faces()
            .map(|f| mesh.vertex_indices(f).map(|i| mesh.vertex(i)))
            .collect();

        let (_, face_map) = mesh.prune_with_maps().unwrap();
        assert_eq!(mesh.num_faces(), 320 - removed);
        assert_eq!(mesh.mesh().num_triangles(), mesh.num_faces());
        assert!(mesh.octree().check_integrity());
        assert_eq!(mesh.octree().num_elements(), mesh.num_faces());

        let live_before: Vec<u32> = (0..320).filter(|f| f % 7 != 0).collect();
        for (old, triangle) in live_before.iter().zip(&triangles) {
            let new = face_map[*old as usize];
            let now = mesh.vertex_indices(new).map(|i| mesh.vertex(i));
            assert_eq!(&now, triangle);
        }
        for v in mesh.live_vertices() {
            for &f in mesh.adjacent_faces(v) {
                assert!(mesh.vertex_indices(f).contains(&v));
            }
        }
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut mesh = tetrahedron();
        mesh.delete_face(1);
        mesh.prune();
        let mesh_once = mesh.mesh().clone();
        mesh.prune();
        assert_eq!(mesh.mesh(), &mesh_once);
        assert_eq!(mesh.num_faces(), mesh.mesh().num_triangles());
        assert_eq!(mesh.num_vertices(), mesh.mesh().num_vertices());
    }
}
