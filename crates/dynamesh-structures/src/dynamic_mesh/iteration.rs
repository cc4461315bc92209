use super::{DynamicFaces, DynamicMesh};

impl DynamicMesh {
    /// Iterates the indices of live vertices.
    pub fn live_vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertex_data
            .iter()
            .enumerate()
            .filter(|(_, data)| !data.is_free)
            .map(|(i, _)| dynamesh_core::to_u32(i))
    }

    /// Iterates the indices of live faces.
    pub fn live_faces(&self) -> impl Iterator<Item = u32> + '_ {
        self.face_data
            .iter()
            .enumerate()
            .filter(|(_, data)| !data.is_free)
            .map(|(i, _)| dynamesh_core::to_u32(i))
    }

    pub fn for_each_vertex(&self, f: impl FnMut(u32)) {
        self.live_vertices().for_each(f);
    }

    pub fn for_each_face(&self, f: impl FnMut(u32)) {
        self.live_faces().for_each(f);
    }

    fn unvisit_vertices(&mut self, faces: &[u32]) {
        for &face in faces {
            for i in self.vertex_indices(face) {
                self.vertex_visited[i as usize] = false;
            }
        }
    }

    /// Reports each vertex of `faces` to `f` once.
    fn visit_vertices(&mut self, faces: &[u32], mut f: impl FnMut(u32)) {
        self.unvisit_vertices(faces);
        for &face in faces {
            for i in self.vertex_indices(face) {
                if !self.vertex_visited[i as usize] {
                    self.vertex_visited[i as usize] = true;
                    f(i);
                }
            }
        }
        self.unvisit_vertices(faces);
    }

    /// Visits every vertex of `faces` once.
    pub fn for_each_vertex_of(&mut self, faces: &DynamicFaces, f: impl FnMut(u32)) {
        let faces: Vec<u32> = faces.iter().collect();
        self.visit_vertices(&faces, f);
    }

    /// Visits every vertex of `faces` and of the faces adjacent to them once.
    pub fn for_each_vertex_ext(&mut self, faces: &DynamicFaces, f: impl FnMut(u32)) {
        let ring = self.face_ring(faces);
        self.visit_vertices(&ring, f);
    }

    /// Visits every face of `faces` and every face sharing a vertex with them once.
    pub fn for_each_face_ext(&mut self, faces: &DynamicFaces, f: impl FnMut(u32)) {
        self.face_ring(faces).into_iter().for_each(f);
    }

    /// Collects `faces` followed by their one-ring, each face once.
    fn face_ring(&mut self, faces: &DynamicFaces) -> Vec<u32> {
        let mut ring = Vec::new();

        for face in faces.iter() {
            if !self.face_visited[face as usize] {
                self.face_visited[face as usize] = true;
                ring.push(face);
            }
        }
        for face in faces.iter() {
            for v in self.vertex_indices(face) {
                for &adjacent in &self.vertex_data[v as usize].adjacent_faces {
                    if !self.face_visited[adjacent as usize] {
                        self.face_visited[adjacent as usize] = true;
                        ring.push(adjacent);
                    }
                }
            }
        }
        for &face in &ring {
            self.face_visited[face as usize] = false;
        }
        ring
    }
}
