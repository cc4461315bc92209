use std::collections::HashMap;

use glam::Vec3;

use crate::intersection;
use crate::mesh::Mesh;
use crate::primitive::{PrimPlane, PrimRay};
use crate::INVALID_INDEX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Negative,
    Border,
    Positive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BorderFlag {
    NoBorder,
    ConnectsNegative,
    ConnectsPositive,
    ConnectsBoth,
}

impl BorderFlag {
    fn connect(self, side: Side) -> Self {
        match (self, side) {
            (BorderFlag::NoBorder, Side::Negative) => BorderFlag::ConnectsNegative,
            (BorderFlag::NoBorder, Side::Positive) => BorderFlag::ConnectsPositive,
            (BorderFlag::ConnectsPositive, Side::Negative)
            | (BorderFlag::ConnectsNegative, Side::Positive) => BorderFlag::ConnectsBoth,
            (flag, _) => flag,
        }
    }
}

/// New vertex indices of an old vertex (first copy, mirrored copy).
type VertexPair = (u32, u32);

struct Mirror<'a> {
    source: &'a Mesh,
    plane: &'a PrimPlane,
    target: Mesh,
    border_vertices: HashMap<(u32, u32), u32>,
}

impl Mirror<'_> {
    /// Returns the vertex where edge `(i1, i2)` crosses the plane, creating it once per edge.
    fn border_vertex(&mut self, i1: u32, i2: u32) -> u32 {
        let key = (i1.min(i2), i1.max(i2));
        if let Some(&i) = self.border_vertices.get(&key) {
            return i;
        }
        let v1 = self.source.vertex(key.0);
        let v2 = self.source.vertex(key.1);
        let direction = v2 - v1;

        let position = if direction.length_squared() > 0.0 {
            let line = PrimRay::line(v1, direction);
            intersection::ray_plane(&line, self.plane)
                .map_or((v1 + v2) * 0.5, |t| line.point_at(t))
        } else {
            v1
        };
        let i = self.target.add_vertex(position);
        self.border_vertices.insert(key, i);
        i
    }

    fn add_face(&mut self, i1: u32, i2: u32, i3: u32) {
        self.target.add_triangle(i1, i2, i3);
    }
}

/// Mirrors `mesh` at `plane`.
///
/// Everything on the positive side of the plane is kept and reflected onto the negative
/// side; the negative half of the input is discarded. Vertices within `epsilon / 2` of the
/// plane count as lying on it. Triangles crossing the plane are split at new border
/// vertices shared by both halves, so a closed input yields a closed, symmetric output.
///
/// Vertex normals of the result are zero.
pub fn mirror(mesh: &Mesh, plane: &PrimPlane, epsilon: f32) -> Mesh {
    use Side::{Border as B, Negative as N, Positive as P};

    let eps = epsilon * 0.5;
    let side = |v: Vec3| {
        let d = plane.distance(v);
        if d < -eps {
            Side::Negative
        } else if d > eps {
            Side::Positive
        } else {
            Side::Border
        }
    };

    let sides: Vec<Side> = mesh.positions().iter().map(|&v| side(v)).collect();
    let mut border_flags = vec![BorderFlag::NoBorder; mesh.num_vertices()];

    for t in 0..mesh.num_triangles() {
        let [i1, i2, i3] = mesh.triangle(t).map(|i| i as usize);
        for (i, j, k) in [(i1, i2, i3), (i2, i1, i3), (i3, i1, i2)] {
            border_flags[i] = border_flags[i].connect(sides[j]).connect(sides[k]);
        }
    }

    let mut m = Mirror {
        source: mesh,
        plane,
        target: Mesh::new(),
        border_vertices: HashMap::new(),
    };

    let mut new_indices: Vec<Option<VertexPair>> = vec![None; mesh.num_vertices()];
    for (i, &v) in mesh.positions().iter().enumerate() {
        new_indices[i] = match (sides[i], border_flags[i]) {
            (Side::Positive, _) => {
                let first = m.target.add_vertex(v);
                let second = m.target.add_vertex(plane.mirror(v));
                Some((first, second))
            }
            (Side::Border, BorderFlag::ConnectsPositive) => {
                let first = m.target.add_vertex(v);
                let second = m.target.add_vertex(v);
                Some((first, second))
            }
            (Side::Border, BorderFlag::ConnectsBoth) => {
                let index = m.target.add_vertex(v);
                Some((index, index))
            }
            (Side::Border, BorderFlag::NoBorder) => {
                log::debug!("dropping border vertex {i} without off-plane neighbors");
                None
            }
            _ => None,
        };
    }

    for t in 0..mesh.num_triangles() {
        let [o1, o2, o3] = mesh.triangle(t);
        let s = (sides[o1 as usize], sides[o2 as usize], sides[o3 as usize]);

        if s.0 != P && s.1 != P && s.2 != P {
            continue;
        }
        let pair = |o: u32| new_indices[o as usize].unwrap_or((INVALID_INDEX, INVALID_INDEX));
        let (n1, n2, n3) = (pair(o1), pair(o2), pair(o3));

        match s {
            (a, b, c) if a != N && b != N && c != N => {
                m.add_face(n1.0, n2.0, n3.0);
                m.add_face(n3.1, n2.1, n1.1);
            }
            (P, P, N) => {
                let b1 = m.border_vertex(o1, o3);
                let b2 = m.border_vertex(o2, o3);
                m.add_face(n2.0, b2, n1.0);
                m.add_face(n1.1, b2, n2.1);
                m.add_face(n1.0, b2, b1);
                m.add_face(b1, b2, n1.1);
            }
            (P, N, P) => {
                let b1 = m.border_vertex(o1, o2);
                let b2 = m.border_vertex(o2, o3);
                m.add_face(n1.0, b1, n3.0);
                m.add_face(n3.1, b1, n1.1);
                m.add_face(n3.0, b1, b2);
                m.add_face(b2, b1, n3.1);
            }
            (N, P, P) => {
                let b1 = m.border_vertex(o1, o2);
                let b2 = m.border_vertex(o1, o3);
                m.add_face(n3.0, b2, n2.0);
                m.add_face(n2.1, b2, n3.1);
                m.add_face(n2.0, b2, b1);
                m.add_face(b1, b2, n2.1);
            }
            (P, N, N) => {
                let b1 = m.border_vertex(o1, o2);
                let b2 = m.border_vertex(o1, o3);
                m.add_face(n1.0, b1, b2);
                m.add_face(b2, b1, n1.1);
            }
            (N, P, N) => {
                let b1 = m.border_vertex(o1, o2);
                let b2 = m.border_vertex(o2, o3);
                m.add_face(n2.0, b2, b1);
                m.add_face(b1, b2, n2.1);
            }
            (N, N, P) => {
                let b1 = m.border_vertex(o1, o3);
                let b2 = m.border_vertex(o2, o3);
                m.add_face(n3.0, b1, b2);
                m.add_face(b2, b1, n3.1);
            }
            (P, B, N) => {
                let b = m.border_vertex(o1, o3);
                m.add_face(n1.0, n2.0, b);
                m.add_face(b, n2.1, n1.1);
            }
            (B, P, N) => {
                let b = m.border_vertex(o2, o3);
                m.add_face(n1.0, n2.0, b);
                m.add_face(b, n2.1, n1.1);
            }
            (P, N, B) => {
                let b = m.border_vertex(o1, o2);
                m.add_face(n1.0, b, n3.0);
                m.add_face(n3.1, b, n1.1);
            }
            (B, N, P) => {
                let b = m.border_vertex(o2, o3);
                m.add_face(n1.0, b, n3.0);
                m.add_face(n3.1, b, n1.1);
            }
            (N, P, B) => {
                let b = m.border_vertex(o1, o2);
                m.add_face(n2.0, n3.0, b);
                m.add_face(b, n3.1, n2.1);
            }
            (N, B, P) => {
                let b = m.border_vertex(o1, o3);
                m.add_face(n2.0, n3.0, b);
                m.add_face(b, n3.1, n2.1);
            }
            _ => unreachable!("every side combination with a positive vertex is handled"),
        }
    }
    m.target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_util::check_consistency;
    use crate::options::EPSILON;

    fn is_symmetric(mesh: &Mesh, plane: &PrimPlane) -> bool {
        mesh.positions().iter().all(|&p| {
            let q = plane.mirror(p);
            mesh.positions().iter().any(|&r| r.distance(q) < 1e-4)
        })
    }

    /// Test mirroring a cube at a plane through its center.
    #[test]
    fn test_mirror_cube_through_center() {
        let plane = PrimPlane::new(Vec3::ZERO, Vec3::X);
        let mirrored = mirror(&Mesh::cube(), &plane, EPSILON);

        assert!(check_consistency(&mirrored));
        assert!(is_symmetric(&mirrored, &plane));
        for p in mirrored.positions() {
            assert!(p.abs().max_element() <= 0.5 + 1e-6);
        }
    }

    /// Test that every positive vertex is kept and mirrored.
    #[test]
    fn test_mirror_offset_plane() {
        let plane = PrimPlane::new(Vec3::new(0.0, 0.25, 0.0), Vec3::Y);
        let mirrored = mirror(&Mesh::icosphere(2), &plane, EPSILON);

        assert!(check_consistency(&mirrored));
        assert!(is_symmetric(&mirrored, &plane));
        let bounds = mirrored.bounds().unwrap();
        assert!(bounds.maximum().y > 0.8);
        assert!((bounds.maximum().y + bounds.minimum().y - 0.5).abs() < 1e-5);
    }

    /// Test that a mesh entirely on the negative side vanishes.
    #[test]
    fn test_mirror_negative_mesh() {
        let plane = PrimPlane::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X);
        let mirrored = mirror(&Mesh::cube(), &plane, EPSILON);
        assert_eq!(mirrored.num_vertices(), 0);
        assert_eq!(mirrored.num_triangles(), 0);
    }

    /// Test that a mesh entirely on the positive side gets a detached mirrored copy.
    #[test]
    fn test_mirror_positive_mesh() {
        let plane = PrimPlane::new(Vec3::new(-2.0, 0.0, 0.0), Vec3::X);
        let mirrored = mirror(&Mesh::cube(), &plane, EPSILON);
        assert_eq!(mirrored.num_vertices(), 16);
        assert_eq!(mirrored.num_triangles(), 24);
        assert!(check_consistency(&mirrored));
    }

    #[test]
    fn test_border_flags() {
        let flag = BorderFlag::NoBorder.connect(Side::Border);
        assert_eq!(flag, BorderFlag::NoBorder);
        let flag = flag.connect(Side::Positive);
        assert_eq!(flag, BorderFlag::ConnectsPositive);
        assert_eq!(flag.connect(Side::Positive), BorderFlag::ConnectsPositive);
        assert_eq!(flag.connect(Side::Negative), BorderFlag::ConnectsBoth);
    }
}
