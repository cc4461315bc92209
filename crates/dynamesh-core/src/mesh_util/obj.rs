use std::io::{BufRead, Write};

use glam::Vec3;

use super::check_consistency;
use crate::error::{DynameshError, Result};
use crate::mesh::Mesh;

/// Writes `mesh` as Wavefront OBJ (`v` and `f` records only).
pub fn to_obj<W: Write>(writer: &mut W, mesh: &Mesh) -> Result<()> {
    for v in mesh.positions() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for t in 0..mesh.num_triangles() {
        let [i1, i2, i3] = mesh.triangle(t);
        writeln!(writer, "f {} {} {}", i1 + 1, i2 + 1, i3 + 1)?;
    }
    Ok(())
}

/// Parses the vertex index of a face element such as `3`, `3/1` or `3/1/2`.
fn parse_face_index(element: &str) -> Option<u32> {
    let index: u32 = element.split('/').next()?.parse().ok()?;
    index.checked_sub(1)
}

/// Reads Wavefront OBJ data, one mesh per `o` record.
///
/// Only `v`, `f` and `o` records are interpreted. Quads are split into two triangles.
/// Face indices count vertices from the start of the file, and a face may only reference
/// vertices of its own object. Objects without vertices are dropped, and every remaining mesh must pass
/// [`check_consistency`].
pub fn from_obj<R: BufRead>(reader: R) -> Result<Vec<Mesh>> {
    let mut meshes: Vec<Mesh> = Vec::new();
    // vertices of all objects before the current one
    let mut base = 0u32;

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = n + 1;
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        if keyword == "o" {
            base += meshes.last().map_or(0, |m| m.num_vertices() as u32);
            meshes.push(Mesh::new());
            continue;
        }
        if meshes.is_empty() {
            meshes.push(Mesh::new());
        }
        let Some(mesh) = meshes.last_mut() else {
            continue;
        };

        match keyword {
            "v" => {
                let coords: Vec<f32> = tokens
                    .take(3)
                    .map(str::parse)
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|_| DynameshError::ObjParse(line_number))?;
                if coords.len() != 3 {
                    return Err(DynameshError::ObjParse(line_number));
                }
                mesh.add_vertex(Vec3::new(coords[0], coords[1], coords[2]));
            }
            "f" => {
                let indices: Vec<u32> = tokens
                    .map(|e| parse_face_index(e)?.checked_sub(base))
                    .collect::<Option<_>>()
                    .ok_or(DynameshError::ObjParse(line_number))?;
                if let Some(&index) = indices.iter().find(|&&i| i as usize >= mesh.num_vertices()) {
                    return Err(DynameshError::IndexOutOfRange {
                        index,
                        num_vertices: mesh.num_vertices(),
                    });
                }
                match indices[..] {
                    [i1, i2, i3] => mesh.add_triangle(i1, i2, i3),
                    [i1, i2, i3, i4] => {
                        mesh.add_triangle(i1, i2, i3);
                        mesh.add_triangle(i4, i1, i3);
                    }
                    _ => return Err(DynameshError::ObjParse(line_number)),
                }
            }
            _ => {}
        }
    }

    meshes.retain(|m| m.num_vertices() > 0);
    if let Some(i) = meshes.iter().position(|m| !check_consistency(m)) {
        return Err(DynameshError::InconsistentMesh(i));
    }
    Ok(meshes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obj_round_trip() {
        let cube = Mesh::cube();
        let mut data = Vec::new();
        to_obj(&mut data, &cube).unwrap();

        let meshes = from_obj(data.as_slice()).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].positions(), cube.positions());
        assert_eq!(meshes[0].indices(), cube.indices());
    }

    #[test]
    fn test_obj_objects_and_quads() {
        let data = "\
# two tetrahedra with file-wide indices, the second written with slashes
o first
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
o empty
o second
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 5/1 7/1 6/1
f 5//1 6//1 8//1
f 5 8 7
f 6 7 8
";
        let meshes = from_obj(data.as_bytes()).unwrap();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[1].num_triangles(), 4);
        assert_eq!(meshes[1].indices(), meshes[0].indices());

        // a face may not reach back into an earlier object
        let data = "o a\nv 0 0 0\no b\nv 0 0 0\nv 1 0 0\nf 1 2 3\n";
        assert!(matches!(
            from_obj(data.as_bytes()),
            Err(DynameshError::ObjParse(6))
        ));
    }

    #[test]
    fn test_obj_errors() {
        assert!(matches!(
            from_obj("v 0 0\n".as_bytes()),
            Err(DynameshError::ObjParse(1))
        ));
        assert!(matches!(
            from_obj("v 0 0 0\nf 1 a 1\n".as_bytes()),
            Err(DynameshError::ObjParse(2))
        ));
        assert!(matches!(
            from_obj("v 0 0 0\nf 0 1 1\n".as_bytes()),
            Err(DynameshError::ObjParse(2))
        ));
        assert!(matches!(
            from_obj("v 0 0 0\nf 1 1 2\n".as_bytes()),
            Err(DynameshError::IndexOutOfRange { index: 1, .. })
        ));
        assert!(matches!(
            from_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n".as_bytes()),
            Err(DynameshError::InconsistentMesh(0))
        ));
    }
}
