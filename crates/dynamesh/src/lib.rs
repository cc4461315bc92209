//! dynamesh: an editable triangle mesh with a loose octree and isosurface extraction.
//!
//! A [`DynamicMesh`] keeps stable vertex and face indices under incremental edits,
//! reusing freed slots, and indexes its faces in an [`Octree`] for ray, plane, sphere
//! and box queries. [`isosurface`] turns implicit fields into closed manifold meshes.
//!
//! # Quick Start
//!
//! ```
//! use dynamesh::*;
//!
//! init();
//!
//! let bounds = PrimAABox::from_center(Vec3::ZERO, 2.5);
//! let mut mesh = DynamicMesh::new();
//! isosurface::extract_into(&mut mesh, |p| p.length() - 1.0, &bounds, 0.1);
//! assert!(mesh.check_consistency());
//!
//! let ray = PrimRay::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
//! let hit = mesh.intersects_ray(&ray).expect("ray hits the sphere");
//! assert!((hit.intersection.position.z - 1.0).abs() < 0.1);
//! ```
//!
//! # Indices
//!
//! Indices returned by [`DynamicMesh::add_vertex`] and [`DynamicMesh::add_face`] stay
//! valid until [`DynamicMesh::prune`], which compacts the slot arrays. Use
//! [`DynamicMesh::prune_with_maps`] to rename indices cached elsewhere.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

// Re-export core types
pub use dynamesh_core::{
    error::{DynameshError, Result},
    intersection::{self, Intersection, QueryShape},
    mesh_util,
    options::{IsosurfaceOptions, MirrorOptions, OctreeOptions, Options, EPSILON},
    primitive::{PrimAABox, PrimPlane, PrimRay, PrimSphere, PrimTriangle},
    Mesh, MeshBuffers, Vec3, INVALID_INDEX,
};

// Re-export structures
pub use dynamesh_structures::{
    isosurface, DynamicFaces, DynamicMesh, IntersectionSample, MeshIntersection, NodeId,
    Octree, OctreeStatistics,
};

/// Installs the `env_logger` backend for the `log` records of all dynamesh crates.
///
/// The filter is read from `RUST_LOG`. Calling this more than once, or after another
/// logger was installed, has no effect.
pub fn init() {
    let _ = env_logger::try_init();
    log::info!("dynamesh initialized");
}

/// Reads every object of a Wavefront OBJ file, see [`mesh_util::from_obj`].
pub fn read_obj_file(path: impl AsRef<Path>) -> Result<Vec<Mesh>> {
    let path = path.as_ref();
    let meshes = mesh_util::from_obj(BufReader::new(File::open(path)?))?;
    log::debug!("read {} meshes from {}", meshes.len(), path.display());
    Ok(meshes)
}

/// Writes the live part of `mesh` to a Wavefront OBJ file.
///
/// The mesh is pruned first, so indices cached by the caller may be invalidated.
pub fn write_obj_file(path: impl AsRef<Path>, mesh: &mut DynamicMesh) -> Result<()> {
    mesh.prune();
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    mesh_util::to_obj(&mut writer, mesh.mesh())?;
    writer.flush()?;
    Ok(())
}
