//! Mesh structures for dynamesh.
//!
//! This crate provides the editable structures built on top of `dynamesh-core`:
//! - [`Octree`], a loose octree over indexed elements with a back-map from element to node
//! - [`DynamicMesh`], a triangle mesh with stable indices, free-list slot reuse and adjacency
//! - [`isosurface`] extraction of manifold meshes from implicit fields

// Mesh sizes are bounded by 32-bit indices and lattice sizes by the sampled bounds
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Sample markers are compared exactly
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod dynamic_mesh;
pub mod isosurface;
pub mod octree;

pub use dynamic_mesh::{DynamicFaces, DynamicMesh, MeshIntersection};
pub use isosurface::IntersectionSample;
pub use octree::{NodeId, Octree, OctreeStatistics};
