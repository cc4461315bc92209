//! Core types for dynamesh.
//!
//! This crate provides the geometric building blocks the mesh structures are made of:
//! - [`primitive`] shapes (rays, planes, spheres, boxes, triangles)
//! - [`intersection`] tests between them and the [`QueryShape`] trait used for spatial queries
//! - [`Mesh`], the flat geometry store, with procedural generators
//! - [`mesh_util`] whole-mesh operations (consistency checks, mirroring, OBJ I/O)
//! - Configuration [`Options`] and the crate error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors and constructors return values that are obviously used
#![allow(clippy::must_use_candidate)]
// Mesh sizes are bounded by 32-bit indices
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
// Short names like v1, v2, n1, n2 mirror the math
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]

pub mod error;
pub mod intersection;
pub mod mesh;
pub mod mesh_util;
pub mod options;
pub mod primitive;

pub use error::{DynameshError, Result};
pub use intersection::{Intersection, QueryShape};
pub use mesh::{to_u32, Mesh, MeshBuffers};
pub use options::{IsosurfaceOptions, MirrorOptions, OctreeOptions, Options, EPSILON};
pub use primitive::{PrimAABox, PrimPlane, PrimRay, PrimSphere, PrimTriangle};

/// Marks a freed or unmapped index.
pub const INVALID_INDEX: u32 = u32::MAX;

// Re-export glam types for convenience
pub use glam::Vec3;
