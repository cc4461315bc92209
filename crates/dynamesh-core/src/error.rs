//! Error types for dynamesh.

use glam::Vec3;
use thiserror::Error;

/// The main error type for dynamesh operations.
///
/// Only externally supplied data produces these errors. Violated internal invariants
/// (freed indices used as live ones, a corrupt octree back-map) panic instead.
#[derive(Error, Debug)]
pub enum DynameshError {
    /// A flat index buffer does not describe whole triangles.
    #[error("index buffer length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    /// A face references a vertex that does not exist.
    #[error("index {index} is out of range for {num_vertices} vertices")]
    IndexOutOfRange { index: u32, num_vertices: usize },

    /// A vertex position or normal contains NaN or infinity.
    #[error("vertex {0} is not finite")]
    NonFiniteVertex(usize),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The lattice resolution of an isosurface extraction is unusable.
    #[error("invalid isosurface resolution {0}")]
    InvalidResolution(f32),

    /// The bounds of an isosurface extraction are not finite or need too many samples.
    #[error("isosurface bounds {minimum}..{maximum} cannot be sampled")]
    InvalidBounds { minimum: Vec3, maximum: Vec3 },

    /// A line of a Wavefront OBJ stream could not be parsed.
    #[error("could not parse OBJ data at line {0}")]
    ObjParse(usize),

    /// A mesh is not a closed 2-manifold.
    #[error("mesh {0} is not consistent")]
    InconsistentMesh(usize),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for dynamesh operations.
pub type Result<T> = std::result::Result<T, DynameshError>;
