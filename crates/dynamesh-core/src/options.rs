//! Configuration options for dynamesh.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tolerance used by geometric tests that need one.
pub const EPSILON: f32 = 1e-4;

/// Configuration shared by meshes, octrees and isosurface extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Options {
    /// Octree tuning.
    pub octree: OctreeOptions,

    /// Isosurface extraction tuning.
    pub isosurface: IsosurfaceOptions,

    /// Mirroring tuning.
    pub mirror: MirrorOptions,
}

impl Options {
    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes these options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Options for the loose octree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeOptions {
    /// An element descends into a child node while its maximum extent is at most this
    /// fraction of the node width.
    pub relative_min_element_extent: f32,
}

impl Default for OctreeOptions {
    fn default() -> Self {
        Self {
            relative_min_element_extent: 0.1,
        }
    }
}

/// Options for isosurface extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsosurfaceOptions {
    /// Number of sampling threads (0 = hardware concurrency).
    pub num_threads: usize,

    /// Extra padding of the lattice and offset of column rays past each hit.
    pub epsilon: f32,
}

impl Default for IsosurfaceOptions {
    fn default() -> Self {
        Self {
            num_threads: 0,
            epsilon: EPSILON,
        }
    }
}

impl IsosurfaceOptions {
    /// Resolves the configured thread count against the available parallelism.
    pub fn resolved_num_threads(&self) -> usize {
        if self.num_threads > 0 {
            self.num_threads
        } else {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        }
    }
}

/// Options for mirroring a mesh across a plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorOptions {
    /// Vertices closer than half of this to the plane count as lying on it.
    pub epsilon: f32,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self { epsilon: EPSILON }
    }
}
