//! Lookup tables indexed by an 8-bit cube configuration.
//!
//! Corner `b` of a cube sits at offset `(b & 1, (b >> 1) & 1, (b >> 2) & 1)` and sets bit `b`
//! of the configuration when its sample is negative (inside).

/// Corner pairs spanned by each of the 12 cube edges.
#[rustfmt::skip]
pub const CORNERS_BY_EDGE: [[usize; 2]; 12] = [
    [0, 1], [0, 2], [0, 4], [2, 3], [1, 3], [1, 5],
    [4, 5], [4, 6], [2, 6], [6, 7], [5, 7], [3, 7],
];

/// Edges bounding each cube face: bottom, top, left, right, back, front.
pub const EDGES_BY_FACE: [[usize; 4]; 6] = [
    [0, 2, 5, 6],
    [3, 8, 9, 11],
    [1, 2, 7, 8],
    [4, 5, 10, 11],
    [0, 1, 3, 4],
    [6, 7, 9, 10],
];

/// Configurations whose dual vertex may be split to keep the surface manifold.
#[rustfmt::skip]
pub static NON_MANIFOLD_CONFIG: [bool; 256] = [
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, true,  true,  false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, true,  false, false, true,  false,
    false, false, false, false, false, false, false, true,
    false, false, false, false, false, false, true,  true,
    false, false, false, false, false, false, true,  false,
    false, false, true,  true,  true,  true,  false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, false, false, false, false, false,
    false, false, false, true,  false, true,  false, true,
    false, false, false, false, false, false, false, true,
    false, false, false, false, false, true,  false, false,
    false, false, false, false, false, true,  false, true,
    false, true,  false, false, true,  false, true,  false,
    false, false, false, false, false, false, false, true,
    false, false, false, true,  false, false, false, false,
    false, false, false, true,  false, false, false, true,
    false, true,  true,  false, false, false, true,  false,
    false, false, false, true,  false, true,  true,  false,
    false, false, false, true,  false, true,  false, false,
    false, false, false, false, false, false, true,  false,
    false, true,  false, false, false, false, false, false,
];

/// Vertex slot used by each edge of a configuration, `-1` when the edge is not crossed.
#[rustfmt::skip]
pub static VERTEX_SLOTS_BY_CONFIGURATION: [[i8; 12]; 256] = [
    [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    [ 0,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    [ 0, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1],
    [-1,  0,  0, -1,  0,  0, -1, -1, -1, -1, -1, -1],
    [-1,  0, -1,  0, -1, -1, -1, -1,  0, -1, -1, -1],
    [ 0, -1,  0,  0, -1, -1, -1, -1,  0, -1, -1, -1],
    [ 0,  1, -1,  1,  0,  0, -1, -1,  1, -1, -1, -1],
    [-1, -1,  0,  0,  0,  0, -1, -1,  0, -1, -1, -1],
    [-1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1,  0],
    [ 0,  0,  0,  1,  1, -1, -1, -1, -1, -1, -1,  1],
    [ 0, -1, -1,  0, -1,  0, -1, -1, -1, -1, -1,  0],
    [-1,  0,  0,  0, -1,  0, -1, -1, -1, -1, -1,  0],
    [-1,  0, -1, -1,  0, -1, -1, -1,  0, -1, -1,  0],
    [ 0, -1,  0, -1,  0, -1, -1, -1,  0, -1, -1,  0],
    [ 0,  0, -1, -1, -1,  0, -1, -1,  0, -1, -1,  0],
    [-1, -1,  0, -1, -1,  0, -1, -1,  0, -1, -1,  0],
    [-1, -1,  0, -1, -1, -1,  0,  0, -1, -1, -1, -1],
    [ 0,  0, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1],
    [ 0, -1,  1, -1,  0,  0,  1,  1, -1, -1, -1, -1],
    [-1,  0, -1, -1,  0,  0,  0,  0, -1, -1, -1, -1],
    [-1,  1,  0,  1, -1, -1,  0,  0,  1, -1, -1, -1],
    [ 0, -1, -1,  0, -1, -1,  0,  0,  0, -1, -1, -1],
    [ 2,  0,  1,  0,  2,  2,  1,  1,  0, -1, -1, -1],
    [-1, -1, -1,  0,  0,  0,  0,  0,  0, -1, -1, -1],
    [-1, -1,  0,  1,  1, -1,  0,  0, -1, -1, -1,  1],
    [ 0,  0, -1,  1,  1, -1,  0,  0, -1, -1, -1,  1],
    [ 0, -1,  1,  0, -1,  0,  1,  1, -1, -1, -1,  0],
    [-1,  0, -1,  0, -1,  0,  0,  0, -1, -1, -1,  0],
    [-1,  0,  1, -1,  0, -1,  1,  1,  0, -1, -1,  0],
    [ 0, -1, -1, -1,  0, -1,  0,  0,  0, -1, -1,  0],
    [ 1,  1,  0, -1, -1,  1,  0,  0,  1, -1, -1,  1],
    [-1, -1, -1, -1, -1,  0,  0,  0,  0, -1, -1,  0],
    [-1, -1, -1, -1, -1,  0,  0, -1, -1, -1,  0, -1],
    [ 0,  0,  0, -1, -1,  1,  1, -1, -1, -1,  1, -1],
    [ 0, -1, -1, -1,  0, -1,  0, -1, -1, -1,  0, -1],
    [-1,  0,  0, -1,  0, -1,  0, -1, -1, -1,  0, -1],
    [-1,  1, -1,  1, -1,  0,  0, -1,  1, -1,  0, -1],
    [ 0, -1,  0,  0, -1,  1,  1, -1,  0, -1,  1, -1],
    [ 0,  1, -1,  1,  0, -1,  0, -1,  1, -1,  0, -1],
    [-1, -1,  0,  0,  0, -1,  0, -1,  0, -1,  0, -1],
    [-1, -1, -1,  1,  1,  0,  0, -1, -1, -1,  0,  1],
    [ 1,  1,  1,  0,  0,  2,  2, -1, -1, -1,  2,  0],
    [ 0, -1, -1,  0, -1, -1,  0, -1, -1, -1,  0,  0],
    [-1,  0,  0,  0, -1, -1,  0, -1, -1, -1,  0,  0],
    [-1,  0, -1, -1,  0,  1,  1, -1,  0, -1,  1,  0],
    [ 1, -1,  1, -1,  1,  0,  0, -1,  1, -1,  0,  1],
    [ 0,  0, -1, -1, -1, -1,  0, -1,  0, -1,  0,  0],
    [-1, -1,  0, -1, -1, -1,  0, -1,  0, -1,  0,  0],
    [-1, -1,  0, -1, -1,  0, -1,  0, -1, -1,  0, -1],
    [ 0,  0, -1, -1, -1,  0, -1,  0, -1, -1,  0, -1],
    [ 0, -1,  0, -1,  0, -1, -1,  0, -1, -1,  0, -1],
    [-1,  0, -1, -1,  0, -1, -1,  0, -1, -1,  0, -1],
    [-1,  1,  0,  1, -1,  0, -1,  0,  1, -1,  0, -1],
    [ 0, -1, -1,  0, -1,  0, -1,  0,  0, -1,  0, -1],
    [ 1,  0,  1,  0,  1, -1, -1,  1,  0, -1,  1, -1],
    [-1, -1, -1,  0,  0, -1, -1,  0,  0, -1,  0, -1],
    [-1, -1,  0,  1,  1,  0, -1,  0, -1, -1,  0,  1],
    [ 1,  1, -1,  0,  0,  1, -1,  1, -1, -1,  1,  0],
    [ 0, -1,  0,  0, -1, -1, -1,  0, -1, -1,  0,  0],
    [-1,  0, -1,  0, -1, -1, -1,  0, -1, -1,  0,  0],
    [-1,  1,  0, -1,  1,  0, -1,  0,  1, -1,  0,  1],
    [ 1, -1, -1, -1,  1,  1, -1,  0,  0, -1,  0,  0],
    [ 1,  1,  1, -1, -1, -1, -1,  0,  0, -1,  0,  0],
    [-1, -1, -1, -1, -1, -1, -1,  0,  0, -1,  0,  0],
    [-1, -1, -1, -1, -1, -1, -1,  0,  0,  0, -1, -1],
    [ 0,  0,  0, -1, -1, -1, -1,  1,  1,  1, -1, -1],
    [ 1, -1, -1, -1,  1,  1, -1,  0,  0,  0, -1, -1],
    [-1,  0,  0, -1,  0,  0, -1,  1,  1,  1, -1, -1],
    [-1,  0, -1,  0, -1, -1, -1,  0, -1,  0, -1, -1],
    [ 0, -1,  0,  0, -1, -1, -1,  0, -1,  0, -1, -1],
    [ 1,  0, -1,  0,  1,  1, -1,  0, -1,  0, -1, -1],
    [-1, -1,  0,  0,  0,  0, -1,  0, -1,  0, -1, -1],
    [-1, -1, -1,  0,  0, -1, -1,  1,  1,  1, -1,  0],
    [ 2,  2,  2,  0,  0, -1, -1,  1,  1,  1, -1,  0],
    [ 0, -1, -1,  0, -1,  0, -1,  1,  1,  1, -1,  0],
    [-1,  1,  1,  1, -1,  1, -1,  0,  0,  0, -1,  1],
    [-1,  0, -1, -1,  0, -1, -1,  0, -1,  0, -1,  0],
    [ 0, -1,  0, -1,  0, -1, -1,  0, -1,  0, -1,  0],
    [ 0,  0, -1, -1, -1,  0, -1,  0, -1,  0, -1,  0],
    [-1, -1,  0, -1, -1,  0, -1,  0, -1,  0, -1,  0],
    [-1, -1,  0, -1, -1, -1,  0, -1,  0,  0, -1, -1],
    [ 0,  0, -1, -1, -1, -1,  0, -1,  0,  0, -1, -1],
    [ 1, -1,  0, -1,  1,  1,  0, -1,  0,  0, -1, -1],
    [-1,  0, -1, -1,  0,  0,  0, -1,  0,  0, -1, -1],
    [-1,  0,  0,  0, -1, -1,  0, -1, -1,  0, -1, -1],
    [ 0, -1, -1,  0, -1, -1,  0, -1, -1,  0, -1, -1],
    [ 0,  1,  1,  1,  0,  0,  1, -1, -1,  1, -1, -1],
    [-1, -1, -1,  0,  0,  0,  0, -1, -1,  0, -1, -1],
    [-1, -1,  0,  1,  1, -1,  0, -1,  0,  0, -1,  1],
    [ 1,  1, -1,  0,  0, -1,  1, -1,  1,  1, -1,  0],
    [ 1, -1,  0,  1, -1,  1,  0, -1,  0,  0, -1,  1],
    [-1,  1, -1,  1, -1,  0,  0, -1,  1,  0, -1,  0],
    [-1,  0,  0, -1,  0, -1,  0, -1, -1,  0, -1,  0],
    [ 0, -1, -1, -1,  0, -1,  0, -1, -1,  0, -1,  0],
    [ 1,  1,  1, -1, -1,  0,  0, -1, -1,  0, -1,  0],
    [-1, -1, -1, -1, -1,  0,  0, -1, -1,  0, -1,  0],
    [-1, -1, -1, -1, -1,  0,  0,  1,  1,  1,  0, -1],
    [ 1,  1,  1, -1, -1,  0,  0,  2,  2,  2,  0, -1],
    [ 0, -1, -1, -1,  0, -1,  0,  1,  1,  1,  0, -1],
    [-1,  1,  1, -1,  1, -1,  1,  0,  0,  0,  1, -1],
    [-1,  0, -1,  0, -1,  1,  1,  0, -1,  0,  1, -1],
    [ 1, -1,  1,  1, -1,  0,  0,  1, -1,  1,  0, -1],
    [ 0,  1, -1,  1,  0, -1,  0,  1, -1,  1,  0, -1],
    [-1, -1,  1,  0,  0, -1,  1,  1, -1,  0,  0, -1],
    [-1, -1, -1,  1,  1,  2,  2,  0,  0,  0,  2,  1],
    [ 2,  2,  2,  3,  3,  0,  0,  1,  1,  1,  0,  3],
    [ 1, -1, -1,  1, -1, -1,  1,  0,  0,  0,  1,  1],
    [-1,  0,  0,  0, -1, -1,  0,  1,  1,  1,  0,  0],
    [-1,  1, -1, -1,  1,  0,  0,  1, -1,  1,  0,  1],
    [ 0, -1,  0, -1,  0,  1,  1,  0, -1,  0,  1,  0],
    [ 0,  0, -1, -1, -1, -1,  0,  0, -1,  1,  1,  1],
    [-1, -1,  0, -1, -1, -1,  0,  0, -1,  1,  1,  1],
    [-1, -1,  0, -1, -1,  0, -1, -1,  0,  0,  0, -1],
    [ 0,  0, -1, -1, -1,  0, -1, -1,  0,  0,  0, -1],
    [ 0, -1,  0, -1,  0, -1, -1, -1,  0,  0,  0, -1],
    [-1,  0, -1, -1,  0, -1, -1, -1,  0,  0,  0, -1],
    [-1,  0,  0,  0, -1,  0, -1, -1, -1,  0,  0, -1],
    [ 0, -1, -1,  0, -1,  0, -1, -1, -1,  0,  0, -1],
    [ 1,  1,  1,  0,  0, -1, -1, -1, -1,  0,  0, -1],
    [-1, -1, -1,  0,  0, -1, -1, -1, -1,  0,  0, -1],
    [-1, -1,  1,  0,  0,  1, -1, -1,  1,  1,  1,  0],
    [ 0,  0, -1,  1,  1,  0, -1, -1,  0,  0,  0,  1],
    [ 0, -1,  0,  0, -1, -1, -1, -1,  0,  1,  1,  1],
    [-1,  0, -1,  0, -1, -1, -1, -1,  0,  1,  1,  1],
    [-1,  0,  0, -1,  0,  0, -1, -1, -1,  1,  1,  1],
    [ 0, -1, -1, -1,  0,  0, -1, -1, -1,  1,  1,  1],
    [ 1,  1,  1, -1, -1, -1, -1, -1, -1,  0,  0,  0],
    [-1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0,  0],
    [-1, -1, -1, -1, -1, -1, -1, -1, -1,  0,  0,  0],
    [ 1,  1,  1, -1, -1, -1, -1, -1, -1,  0,  0,  0],
    [ 0, -1, -1, -1,  0,  0, -1, -1, -1,  1,  1,  1],
    [-1,  0,  0, -1,  0,  0, -1, -1, -1,  1,  1,  1],
    [-1,  0, -1,  0, -1, -1, -1, -1,  0,  1,  1,  1],
    [ 0, -1,  0,  0, -1, -1, -1, -1,  0,  1,  1,  1],
    [ 2,  1, -1,  1,  2,  2, -1, -1,  1,  0,  0,  0],
    [-1, -1,  1,  1,  1,  1, -1, -1,  1,  0,  0,  0],
    [-1, -1, -1,  0,  0, -1, -1, -1, -1,  0,  0, -1],
    [ 1,  1,  1,  0,  0, -1, -1, -1, -1,  0,  0, -1],
    [ 0, -1, -1,  0, -1,  0, -1, -1, -1,  0,  0, -1],
    [-1,  0,  0,  0, -1,  0, -1, -1, -1,  0,  0, -1],
    [-1,  0, -1, -1,  0, -1, -1, -1,  0,  0,  0, -1],
    [ 0, -1,  0, -1,  0, -1, -1, -1,  0,  0,  0, -1],
    [ 0,  0, -1, -1, -1,  0, -1, -1,  0,  0,  0, -1],
    [-1, -1,  0, -1, -1,  0, -1, -1,  0,  0,  0, -1],
    [-1, -1,  0, -1, -1, -1,  0,  0, -1,  1,  1,  1],
    [ 0,  0, -1, -1, -1, -1,  0,  0, -1,  1,  1,  1],
    [ 1, -1,  2, -1,  1,  1,  2,  2, -1,  0,  0,  0],
    [-1,  1, -1, -1,  1,  1,  1,  1, -1,  0,  0,  0],
    [-1,  1,  0,  1, -1, -1,  0,  0,  1,  2,  2,  2],
    [ 1, -1, -1,  1, -1, -1,  1,  1,  1,  0,  0,  0],
    [ 3,  2,  0,  2,  3,  3,  0,  0,  2,  1,  1,  1],
    [-1, -1, -1,  0,  0,  0,  0,  0,  0,  1,  1,  1],
    [-1, -1,  1,  0,  0, -1,  1,  1, -1,  0,  0, -1],
    [ 1,  1, -1,  0,  0, -1,  1,  1, -1,  0,  0, -1],
    [ 1, -1,  0,  1, -1,  1,  0,  0, -1,  1,  1, -1],
    [-1,  0, -1,  0, -1,  1,  1,  0, -1,  0,  1, -1],
    [-1,  1,  0, -1,  1, -1,  0,  0,  1,  1,  1, -1],
    [ 0, -1, -1, -1,  0, -1,  0,  1,  1,  1,  0, -1],
    [ 0,  0,  1, -1, -1,  0,  1,  1,  0,  0,  0, -1],
    [-1, -1, -1, -1, -1,  0,  0,  1,  1,  1,  0, -1],
    [-1, -1, -1, -1, -1,  0,  0, -1, -1,  0, -1,  0],
    [ 1,  1,  1, -1, -1,  0,  0, -1, -1,  0, -1,  0],
    [ 0, -1, -1, -1,  0, -1,  0, -1, -1,  0, -1,  0],
    [-1,  0,  0, -1,  0, -1,  0, -1, -1,  0, -1,  0],
    [-1,  1, -1,  1, -1,  0,  0, -1,  1,  0, -1,  0],
    [ 1, -1,  1,  1, -1,  0,  0, -1,  1,  0, -1,  0],
    [ 1,  0, -1,  0,  1, -1,  1, -1,  0,  1, -1,  1],
    [-1, -1,  0,  1,  1, -1,  0, -1,  0,  0, -1,  1],
    [-1, -1, -1,  0,  0,  0,  0, -1, -1,  0, -1, -1],
    [ 0,  0,  0,  1,  1,  1,  1, -1, -1,  1, -1, -1],
    [ 0, -1, -1,  0, -1, -1,  0, -1, -1,  0, -1, -1],
    [-1,  0,  0,  0, -1, -1,  0, -1, -1,  0, -1, -1],
    [-1,  0, -1, -1,  0,  0,  0, -1,  0,  0, -1, -1],
    [ 1, -1,  0, -1,  1,  1,  0, -1,  0,  0, -1, -1],
    [ 0,  0, -1, -1, -1, -1,  0, -1,  0,  0, -1, -1],
    [-1, -1,  0, -1, -1, -1,  0, -1,  0,  0, -1, -1],
    [-1, -1,  0, -1, -1,  0, -1,  0, -1,  0, -1,  0],
    [ 0,  0, -1, -1, -1,  0, -1,  0, -1,  0, -1,  0],
    [ 0, -1,  0, -1,  0, -1, -1,  0, -1,  0, -1,  0],
    [-1,  0, -1, -1,  0, -1, -1,  0, -1,  0, -1,  0],
    [-1,  0,  1,  0, -1,  1, -1,  1,  0,  1, -1,  1],
    [ 0, -1, -1,  0, -1,  0, -1,  1,  1,  1, -1,  0],
    [ 0,  1,  0,  1,  0, -1, -1,  0,  1,  0, -1,  0],
    [-1, -1, -1,  0,  0, -1, -1,  1,  1,  1, -1,  0],
    [-1, -1,  0,  0,  0,  0, -1,  0, -1,  0, -1, -1],
    [ 1,  0, -1,  0,  1,  1, -1,  0, -1,  0, -1, -1],
    [ 0, -1,  0,  0, -1, -1, -1,  0, -1,  0, -1, -1],
    [-1,  0, -1,  0, -1, -1, -1,  0, -1,  0, -1, -1],
    [-1,  0,  0, -1,  0,  0, -1,  1,  1,  1, -1, -1],
    [ 1, -1, -1, -1,  1,  1, -1,  0,  0,  0, -1, -1],
    [ 0,  0,  0, -1, -1, -1, -1,  1,  1,  1, -1, -1],
    [-1, -1, -1, -1, -1, -1, -1,  0,  0,  0, -1, -1],
    [-1, -1, -1, -1, -1, -1, -1,  0,  0, -1,  0,  0],
    [ 1,  1,  1, -1, -1, -1, -1,  0,  0, -1,  0,  0],
    [ 1, -1, -1, -1,  1,  1, -1,  0,  0, -1,  0,  0],
    [-1,  1,  1, -1,  1,  1, -1,  0,  0, -1,  0,  0],
    [-1,  0, -1,  0, -1, -1, -1,  0, -1, -1,  0,  0],
    [ 0, -1,  0,  0, -1, -1, -1,  0, -1, -1,  0,  0],
    [ 0,  1, -1,  1,  0,  0, -1,  1, -1, -1,  1,  1],
    [-1, -1,  0,  1,  1,  0, -1,  0, -1, -1,  0,  1],
    [-1, -1, -1,  0,  0, -1, -1,  0,  0, -1,  0, -1],
    [ 0,  0,  0,  1,  1, -1, -1,  1,  1, -1,  1, -1],
    [ 0, -1, -1,  0, -1,  0, -1,  0,  0, -1,  0, -1],
    [-1,  1,  0,  1, -1,  0, -1,  0,  1, -1,  0, -1],
    [-1,  0, -1, -1,  0, -1, -1,  0, -1, -1,  0, -1],
    [ 0, -1,  0, -1,  0, -1, -1,  0, -1, -1,  0, -1],
    [ 0,  0, -1, -1, -1,  0, -1,  0, -1, -1,  0, -1],
    [-1, -1,  0, -1, -1,  0, -1,  0, -1, -1,  0, -1],
    [-1, -1,  0, -1, -1, -1,  0, -1,  0, -1,  0,  0],
    [ 0,  0, -1, -1, -1, -1,  0, -1,  0, -1,  0,  0],
    [ 0, -1,  1, -1,  0,  0,  1, -1,  1, -1,  1,  1],
    [-1,  0, -1, -1,  0,  1,  1, -1,  0, -1,  1,  0],
    [-1,  0,  0,  0, -1, -1,  0, -1, -1, -1,  0,  0],
    [ 0, -1, -1,  0, -1, -1,  0, -1, -1, -1,  0,  0],
    [ 1,  0,  0,  0,  1,  1,  0, -1, -1, -1,  0,  0],
    [-1, -1, -1,  1,  1,  0,  0, -1, -1, -1,  0,  1],
    [-1, -1,  0,  0,  0, -1,  0, -1,  0, -1,  0, -1],
    [ 0,  1, -1,  1,  0, -1,  0, -1,  1, -1,  0, -1],
    [ 0, -1,  0,  0, -1,  1,  1, -1,  0, -1,  1, -1],
    [-1,  1, -1,  1, -1,  0,  0, -1,  1, -1,  0, -1],
    [-1,  0,  0, -1,  0, -1,  0, -1, -1, -1,  0, -1],
    [ 0, -1, -1, -1,  0, -1,  0, -1, -1, -1,  0, -1],
    [ 0,  0,  0, -1, -1,  1,  1, -1, -1, -1,  1, -1],
    [-1, -1, -1, -1, -1,  0,  0, -1, -1, -1,  0, -1],
    [-1, -1, -1, -1, -1,  0,  0,  0,  0, -1, -1,  0],
    [ 0,  0,  0, -1, -1,  1,  1,  1,  1, -1, -1,  1],
    [ 0, -1, -1, -1,  0, -1,  0,  0,  0, -1, -1,  0],
    [-1,  0,  1, -1,  0, -1,  1,  1,  0, -1, -1,  0],
    [-1,  0, -1,  0, -1,  0,  0,  0, -1, -1, -1,  0],
    [ 0, -1,  1,  0, -1,  0,  1,  1, -1, -1, -1,  0],
    [ 0,  0, -1,  1,  1, -1,  0,  0, -1, -1, -1,  1],
    [-1, -1,  0,  1,  1, -1,  0,  0, -1, -1, -1,  1],
    [-1, -1, -1,  0,  0,  0,  0,  0,  0, -1, -1, -1],
    [ 1,  1,  1,  0,  0,  0,  0,  0,  0, -1, -1, -1],
    [ 0, -1, -1,  0, -1, -1,  0,  0,  0, -1, -1, -1],
    [-1,  1,  0,  1, -1, -1,  0,  0,  1, -1, -1, -1],
    [-1,  0, -1, -1,  0,  0,  0,  0, -1, -1, -1, -1],
    [ 0, -1,  1, -1,  0,  0,  1,  1, -1, -1, -1, -1],
    [ 0,  0, -1, -1, -1, -1,  0,  0, -1, -1, -1, -1],
    [-1, -1,  0, -1, -1, -1,  0,  0, -1, -1, -1, -1],
    [-1, -1,  0, -1, -1,  0, -1, -1,  0, -1, -1,  0],
    [ 0,  0, -1, -1, -1,  0, -1, -1,  0, -1, -1,  0],
    [ 0, -1,  0, -1,  0, -1, -1, -1,  0, -1, -1,  0],
    [-1,  0, -1, -1,  0, -1, -1, -1,  0, -1, -1,  0],
    [-1,  0,  0,  0, -1,  0, -1, -1, -1, -1, -1,  0],
    [ 0, -1, -1,  0, -1,  0, -1, -1, -1, -1, -1,  0],
    [ 0,  0,  0,  1,  1, -1, -1, -1, -1, -1, -1,  1],
    [-1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1,  0],
    [-1, -1,  0,  0,  0,  0, -1, -1,  0, -1, -1, -1],
    [ 0,  1, -1,  1,  0,  0, -1, -1,  1, -1, -1, -1],
    [ 0, -1,  0,  0, -1, -1, -1, -1,  0, -1, -1, -1],
    [-1,  0, -1,  0, -1, -1, -1, -1,  0, -1, -1, -1],
    [-1,  0,  0, -1,  0,  0, -1, -1, -1, -1, -1, -1],
    [ 0, -1, -1, -1,  0,  0, -1, -1, -1, -1, -1, -1],
    [ 0,  0,  0, -1, -1, -1, -1, -1, -1, -1, -1, -1],
    [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1],
];
