use std::collections::HashSet;

use dynamesh_core::{PrimAABox, EPSILON};
use glam::Vec3;

/// Handle of a node in the octree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(super) u32);

impl NodeId {
    pub(super) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Children are not created below this width.
const MIN_NODE_WIDTH: f32 = EPSILON * EPSILON;

/// A cubic bucket of element indices.
#[derive(Debug, Clone)]
pub(super) struct Node {
    pub center: Vec3,
    pub width: f32,
    pub depth: i32,
    pub parent: Option<NodeId>,
    pub indices: HashSet<u32>,
    pub children: Option<[NodeId; 8]>,
}

impl Node {
    pub fn new(center: Vec3, width: f32, depth: i32, parent: Option<NodeId>) -> Self {
        debug_assert!(width > 0.0, "octree node width must be positive");
        Self {
            center,
            width,
            depth,
            parent,
            indices: HashSet::new(),
            children: None,
        }
    }

    /// Returns whether an element at `position` with extent `max_extent` fits into this node.
    pub fn approx_contains(&self, position: Vec3, max_extent: f32) -> bool {
        let half = Vec3::splat(EPSILON + self.width * 0.5);
        let min = self.center - half;
        let max = self.center + half;
        min.cmple(position).all() && position.cmple(max).all() && max_extent <= self.width
    }

    /// Returns whether an element of extent `max_extent` belongs into a child of this node.
    pub fn descends(&self, max_extent: f32, relative_min_element_extent: f32) -> bool {
        self.width * 0.5 >= MIN_NODE_WIDTH
            && max_extent <= self.width * relative_min_element_extent
    }

    /// Returns the octant of `position`: `4·(x ≥ cx) + 2·(y ≥ cy) + (z ≥ cz)`.
    pub fn child_index(&self, position: Vec3) -> usize {
        let mut index = 0;
        if position.x >= self.center.x {
            index += 4;
        }
        if position.y >= self.center.y {
            index += 2;
        }
        if position.z >= self.center.z {
            index += 1;
        }
        index
    }

    /// Returns the center of child `i`.
    pub fn child_center(&self, i: usize) -> Vec3 {
        let q = self.width * 0.25;
        let offset = |bit: usize| if i & bit == 0 { -q } else { q };
        self.center + Vec3::new(offset(4), offset(2), offset(1))
    }

    /// Returns the box used for all query tests, twice as wide as the node.
    pub fn loose_box(&self) -> PrimAABox {
        PrimAABox::from_center(self.center, 2.0 * self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.children.is_none()
    }
}
