//! Loose octree over element indices.
//!
//! The octree stores plain `u32` element indices (the dynamic mesh uses face indices),
//! each keyed by a position and a maximum extent. Every node tests queries against a
//! box twice as wide as the node itself, so an element only has to fit its node by
//! center and extent.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. A back-map from element index
//! to owning node makes deletion and realignment O(1). Cloning the octree keeps all
//! handles valid.

mod node;
mod statistics;

use dynamesh_core::{OctreeOptions, PrimAABox, PrimPlane, PrimRay, PrimSphere, QueryShape};
use dynamesh_core::{EPSILON, INVALID_INDEX};
use glam::Vec3;

use node::Node;
pub use node::NodeId;
pub use statistics::OctreeStatistics;

/// Loose octree with an element back-map.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<Option<Node>>,
    free_nodes: Vec<NodeId>,
    root: Option<NodeId>,
    element_nodes: Vec<Option<NodeId>>,
    relative_min_element_extent: f32,
}

impl Default for Octree {
    fn default() -> Self {
        Self::new()
    }
}

impl Octree {
    /// Creates an empty octree with default options.
    pub fn new() -> Self {
        Self::with_options(&OctreeOptions::default())
    }

    /// Creates an empty octree.
    pub fn with_options(options: &OctreeOptions) -> Self {
        assert!(
            options.relative_min_element_extent > 0.0 && options.relative_min_element_extent < 0.5,
            "relative_min_element_extent must be in (0, 0.5)"
        );
        Self {
            nodes: Vec::new(),
            free_nodes: Vec::new(),
            root: None,
            element_nodes: Vec::new(),
            relative_min_element_extent: options.relative_min_element_extent,
        }
    }

    // === Arena ===

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("octree node {id:?} was freed"))
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("octree node {id:?} was freed"))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free_nodes.pop() {
            self.nodes[id.index()] = Some(node);
            id
        } else {
            let id = NodeId(dynamesh_core::to_u32(self.nodes.len()));
            self.nodes.push(Some(node));
            id
        }
    }

    fn free(&mut self, id: NodeId) {
        if let Some(node) = self.nodes[id.index()].take() {
            self.free_nodes.push(id);
            if let Some(children) = node.children {
                for c in children {
                    self.free(c);
                }
            }
        }
    }

    /// Creates the 8 children of `id`, optionally adopting an existing node as child `adopt.0`.
    fn make_children(&mut self, id: NodeId, adopt: Option<(usize, NodeId)>) -> [NodeId; 8] {
        debug_assert!(self.node(id).children.is_none());

        let (width, depth) = {
            let n = self.node(id);
            (n.width * 0.5, n.depth + 1)
        };
        let mut children = [id; 8];
        for (i, child) in children.iter_mut().enumerate() {
            *child = match adopt {
                Some((j, adopted)) if j == i => {
                    self.node_mut(adopted).parent = Some(id);
                    adopted
                }
                _ => {
                    let center = self.node(id).child_center(i);
                    self.alloc(Node::new(center, width, depth, Some(id)))
                }
            };
        }
        self.node_mut(id).children = Some(children);
        children
    }

    // === Root ===

    /// Returns whether the octree has a root node.
    pub fn has_root(&self) -> bool {
        self.root.is_some()
    }

    /// Creates the root node.
    ///
    /// # Panics
    ///
    /// Panics if the octree already has a root.
    pub fn setup_root(&mut self, center: Vec3, width: f32) {
        assert!(!self.has_root(), "octree root is already set up");
        assert!(center.is_finite() && width.is_finite(), "octree root must be finite");
        let id = self.alloc(Node::new(center, width.max(EPSILON), 0, None));
        self.root = Some(id);
    }

    /// Returns the center of the root node.
    pub fn root_center(&self) -> Option<Vec3> {
        self.root.map(|r| self.node(r).center)
    }

    /// Returns the width of the root node.
    pub fn root_width(&self) -> Option<f32> {
        self.root.map(|r| self.node(r).width)
    }

    /// Removes all nodes and elements.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.free_nodes.clear();
        self.root = None;
        self.element_nodes.clear();
    }

    /// Wraps the root into a parent of twice its width that extends towards `position`.
    fn make_parent(&mut self, position: Vec3) {
        let Some(root) = self.root else {
            return;
        };
        let (root_center, root_width, root_depth) = {
            let r = self.node(root);
            (r.center, r.width, r.depth)
        };
        let half = root_width * 0.5;
        let mut parent_center = Vec3::ZERO;
        let mut index = 0;

        for (axis, bit) in [(0, 4), (1, 2), (2, 1)] {
            if root_center[axis] < position[axis] {
                parent_center[axis] = root_center[axis] + half;
            } else {
                parent_center[axis] = root_center[axis] - half;
                index += bit;
            }
        }

        let parent = self.alloc(Node::new(parent_center, root_width * 2.0, root_depth - 1, None));
        self.make_children(parent, Some((index, root)));
        self.root = Some(parent);
    }

    /// Replaces the root by its only non-empty child for as long as possible.
    pub fn shrink_root(&mut self) {
        while let Some(root) = self.root {
            let node = self.node(root);
            let Some(children) = node.children else {
                return;
            };
            if !node.indices.is_empty() {
                return;
            }
            let mut non_empty = children.iter().filter(|&&c| !self.node(c).is_empty());
            let (Some(&child), None) = (non_empty.next(), non_empty.next()) else {
                return;
            };

            for c in children {
                if c != child {
                    self.free(c);
                }
            }
            self.nodes[root.index()] = None;
            self.free_nodes.push(root);
            self.node_mut(child).parent = None;
            self.root = Some(child);
        }
    }

    // === Elements ===

    /// Returns the number of elements.
    pub fn num_elements(&self) -> usize {
        self.element_nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns the node owning element `index`.
    pub fn node_of(&self, index: u32) -> Option<NodeId> {
        self.element_nodes.get(index as usize).copied().flatten()
    }

    /// Returns whether element `index` is stored, checking the owning node itself.
    pub fn contains_element(&self, index: u32) -> bool {
        self.node_of(index)
            .is_some_and(|id| self.node(id).indices.contains(&index))
    }

    /// Returns the center and width of node `id`.
    pub fn node_bounds(&self, id: NodeId) -> (Vec3, f32) {
        let n = self.node(id);
        (n.center, n.width)
    }

    /// Inserts element `index` at `position` with extent `max_extent`.
    ///
    /// The root grows until it contains the element. An octree without a root gets one
    /// centred at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is already stored or the position is not finite.
    pub fn add_element(&mut self, index: u32, position: Vec3, max_extent: f32) {
        assert!(
            position.is_finite() && max_extent.is_finite(),
            "octree element {index} is not finite"
        );
        if !self.has_root() {
            self.setup_root(position, max_extent + EPSILON);
        }
        let root = loop {
            let Some(root) = self.root else {
                unreachable!("octree has a root");
            };
            if self.node(root).approx_contains(position, max_extent) {
                break root;
            }
            self.make_parent(position);
        };

        let mut id = root;
        while self.node(id).descends(max_extent, self.relative_min_element_extent) {
            let children = match self.node(id).children {
                Some(children) => children,
                None => self.make_children(id, None),
            };
            id = children[self.node(id).child_index(position)];
        }
        self.node_mut(id).indices.insert(index);
        self.set_element_node(index, id);
    }

    fn set_element_node(&mut self, index: u32, id: NodeId) {
        let i = index as usize;
        if i >= self.element_nodes.len() {
            self.element_nodes.resize(i + 1, None);
        }
        assert!(
            self.element_nodes[i].is_none(),
            "octree element {index} is already stored"
        );
        self.element_nodes[i] = Some(id);
    }

    /// Moves element `index` if its position or extent no longer suits its node.
    pub fn realign_element(&mut self, index: u32, position: Vec3, max_extent: f32) {
        let Some(id) = self.node_of(index) else {
            panic!("octree element {index} is not stored");
        };
        let node = self.node(id);
        if !node.approx_contains(position, max_extent)
            || node.descends(max_extent, self.relative_min_element_extent)
        {
            self.delete_element(index);
            self.add_element(index, position, max_extent);
        }
    }

    /// Removes element `index`.
    ///
    /// The root is dropped when it becomes empty, otherwise it is shrunk.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not stored.
    pub fn delete_element(&mut self, index: u32) {
        let Some(id) = self.node_of(index) else {
            panic!("octree element {index} is not stored");
        };
        let removed = self.node_mut(id).indices.remove(&index);
        assert!(removed, "octree back-map of element {index} is corrupt");
        self.element_nodes[index as usize] = None;

        if let Some(root) = self.root {
            if self.node(root).is_empty() {
                self.free(root);
                self.root = None;
            } else {
                self.shrink_root();
            }
        }
    }

    /// Removes all subtrees that hold no elements.
    pub fn delete_empty_children(&mut self) {
        if let Some(root) = self.root {
            if self.delete_empty_children_of(root) {
                self.free(root);
                self.root = None;
            }
        }
    }

    fn delete_empty_children_of(&mut self, id: NodeId) -> bool {
        if let Some(children) = self.node(id).children {
            let mut all_empty = true;
            for c in children {
                if !self.delete_empty_children_of(c) {
                    all_empty = false;
                }
            }
            if all_empty {
                for c in children {
                    self.free(c);
                }
                self.node_mut(id).children = None;
            }
        }
        self.node(id).is_empty()
    }

    /// Renames elements after their indices were compacted.
    ///
    /// `map[old]` is the new index of `old`, or [`INVALID_INDEX`] if it was removed.
    pub fn update_indices(&mut self, map: &[u32]) {
        for (i, &new_i) in map.iter().enumerate() {
            if new_i == INVALID_INDEX || new_i as usize == i {
                continue;
            }
            let node = self.element_nodes.get_mut(i).and_then(Option::take);
            assert!(node.is_some(), "moved octree element {i} is not stored");
            assert!(
                self.node_of(new_i).is_none(),
                "octree element {new_i} is overwritten"
            );
            self.element_nodes[new_i as usize] = node;
        }
        self.element_nodes.resize(map.len(), None);

        for node in self.nodes.iter_mut().flatten() {
            node.indices = node
                .indices
                .iter()
                .filter_map(|&i| map.get(i as usize).copied())
                .filter(|&i| i != INVALID_INDEX)
                .collect();
        }
    }

    // === Queries ===

    /// Visits every element of every node whose loose box the shape intersects or contains.
    ///
    /// The visitor receives whether the shape contains the node's loose box.
    pub fn query<Q: QueryShape + ?Sized>(&self, shape: &Q, mut f: impl FnMut(bool, u32)) {
        if let Some(root) = self.root {
            self.query_node(root, shape, &mut f);
        }
    }

    fn query_node<Q, F>(&self, id: NodeId, shape: &Q, f: &mut F)
    where
        Q: QueryShape + ?Sized,
        F: FnMut(bool, u32),
    {
        let node = self.node(id);
        let loose = node.loose_box();
        let contains = shape.contains_box(&loose);

        if contains || shape.intersects_box(&loose) {
            for &i in &node.indices {
                f(contains, i);
            }
            if let Some(children) = node.children {
                for c in children {
                    self.query_node(c, shape, f);
                }
            }
        }
    }

    /// Visits the elements of all nodes hit by `ray`.
    pub fn intersects_ray(&self, ray: &PrimRay, mut f: impl FnMut(u32)) {
        self.query(ray, |_, i| f(i));
    }

    /// Visits the elements of all nodes intersecting `plane`.
    pub fn intersects_plane(&self, plane: &PrimPlane, mut f: impl FnMut(u32)) {
        self.query(plane, |_, i| f(i));
    }

    /// Visits the elements of all nodes touching `sphere`, with the containment flag.
    pub fn intersects_sphere(&self, sphere: &PrimSphere, f: impl FnMut(bool, u32)) {
        self.query(sphere, f);
    }

    /// Visits the elements of all nodes touching `aabox`, with the containment flag.
    pub fn intersects_box(&self, aabox: &PrimAABox, f: impl FnMut(bool, u32)) {
        self.query(aabox, f);
    }

    // === Statistics ===

    /// Returns node and element counts per depth, see [`OctreeStatistics`].
    pub fn statistics(&self) -> OctreeStatistics {
        let mut stats = OctreeStatistics::default();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            stats.add_node(node.depth, node.indices.len());
            if let Some(children) = node.children {
                stack.extend(children);
            }
        }
        stats
    }

    /// Logs [`Octree::statistics`].
    pub fn print_statistics(&self) {
        log::info!("{}", self.statistics());
    }

    /// Checks the links between nodes, back-map and element sets.
    ///
    /// Returns `false` and logs a warning on the first broken link.
    pub fn check_integrity(&self) -> bool {
        for (i, entry) in self.element_nodes.iter().enumerate() {
            if let Some(id) = entry {
                let alive = self.nodes.get(id.index()).is_some_and(Option::is_some);
                if !alive || !self.node(*id).indices.contains(&dynamesh_core::to_u32(i)) {
                    log::warn!("octree element {i} maps to a node that does not hold it");
                    return false;
                }
            }
        }
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        let mut num_elements = 0;
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            num_elements += node.indices.len();
            if node.indices.iter().any(|&i| self.node_of(i) != Some(id)) {
                log::warn!("octree node {id:?} holds an element mapped elsewhere");
                return false;
            }
            if let Some(children) = node.children {
                if children.iter().any(|&c| self.node(c).parent != Some(id)) {
                    log::warn!("octree node {id:?} has a child with a wrong parent");
                    return false;
                }
                stack.extend(children);
            }
        }
        if num_elements != self.num_elements() {
            log::warn!("octree holds elements missing from the back-map");
            return false;
        }
        true
    }
}
