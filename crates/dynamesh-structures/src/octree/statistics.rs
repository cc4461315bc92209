use std::collections::BTreeMap;
use std::fmt;

/// Shape summary of an octree.
///
/// Depths are relative to the depth-0 node the tree was started with; root growth
/// produces negative depths. Both depth fields are 0 for an empty tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OctreeStatistics {
    pub num_nodes: usize,
    pub num_elements: usize,
    pub min_depth: i32,
    pub max_depth: i32,
    pub max_elements_per_node: usize,
    pub num_elements_per_depth: BTreeMap<i32, usize>,
    pub num_nodes_per_depth: BTreeMap<i32, usize>,
}

impl OctreeStatistics {
    pub(super) fn add_node(&mut self, depth: i32, num_elements: usize) {
        if self.num_nodes == 0 {
            self.min_depth = depth;
            self.max_depth = depth;
        } else {
            self.min_depth = self.min_depth.min(depth);
            self.max_depth = self.max_depth.max(depth);
        }
        self.num_nodes += 1;
        self.num_elements += num_elements;
        self.max_elements_per_node = self.max_elements_per_node.max(num_elements);
        *self.num_elements_per_depth.entry(depth).or_insert(0) += num_elements;
        *self.num_nodes_per_depth.entry(depth).or_insert(0) += 1;
    }

    /// Returns the mean number of elements per node.
    pub fn elements_per_node(&self) -> f32 {
        if self.num_nodes == 0 {
            0.0
        } else {
            self.num_elements as f32 / self.num_nodes as f32
        }
    }
}

impl fmt::Display for OctreeStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "octree:")?;
        writeln!(f, "  num nodes: {}", self.num_nodes)?;
        writeln!(f, "  num elements: {}", self.num_elements)?;
        writeln!(f, "  max elements per node: {}", self.max_elements_per_node)?;
        writeln!(f, "  min depth: {}", self.min_depth)?;
        writeln!(f, "  max depth: {}", self.max_depth)?;
        write!(f, "  elements per node: {}", self.elements_per_node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node() {
        let mut stats = OctreeStatistics::default();
        stats.add_node(-1, 0);
        stats.add_node(0, 3);
        stats.add_node(0, 1);

        assert_eq!(stats.num_nodes, 3);
        assert_eq!(stats.num_elements, 4);
        assert_eq!(stats.min_depth, -1);
        assert_eq!(stats.max_depth, 0);
        assert_eq!(stats.max_elements_per_node, 3);
        assert_eq!(stats.num_elements_per_depth[&0], 4);
        assert_eq!(stats.num_nodes_per_depth[&0], 2);
        assert!((stats.elements_per_node() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_display() {
        let text = OctreeStatistics::default().to_string();
        assert!(text.starts_with("octree:"));
        assert!(text.contains("num nodes: 0"));
    }
}
