use std::collections::HashSet;

/// A set of face indices with a staging area.
///
/// Queries insert into the uncommitted set, and [`DynamicFaces::commit`] merges it
/// into the committed indices. Membership and iteration only consider committed indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicFaces {
    indices: HashSet<u32>,
    uncommitted: HashSet<u32>,
}

impl DynamicFaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a face index.
    pub fn insert(&mut self, index: u32) {
        self.uncommitted.insert(index);
    }

    /// Merges the staged indices into the committed ones.
    pub fn commit(&mut self) {
        if self.indices.is_empty() {
            std::mem::swap(&mut self.indices, &mut self.uncommitted);
        } else {
            self.indices.extend(self.uncommitted.drain());
        }
    }

    /// Clears both sets.
    pub fn reset(&mut self) {
        self.indices.clear();
        self.uncommitted.clear();
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }

    /// Returns true if neither set holds an index.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.uncommitted.is_empty()
    }

    pub fn has_uncommitted(&self) -> bool {
        !self.uncommitted.is_empty()
    }

    /// Number of committed indices.
    pub fn num_elements(&self) -> usize {
        self.indices.len()
    }

    /// Keeps only indices (committed or not) for which `f` returns true.
    pub fn filter(&mut self, mut f: impl FnMut(u32) -> bool) {
        self.indices.retain(|&i| f(i));
        self.uncommitted.retain(|&i| f(i));
    }

    /// Iterates the committed indices in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }

    pub fn indices(&self) -> &HashSet<u32> {
        &self.indices
    }

    pub fn uncommitted(&self) -> &HashSet<u32> {
        &self.uncommitted
    }
}

impl FromIterator<u32> for DynamicFaces {
    /// Collects committed indices.
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
            uncommitted: HashSet::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_commit() {
        let mut faces = DynamicFaces::new();
        assert!(faces.is_empty());

        faces.insert(3);
        faces.insert(5);
        assert!(!faces.is_empty());
        assert!(faces.has_uncommitted());
        assert!(!faces.contains(3));
        assert_eq!(faces.num_elements(), 0);

        faces.commit();
        assert!(faces.contains(3));
        assert!(!faces.has_uncommitted());
        assert_eq!(faces.num_elements(), 2);

        faces.insert(5);
        faces.insert(7);
        faces.commit();
        let mut all: Vec<u32> = faces.iter().collect();
        all.sort_unstable();
        assert_eq!(all, vec![3, 5, 7]);
    }

    #[test]
    fn test_filter_and_reset() {
        let mut faces: DynamicFaces = [1, 2, 3, 4].into_iter().collect();
        faces.insert(6);
        faces.insert(9);
        faces.filter(|i| i % 2 == 0);
        assert_eq!(faces.num_elements(), 2);
        assert!(faces.uncommitted().contains(&6));
        assert!(!faces.uncommitted().contains(&9));

        faces.reset();
        assert!(faces.is_empty());
    }
}
