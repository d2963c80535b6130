use serde::{Deserialize, Serialize};

/// Set of node ids affected by an operation, kept as a sorted vector.
///
/// Node sets are small (a replica group, a quorum), so a sorted `Vec` with
/// binary search beats a hash set on both memory and iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeList {
    nodes: Vec<i32>,
}

impl NodeList {
    pub fn new() -> Self {
        NodeList::default()
    }

    /// Insert `node`. Adding a node already present is a no-op.
    pub fn add(&mut self, node: i32) {
        if let Err(pos) = self.nodes.binary_search(&node) {
            self.nodes.insert(pos, node);
        }
    }

    pub fn contains(&self, node: i32) -> bool {
        self.nodes.binary_search(&node).is_ok()
    }

    /// Members in ascending order, without duplicates.
    pub fn get_nodes(&self) -> &[i32] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.nodes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Extend<i32> for NodeList {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for node in iter {
            self.add(node);
        }
    }
}

impl FromIterator<i32> for NodeList {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut list = NodeList::new();
        list.extend(iter);
        list
    }
}
