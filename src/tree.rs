//! Huffman tree construction
//!
//! Nodes live in an arena owned by [`HuffmanTree`] and refer to their
//! children by [`NodeId`]. The encoder and decoder both call
//! [`HuffmanTree::from_histogram`], so the merge order below must stay
//! deterministic: it is what makes the persisted histogram sufficient to
//! reproduce the encoder's tree.

use crate::frequency::{Histogram, ALPHABET_SIZE};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Merge candidate. Ordered so that `BinaryHeap` pops the smallest
/// `(freq, seq)` first. Leaves use their byte value as `seq`, internal
/// nodes use `256 + k` for the k-th merge, so ties go to leaves, then to
/// lower byte values, then to older internal nodes.
#[derive(Debug)]
struct Candidate {
    freq: u64,
    seq: u32,
    id: NodeId,
}

impl Eq for Candidate {}
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // min-heap
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for every symbol with a nonzero count.
    ///
    /// Returns `None` when the histogram is all zero. A histogram with a
    /// single nonzero entry yields a tree whose root is that leaf.
    pub fn from_histogram(hist: &Histogram) -> Option<Self> {
        let distinct = hist.distinct();
        let mut nodes = Vec::with_capacity((2 * distinct).saturating_sub(1));
        let mut heap = BinaryHeap::with_capacity(distinct);

        for (symbol, count) in hist.present() {
            let id = NodeId(nodes.len());
            let freq = count as u64;
            nodes.push(Node::Leaf { symbol, freq });
            heap.push(Candidate {
                freq,
                seq: symbol as u32,
                id,
            });
        }

        let mut next_seq = ALPHABET_SIZE as u32;
        loop {
            let left = heap.pop()?;
            let Some(right) = heap.pop() else {
                let tree = HuffmanTree {
                    nodes,
                    root: left.id,
                };
                debug!(
                    leaves = distinct,
                    nodes = tree.len(),
                    depth = tree.depth(),
                    "built huffman tree"
                );
                return Some(tree);
            };

            let freq = left.freq + right.freq;
            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                freq,
                left: left.id,
                right: right.id,
            });
            heap.push(Candidate {
                freq,
                seq: next_seq,
                id,
            });
            next_seq += 1;
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Total number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a built tree.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when the alphabet has exactly one symbol.
    pub fn is_single_leaf(&self) -> bool {
        self.node(self.root).is_leaf()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => max = max.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_symbol(tree: &HuffmanTree, id: NodeId) -> Option<u8> {
        match tree.node(id) {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    fn children(tree: &HuffmanTree, id: NodeId) -> (NodeId, NodeId) {
        match tree.node(id) {
            Node::Internal { left, right, .. } => (*left, *right),
            Node::Leaf { .. } => panic!("expected internal node"),
        }
    }

    #[test]
    fn test_empty_histogram_has_no_tree() {
        assert!(HuffmanTree::from_histogram(&Histogram::default()).is_none());
    }

    #[test]
    fn test_single_symbol_is_leaf_root() {
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(&[0x41; 1000])).unwrap();
        assert!(tree.is_single_leaf());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(leaf_symbol(&tree, tree.root()), Some(0x41));
        assert_eq!(tree.node(tree.root()).freq(), 1000);
    }

    #[test]
    fn test_aaaabbbcc_shape() {
        // c(2) + b(3) merge first, then a(4) joins the merged node (5).
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(b"aaaabbbcc")).unwrap();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.node(tree.root()).freq(), 9);

        let (left, right) = children(&tree, tree.root());
        assert_eq!(leaf_symbol(&tree, left), Some(b'a'));
        let (rl, rr) = children(&tree, right);
        assert_eq!(leaf_symbol(&tree, rl), Some(b'c'));
        assert_eq!(leaf_symbol(&tree, rr), Some(b'b'));
    }

    #[test]
    fn test_ties_prefer_lower_byte_then_leaves() {
        // x(1) and y(1) merge first; the merged node then ties with z(2).
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(b"xyzz")).unwrap();
        let (left, right) = children(&tree, tree.root());
        assert_eq!(leaf_symbol(&tree, left), Some(b'z'));
        let (rl, rr) = children(&tree, right);
        assert_eq!(leaf_symbol(&tree, rl), Some(b'x'));
        assert_eq!(leaf_symbol(&tree, rr), Some(b'y'));
    }

    #[test]
    fn test_uniform_alphabet_depth() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::from_histogram(&Histogram::from_bytes(&data)).unwrap();
        assert_eq!(tree.leaf_count(), 256);
        assert_eq!(tree.len(), 511);
        assert_eq!(tree.depth(), 8);
    }

    #[test]
    fn test_large_counts_compare_without_wrapping() {
        let mut counts = [0u32; ALPHABET_SIZE];
        counts[0] = u32::MAX;
        counts[1] = 1;
        counts[2] = 2;
        let tree = HuffmanTree::from_histogram(&Histogram::from_counts(counts)).unwrap();
        let (left, right) = children(&tree, tree.root());
        // 1 + 2 is lighter than u32::MAX
        assert!(!tree.node(left).is_leaf());
        assert_eq!(leaf_symbol(&tree, right), Some(0));
        assert_eq!(tree.node(tree.root()).freq(), u32::MAX as u64 + 3);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let hist = Histogram::from_bytes(b"the quick brown fox jumps over the lazy dog");
        let a = HuffmanTree::from_histogram(&hist).unwrap();
        let b = HuffmanTree::from_histogram(&hist.clone()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_skewed_depth_is_bounded() {
        // Fibonacci-like weights produce the deepest possible tree.
        let mut counts = [0u32; ALPHABET_SIZE];
        let (mut a, mut b) = (1u32, 1u32);
        for slot in counts.iter_mut().take(40) {
            *slot = a;
            let next = a.saturating_add(b);
            a = b;
            b = next;
        }
        let tree = HuffmanTree::from_histogram(&Histogram::from_counts(counts)).unwrap();
        assert_eq!(tree.leaf_count(), 40);
        assert_eq!(tree.depth(), 39);
    }
}
