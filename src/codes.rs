//! Code assignment: root-to-leaf paths, 0 for left and 1 for right.

use crate::frequency::{Histogram, ALPHABET_SIZE};
use crate::tree::{HuffmanTree, Node};
use std::fmt;

/// Bit sequence assigned to one symbol, first bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walk the tree depth-first and record every leaf's path.
    ///
    /// A tree that is a lone leaf gets the one-bit code `0`, so every
    /// occurrence of its symbol still occupies a bit in the stream.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; ALPHABET_SIZE];
        let mut stack = vec![(tree.root(), Vec::new())];

        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    let bits = if path.is_empty() { vec![false] } else { path };
                    codes[*symbol as usize] = Some(Code { bits });
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((*right, right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((*left, left_path));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with an assigned code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Assigned codes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|code| (i as u8, code)))
    }

    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Exact number of payload bits for data with this histogram.
    pub fn encoded_bits(&self, hist: &Histogram) -> u64 {
        hist.present()
            .map(|(symbol, count)| {
                let len = self.get(symbol).map_or(0, Code::len);
                count as u64 * len as u64
            })
            .sum()
    }
}
