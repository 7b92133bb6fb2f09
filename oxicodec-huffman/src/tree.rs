//! Frequency analysis and the arena-backed Huffman tree.
//!
//! The tree is stored as a flat `Vec` of nodes addressed by index. A branch
//! refers to its children by index, so the whole tree is one allocation that
//! is dropped at the end of the encode or decode call that built it.

use crate::table::CodeTable;
use oxicodec_core::{BitReader, CodecError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Occurrence count of every byte value in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count the bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Occurrences of `symbol`.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Present symbols with their counts, in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }
}

/// A node of the Huffman tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Terminal node holding one byte value.
    Leaf {
        /// The byte value.
        symbol: u8,
    },
    /// Internal node; `children[0]` is reached with bit 0, `children[1]`
    /// with bit 1.
    Branch {
        /// Child indices into the arena.
        children: [Option<usize>; 2],
    },
}

/// Binary prefix-code tree stored as an index arena.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl HuffmanTree {
    /// Build the optimal code tree for `freq`.
    ///
    /// Nodes are merged lowest frequency first. Ties are broken by insertion
    /// sequence: leaves are inserted in ascending byte order and every merged
    /// parent takes the next sequence number. The first node popped becomes
    /// the 0 child, the second the 1 child.
    pub fn build(freq: &FrequencyTable) -> Self {
        let mut nodes = Vec::with_capacity(freq.distinct() * 2);
        let mut heap = BinaryHeap::new();
        let mut seq = 0u32;

        for (symbol, count) in freq.symbols() {
            nodes.push(Node::Leaf { symbol });
            heap.push(Reverse((count, seq, nodes.len() - 1)));
            seq += 1;
        }

        while heap.len() > 1 {
            let (Some(Reverse((w0, _, zero))), Some(Reverse((w1, _, one)))) =
                (heap.pop(), heap.pop())
            else {
                break;
            };
            nodes.push(Node::Branch {
                children: [Some(zero), Some(one)],
            });
            heap.push(Reverse((w0 + w1, seq, nodes.len() - 1)));
            seq += 1;
        }

        let root = heap.pop().map(|Reverse((_, _, index))| index);
        Self { nodes, root }
    }

    /// Rebuild a decoding tree from a code table.
    ///
    /// Fails with [`CodecError::CorruptPayload`] if one code is a prefix of
    /// another.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut tree = Self::default();
        for (symbol, code) in table.entries() {
            let root = match tree.root {
                Some(root) => root,
                None => tree.push(Node::Branch {
                    children: [None, None],
                }),
            };
            tree.root = Some(root);

            let mut current = root;
            for depth in (0..code.len).rev() {
                let bit = ((code.bits >> depth) & 1) as usize;
                let last = depth == 0;

                let Node::Branch { children } = tree.nodes[current] else {
                    return Err(CodecError::corrupt(format!(
                        "code for symbol {symbol:#04x} extends another symbol's code"
                    )));
                };

                current = match (children[bit], last) {
                    (None, true) => tree.attach(current, bit, Node::Leaf { symbol }),
                    (None, false) => tree.attach(
                        current,
                        bit,
                        Node::Branch {
                            children: [None, None],
                        },
                    ),
                    (Some(_), true) => {
                        return Err(CodecError::corrupt(format!(
                            "code for symbol {symbol:#04x} is a prefix of another code"
                        )));
                    }
                    (Some(child), false) => child,
                };
            }
        }
        Ok(tree)
    }

    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: usize, bit: usize, node: Node) -> usize {
        let index = self.push(node);
        if let Node::Branch { children } = &mut self.nodes[parent] {
            children[bit] = Some(index);
        }
        index
    }

    /// Index of the root node, `None` for an empty tree.
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Node at `index`.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Depth of every leaf, indexed by symbol (0 for absent symbols).
    ///
    /// A tree consisting of a single leaf reports depth 1 for it, giving the
    /// lone symbol the one-bit code `0`.
    pub fn code_lengths(&self) -> [u32; 256] {
        let mut lengths = [0u32; 256];
        let Some(root) = self.root else {
            return lengths;
        };

        let mut stack = vec![(root, 0u32)];
        while let Some((index, depth)) = stack.pop() {
            match self.nodes[index] {
                Node::Leaf { symbol } => lengths[symbol as usize] = depth.max(1),
                Node::Branch { children } => {
                    for child in children.into_iter().flatten() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        lengths
    }

    /// Walk from the root following bits from `reader` until a leaf.
    pub fn decode_symbol(&self, reader: &mut BitReader<'_>) -> Result<u8> {
        let mut current = self
            .root
            .ok_or_else(|| CodecError::corrupt("empty code table"))?;

        loop {
            match self.nodes[current] {
                Node::Leaf { symbol } => return Ok(symbol),
                Node::Branch { children } => {
                    let bit = reader.read_bit()? as usize;
                    current = children[bit].ok_or_else(|| {
                        CodecError::corrupt(format!(
                            "bit sequence ending at bit {} matches no code",
                            reader.bits_read()
                        ))
                    })?;
                }
            }
        }
    }
}
