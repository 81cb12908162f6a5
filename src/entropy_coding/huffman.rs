// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt;

use crate::bit_reader::BitReader;
use crate::error::{Error, Result};
use crate::markers::{MarkerSegment, SegmentReader};
use crate::util::tracing_wrappers::*;

/// Longest code length a JPEG Huffman table can describe.
pub const HUFFMAN_MAX_BITS: usize = 16;
/// Number of table slots per class.
pub const MAX_TABLES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableClass {
    Dc,
    Ac,
}

impl TableClass {
    pub fn from_nibble(class: u8) -> Result<TableClass> {
        match class {
            0 => Ok(TableClass::Dc),
            1 => Ok(TableClass::Ac),
            _ => Err(Error::InvalidHuffmanTableClass(class)),
        }
    }
}

pub fn check_table_index(index: u8) -> Result<u8> {
    if usize::from(index) < MAX_TABLES {
        Ok(index)
    } else {
        Err(Error::InvalidTableIndex(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    Node(usize),
    Leaf(u8),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<usize>,
    /// Which child of the parent this node is.
    bit: u8,
    depth: usize,
    children: [Option<Child>; 2],
    /// Set once no more codes fit below this node.
    full: bool,
}

impl Node {
    fn new(parent: Option<usize>, bit: u8, depth: usize) -> Node {
        Node {
            parent,
            bit,
            depth,
            children: [None, None],
            full: false,
        }
    }

    fn child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }
}

/// A canonical Huffman code, stored as a binary tree in an arena. Node 0 is
/// the root.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
}

impl HuffmanTree {
    /// Builds the tree for a table given as its symbols grouped by code
    /// length: `symbols_by_length[i]` holds the symbols with codes of length
    /// `i + 1`, in code order.
    pub fn build<S: AsRef<[u8]>>(symbols_by_length: &[S]) -> Result<HuffmanTree> {
        if symbols_by_length.len() > HUFFMAN_MAX_BITS {
            return Err(Error::InvalidHuffmanTable);
        }
        let mut tree = HuffmanTree {
            nodes: vec![Node::new(None, 0, 0)],
        };
        // Deepest node known to still have room, or None once the root is
        // full.
        let mut search_below = Some(0);
        for (length, symbols) in (1..).zip(symbols_by_length) {
            for &symbol in symbols.as_ref() {
                let start = search_below.ok_or(Error::InvalidHuffmanTable)?;
                search_below = tree.insert(start, length, symbol)?;
            }
        }
        Ok(tree)
    }

    /// Places `symbol` at the leftmost free position at depth `length` below
    /// `start`, and returns the node to continue searching from.
    fn insert(&mut self, start: usize, length: usize, symbol: u8) -> Result<Option<usize>> {
        let mut node = start;
        while self.nodes[node].depth + 1 < length {
            node = self.descend(node)?;
        }
        let bit = self.nodes[node].child_count();
        if bit > 1 {
            return Err(Error::InvalidHuffmanTable);
        }
        self.nodes[node].children[bit] = Some(Child::Leaf(symbol));
        if bit == 0 {
            return Ok(Some(node));
        }

        // A right child completes its parent, and a completed right subtree
        // completes the parent above it.
        self.nodes[node].full = true;
        while self.nodes[node].bit == 1 {
            let Some(parent) = self.nodes[node].parent else {
                break;
            };
            node = parent;
            self.nodes[node].full = true;
        }
        Ok(self.nodes[node].parent)
    }

    /// Steps into the leftmost child of `node` that still has room, creating
    /// it if needed.
    fn descend(&mut self, node: usize) -> Result<usize> {
        let open = self.nodes[node].children.iter().find_map(|c| match c {
            Some(Child::Node(i)) if !self.nodes[*i].full => Some(*i),
            _ => None,
        });
        if let Some(child) = open {
            return Ok(child);
        }
        let bit = self.nodes[node].child_count();
        if bit > 1 {
            return Err(Error::InvalidHuffmanTable);
        }
        let child = self.nodes.len();
        let depth = self.nodes[node].depth + 1;
        self.nodes.push(Node::new(Some(node), bit as u8, depth));
        self.nodes[node].children[bit] = Some(Child::Node(child));
        Ok(child)
    }

    /// Reads the table part of a DHT segment that follows the class/index
    /// byte: 16 code length counts, then the symbols.
    pub fn read(reader: &mut SegmentReader) -> Result<HuffmanTree> {
        let counts = reader.read_bytes(HUFFMAN_MAX_BITS)?;
        let symbols_by_length = counts
            .iter()
            .map(|&count| reader.read_bytes(count.into()))
            .collect::<Result<Vec<_>>>()?;
        HuffmanTree::build(&symbols_by_length)
    }

    /// Decodes one symbol by walking the tree from the root, one bit per
    /// level.
    pub fn decode(&self, br: &mut BitReader) -> Result<u8> {
        let mut node = &self.nodes[0];
        loop {
            let bit = br.read_bit()?;
            match node.children[usize::from(bit)] {
                Some(Child::Leaf(symbol)) => return Ok(symbol),
                Some(Child::Node(child)) => node = &self.nodes[child],
                None => return Err(Error::InvalidHuffmanCode),
            }
        }
    }

    /// Returns every symbol with its code, as `(symbol, code, length)`, in
    /// code order.
    pub fn codes(&self) -> Vec<(u8, u16, usize)> {
        let mut codes = Vec::new();
        self.collect_codes(0, 0, &mut codes);
        codes
    }

    fn collect_codes(&self, node: usize, prefix: u16, codes: &mut Vec<(u8, u16, usize)>) {
        let depth = self.nodes[node].depth + 1;
        for (bit, child) in self.nodes[node].children.iter().enumerate() {
            let code = (prefix << 1) | bit as u16;
            match child {
                Some(Child::Leaf(symbol)) => codes.push((*symbol, code, depth)),
                Some(Child::Node(child)) => self.collect_codes(*child, code, codes),
                None => {}
            }
        }
    }

    fn fmt_node(&self, node: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (bit, child) in self.nodes[node].children.iter().enumerate() {
            let Some(child) = child else {
                continue;
            };
            if !first {
                write!(f, ",")?;
            }
            first = false;
            write!(f, "{bit}:")?;
            match child {
                Child::Leaf(symbol) => write!(f, "{symbol}")?,
                Child::Node(child) => self.fmt_node(*child, f)?,
            }
        }
        write!(f, "}}")
    }
}

/// Nested-map rendering, e.g. `{0:1,1:{0:2,1:3}}`.
impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(0, f)
    }
}

/// The Huffman trees currently defined, by class and slot.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTables {
    dc: [Option<HuffmanTree>; MAX_TABLES],
    ac: [Option<HuffmanTree>; MAX_TABLES],
}

impl HuffmanTables {
    /// Reads every table of a DHT segment. A table replaces any earlier one
    /// in the same slot.
    pub fn read_segment(&mut self, segment: &MarkerSegment) -> Result<()> {
        let mut reader = segment.reader();
        while !reader.is_empty() {
            let (class, index) = reader.read_nibbles()?;
            let class = TableClass::from_nibble(class)?;
            let index = check_table_index(index)?;
            let tree = HuffmanTree::read(&mut reader)?;
            debug!(?class, index, %tree, "defined Huffman table");
            self.insert(class, index, tree);
        }
        Ok(())
    }

    pub fn insert(&mut self, class: TableClass, index: u8, tree: HuffmanTree) {
        self.slots_mut(class)[usize::from(index)] = Some(tree);
    }

    pub fn get(&self, class: TableClass, index: u8) -> Result<&HuffmanTree> {
        let slots = match class {
            TableClass::Dc => &self.dc,
            TableClass::Ac => &self.ac,
        };
        slots
            .get(usize::from(index))
            .and_then(Option::as_ref)
            .ok_or(Error::MissingHuffmanTable { class, index })
    }

    /// Defined tables, DC first, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (TableClass, u8, &HuffmanTree)> {
        let dc = (0..).zip(&self.dc).map(|(i, t)| (TableClass::Dc, i, t));
        let ac = (0..).zip(&self.ac).map(|(i, t)| (TableClass::Ac, i, t));
        dc.chain(ac)
            .filter_map(|(class, index, tree)| Some((class, index, tree.as_ref()?)))
    }

    fn slots_mut(&mut self, class: TableClass) -> &mut [Option<HuffmanTree>; MAX_TABLES] {
        match class {
            TableClass::Dc => &mut self.dc,
            TableClass::Ac => &mut self.ac,
        }
    }
}
