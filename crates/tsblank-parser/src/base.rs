//! Base index types for the arena AST.

use serde::Serialize;

/// Index into the node arena. `NodeIndex::NONE` marks an absent child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// An ordered list of child nodes with its own source extent.
///
/// Extent conventions matter to the eraser:
/// - type-argument and type-parameter lists set `pos` to the offset just
///   past the opening `<` (so the `<` itself sits at `pos - 1`) and `end`
///   to the end of the last element (the closing `>` is not included);
/// - parameter lists set `pos` just past the `(` and `end` at the last
///   parameter.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NodeList {
    pub nodes: Vec<NodeIndex>,
    pub pos: u32,
    pub end: u32,
    pub has_trailing_comma: bool,
}

impl NodeList {
    pub fn new() -> NodeList {
        NodeList::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn first(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    pub fn last(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }
}
