//! Arena-backed structure tree.
//!
//! All nodes live in one flat `Vec`; children and parents are stored as
//! [`NodeId`] indices. Ownership only flows downward from the arena, so the
//! parent link is a plain index used for navigation.

use std::fmt;

/// Index of a node inside a [`StructTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena (source order).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Content of one trace line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeContent {
    /// A quoted text literal, stored as the trimmed line including quotes.
    Text(String),
    /// A structure element descriptor such as `P (block):` or an attribute
    /// line such as `/TextAlign /Justify`.
    Element(String),
}

impl NodeContent {
    /// Classify a trimmed trace line.
    pub fn from_line(trimmed: &str) -> Self {
        if trimmed.starts_with('"') {
            NodeContent::Text(trimmed.to_string())
        } else {
            NodeContent::Element(trimmed.to_string())
        }
    }

    /// The trimmed source line.
    pub fn raw(&self) -> &str {
        match self {
            NodeContent::Text(s) | NodeContent::Element(s) => s,
        }
    }

    /// Whether this is a text literal.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeContent::Text(_))
    }

    /// The text of a literal with the surrounding quotes removed.
    pub fn literal(&self) -> Option<&str> {
        match self {
            NodeContent::Text(s) => {
                let inner = s.strip_prefix('"').unwrap_or(s);
                Some(inner.strip_suffix('"').unwrap_or(inner))
            }
            NodeContent::Element(_) => None,
        }
    }
}

/// A node of the reconstructed structure tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructNode {
    /// What the line said
    pub content: NodeContent,

    /// Nesting depth: leading whitespace width halved
    pub level: usize,

    /// 1-based line number in the trace
    pub line: usize,

    /// Owning node, `None` for the top-level element
    pub parent: Option<NodeId>,

    /// Children in source order
    pub children: Vec<NodeId>,
}

impl StructNode {
    /// Whether this node is a text literal.
    pub fn is_text_leaf(&self) -> bool {
        self.content.is_text()
    }
}

/// A rooted structure tree with a single top-level element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructTree {
    nodes: Vec<StructNode>,
    root: NodeId,
}

impl StructTree {
    /// Assemble a tree from an arena. The caller guarantees `root` is the
    /// only node without a parent.
    pub(crate) fn from_parts(nodes: Vec<StructNode>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// The top-level element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// If `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &StructNode {
        &self.nodes[id.0]
    }

    /// Borrow a node if the id is in range.
    pub fn get(&self, id: NodeId) -> Option<&StructNode> {
        self.nodes.get(id.0)
    }

    /// Children of a node in source order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A built tree always has its root, so this is always `false`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest `level` in the tree.
    pub fn max_level(&self) -> usize {
        self.nodes.iter().map(|n| n.level).max().unwrap_or(0)
    }

    /// Number of text literal nodes.
    pub fn text_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_text_leaf()).count()
    }

    /// Pre-order walk starting at the root.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root],
        }
    }
}

/// Depth-first pre-order iterator over a [`StructTree`].
pub struct PreOrder<'a> {
    tree: &'a StructTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, &'a StructNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}
