//! Rebuilds the structure tree from `pdfinfo -struct-text` output.
//!
//! The trace encodes nesting purely through indentation, two spaces per
//! level. Element lines are bare descriptors, text lines are quoted:
//!
//! ```text
//! Document
//!   H1 (block)
//!     "Agenda"
//!   P (block):
//!      /TextAlign /Justify
//!     "Item 1: approval of minutes"
//! ```
//!
//! Attribute lines carry one extra space after the indent; halving the
//! width puts them one level below their element.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::model::{NodeContent, NodeId, StructNode, StructTree};

/// Incremental, single-pass tree builder.
///
/// The synthetic root above the top-level element is represented as
/// `None` in the parent links; it never becomes a node.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<StructNode>,
    top_level: Vec<NodeId>,
    current_indent: usize,
    current_parent: Option<NodeId>,
    previous: Option<NodeId>,
    line_no: usize,
}

impl TreeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next trace line.
    ///
    /// Blank lines are ignored. Fails when the indentation cannot be
    /// attached to the tree built so far: a line may sit at most one level
    /// deeper than the line before it, so a jump of two or more levels is
    /// rejected, as is any line nested under a text literal or dedented
    /// above the root.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.line_no += 1;

        let content = line.trim();
        if content.is_empty() {
            return Ok(());
        }
        let indent = indent_level(line);

        let parent = match indent.cmp(&self.current_indent) {
            Ordering::Greater => self.descend(indent)?,
            Ordering::Less => self.ascend(self.current_indent - indent)?,
            Ordering::Equal => self.current_parent,
        };
        // Before the first line the previous node is the synthetic root, so
        // a first line indented past level 0 lands here as well.
        if parent.is_none() && indent != 0 {
            return Err(Error::malformed(
                self.line_no,
                format!("line at level {} has no enclosing element", indent),
            ));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(StructNode {
            content: NodeContent::from_line(content),
            level: indent,
            line: self.line_no,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.top_level.push(id),
        }

        self.current_parent = parent;
        self.current_indent = indent;
        self.previous = Some(id);
        Ok(())
    }

    /// Indent grew: the new line is a child of the previous node.
    fn descend(&self, indent: usize) -> Result<Option<NodeId>> {
        let previous = match self.previous {
            Some(p) => p,
            None => return Ok(None),
        };
        let prev_node = &self.nodes[previous.0];

        if indent != prev_node.level + 1 {
            return Err(Error::malformed(
                self.line_no,
                format!(
                    "indent jumps from level {} to level {}",
                    prev_node.level, indent
                ),
            ));
        }
        if prev_node.is_text_leaf() {
            return Err(Error::malformed(
                self.line_no,
                format!("line nested under text literal on line {}", prev_node.line),
            ));
        }

        Ok(Some(previous))
    }

    /// Indent shrank: climb one parent per level dropped.
    fn ascend(&self, steps: usize) -> Result<Option<NodeId>> {
        let mut parent = self.current_parent;
        for _ in 0..steps {
            match parent {
                Some(p) => parent = self.nodes[p.0].parent,
                None => {
                    return Err(Error::malformed(
                        self.line_no,
                        "dedent climbs above the document root",
                    ))
                }
            }
        }
        Ok(parent)
    }

    /// Finish building and return the tree.
    ///
    /// The trace must contain exactly one top-level element.
    pub fn finish(self) -> Result<StructTree> {
        match self.top_level.as_slice() {
            [] => Err(Error::malformed(0, "trace contains no elements")),
            [root] => {
                let tree = StructTree::from_parts(self.nodes, *root);
                log::debug!(
                    "built structure tree: {} nodes, {} text runs, depth {}",
                    tree.len(),
                    tree.text_count(),
                    tree.max_level()
                );
                Ok(tree)
            }
            [_, second, ..] => {
                let line = self.nodes[second.0].line;
                Err(Error::malformed(line, "second top-level element"))
            }
        }
    }
}

/// Leading whitespace width halved.
pub fn indent_level(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count() / 2
}

/// Build a tree from a sequence of trace lines.
pub fn build_tree<I, S>(lines: I) -> Result<StructTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = TreeBuilder::new();
    for line in lines {
        builder.push_line(line.as_ref())?;
    }
    builder.finish()
}

/// Build a tree from the full trace text.
pub fn parse_struct_trace(text: &str) -> Result<StructTree> {
    build_tree(text.lines())
}
