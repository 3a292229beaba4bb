//! HTML serialization of a structure tree.
//!
//! Elements become an opening/closing tag pair named after the structure
//! type; text literals become bare text runs.

use crate::model::{NodeContent, NodeId, StructTree};

use super::HtmlOptions;

/// Serialize a tree to HTML.
pub fn to_html(tree: &StructTree, options: &HtmlOptions) -> String {
    HtmlRenderer::new(options.clone()).render(tree)
}

/// Derive the tag name for an element descriptor.
///
/// Takes the first whitespace-separated token, drops colons, upper-cases
/// it and renames `DOCUMENT` to `BODY`. Names starting with `/` (attribute
/// lines) and empty names map to `fallback`.
pub fn tag_name(descriptor: &str, fallback: &str) -> String {
    let token = descriptor.split_whitespace().next().unwrap_or("");
    let name = token.replace(':', "").to_uppercase();

    if name.is_empty() || name.starts_with('/') {
        return fallback.to_string();
    }
    if name == "DOCUMENT" {
        return "BODY".to_string();
    }
    name
}

enum Step {
    Enter(NodeId),
    Close(String),
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: HtmlOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }

    /// Render a tree, wrapped in the configured preamble and postamble.
    pub fn render(&self, tree: &StructTree) -> String {
        let mut parts = vec![self.options.preamble.clone()];
        self.render_body(tree, &mut parts);
        parts.push(self.options.postamble.clone());
        parts.join(&self.options.separator)
    }

    /// Depth-first pre-order walk with an explicit stack.
    fn render_body(&self, tree: &StructTree, parts: &mut Vec<String>) {
        let mut stack = vec![Step::Enter(tree.root())];

        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Close(tag) => {
                    parts.push(format!("</{}>", tag));
                    continue;
                }
                Step::Enter(id) => id,
            };

            let node = tree.node(id);
            match node.content {
                NodeContent::Text(_) => {
                    let text = node.content.literal().unwrap_or_default();
                    parts.push(if self.options.escape_text {
                        escape(text)
                    } else {
                        text.to_string()
                    });
                }
                NodeContent::Element(ref descriptor) => {
                    let tag = tag_name(descriptor, &self.options.fallback_tag);
                    parts.push(format!("<{}>", tag));
                    stack.push(Step::Close(tag));
                }
            }
            stack.extend(node.children.iter().rev().map(|c| Step::Enter(*c)));
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
