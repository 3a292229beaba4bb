//! Rendering options and configuration.

/// Options for serializing a structure tree to HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Emitted before the tree
    pub preamble: String,

    /// Emitted after the tree
    pub postamble: String,

    /// Tag used for elements whose name starts with `/` (attribute lines)
    pub fallback_tag: String,

    /// Joins tags and text runs
    pub separator: String,

    /// Escape `&`, `<` and `>` in text runs
    pub escape_text: bool,
}

impl HtmlOptions {
    /// Create new HTML options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrapper emitted around the tree.
    pub fn with_wrapper(mut self, preamble: impl Into<String>, postamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self.postamble = postamble.into();
        self
    }

    /// Set the fallback tag name.
    pub fn with_fallback_tag(mut self, tag: impl Into<String>) -> Self {
        self.fallback_tag = tag.into();
        self
    }

    /// Set the separator between output tokens.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Enable or disable escaping of text runs.
    pub fn with_escape_text(mut self, escape: bool) -> Self {
        self.escape_text = escape;
        self
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            preamble: "<html><head></head>".to_string(),
            postamble: "</html>".to_string(),
            fallback_tag: "PRE".to_string(),
            separator: "\n".to_string(),
            escape_text: false,
        }
    }
}
