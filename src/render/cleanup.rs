//! Text normalization for extracted plain text.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFKC form (folds ligatures and full-width forms)
    pub normalize_unicode: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Collapse every whitespace run, newlines included, to one space
    pub collapse_whitespace: bool,

    /// Trim leading and trailing whitespace
    pub trim: bool,
}

impl CleanupOptions {
    /// NFKC only, keeping layout whitespace.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: false,
            collapse_whitespace: false,
            trim: false,
        }
    }

    /// Everything on: single-line normalized text.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_replacement_char: true,
            collapse_whitespace: true,
            trim: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Reusable cleanup pipeline.
#[derive(Debug, Clone)]
pub struct CleanupPipeline {
    options: CleanupOptions,
    whitespace_regex: Regex,
}

impl CleanupPipeline {
    /// Create a new pipeline.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            whitespace_regex: Regex::new(r"\s+").expect("static regex"),
        }
    }

    /// Apply the configured steps in order.
    pub fn process(&self, text: &str) -> String {
        let mut output = if self.options.normalize_unicode {
            text.nfkc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.remove_replacement_char {
            output = output.replace('\u{FFFD}', "");
        }

        if self.options.collapse_whitespace {
            output = self.whitespace_regex.replace_all(&output, " ").into_owned();
        }

        if self.options.trim {
            output = output.trim().to_string();
        }

        output
    }
}

/// Clean text with the given options.
pub fn clean_text(text: &str, options: &CleanupOptions) -> String {
    CleanupPipeline::new(options.clone()).process(text)
}
