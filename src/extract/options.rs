//! Extraction options and configuration.

use crate::render::{CleanupOptions, HtmlOptions};

/// Options for extracting from a PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Resolution of the first-page thumbnail in DPI
    pub thumbnail_dpi: u32,

    /// Keep the physical layout in plain text (`pdftotext -layout`)
    pub layout: bool,

    /// Structure HTML serialization
    pub html: HtmlOptions,

    /// Cleanup applied to plain text, none by default
    pub cleanup: Option<CleanupOptions>,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thumbnail resolution.
    pub fn with_thumbnail_dpi(mut self, dpi: u32) -> Self {
        self.thumbnail_dpi = dpi.max(1);
        self
    }

    /// Enable or disable layout-preserving text.
    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Set HTML options.
    pub fn with_html(mut self, html: HtmlOptions) -> Self {
        self.html = html;
        self
    }

    /// Set text cleanup.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            thumbnail_dpi: 50,
            layout: true,
            html: HtmlOptions::default(),
            cleanup: None,
        }
    }
}
