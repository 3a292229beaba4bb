//! Rendering module for converting extraction results to output formats.

mod cleanup;
mod html;
mod json;
mod options;

pub use cleanup::{clean_text, CleanupOptions, CleanupPipeline};
pub use html::{tag_name, to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use options::HtmlOptions;
