//! # pdfstruct
//!
//! PDF metadata, text and structure extraction on top of the poppler
//! command-line utilities.
//!
//! The interesting part is the structure path: `pdfinfo -struct-text`
//! prints the tagged-PDF structure tree as an indented trace, which is
//! rebuilt into a [`StructTree`] and serialized to a simple HTML document.
//! Alongside it, image and font listings are reduced to a [`DocumentInfo`]
//! with page/image statistics and a scanned-document heuristic.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfstruct::PdfExtraction;
//!
//! fn main() -> pdfstruct::Result<()> {
//!     let mut pdf = PdfExtraction::open("moteinnkalling.pdf")?;
//!
//!     if let Some(info) = pdf.info()? {
//!         println!("{} images, scanned: {}", info.image_count, info.scanned);
//!     }
//!     println!("{}", pdf.html()?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Working from captured output
//!
//! Every parser is a pure function over tool output, so a trace captured
//! elsewhere can be converted directly:
//!
//! ```
//! use pdfstruct::{parse_struct_trace, render};
//!
//! let tree = parse_struct_trace("Document\n  P (block)\n    \"Hello\"\n").unwrap();
//! let html = render::to_html(&tree, &render::HtmlOptions::default());
//! assert!(html.contains("<P>\nHello\n</P>"));
//! ```
//!
//! ## Requirements
//!
//! `poppler-utils` (`pdfinfo`, `pdfimages`, `pdffonts`, `pdftotext`,
//! `pdftohtml`, `pdftoppm`) and, for DOCX, `pandoc`.

pub mod detect;
pub mod error;
pub mod extract;
pub mod heuristics;
pub mod model;
pub mod parser;
pub mod render;
pub mod tool;

// Re-export commonly used types
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, detect_kind_from_bytes,
    detect_kind_from_path, is_pdf, DocumentKind, PdfFormat,
};
pub use error::{Error, Result};
pub use extract::{
    extract_text_from_bytes, DocxExtraction, ExtractOptions, Extraction, PdfExtraction,
    StagedFile,
};
pub use heuristics::{is_scanned, ImageStats, FRONTPAGE_MIN_AREA};
pub use model::{DocumentInfo, ImageRecord, MetaInfo, NodeContent, NodeId, StructNode, StructTree};
pub use parser::{build_tree, parse_struct_trace, TreeBuilder};
pub use render::{CleanupOptions, HtmlOptions, JsonFormat};
pub use tool::{missing_tools, SystemRunner, Tool, ToolOutput, ToolRunner};

use std::path::Path;

/// Extract document info from a PDF file.
///
/// Returns `Ok(None)` when the file is not a PDF.
///
/// # Example
///
/// ```no_run
/// let info = pdfstruct::extract_info("agenda.pdf").unwrap();
/// ```
pub fn extract_info<P: AsRef<Path>>(path: P) -> Result<Option<DocumentInfo>> {
    PdfExtraction::open(path)?.info()
}

/// Extract layout-preserving plain text from a PDF file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
    PdfExtraction::open(path)?.text()
}

/// Convert the structure tree of a tagged PDF file to HTML.
///
/// Untagged documents and non-PDF files yield an empty string.
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    PdfExtraction::open(path)?.html()
}

/// Convert a captured `pdfinfo -struct-text` trace to HTML.
pub fn trace_to_html(trace: &str, options: &HtmlOptions) -> Result<String> {
    let tree = parse_struct_trace(trace)?;
    Ok(render::to_html(&tree, options))
}
