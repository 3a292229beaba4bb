//! Extraction front-ends that drive the external tools.
//!
//! [`PdfExtraction`] covers PDFs through poppler, [`DocxExtraction`] covers
//! Word documents through pandoc, and [`extract_text_from_bytes`] picks
//! between them by sniffing the payload.

mod docx;
mod options;
mod pdf;
mod staging;

pub use docx::{DocxExtraction, DEFAULT_DOCX_OUTPUT};
pub use options::ExtractOptions;
pub use pdf::{Extraction, PdfExtraction};
pub use staging::StagedFile;

use crate::detect::{detect_kind_from_bytes, DocumentKind};
use crate::error::Result;
use crate::render::{clean_text, CleanupOptions};
use crate::tool::ToolRunner;

/// Extract plain text from a PDF or DOCX payload.
///
/// Returns `Ok(None)` for payloads that are neither. The text is passed
/// through `cleanup` when given.
pub fn extract_text_from_bytes<R: ToolRunner>(
    data: &[u8],
    runner: R,
    cleanup: Option<&CleanupOptions>,
) -> Result<Option<String>> {
    let text = match detect_kind_from_bytes(data) {
        DocumentKind::Pdf(_) => {
            let mut pdf = PdfExtraction::from_bytes_with_runner(data, runner)?;
            let text = pdf.text();
            pdf.cleanup()?;
            text?
        }
        DocumentKind::Docx => Some(DocxExtraction::from_bytes_with_runner(data, runner).to_text()?),
        DocumentKind::Unknown => {
            log::info!("unsupported document type ({} bytes)", data.len());
            None
        }
    };

    Ok(match (text, cleanup) {
        (Some(text), Some(options)) => Some(clean_text(&text, options)),
        (text, _) => text,
    })
}
