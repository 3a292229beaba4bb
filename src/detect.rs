//! Document type sniffing from leading bytes.
//!
//! Classification never looks at file names or extensions; only the
//! signature at the start of the content counts.

use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// Kind of document recognised by [`detect_kind_from_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// A PDF document.
    Pdf(PdfFormat),
    /// An Office Open XML word-processing document.
    Docx,
    /// Anything else.
    Unknown,
}

impl DocumentKind {
    /// Check if this is a PDF.
    pub fn is_pdf(&self) -> bool {
        matches!(self, DocumentKind::Pdf(_))
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// ZIP local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Entry-name prefix that marks a ZIP container as a Word document.
const DOCX_MARKER: &[u8] = b"word/";

/// How far into a ZIP container to look for [`DOCX_MARKER`].
const SNIFF_LEN: usize = 8192;

/// Detect PDF format from a file path.
///
/// Files shorter than a PDF header are reported as `Ok(None)`; only a
/// failure to open or read the file is an error.
///
/// # Example
/// ```no_run
/// use pdfstruct::detect::detect_format_from_path;
///
/// if let Some(format) = detect_format_from_path("agenda.pdf").unwrap() {
///     println!("PDF version: {}", format.version);
/// }
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<Option<PdfFormat>> {
    let header = read_header(path.as_ref(), 16)?;
    Ok(detect_format_from_bytes(&header))
}

/// Detect PDF format from bytes.
///
/// Returns `None` unless the data starts with a `%PDF-x.y` header.
pub fn detect_format_from_bytes(data: &[u8]) -> Option<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return None;
    }

    // Extract version string (e.g., "1.7" from "%PDF-1.7")
    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return None;
    }

    Some(PdfFormat { version })
}

/// Classify a byte payload as PDF, DOCX, or unknown.
pub fn detect_kind_from_bytes(data: &[u8]) -> DocumentKind {
    if let Some(format) = detect_format_from_bytes(data) {
        return DocumentKind::Pdf(format);
    }

    if data.starts_with(ZIP_MAGIC) {
        let window = &data[..data.len().min(SNIFF_LEN)];
        if window
            .windows(DOCX_MARKER.len())
            .any(|w| w == DOCX_MARKER)
        {
            return DocumentKind::Docx;
        }
    }

    DocumentKind::Unknown
}

/// Classify a file as PDF, DOCX, or unknown.
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentKind> {
    let header = read_header(path.as_ref(), SNIFF_LEN)?;
    Ok(detect_kind_from_bytes(&header))
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Read up to `limit` bytes from the start of a file.
fn read_header(path: &Path, limit: usize) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(limit);
    file.take(limit as u64).read_to_end(&mut header)?;
    Ok(header)
}

/// Check if a file is a PDF. Unreadable files are not PDFs.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(Some(_)))
}
