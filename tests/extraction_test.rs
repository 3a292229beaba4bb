//! Integration tests for the PDF extraction facade.
//!
//! A scripted runner serves captured poppler output, so no binaries are
//! needed.

use std::cell::RefCell;
use std::ffi::OsString;
use std::io::Write;

use pdfstruct::{
    Error, ExtractOptions, HtmlOptions, PdfExtraction, Result, Tool, ToolOutput, ToolRunner,
};

const IMAGES_SCAN: &str = "\
page   num  type   width height color comp bpc  enc interp  object ID x-ppi y-ppi size ratio
--------------------------------------------------------------------------------------------
   1     0 image    1700  2200  gray    1   1  ccitt  no         4  0   200   200 31.6K 6.8%
   2     1 image    1700  2200  gray    1   1  ccitt  no         9  0   200   200 28.1K 6.0%
   3     2 image    1700  2200  gray    1   1  ccitt  no        14  0   200   200 30.2K 6.5%
";

const IMAGES_INLINE: &str = "\
page   num  type   width height color comp bpc  enc interp  object ID x-ppi y-ppi size ratio
--------------------------------------------------------------------------------------------
   1     0 image    1700  2200  gray    1   1  ccitt  no   [inline]     200   200 31.6K 6.8%
   2     1 image    1700  2200  gray    1   1  ccitt  no   [inline]     200   200 28.1K 6.0%
";

const IMAGES_NONE: &str = "\
page   num  type   width height color comp bpc  enc interp  object ID x-ppi y-ppi size ratio
--------------------------------------------------------------------------------------------
";

const FONTS_NONE: &str = "\
name                                 type              encoding         emb sub uni object ID
------------------------------------ ----------------- ---------------- --- --- --- ---------
";

const FONTS_ONE: &str = "\
name                                 type              encoding         emb sub uni object ID
------------------------------------ ----------------- ---------------- --- --- --- ---------
BCDEEE+Calibri                       TrueType          WinAnsi          yes yes yes      5  0
";

const INFO_TAGGED: &str = "\
Title:           Saksliste bystyret
Producer:        Microsoft® Word for Microsoft 365
CreationDate:    2024-05-02T08:00:00+02
ModDate:         2024-05-03T14:30:00+02
Tagged:          yes
Pages:           3
Encrypted:       no
";

const INFO_UNTAGGED: &str = "\
Producer:        ScanSnap Manager
CreationDate:    2024-05-02T08:00:00Z
Tagged:          no
Pages:           3
";

const TRACE: &str = "\
Document
  H1 (block)
    \"Saksliste\"
  P (block):
     /TextAlign /Justify
    \"Sak 12/24 Godkjenning av protokoll\"
";

/// Serves fixture text per tool, recording every call.
struct FixtureRunner {
    info: &'static str,
    trace: &'static str,
    images: &'static str,
    fonts: &'static str,
    calls: RefCell<Vec<(Tool, Vec<String>)>>,
}

impl FixtureRunner {
    fn tagged() -> Self {
        Self {
            info: INFO_TAGGED,
            trace: TRACE,
            images: IMAGES_NONE,
            fonts: FONTS_ONE,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn scanned() -> Self {
        Self {
            info: INFO_UNTAGGED,
            trace: "",
            images: IMAGES_SCAN,
            fonts: FONTS_NONE,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn count(&self, tool: Tool, flag: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(t, args)| *t == tool && args.first().map(String::as_str) == Some(flag))
            .count()
    }
}

impl ToolRunner for FixtureRunner {
    fn run(&self, tool: Tool, args: &[OsString], _stdin: Option<&[u8]>) -> Result<ToolOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        let first = args.first().cloned().unwrap_or_default();
        self.calls.borrow_mut().push((tool, args));

        let stdout: Vec<u8> = match (tool, first.as_str()) {
            (Tool::PdfInfo, "-isodates") => self.info.into(),
            (Tool::PdfInfo, "-struct-text") => self.trace.into(),
            (Tool::PdfInfo, _) => Vec::new(),
            (Tool::PdfImages, _) => self.images.into(),
            (Tool::PdfFonts, _) => self.fonts.into(),
            (Tool::PdfToText, _) => "Saksliste\n\n   Sak 12/24\n".into(),
            (Tool::PdfToHtml, _) => "<?xml version=\"1.0\"?>\n<pdf2xml/>\n".into(),
            (Tool::PdfToPpm, _) => b"\x89PNG\r\n\x1a\n".to_vec(),
            (Tool::Pandoc, _) => Vec::new(),
        };
        Ok(ToolOutput::success(stdout))
    }

    fn is_available(&self, _tool: Tool) -> bool {
        true
    }
}

/// Always fails the way a damaged file makes poppler fail.
struct BrokenRunner;

impl ToolRunner for BrokenRunner {
    fn run(&self, _tool: Tool, _args: &[OsString], _stdin: Option<&[u8]>) -> Result<ToolOutput> {
        Ok(ToolOutput {
            code: Some(1),
            stdout: Vec::new(),
            stderr: b"Syntax Error: Couldn't find trailer dictionary".to_vec(),
        })
    }

    fn is_available(&self, _tool: Tool) -> bool {
        false
    }
}

const PDF_BYTES: &[u8] = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj\n<<>>\nendobj\n";

#[test]
fn test_info_for_scanned_document() {
    let runner = FixtureRunner::scanned();
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let info = pdf.info().unwrap().unwrap();
    assert_eq!(info.page_count, Some(3));
    assert_eq!(info.tagged, Some(false));
    assert_eq!(info.image_count, 3);
    assert_eq!(info.image_total_area, 3 * 1700 * 2200);
    assert!(info.frontpage_is_image);
    assert!(info.scanned);
    assert_eq!(info.images[2].column("object"), Some("14"));
    assert!(info.touch_date.is_some());

    pdf.cleanup().unwrap();
}

#[test]
fn test_info_counts_inline_images() {
    let runner = FixtureRunner {
        images: IMAGES_INLINE,
        ..FixtureRunner::scanned()
    };
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let info = pdf.info().unwrap().unwrap();
    assert_eq!(info.image_count, 2);
    assert!(info.frontpage_is_image);
    assert!(info.scanned);
}

#[test]
fn test_info_for_born_digital_document() {
    let runner = FixtureRunner::tagged();
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let info = pdf.info().unwrap().unwrap();
    assert_eq!(info.image_count, 0);
    assert!(!info.frontpage_is_image);
    assert!(!info.scanned);
    assert_eq!(info.tagged, Some(true));
}

#[test]
fn test_info_is_computed_once() {
    let runner = FixtureRunner::scanned();
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let first = pdf.info().unwrap();
    let second = pdf.info().unwrap();
    assert_eq!(first, second);
    assert_eq!(runner.count(Tool::PdfImages, "-list"), 1);
    assert_eq!(runner.count(Tool::PdfInfo, "-isodates"), 1);
}

#[test]
fn test_html_for_tagged_document() {
    let runner = FixtureRunner::tagged();
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let html = pdf.html().unwrap();
    assert_eq!(
        html,
        "<html><head></head>\n<BODY>\n<H1>\nSaksliste\n</H1>\n<P>\n<PRE>\n</PRE>\n\
         Sak 12/24 Godkjenning av protokoll\n</P>\n</BODY>\n</html>"
    );
    // The tagged gate pulled metadata in on its own.
    assert_eq!(runner.count(Tool::PdfInfo, "-isodates"), 1);
    assert_eq!(runner.count(Tool::PdfInfo, "-struct-text"), 1);
}

#[test]
fn test_html_is_repeatable() {
    let runner = FixtureRunner::tagged();
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let first = pdf.html().unwrap();
    let second = pdf.html().unwrap();
    assert_eq!(first, second);
    assert_eq!(runner.count(Tool::PdfInfo, "-isodates"), 1);
}

#[test]
fn test_html_skipped_for_untagged_document() {
    let runner = FixtureRunner::scanned();
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    assert_eq!(pdf.html().unwrap(), "");
    assert!(pdf.struct_tree().unwrap().is_none());
    assert_eq!(runner.count(Tool::PdfInfo, "-struct-text"), 0);
}

#[test]
fn test_malformed_trace_surfaces() {
    let runner = FixtureRunner {
        trace: "Document\n  P\n\"second root\"\n",
        ..FixtureRunner::tagged()
    };
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let err = pdf.html().unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedStructuralTrace { line: 3, .. }
    ));
}

#[test]
fn test_custom_html_options() {
    let runner = FixtureRunner::tagged();
    let options = ExtractOptions::new().with_html(
        HtmlOptions::new()
            .with_separator("")
            .with_fallback_tag("DIV"),
    );
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner)
        .unwrap()
        .with_options(options);

    let html = pdf.html().unwrap();
    assert!(html.starts_with("<html><head></head><BODY><H1>Saksliste</H1>"));
    assert!(html.contains("<DIV></DIV>"));
}

#[test]
fn test_text_and_xml_pass_through() {
    let runner = FixtureRunner::tagged();
    let pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    assert_eq!(pdf.text().unwrap().as_deref(), Some("Saksliste\n\n   Sak 12/24\n"));
    assert!(pdf.xml().unwrap().unwrap().contains("<pdf2xml/>"));
    assert_eq!(runner.count(Tool::PdfToText, "-layout"), 1);
    assert_eq!(runner.count(Tool::PdfToHtml, "-xml"), 1);
}

#[test]
fn test_text_without_layout() {
    let runner = FixtureRunner::tagged();
    let pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner)
        .unwrap()
        .with_options(ExtractOptions::new().with_layout(false));

    pdf.text().unwrap();
    let calls = runner.calls.borrow();
    assert_eq!(calls[0].1.len(), 2);
    assert_eq!(calls[0].1[1], "-");
}

#[test]
fn test_thumbnail_arguments() {
    let runner = FixtureRunner::tagged();
    let pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner)
        .unwrap()
        .with_options(ExtractOptions::new().with_thumbnail_dpi(72));

    let png = pdf.thumbnail().unwrap().unwrap();
    assert!(png.starts_with(b"\x89PNG"));

    let calls = runner.calls.borrow();
    assert_eq!(calls[0].1[..4], ["-png", "-singlefile", "-r", "72"]);
}

#[test]
fn test_run_collects_everything() {
    let runner = FixtureRunner::tagged();
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, &runner).unwrap();

    let extraction = pdf.run().unwrap();
    assert!(extraction.info.is_some());
    assert!(extraction.text.is_some());
    assert!(extraction.xml.is_some());
    assert!(extraction.html.contains("<BODY>"));
    assert!(extraction.thumbnail.is_some());
}

#[test]
fn test_non_pdf_input_is_empty() {
    let runner = FixtureRunner::tagged();
    let mut doc =
        PdfExtraction::from_bytes_with_runner(b"<!DOCTYPE html><html></html>", &runner).unwrap();

    assert!(!doc.is_pdf());
    assert!(doc.info().unwrap().is_none());
    assert!(doc.text().unwrap().is_none());
    assert!(doc.xml().unwrap().is_none());
    assert_eq!(doc.html().unwrap(), "");
    assert!(doc.thumbnail().unwrap().is_none());
    assert!(doc.run().unwrap().info.is_none());
    assert!(runner.calls.borrow().is_empty());
}

#[test]
fn test_tool_failure_surfaces() {
    let mut pdf = PdfExtraction::from_bytes_with_runner(PDF_BYTES, BrokenRunner).unwrap();

    let err = pdf.info().unwrap_err();
    assert!(err.is_tool_error());
    assert!(matches!(err, Error::ToolFailed { tool: Tool::PdfImages, .. }));
    assert_eq!(pdf.missing_tools().len(), 6);
}

#[test]
fn test_cleanup_removes_staged_file() {
    let runner = FixtureRunner::tagged();
    let mut pdf = PdfExtraction::from_reader_with_runner(PDF_BYTES, &runner).unwrap();
    let path = pdf.path().to_path_buf();
    assert!(path.exists());
    assert_eq!(pdf.format().map(|f| f.version.as_str()), Some("1.7"));

    pdf.cleanup().unwrap();
    assert!(!path.exists());
    pdf.cleanup().unwrap();
}

#[test]
fn test_path_input_is_left_alone() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PDF_BYTES).unwrap();
    file.flush().unwrap();

    let runner = FixtureRunner::tagged();
    let mut pdf = PdfExtraction::open_with_runner(file.path(), &runner).unwrap();
    assert!(pdf.is_pdf());
    pdf.cleanup().unwrap();
    assert!(file.path().exists());
}

#[test]
fn test_missing_path_is_io_error() {
    let runner = FixtureRunner::tagged();
    let result = PdfExtraction::open_with_runner("/nonexistent/pdfstruct/in.pdf", &runner);
    assert!(matches!(result, Err(Error::Io(_))));
}
