//! PDF extraction facade.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::detect::{detect_format_from_path, PdfFormat};
use crate::error::Result;
use crate::heuristics::assemble_info;
use crate::model::{DocumentInfo, MetaInfo, StructTree};
use crate::parser::{count_fonts, parse_image_list, parse_meta_info, parse_struct_trace};
use crate::render::{clean_text, to_html};
use crate::tool::{missing_tools, run_text, SystemRunner, Tool, ToolRunner};

use super::{ExtractOptions, StagedFile};

/// Everything [`PdfExtraction::run`] produces.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Metadata and heuristics
    pub info: Option<DocumentInfo>,
    /// Plain text
    pub text: Option<String>,
    /// `pdftohtml -xml` layout dump
    pub xml: Option<String>,
    /// Structure HTML, empty for untagged documents
    pub html: String,
    /// PNG of the first page
    pub thumbnail: Option<Vec<u8>>,
}

/// Extracts metadata, text, XML, structure HTML and a thumbnail from one
/// PDF via the poppler utilities.
///
/// Inputs other than a path are staged to a temp file that lives as long
/// as this value (or until [`cleanup`](Self::cleanup)). Non-PDF inputs are
/// accepted, and every operation then returns an empty result.
///
/// One instance serves one document; it is not meant to be shared between
/// threads.
///
/// # Example
///
/// ```no_run
/// use pdfstruct::PdfExtraction;
///
/// let mut pdf = PdfExtraction::open("agenda.pdf")?;
/// if let Some(info) = pdf.info()? {
///     println!("pages: {:?}, scanned: {}", info.page_count, info.scanned);
/// }
/// let html = pdf.html()?;
/// # Ok::<(), pdfstruct::Error>(())
/// ```
pub struct PdfExtraction<R: ToolRunner = SystemRunner> {
    path: PathBuf,
    staged: Option<StagedFile>,
    runner: R,
    options: ExtractOptions,
    format: Option<PdfFormat>,
    meta: Option<MetaInfo>,
    info: Option<DocumentInfo>,
}

impl PdfExtraction<SystemRunner> {
    /// Open a file on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_runner(path, SystemRunner::new())
    }

    /// Stage an in-memory document.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_runner(data, SystemRunner::new())
    }

    /// Stage a document read from a stream.
    pub fn from_reader<Rd: Read>(reader: Rd) -> Result<Self> {
        Self::from_reader_with_runner(reader, SystemRunner::new())
    }
}

impl<R: ToolRunner> PdfExtraction<R> {
    /// Open a file on disk using a custom tool runner.
    pub fn open_with_runner<P: AsRef<Path>>(path: P, runner: R) -> Result<Self> {
        Self::build(path.as_ref().to_path_buf(), None, runner)
    }

    /// Stage an in-memory document using a custom tool runner.
    pub fn from_bytes_with_runner(data: &[u8], runner: R) -> Result<Self> {
        let staged = StagedFile::from_bytes(data)?;
        Self::build(staged.path().to_path_buf(), Some(staged), runner)
    }

    /// Stage a stream using a custom tool runner.
    pub fn from_reader_with_runner<Rd: Read>(reader: Rd, runner: R) -> Result<Self> {
        let staged = StagedFile::from_reader(reader)?;
        Self::build(staged.path().to_path_buf(), Some(staged), runner)
    }

    fn build(path: PathBuf, staged: Option<StagedFile>, runner: R) -> Result<Self> {
        let format = detect_format_from_path(&path)?;
        if format.is_none() {
            log::info!("{} is not a PDF; extraction will be empty", path.display());
        }

        Ok(Self {
            path,
            staged,
            runner,
            options: ExtractOptions::default(),
            format,
            meta: None,
            info: None,
        })
    }

    /// Replace the extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Path the tools are run on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the input was recognised as a PDF.
    pub fn is_pdf(&self) -> bool {
        self.format.is_some()
    }

    /// The sniffed PDF header, if any.
    pub fn format(&self) -> Option<&PdfFormat> {
        self.format.as_ref()
    }

    /// Poppler utilities the runner cannot find.
    pub fn missing_tools(&self) -> Vec<Tool> {
        missing_tools(&self.runner)
    }

    fn args(&self, flags: &[&str], trailing: &[&str]) -> Vec<OsString> {
        flags
            .iter()
            .map(|f| OsString::from(*f))
            .chain(std::iter::once(self.path.clone().into_os_string()))
            .chain(trailing.iter().map(|t| OsString::from(*t)))
            .collect()
    }

    /// Metadata from `pdfinfo -isodates`, computed once.
    pub fn meta(&mut self) -> Result<Option<MetaInfo>> {
        if !self.is_pdf() {
            return Ok(None);
        }
        if let Some(ref meta) = self.meta {
            return Ok(Some(meta.clone()));
        }

        let dump = run_text(&self.runner, Tool::PdfInfo, &self.args(&["-isodates"], &[]))?;
        let meta = parse_meta_info(&dump);
        self.meta = Some(meta.clone());
        Ok(Some(meta))
    }

    /// Metadata, image statistics and the scan heuristic, computed once.
    pub fn info(&mut self) -> Result<Option<DocumentInfo>> {
        if !self.is_pdf() {
            return Ok(None);
        }
        if let Some(ref info) = self.info {
            return Ok(Some(info.clone()));
        }

        let listing = run_text(&self.runner, Tool::PdfImages, &self.args(&["-list"], &[]))?;
        let images = parse_image_list(&listing);
        let meta = self.meta()?.unwrap_or_default();
        let fonts = run_text(&self.runner, Tool::PdfFonts, &self.args(&[], &[]))?;

        let info = assemble_info(meta, images, count_fonts(&fonts));
        self.info = Some(info.clone());
        Ok(Some(info))
    }

    /// Plain text from `pdftotext`, with the configured cleanup applied.
    pub fn text(&self) -> Result<Option<String>> {
        if !self.is_pdf() {
            return Ok(None);
        }

        let flags: &[&str] = if self.options.layout { &["-layout"] } else { &[] };
        let text = run_text(&self.runner, Tool::PdfToText, &self.args(flags, &["-"]))?;

        Ok(Some(match self.options.cleanup {
            Some(ref cleanup) => clean_text(&text, cleanup),
            None => text,
        }))
    }

    /// XML layout dump from `pdftohtml -xml -stdout`.
    pub fn xml(&self) -> Result<Option<String>> {
        if !self.is_pdf() {
            return Ok(None);
        }
        run_text(
            &self.runner,
            Tool::PdfToHtml,
            &self.args(&["-xml", "-stdout"], &[]),
        )
        .map(Some)
    }

    /// Structure tree from `pdfinfo -struct-text`.
    ///
    /// `None` for non-PDF input and for documents not marked as tagged; the
    /// trace is not requested in that case.
    pub fn struct_tree(&mut self) -> Result<Option<StructTree>> {
        let tagged = self.meta()?.map(|m| m.is_tagged()).unwrap_or(false);
        if !tagged {
            log::debug!("{} is untagged; skipping structure", self.path.display());
            return Ok(None);
        }

        let trace = run_text(&self.runner, Tool::PdfInfo, &self.args(&["-struct-text"], &[]))?;
        parse_struct_trace(&trace).map(Some)
    }

    /// Structure tree serialized as HTML, or an empty string when there is
    /// no tree.
    pub fn html(&mut self) -> Result<String> {
        Ok(match self.struct_tree()? {
            Some(tree) => to_html(&tree, &self.options.html),
            None => String::new(),
        })
    }

    /// PNG rendering of the first page from `pdftoppm`.
    pub fn thumbnail(&self) -> Result<Option<Vec<u8>>> {
        if !self.is_pdf() {
            return Ok(None);
        }

        let dpi = self.options.thumbnail_dpi.to_string();
        let args = self.args(&["-png", "-singlefile", "-r", dpi.as_str()], &[]);
        log::debug!("running {} {:?}", Tool::PdfToPpm, args);
        let output = self
            .runner
            .run(Tool::PdfToPpm, &args, None)?
            .into_checked(Tool::PdfToPpm)?;

        Ok(if output.stdout.is_empty() {
            None
        } else {
            Some(output.stdout)
        })
    }

    /// Run every extraction.
    pub fn run(&mut self) -> Result<Extraction> {
        if !self.is_pdf() {
            return Ok(Extraction::default());
        }

        Ok(Extraction {
            info: self.info()?,
            text: self.text()?,
            xml: self.xml()?,
            html: self.html()?,
            thumbnail: self.thumbnail()?,
        })
    }

    /// Remove the staged temp file, if any. Safe to call repeatedly.
    pub fn cleanup(&mut self) -> Result<()> {
        match self.staged {
            Some(ref mut staged) => staged.cleanup(),
            None => Ok(()),
        }
    }
}
