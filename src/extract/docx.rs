//! DOCX conversion through pandoc.

use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::detect::{detect_kind_from_bytes, DocumentKind};
use crate::error::{Error, Result};
use crate::tool::{SystemRunner, Tool, ToolRunner};

/// Pandoc writer used when none is specified.
pub const DEFAULT_DOCX_OUTPUT: &str = "plain";

/// Converts a Word document with `pandoc -f docx -t <format>`.
///
/// The document is held in memory and piped to pandoc's stdin, so no temp
/// file is involved.
#[derive(Debug)]
pub struct DocxExtraction<R: ToolRunner = SystemRunner> {
    data: Vec<u8>,
    runner: R,
}

impl DocxExtraction<SystemRunner> {
    /// Read a document from disk.
    ///
    /// Fails with [`Error::UnsupportedInput`] unless the file sniffs as DOCX.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_runner(path, SystemRunner::new())
    }

    /// Wrap an in-memory document.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::from_bytes_with_runner(data, SystemRunner::new())
    }

    /// Read a document from a stream. The payload must sniff as DOCX.
    pub fn from_reader<Rd: Read>(reader: Rd) -> Result<Self> {
        Self::from_reader_with_runner(reader, SystemRunner::new())
    }
}

impl<R: ToolRunner> DocxExtraction<R> {
    /// Wrap an in-memory document using a custom tool runner.
    pub fn from_bytes_with_runner(data: impl Into<Vec<u8>>, runner: R) -> Self {
        Self {
            data: data.into(),
            runner,
        }
    }

    /// Read a document from disk using a custom tool runner.
    pub fn open_with_runner<P: AsRef<Path>>(path: P, runner: R) -> Result<Self> {
        Self::checked(fs::read(path)?, runner)
    }

    /// Read a document from a stream using a custom tool runner.
    pub fn from_reader_with_runner<Rd: Read>(mut reader: Rd, runner: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::checked(data, runner)
    }

    fn checked(data: Vec<u8>, runner: R) -> Result<Self> {
        if detect_kind_from_bytes(&data) != DocumentKind::Docx {
            log::info!("input is not a DOCX document ({} bytes)", data.len());
            return Err(Error::UnsupportedInput);
        }
        Ok(Self::from_bytes_with_runner(data, runner))
    }

    /// Size of the held document in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the held document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Convert with the given pandoc writer (`plain`, `markdown`, `html`...).
    pub fn parse(&self, output: &str) -> Result<String> {
        let args: Vec<OsString> = ["-f", "docx", "-t", output]
            .iter()
            .map(|a| OsString::from(*a))
            .collect();

        log::debug!("running {} {:?} ({} bytes on stdin)", Tool::Pandoc, args, self.data.len());
        let result = self
            .runner
            .run(Tool::Pandoc, &args, Some(&self.data))?
            .into_checked(Tool::Pandoc)?;

        Ok(result.stdout_text())
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        self.parse(DEFAULT_DOCX_OUTPUT)
    }
}
