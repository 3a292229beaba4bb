//! External tool abstraction layer.
//!
//! Every extraction step is a call to one of the poppler utilities (or
//! pandoc for DOCX). The [`ToolRunner`] trait isolates process spawning so
//! the parsers, tree builder and heuristics can be fed captured fixture
//! text in tests.

mod system;

pub use system::SystemRunner;

use std::ffi::OsString;
use std::fmt;

use crate::error::{Error, Result};

/// External utilities the extractor knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// `pdfinfo`: metadata dump and structure trace
    PdfInfo,
    /// `pdfimages`: image listing
    PdfImages,
    /// `pdffonts`: font listing
    PdfFonts,
    /// `pdftotext`: plain text
    PdfToText,
    /// `pdftohtml`: XML layout dump
    PdfToHtml,
    /// `pdftoppm`: page rasterizer
    PdfToPpm,
    /// `pandoc`: DOCX conversion
    Pandoc,
}

impl Tool {
    /// The poppler utilities a PDF extraction depends on.
    pub const POPPLER: [Tool; 6] = [
        Tool::PdfInfo,
        Tool::PdfImages,
        Tool::PdfFonts,
        Tool::PdfToText,
        Tool::PdfToHtml,
        Tool::PdfToPpm,
    ];

    /// Executable name.
    pub fn program(&self) -> &'static str {
        match self {
            Tool::PdfInfo => "pdfinfo",
            Tool::PdfImages => "pdfimages",
            Tool::PdfFonts => "pdffonts",
            Tool::PdfToText => "pdftotext",
            Tool::PdfToHtml => "pdftohtml",
            Tool::PdfToPpm => "pdftoppm",
            Tool::Pandoc => "pandoc",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Captured result of one tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    /// Raw standard output.
    pub stdout: Vec<u8>,
    /// Raw standard error.
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Successful output with the given stdout.
    pub fn success(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Whether the process exited with status 0.
    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Standard output decoded as UTF-8, replacing invalid sequences.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Turn an abnormal exit into [`Error::ToolFailed`].
    pub fn into_checked(self, tool: Tool) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let status = match self.code {
            Some(code) => format!("exit code {}", code),
            None => "signal".to_string(),
        };
        Err(Error::ToolFailed {
            tool,
            status,
            stderr: String::from_utf8_lossy(&self.stderr).trim().to_string(),
        })
    }
}

/// Capability to run an external command and capture its output.
///
/// Implementations block until the process exits. There is no timeout or
/// cancellation; callers kill stuck processes out-of-band.
pub trait ToolRunner {
    /// Run `tool` with `args`, optionally feeding `stdin`.
    ///
    /// Returns the captured output regardless of exit status; use
    /// [`ToolOutput::into_checked`] to enforce success.
    fn run(&self, tool: Tool, args: &[OsString], stdin: Option<&[u8]>) -> Result<ToolOutput>;

    /// Check whether the tool can be found.
    fn is_available(&self, tool: Tool) -> bool;
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, tool: Tool, args: &[OsString], stdin: Option<&[u8]>) -> Result<ToolOutput> {
        (**self).run(tool, args, stdin)
    }

    fn is_available(&self, tool: Tool) -> bool {
        (**self).is_available(tool)
    }
}

/// Run a tool and require a successful exit, returning stdout as text.
pub(crate) fn run_text<R: ToolRunner + ?Sized>(
    runner: &R,
    tool: Tool,
    args: &[OsString],
) -> Result<String> {
    log::debug!("running {} {:?}", tool, args);
    let output = runner.run(tool, args, None)?.into_checked(tool)?;
    Ok(output.stdout_text())
}

/// List the poppler utilities the runner cannot find.
///
/// Logs a warning naming them when any are missing.
pub fn missing_tools<R: ToolRunner + ?Sized>(runner: &R) -> Vec<Tool> {
    let missing: Vec<Tool> = Tool::POPPLER
        .iter()
        .copied()
        .filter(|tool| !runner.is_available(*tool))
        .collect();

    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|t| t.program()).collect();
        log::warn!("Must install missing {}", names.join(", "));
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyPdfInfo;

    impl ToolRunner for OnlyPdfInfo {
        fn run(&self, tool: Tool, _args: &[OsString], _stdin: Option<&[u8]>) -> Result<ToolOutput> {
            Err(Error::ToolNotFound { tool })
        }

        fn is_available(&self, tool: Tool) -> bool {
            tool == Tool::PdfInfo
        }
    }

    #[test]
    fn test_tool_program_names() {
        assert_eq!(Tool::PdfInfo.program(), "pdfinfo");
        assert_eq!(Tool::PdfToPpm.to_string(), "pdftoppm");
        assert_eq!(Tool::Pandoc.program(), "pandoc");
    }

    #[test]
    fn test_into_checked_failure() {
        let output = ToolOutput {
            code: Some(99),
            stdout: Vec::new(),
            stderr: b"Syntax Error: Couldn't read xref table\n".to_vec(),
        };
        match output.into_checked(Tool::PdfImages) {
            Err(Error::ToolFailed { tool, status, stderr }) => {
                assert_eq!(tool, Tool::PdfImages);
                assert_eq!(status, "exit code 99");
                assert_eq!(stderr, "Syntax Error: Couldn't read xref table");
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_into_checked_signal() {
        let output = ToolOutput {
            code: None,
            ..Default::default()
        };
        assert!(matches!(
            output.into_checked(Tool::PdfToText),
            Err(Error::ToolFailed { ref status, .. }) if status == "signal"
        ));
    }

    #[test]
    fn test_stdout_text_lossy() {
        let output = ToolOutput::success(vec![b'o', b'k', 0xFF]);
        assert_eq!(output.stdout_text(), "ok\u{FFFD}");
    }

    #[test]
    fn test_missing_tools() {
        let missing = missing_tools(&OnlyPdfInfo);
        assert_eq!(missing.len(), 5);
        assert!(!missing.contains(&Tool::PdfInfo));
        assert!(missing.contains(&Tool::PdfToPpm));
    }
}
