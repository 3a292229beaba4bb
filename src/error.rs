//! Error types for pdfstruct.

use std::io;
use thiserror::Error;

use crate::tool::Tool;

/// Result type alias for pdfstruct operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting from a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading inputs or staging temp files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Content sniffing did not recognise the input as the expected type.
    #[error("Unsupported input: not a recognised document")]
    UnsupportedInput,

    /// The external utility is not installed (or not on the configured path).
    #[error("Tool not found: {tool} (install poppler-utils / pandoc)")]
    ToolNotFound { tool: Tool },

    /// The external process could not be spawned or waited on.
    #[error("Failed to invoke {tool}: {reason}")]
    ToolInvocation { tool: Tool, reason: String },

    /// The external process exited abnormally.
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: Tool,
        status: String,
        stderr: String,
    },

    /// The structural trace violates the nesting rules of the tree builder.
    #[error("Malformed structural trace at line {line}: {reason}")]
    MalformedStructuralTrace { line: usize, reason: String },

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Shorthand for a malformed-trace error.
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedStructuralTrace {
            line,
            reason: reason.into(),
        }
    }

    /// Whether this error came from running an external utility.
    pub fn is_tool_error(&self) -> bool {
        matches!(
            self,
            Error::ToolNotFound { .. } | Error::ToolInvocation { .. } | Error::ToolFailed { .. }
        )
    }
}
