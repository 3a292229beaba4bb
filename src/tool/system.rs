//! [`ToolRunner`] backed by `std::process::Command`.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

use super::{Tool, ToolOutput, ToolRunner};

/// Runs the real poppler / pandoc executables.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    tool_dir: Option<PathBuf>,
}

impl SystemRunner {
    /// Resolve tools from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve tools from a fixed directory instead of `PATH`.
    pub fn with_tool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tool_dir = Some(dir.into());
        self
    }

    /// Configured tool directory, if any.
    pub fn tool_dir(&self) -> Option<&Path> {
        self.tool_dir.as_deref()
    }

    fn program_path(&self, tool: Tool) -> PathBuf {
        match self.tool_dir {
            Some(ref dir) => dir.join(executable_name(tool)),
            None => PathBuf::from(tool.program()),
        }
    }
}

fn executable_name(tool: Tool) -> String {
    format!("{}{}", tool.program(), std::env::consts::EXE_SUFFIX)
}

impl ToolRunner for SystemRunner {
    fn run(&self, tool: Tool, args: &[OsString], stdin: Option<&[u8]>) -> Result<ToolOutput> {
        let mut command = Command::new(self.program_path(tool));
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|e| spawn_error(tool, e))?;

        // Feed stdin from a separate thread so a chatty child cannot block
        // on a full stdout pipe while we are still writing.
        let output = std::thread::scope(|scope| {
            let writer = match (child.stdin.take(), stdin) {
                (Some(mut pipe), Some(data)) => Some(scope.spawn(move || pipe.write_all(data))),
                _ => None,
            };

            let output = child.wait_with_output();

            if let Some(handle) = writer {
                match handle.join() {
                    // Broken pipe just means the child stopped reading early.
                    Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => {
                        log::warn!("failed writing stdin to {}: {}", tool, e);
                    }
                    Err(_) => log::warn!("stdin writer for {} panicked", tool),
                    _ => {}
                }
            }

            output
        })
        .map_err(|e| Error::ToolInvocation {
            tool,
            reason: e.to_string(),
        })?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn is_available(&self, tool: Tool) -> bool {
        let found = match self.tool_dir {
            Some(ref dir) => which::which_in(tool.program(), Some(dir), dir),
            None => which::which(tool.program()),
        };
        found.is_ok()
    }
}

fn spawn_error(tool: Tool, err: io::Error) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::ToolNotFound { tool }
    } else {
        Error::ToolInvocation {
            tool,
            reason: err.to_string(),
        }
    }
}
