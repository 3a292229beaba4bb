//! Temp-file staging for byte and stream inputs.
//!
//! The poppler utilities only read files, so in-memory inputs are written
//! to a named temp file first. The file is removed when the
//! [`StagedFile`] is dropped or [`StagedFile::cleanup`] is called,
//! whichever comes first.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;

/// A temp file holding a copy of the input document.
#[derive(Debug)]
pub struct StagedFile {
    file: Option<NamedTempFile>,
    path: PathBuf,
}

impl StagedFile {
    /// Stage an in-memory payload.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut file = new_temp()?;
        file.write_all(data)?;
        file.flush()?;
        Ok(Self::wrap(file))
    }

    /// Stage everything a reader yields.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut file = new_temp()?;
        io::copy(&mut reader, &mut file)?;
        file.flush()?;
        Ok(Self::wrap(file))
    }

    fn wrap(file: NamedTempFile) -> Self {
        let path = file.path().to_path_buf();
        log::debug!("staged input at {}", path.display());
        Self {
            file: Some(file),
            path,
        }
    }

    /// Location of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has not been cleaned up yet.
    pub fn is_live(&self) -> bool {
        self.file.is_some()
    }

    /// Remove the file now. Calling this again, or after the file was
    /// deleted behind our back, is not an error.
    pub fn cleanup(&mut self) -> Result<()> {
        let Some(file) = self.file.take() else {
            return Ok(());
        };
        match file.close() {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn new_temp() -> io::Result<NamedTempFile> {
    tempfile::Builder::new().prefix("pdfstruct-").tempfile()
}
