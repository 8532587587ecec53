//! File-based row source.

use crate::model::error::InputError;
use std::path::{Path, PathBuf};

/// A rows file, read once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Point at `path`, which must exist.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole file.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if the file cannot be read (removed since
    /// construction, permissions, not UTF-8).
    pub fn read_to_string(&self) -> Result<String, InputError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}
