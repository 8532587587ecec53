//! Row input sources.
//!
//! Rows come from a file or from piped stdin. Either way the whole input is
//! read, then handed to [`parser::parse_rows`](crate::parser::parse_rows).

use crate::model::error::InputError;
use crate::model::JsonRow;
use crate::parser;
use std::path::PathBuf;
use tracing::info;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Where the rows come from. Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// A file given on the command line.
    File(FileSource),
    /// Piped stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

impl InputSource {
    /// Read the whole input.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors.
    pub fn read_to_string(&mut self) -> Result<String, InputError> {
        match self {
            InputSource::File(f) => f.read_to_string(),
            InputSource::Stdin(s) => s.read_to_string(),
        }
    }

    /// Read and parse the rows.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors and `InputError::Parse` for
    /// malformed rows.
    pub fn load_rows(&mut self) -> Result<Vec<JsonRow>, InputError> {
        let text = self.read_to_string()?;
        let rows = parser::parse_rows(&text)?;
        match self {
            InputSource::File(f) => {
                info!(path = %f.path().display(), rows = rows.len(), "Loaded rows from file")
            }
            InputSource::Stdin(_) => info!(rows = rows.len(), "Loaded rows from stdin"),
        }
        Ok(rows)
    }
}

/// Detect and create appropriate input source.
///
/// 1. If a file path is provided: [`FileSource`]
/// 2. Otherwise: [`StdinSource`], if stdin is piped
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist and
/// `InputError::NoInput` if no file is given and stdin is a terminal.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
