//! Error types for gridstate.
//!
//! Errors are `thiserror` enums composed with `?` and `From`:
//!
//! - [`AppError`] - top-level error returned by the command-line driver
//!   - [`GridError`] - table engine boundary violations (page size, duplicate ids, bad events)
//!   - [`InputError`] - reading rows from a file or stdin
//!     - [`ParseError`] - turning JSON input into rows
//!   - [`ConfigError`](crate::config::ConfigError) - config file loading
//!   - [`LoggingError`](crate::logging::LoggingError) - subscriber setup
//!
//! Inside the engine nothing fails during normal derivation. A column accessor
//! that cannot find its field yields a null value; it never raises.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for the command-line driver.
#[derive(Debug, Error)]
pub enum AppError {
    /// Rows could not be read.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// The table engine rejected its input or an event.
    #[error("Table error: {0}")]
    Grid(#[from] GridError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The derived view could not be written as JSON.
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Precondition violations at the table engine boundary.
///
/// These are caller errors: the engine refuses the input and keeps its
/// previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Page size must be at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use gridstate::state::PageSize;
    /// use gridstate::model::GridError;
    ///
    /// assert_eq!(PageSize::new(0), Err(GridError::InvalidPageSize(0)));
    /// ```
    #[error("Page size must be at least 1 (got {0})")]
    InvalidPageSize(usize),

    /// Two rows share an identifier.
    #[error("Duplicate row id '{id}'")]
    DuplicateRowId {
        /// The repeated identifier, in display form.
        id: String,
    },

    /// Two columns share a key.
    #[error("Duplicate column key '{key}'")]
    DuplicateColumnKey {
        /// The repeated key.
        key: String,
    },

    /// A row activation named an id that is not in the current rows.
    #[error("Unknown row id '{id}'")]
    UnknownRowId {
        /// The unknown identifier, in display form.
        id: String,
    },

    /// A textual event could not be parsed.
    #[error("Invalid event '{raw}': {reason}")]
    InvalidEvent {
        /// The text as given.
        raw: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors reading rows from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The given file does not exist.
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use gridstate::model::InputError;
    ///
    /// let err = InputError::FileNotFound { path: PathBuf::from("/tmp/rows.json") };
    /// assert!(err.to_string().contains("/tmp/rows.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No file was given and stdin is a terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// The input was read but could not be turned into rows.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors turning JSON input into rows.
///
/// `record` is the 1-based position of the offending row: the line number for
/// JSON Lines input, the element index for a JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not valid JSON.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line of the failure.
        line: usize,
        /// Parser message.
        message: String,
    },

    /// A record is not a JSON object.
    #[error("Record {record} is not a JSON object")]
    NotAnObject {
        /// 1-based record position.
        record: usize,
    },

    /// A record has no `id` field.
    #[error("Missing required field 'id' in record {record}")]
    MissingId {
        /// 1-based record position.
        record: usize,
    },

    /// A record's `id` is neither a string nor an integer.
    #[error("Field 'id' in record {record} must be a string or an integer")]
    InvalidId {
        /// 1-based record position.
        record: usize,
    },

    /// A record repeats an id seen earlier.
    #[error("Duplicate id '{id}' in record {record}")]
    DuplicateId {
        /// 1-based record position of the second occurrence.
        record: usize,
        /// The repeated identifier.
        id: String,
    },
}
