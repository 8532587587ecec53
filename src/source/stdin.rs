//! Stdin-based row source for piped input.

use crate::model::error::InputError;
use std::io::{IsTerminal, Read};

/// Stdin (or any reader) holding the whole row set, read to EOF.
///
/// Construction from the real stdin refuses an interactive terminal so the
/// driver never blocks waiting for input the user forgot to pipe.
pub struct StdinSource<R: Read> {
    reader: R,
}

impl StdinSource<std::io::Stdin> {
    /// Create a source reading the process's stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive terminal).
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self { reader: stdin })
    }
}

impl<R: Read> StdinSource<R> {
    /// Create a source from any reader, bypassing the TTY check.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Read everything up to EOF.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for I/O errors or input that is not UTF-8.
    pub fn read_to_string(&mut self) -> Result<String, InputError> {
        let mut text = String::new();
        self.reader.read_to_string(&mut text)?;
        Ok(text)
    }
}

impl<R: Read> std::fmt::Debug for StdinSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinSource").finish_non_exhaustive()
    }
}
