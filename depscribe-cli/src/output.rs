//! Result emission
//!
//! The canonical result is written as exactly one line of compact JSON.
//! Serialization happens before anything touches the writer, so a failure
//! leaves stdout empty.

use std::io::Write;

use serde::Serialize;

use crate::error::CliError;

/// Writes serialized results as single JSON lines.
pub struct OutputWriter<W: Write> {
    out: W,
}

impl OutputWriter<std::io::Stdout> {
    /// Create a writer bound to process stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> OutputWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Serialize `payload` and write it followed by a single newline.
    pub fn emit<T: Serialize>(&mut self, payload: &T) -> Result<(), CliError> {
        let line = serde_json::to_string(payload)?;
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
