use std::io::{self, Write};

use crate::domain::AppError;
use crate::ports::ClipboardWriter;

/// Writes "copied" text to an output stream instead of the system clipboard.
///
/// Used by `--print` and in headless environments.
pub struct PrintClipboard<W: Write> {
    out: W,
}

impl PrintClipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> PrintClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardWriter for PrintClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        self.out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
