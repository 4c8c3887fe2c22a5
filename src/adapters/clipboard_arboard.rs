use arboard::Clipboard;
use tracing::debug;

use crate::domain::AppError;
use crate::ports::ClipboardWriter;

/// System clipboard through arboard.
///
/// The connection is opened on the first write, so sessions that never copy
/// work without a display server.
#[derive(Default)]
pub struct ArboardClipboard {
    clipboard: Option<Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn connection(&mut self) -> Result<&mut Clipboard, AppError> {
        if self.clipboard.is_none() {
            debug!("Opening system clipboard");
            let clipboard =
                Clipboard::new().map_err(|e| AppError::ClipboardError(format!("{}", e)))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| AppError::ClipboardError("clipboard unavailable".to_string()))
    }
}

impl ClipboardWriter for ArboardClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), AppError> {
        self.connection()?
            .set_text(text)
            .map_err(|e| AppError::ClipboardError(format!("{}", e)))
    }
}
