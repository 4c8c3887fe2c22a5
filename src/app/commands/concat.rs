use std::path::Path;

use tracing::{info, warn};

use crate::adapters::{ConcatOutput, concat_directory};
use crate::domain::{AppError, ConcatConfig};
use crate::ports::ClipboardWriter;

/// Concatenate a directory and copy the document.
///
/// Nothing is copied when no file qualified.
pub fn execute<C: ClipboardWriter>(
    dir: &Path,
    config: &ConcatConfig,
    clipboard: &mut C,
) -> Result<ConcatOutput, AppError> {
    let output = concat_directory(dir, config)?;
    for skipped in &output.skipped {
        warn!(path = %skipped.path, reason = %skipped.reason, "Skipped file");
    }

    if output.included.is_empty() {
        warn!(dir = %dir.display(), "No text files to concatenate");
        return Ok(output);
    }

    clipboard.write_text(&output.document)?;
    info!(files = output.included.len(), bytes = output.document.len(), "Directory concatenated");
    Ok(output)
}
