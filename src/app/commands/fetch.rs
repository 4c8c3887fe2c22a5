use tracing::info;

use crate::adapters::parse_target_url;
use crate::domain::AppError;
use crate::ports::{ClipboardWriter, MarkdownFetcher};

/// Fetch the rendered markdown of a page and copy it.
pub fn execute<F, C>(fetcher: &F, raw_url: &str, clipboard: &mut C) -> Result<String, AppError>
where
    F: MarkdownFetcher,
    C: ClipboardWriter,
{
    let url = parse_target_url(raw_url)?;
    let markdown = fetcher.fetch_markdown(&url)?;
    clipboard.write_text(&markdown)?;
    info!(%url, bytes = markdown.len(), "Fetched markdown");
    Ok(markdown)
}
