//! Markdown fetch port definition.

use url::Url;

use crate::domain::AppError;

/// Port for fetching a rendered-markdown view of a web page.
pub trait MarkdownFetcher {
    fn fetch_markdown(&self, url: &Url) -> Result<String, AppError>;
}
