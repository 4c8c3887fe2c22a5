//! Rendered-markdown fetcher using a reader service over reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::domain::{AppError, FetchConfig};
use crate::ports::MarkdownFetcher;

const DEFAULT_STATUS_MESSAGE: &str = "Unexpected response status";

/// Fetches `<reader_base_url><target url>` and returns the body as markdown.
#[derive(Debug, Clone)]
pub struct HttpMarkdownFetcher {
    reader_base_url: Url,
    client: Client,
}

impl HttpMarkdownFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { reader_base_url: config.reader_base_url.clone(), client })
    }

    /// Reader URL for a target page.
    ///
    /// The target is appended verbatim; `Url::join` would replace the base with an
    /// absolute target instead.
    pub fn reader_url(&self, target: &Url) -> Result<Url, AppError> {
        let base = self.reader_base_url.as_str();
        let separator = if base.ends_with('/') { "" } else { "/" };
        let raw = format!("{}{}{}", base, separator, target);
        Url::parse(&raw)
            .map_err(|e| AppError::InvalidUrl { url: raw.clone(), reason: e.to_string() })
    }
}

/// Parse a user-supplied page URL; only http(s) is accepted.
pub fn parse_target_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::InvalidUrl { url: raw.to_string(), reason: e.to_string() })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

impl MarkdownFetcher for HttpMarkdownFetcher {
    fn fetch_markdown(&self, url: &Url) -> Result<String, AppError> {
        let reader_url = self.reader_url(url)?;
        debug!(%reader_url, "Fetching rendered markdown");

        let response = self
            .client
            .get(reader_url)
            .header(ACCEPT, "text/markdown, text/plain;q=0.9, */*;q=0.1")
            .send()
            .map_err(|e| AppError::FetchFailed { url: url.to_string(), reason: e.to_string() })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AppError::FetchFailed { url: url.to_string(), reason: e.to_string() })?;

        if !status.is_success() {
            let reason = if body.trim().is_empty() {
                format!("{} ({})", DEFAULT_STATUS_MESSAGE, status.as_u16())
            } else {
                format!("{} ({})", body.trim(), status.as_u16())
            };
            return Err(AppError::FetchFailed { url: url.to_string(), reason });
        }
        if body.trim().is_empty() {
            return Err(AppError::FetchFailed {
                url: url.to_string(),
                reason: "empty response body".into(),
            });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher_for(server: &mockito::Server) -> HttpMarkdownFetcher {
        let config = FetchConfig {
            reader_base_url: Url::parse(&format!("{}/", server.url())).unwrap(),
            timeout_secs: 1,
        };
        HttpMarkdownFetcher::new(&config).unwrap()
    }

    #[test]
    fn reader_url_appends_target_verbatim() {
        let config = FetchConfig::default();
        let fetcher = HttpMarkdownFetcher::new(&config).unwrap();
        let target = Url::parse("https://example.com/docs?page=2").unwrap();
        assert_eq!(
            fetcher.reader_url(&target).unwrap().as_str(),
            "https://r.jina.ai/https://example.com/docs?page=2"
        );
    }

    #[test]
    fn parse_target_url_rejects_non_http_schemes() {
        assert!(parse_target_url("https://example.com").is_ok());
        assert!(matches!(parse_target_url("file:///etc/passwd"), Err(AppError::InvalidUrl { .. })));
        assert!(matches!(parse_target_url("not a url"), Err(AppError::InvalidUrl { .. })));
    }

    #[test]
    fn fetch_returns_markdown_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", mockito::Matcher::Regex(r"example\.com/docs$".into()))
            .with_status(200)
            .with_header("content-type", "text/markdown")
            .with_body("# Docs\n\nHello")
            .create();

        let fetcher = fetcher_for(&server);
        let body =
            fetcher.fetch_markdown(&Url::parse("https://example.com/docs").unwrap()).unwrap();
        assert_eq!(body, "# Docs\n\nHello");
        mock.assert();
    }

    #[test]
    fn fetch_reports_error_status() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(502)
            .with_body("upstream unavailable")
            .create();

        let fetcher = fetcher_for(&server);
        let err =
            fetcher.fetch_markdown(&Url::parse("https://example.com/").unwrap()).unwrap_err();
        assert!(matches!(err, AppError::FetchFailed { ref reason, .. } if reason.contains("502")));
    }

    #[test]
    fn fetch_rejects_empty_body() {
        let mut server = mockito::Server::new();
        let _m = server.mock("GET", mockito::Matcher::Any).with_status(200).create();

        let fetcher = fetcher_for(&server);
        let err =
            fetcher.fetch_markdown(&Url::parse("https://example.com/").unwrap()).unwrap_err();
        assert!(err.to_string().contains("empty response body"));
    }
}
