//! Page fetching for content analysis.
//!
//! A thin wrapper around a shared `reqwest` client. Failures are classified
//! here, at the point where the cause is still known, so callers map each
//! variant straight to a protocol error without inspecting messages.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::FetchConfig;
use crate::types::FetchError;

#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
    max_response_size: usize,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            max_response_size: config.max_response_size,
        }
    }

    /// Fetch a page body as text. Only http and https URLs are accepted.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed =
            Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        tracing::debug!(url = %url, "fetching page");

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| classify_transport(url, e))?;

        if let Some(err) = classify_status(response.status(), url) {
            return Err(err);
        }

        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(FetchError::UnsupportedContent {
                    url: url.to_string(),
                    content_type: content_type.to_string(),
                });
            }
        }

        // Reject oversized responses up front when the server declares a
        // length, and again after download for servers that do not.
        if let Some(length) = response.content_length() {
            if length as usize > self.max_response_size {
                return Err(FetchError::TooLarge {
                    size: length as usize,
                    limit: self.max_response_size,
                });
            }
        }

        let body = response.text().await.map_err(|e| classify_transport(url, e))?;
        if body.len() > self.max_response_size {
            return Err(FetchError::TooLarge {
                size: body.len(),
                limit: self.max_response_size,
            });
        }

        tracing::debug!(url = %url, bytes = body.len(), "page fetched");
        Ok(body)
    }
}

/// Map an HTTP status to a fetch error, or `None` for success.
fn classify_status(status: StatusCode, url: &str) -> Option<FetchError> {
    match status {
        StatusCode::NOT_FOUND => Some(FetchError::NotFound(url.to_string())),
        StatusCode::FORBIDDEN => Some(FetchError::AccessDenied(url.to_string())),
        s if s.is_success() => None,
        s => Some(FetchError::Status {
            status: s.as_u16(),
            url: url.to_string(),
        }),
    }
}

/// Map a transport failure to a fetch error. Unresolvable hosts and refused
/// connections surface as connect errors and are reported as not-found.
fn classify_transport(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else if err.is_connect() {
        FetchError::NotFound(url.to_string())
    } else {
        FetchError::Http(err)
    }
}

/// Whether a Content-Type can be analyzed as a page. A missing header is
/// treated as textual by the caller.
fn is_textual(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase();
    essence.starts_with("text/") || essence.contains("html") || essence.contains("xml")
}
