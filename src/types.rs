//! Wire types and error types for search and page analysis.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single search hit, in the shape clients consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    /// Structured page data as returned by the API; empty object when absent.
    pub pagemap: serde_json::Value,
    /// `article:published_time` from pagemap metatags; empty string when absent.
    pub date_published: String,
    /// Tag identifying which backend produced the result.
    pub source: String,
}

/// Extracted content of a fetched webpage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAnalysis {
    /// Document title, verbatim from the `<title>` element.
    pub title: String,
    /// Readable body text, one block per line.
    pub text: String,
    pub metadata: PageMetadata,
}

/// Metadata pulled from `<meta>` tags. Absent fields are omitted from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
}

/// Outcome of analyzing one URL within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalysisEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<PageAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalyzeResponse {
    pub results: Vec<BatchAnalysisEntry>,
    pub total_count: usize,
}

/// Errors from the search backend, classified at the point of failure.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The upstream API rejected the request as malformed (HTTP 400).
    #[error("invalid search request: {0}")]
    InvalidQuery(String),

    /// Credentials rejected or daily quota exhausted (HTTP 403).
    #[error("search API access denied: {0}")]
    InvalidCredentials(String),

    /// Too many requests (HTTP 429).
    #[error("search API rate limit exceeded, try again later")]
    RateLimited,

    /// Any other non-success status from the API.
    #[error("search API returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure or undecodable response body.
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors from fetching a page for analysis.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL did not parse or uses a scheme other than http/https.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// DNS failure, connection refused, or HTTP 404.
    #[error("page not found or unreachable: {0}")]
    NotFound(String),

    /// The server refused to serve the page (HTTP 403).
    #[error("access denied by server: {0}")]
    AccessDenied(String),

    #[error("request timed out fetching {0}")]
    Timeout(String),

    /// Any other non-success status.
    #[error("unexpected status {status} fetching {url}")]
    Status { status: u16, url: String },

    /// The response is not HTML or text and cannot be analyzed.
    #[error("unsupported content type '{content_type}' at {url}")]
    UnsupportedContent { url: String, content_type: String },

    #[error("response too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    /// Transport-level failure not covered by the variants above.
    #[error("fetch failed: {0}")]
    Http(reqwest::Error),
}
