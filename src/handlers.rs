//! Tool handler implementations.
//!
//! Separated from the server struct so the logic can be tested without
//! spinning up a transport. Error mapping lives here too: invalid-request
//! classes cover everything the caller can correct (bad query, bad URL,
//! missing page, denied access), internal classes cover everything else.

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde::Serialize;

use crate::extractor;
use crate::fetch::PageFetcher;
use crate::params::{AnalyzePageParams, BatchAnalyzeParams, SearchParams};
use crate::search::{SearchBackend, SearchOptions};
use crate::types::{BatchAnalysisEntry, BatchAnalyzeResponse, FetchError, SearchError};

/// Serialize a payload as pretty JSON tool output.
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(format!("failed to serialize response: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

pub fn search_error_to_mcp(err: SearchError) -> McpError {
    match &err {
        SearchError::InvalidQuery(_) | SearchError::InvalidCredentials(_) => {
            McpError::invalid_request(err.to_string(), None)
        }
        SearchError::RateLimited | SearchError::Upstream { .. } | SearchError::Http(_) => {
            McpError::internal_error(err.to_string(), None)
        }
    }
}

pub fn fetch_error_to_mcp(err: FetchError) -> McpError {
    match &err {
        FetchError::InvalidUrl(_) | FetchError::NotFound(_) | FetchError::AccessDenied(_) => {
            McpError::invalid_request(err.to_string(), None)
        }
        FetchError::Timeout(_)
        | FetchError::Status { .. }
        | FetchError::UnsupportedContent { .. }
        | FetchError::TooLarge { .. }
        | FetchError::Http(_) => McpError::internal_error(err.to_string(), None),
    }
}

pub async fn search(
    backend: &dyn SearchBackend,
    default_results: u32,
    params: SearchParams,
) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(McpError::invalid_params("query cannot be empty", None));
    }

    let options = SearchOptions {
        // A requested count of zero is treated as unset.
        num_results: params.num_results.filter(|&n| n > 0).unwrap_or(default_results),
        date_restrict: params.date_restrict,
        language: params.language,
        country: params.country,
        safe_search: params.safe_search,
    };

    let results = backend
        .search(&params.query, &options)
        .await
        .map_err(search_error_to_mcp)?;

    json_success(&results)
}

pub async fn analyze_page(
    fetcher: &PageFetcher,
    params: AnalyzePageParams,
) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(McpError::invalid_params("url cannot be empty", None));
    }

    tracing::info!(url = %params.url, "analyzing page");
    let html = fetcher.fetch(&params.url).await.map_err(fetch_error_to_mcp)?;
    let analysis = extractor::extract(&html);
    tracing::debug!(
        url = %params.url,
        title = %analysis.title,
        chars = analysis.text.chars().count(),
        "page analyzed"
    );

    json_success(&analysis)
}

/// Analyze several URLs sequentially. A failure on one URL is recorded in
/// its entry and does not interrupt the rest.
pub async fn batch_analyze(
    fetcher: &PageFetcher,
    params: BatchAnalyzeParams,
) -> Result<CallToolResult, McpError> {
    if params.urls.is_empty() {
        return Err(McpError::invalid_params("urls cannot be empty", None));
    }

    let mut results = Vec::with_capacity(params.urls.len());
    for url in params.urls {
        match fetcher.fetch(&url).await {
            Ok(html) => {
                let analysis = extractor::extract(&html);
                results.push(BatchAnalysisEntry {
                    url,
                    analysis: Some(analysis),
                    error: None,
                });
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "batch entry failed");
                results.push(BatchAnalysisEntry {
                    url,
                    analysis: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let response = BatchAnalyzeResponse {
        total_count: results.len(),
        results,
    };
    json_success(&response)
}
