//! MCP server implementation for Google search and page analysis.
//!
//! The server owns one search backend and one page fetcher, both built at
//! construction from the loaded configuration. Tool bodies delegate to
//! `handlers` so the logic stays testable without a transport.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::config::Config;
use crate::fetch::PageFetcher;
use crate::handlers;
use crate::params::{AnalyzePageParams, BatchAnalyzeParams, SearchParams};
use crate::search::{GoogleBackend, SearchBackend};

/// The Google Search MCP server.
#[derive(Clone)]
pub struct GoogleSearchMcpServer {
    backend: Arc<dyn SearchBackend>,
    fetcher: PageFetcher,
    config: Config,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GoogleSearchMcpServer {
    pub fn new(config: Config) -> Self {
        let backend: Arc<dyn SearchBackend> =
            Arc::new(GoogleBackend::new(config.google.clone()));

        if !backend.is_available() {
            tracing::warn!(
                "Backend '{}' has no credentials configured; search requests will fail",
                backend.name()
            );
        }

        let fetcher = PageFetcher::new(&config.fetch);

        Self {
            backend,
            fetcher,
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the web using Google Custom Search. Returns titles, links, and snippets in relevance order. Supports filtering by date, language, country, and safe search level."
    )]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::search(
            self.backend.as_ref(),
            self.config.search.max_results,
            params,
        )
        .await
    }

    #[tool(
        description = "Fetch a webpage and extract its title, readable text content, and metadata (description, keywords, author, publish date)."
    )]
    async fn analyze_page(
        &self,
        Parameters(params): Parameters<AnalyzePageParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::analyze_page(&self.fetcher, params).await
    }

    #[tool(
        description = "Analyze several webpages in one call. Each URL is fetched and analyzed independently; a failure on one URL is reported in its entry and does not affect the others."
    )]
    async fn batch_analyze(
        &self,
        Parameters(params): Parameters<BatchAnalyzeParams>,
    ) -> Result<CallToolResult, McpError> {
        handlers::batch_analyze(&self.fetcher, params).await
    }
}

#[tool_handler]
impl rmcp::ServerHandler for GoogleSearchMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Google Search MCP Server - provides web search through the Google \
                 Custom Search API and webpage content analysis. Use 'search' to find \
                 pages, then 'analyze_page' to read the ones that look relevant."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
