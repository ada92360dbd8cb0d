//! Google Search MCP Library
//!
//! Web search via the Google Custom Search JSON API plus webpage content
//! analysis.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use google_search_mcp::{Config, GoogleSearchMcpServer};
//!
//! let config = Config::load()?;
//! let server = GoogleSearchMcpServer::new(config);
//! // Use with in-memory transport or serve via stdio
//! ```
//!
//! # Configuration
//! Set `GOOGLE_API_KEY` and `GOOGLE_SEARCH_ENGINE_ID` env vars, or configure
//! them in the platform config directory (`google-search-mcp/config.toml`).

pub mod config;
pub mod extractor;
pub mod fetch;
pub mod handlers;
pub mod params;
pub mod search;
pub mod server;
pub mod types;

// Re-export main server type and config
pub use config::Config;
pub use server::GoogleSearchMcpServer;

// Re-export parameter types for direct API usage
pub use params::{AnalyzePageParams, BatchAnalyzeParams, SafeSearch, SearchParams};

// Re-export response types
pub use types::{PageAnalysis, PageMetadata, SearchResult};
