//! Search backend abstraction.

mod google;

pub use google::GoogleBackend;

use async_trait::async_trait;

use crate::params::SafeSearch;
use crate::types::{SearchError, SearchResult};

/// Optional filters applied to a search request.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Requested result count; backends cap this at their own maximum.
    pub num_results: u32,
    /// Age restriction in the API's `dateRestrict` syntax (`d1`, `w2`, `m6`, `y1`).
    pub date_restrict: Option<String>,
    /// Two-letter language code.
    pub language: Option<String>,
    /// Two-letter country code.
    pub country: Option<String>,
    pub safe_search: Option<SafeSearch>,
}

/// A web search provider.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Identifier stamped into each result's `source` field.
    fn name(&self) -> &str;

    /// Run a query and return results in relevance order.
    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError>;

    /// Whether the backend has the configuration it needs to serve requests.
    fn is_available(&self) -> bool;
}
