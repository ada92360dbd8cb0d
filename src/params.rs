//! Parameter types for MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Safe search filtering level passed through to the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    Off,
    Medium,
    High,
}

impl SafeSearch {
    pub fn as_str(self) -> &'static str {
        match self {
            SafeSearch::Off => "off",
            SafeSearch::Medium => "medium",
            SafeSearch::High => "high",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Search query")]
    pub query: String,

    #[schemars(description = "Number of results to return (1-10, default 10)")]
    pub num_results: Option<u32>,

    #[schemars(
        description = "Restrict results by age: d[number] days, w[number] weeks, m[number] months, y[number] years (e.g. 'w2' = past two weeks)"
    )]
    pub date_restrict: Option<String>,

    #[schemars(description = "Language code for results (e.g. 'en', 'ja', 'de')")]
    pub language: Option<String>,

    #[schemars(description = "Country code to boost results from (e.g. 'us', 'jp')")]
    pub country: Option<String>,

    #[schemars(description = "Safe search level: 'off', 'medium', or 'high'")]
    pub safe_search: Option<SafeSearch>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzePageParams {
    #[schemars(description = "URL of the webpage to analyze")]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BatchAnalyzeParams {
    #[schemars(description = "URLs of the webpages to analyze (each processed independently)")]
    pub urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_search_deserializes_lowercase() {
        let level: SafeSearch = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(level, SafeSearch::High);
        assert_eq!(level.as_str(), "high");
    }

    #[test]
    fn search_params_optional_fields_default_to_none() {
        let params: SearchParams = serde_json::from_str(r#"{"query": "rust"}"#).unwrap();
        assert_eq!(params.query, "rust");
        assert!(params.num_results.is_none());
        assert!(params.safe_search.is_none());
    }

    #[test]
    fn search_params_reject_unknown_safe_search_level() {
        let result: Result<SearchParams, _> =
            serde_json::from_str(r#"{"query": "rust", "safe_search": "strict"}"#);
        assert!(result.is_err());
    }
}
