//! Google Custom Search JSON API backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::GoogleConfig;
use crate::types::{SearchError, SearchResult};

use super::{SearchBackend, SearchOptions};

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
/// Hard per-request cap imposed by the API.
const MAX_RESULTS_PER_REQUEST: u32 = 10;
/// Value stamped into each result's `source` field.
const SOURCE_TAG: &str = "google_search";

pub struct GoogleBackend {
    client: Client,
    api_key: String,
    search_engine_id: String,
}

impl GoogleBackend {
    pub fn new(config: GoogleConfig) -> Self {
        let client = Client::builder()
            .user_agent("google-search-mcp/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key,
            search_engine_id: config.search_engine_id,
        }
    }

    fn request_params(&self, query: &str, options: &SearchOptions) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("cx", self.search_engine_id.clone()),
            ("q", query.to_string()),
            (
                "num",
                options.num_results.min(MAX_RESULTS_PER_REQUEST).to_string(),
            ),
        ];

        if let Some(restrict) = &options.date_restrict {
            params.push(("dateRestrict", restrict.clone()));
        }
        if let Some(language) = &options.language {
            params.push(("lr", format!("lang_{language}")));
        }
        if let Some(country) = &options.country {
            params.push(("cr", format!("country{}", country.to_uppercase())));
        }
        if let Some(safe) = options.safe_search {
            params.push(("safe", safe.as_str().to_string()));
        }

        params
    }
}

#[async_trait]
impl SearchBackend for GoogleBackend {
    fn name(&self) -> &str {
        SOURCE_TAG
    }

    async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::debug!(query = %query, num = options.num_results, "sending search request");

        let response = self
            .client
            .get(ENDPOINT)
            .query(&self.request_params(query, options))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status.as_u16(), &body));
        }

        let payload: CseResponse = response.json().await?;
        let results: Vec<SearchResult> = payload
            .items
            .unwrap_or_default()
            .into_iter()
            .map(CseItem::into_result)
            .collect();

        tracing::info!(query = %query, results = results.len(), "search completed");
        Ok(results)
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty() && !self.search_engine_id.is_empty()
    }
}

/// Classify a non-success API status. 400 means the request itself was bad,
/// 403 means the key or engine id was rejected, 429 is quota pressure.
fn classify_error(status: u16, body: &str) -> SearchError {
    let message = serde_json::from_str::<CseErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        400 => SearchError::InvalidQuery(message),
        403 => SearchError::InvalidCredentials(message),
        429 => SearchError::RateLimited,
        _ => SearchError::Upstream { status, message },
    }
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    items: Option<Vec<CseItem>>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
    pagemap: Option<Value>,
}

/// Error envelope the API wraps failures in: `{"error": {"message": ...}}`.
#[derive(Debug, Deserialize)]
struct CseErrorEnvelope {
    error: CseErrorBody,
}

#[derive(Debug, Deserialize)]
struct CseErrorBody {
    message: String,
}

impl CseItem {
    /// Flatten an API item into the wire shape, pulling the publication date
    /// out of the first metatags entry when present.
    fn into_result(self) -> SearchResult {
        let pagemap = self
            .pagemap
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        let date_published = pagemap
            .get("metatags")
            .and_then(|tags| tags.get(0))
            .and_then(|tag| tag.get("article:published_time"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        SearchResult {
            title: self.title.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            snippet: self.snippet.unwrap_or_default(),
            pagemap,
            date_published,
            source: SOURCE_TAG.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SafeSearch;

    fn test_backend() -> GoogleBackend {
        GoogleBackend::new(GoogleConfig {
            api_key: "test-key".to_string(),
            search_engine_id: "test-cx".to_string(),
        })
    }

    fn param<'a>(params: &'a [(&str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn request_includes_credentials_and_query() {
        let backend = test_backend();
        let options = SearchOptions {
            num_results: 5,
            ..Default::default()
        };

        let params = backend.request_params("rust async", &options);
        assert_eq!(param(&params, "key"), Some("test-key"));
        assert_eq!(param(&params, "cx"), Some("test-cx"));
        assert_eq!(param(&params, "q"), Some("rust async"));
        assert_eq!(param(&params, "num"), Some("5"));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn result_count_is_capped_at_ten() {
        let backend = test_backend();
        let options = SearchOptions {
            num_results: 25,
            ..Default::default()
        };

        let params = backend.request_params("rust", &options);
        assert_eq!(param(&params, "num"), Some("10"));
    }

    #[test]
    fn filters_map_to_api_parameters() {
        let backend = test_backend();
        let options = SearchOptions {
            num_results: 10,
            date_restrict: Some("w2".to_string()),
            language: Some("en".to_string()),
            country: Some("jp".to_string()),
            safe_search: Some(SafeSearch::High),
        };

        let params = backend.request_params("rust", &options);
        assert_eq!(param(&params, "dateRestrict"), Some("w2"));
        assert_eq!(param(&params, "lr"), Some("lang_en"));
        assert_eq!(param(&params, "cr"), Some("countryJP"));
        assert_eq!(param(&params, "safe"), Some("high"));
    }

    #[test]
    fn items_flatten_into_results() {
        let json = r#"{
            "kind": "customsearch#search",
            "items": [
                {
                    "title": "Rust Programming Language",
                    "link": "https://www.rust-lang.org/",
                    "snippet": "A language empowering everyone to build reliable software.",
                    "pagemap": {
                        "metatags": [
                            {"article:published_time": "2024-03-20T10:00:00Z"}
                        ]
                    }
                },
                {
                    "title": "Rust Blog",
                    "link": "https://blog.rust-lang.org/"
                }
            ]
        }"#;

        let payload: CseResponse = serde_json::from_str(json).unwrap();
        let results: Vec<SearchResult> = payload
            .items
            .unwrap_or_default()
            .into_iter()
            .map(CseItem::into_result)
            .collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Programming Language");
        assert_eq!(results[0].link, "https://www.rust-lang.org/");
        assert_eq!(results[0].date_published, "2024-03-20T10:00:00Z");
        assert_eq!(results[0].source, "google_search");

        assert_eq!(results[1].snippet, "");
        assert_eq!(results[1].date_published, "");
        assert_eq!(results[1].pagemap, serde_json::json!({}));
    }

    #[test]
    fn response_without_items_is_empty() {
        let payload: CseResponse =
            serde_json::from_str(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(payload.items.is_none());
    }

    #[test]
    fn error_statuses_classify_by_cause() {
        let body = r#"{"error": {"code": 400, "message": "Invalid Value"}}"#;
        match classify_error(400, body) {
            SearchError::InvalidQuery(message) => assert_eq!(message, "Invalid Value"),
            other => panic!("unexpected classification: {other:?}"),
        }

        assert!(matches!(
            classify_error(403, r#"{"error": {"code": 403, "message": "Forbidden"}}"#),
            SearchError::InvalidCredentials(_)
        ));
        assert!(matches!(classify_error(429, ""), SearchError::RateLimited));
        assert!(matches!(
            classify_error(500, "backend exploded"),
            SearchError::Upstream { status: 500, .. }
        ));
    }

    #[test]
    fn non_json_error_body_is_passed_through() {
        match classify_error(502, "<html>Bad Gateway</html>") {
            SearchError::Upstream { message, .. } => {
                assert_eq!(message, "<html>Bad Gateway</html>")
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn availability_requires_both_credentials() {
        assert!(test_backend().is_available());

        let unconfigured = GoogleBackend::new(GoogleConfig::default());
        assert!(!unconfigured.is_available());

        let missing_cx = GoogleBackend::new(GoogleConfig {
            api_key: "key".to_string(),
            search_engine_id: String::new(),
        });
        assert!(!missing_cx.is_available());
    }

    #[test]
    fn backend_reports_source_name() {
        assert_eq!(test_backend().name(), "google_search");
    }
}
