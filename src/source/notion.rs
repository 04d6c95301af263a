//! Notion REST client implementing [`DocumentSource`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::DocumentSource;
use super::error::SourceError;
use crate::types::{CollectionId, Row};

/// Production API origin.
pub const NOTION_API_BASE: &str = "https://api.notion.com";

/// API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Body of a database query: one page, most recently edited first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub page_size: u32,
    pub sorts: Vec<QuerySort>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySort {
    pub timestamp: &'static str,
    pub direction: &'static str,
}

impl QueryRequest {
    pub fn newest_first(page_size: u32) -> Self {
        QueryRequest {
            page_size,
            sorts: vec![QuerySort {
                timestamp: "last_edited_time",
                direction: "descending",
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// A Notion integration client.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    /// Creates a client for the public API with a per-request timeout.
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::from_reqwest)?;
        Ok(NotionClient {
            http,
            base_url: NOTION_API_BASE.to_string(),
            token: token.into(),
        })
    }

    /// Points the client at another origin (a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query_url(&self, collection: &CollectionId) -> String {
        format!("{}/v1/databases/{}/query", self.base_url, collection)
    }
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DocumentSource for NotionClient {
    async fn query(
        &self,
        collection: &CollectionId,
        page_size: u32,
    ) -> Result<Vec<Row>, SourceError> {
        let response = self
            .http
            .post(self.query_url(collection))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&QueryRequest::newest_first(page_size))
            .send()
            .await
            .map_err(SourceError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::from_status(status.as_u16(), body));
        }

        let parsed: QueryResponse = response.json().await.map_err(SourceError::from_reqwest)?;
        debug!(collection = %collection, results = parsed.results.len(), "Queried database");

        Ok(parse_results(collection, parsed.results))
    }
}

/// Converts raw results into rows, dropping the ones without an id.
fn parse_results(collection: &CollectionId, results: Vec<Value>) -> Vec<Row> {
    results
        .into_iter()
        .filter_map(|value| match Row::from_json(value) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!(collection = %collection, error = %e, "Skipping unusable row");
                None
            }
        })
        .collect()
}
