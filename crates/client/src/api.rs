use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::graphql::{GraphQlRequest, GraphQlResponse, SEARCH_QUERY, SearchData};
use crate::{ApiClient, ClientError};
use recall_core::{MemoryRecord, SearchQuery, SearchResult};

impl ApiClient {
    /// Runs the `Search` GraphQL operation.
    pub(crate) async fn run_search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError> {
        info!("🔍 Searching: {} dims, limit {}", query.vector.len(), query.limit);

        let body = GraphQlRequest { query: SEARCH_QUERY, variables: query };
        let res = self.client.post(&self.graphql_url).json(&body).send().await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            warn!("⚠️ Search failed with {}", status);
            return Err(status_error(status, &text));
        }

        let envelope: GraphQlResponse<SearchData> = serde_json::from_str(&text)?;
        let results = envelope.into_result()?.search.unwrap_or_default();
        debug!("Search returned {} results", results.len());
        Ok(results)
    }

    /// `GET /api/v1/memories/{id}`
    pub(crate) async fn get_memory(&self, id: i64) -> Result<MemoryRecord, ClientError> {
        let url = self.memory_url(id);
        debug!("Fetching memory {} from {}", id, url);

        let res = self.client.get(&url).send().await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            warn!("⚠️ Memory {} fetch failed with {}", id, status);
            return Err(status_error(status, &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn status_error(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown status").to_string());
    ClientError::Status { status: status.as_u16(), message }
}
