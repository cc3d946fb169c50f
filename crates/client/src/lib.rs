//! Recall Client - access to the memory API
//!
//! - graphql: request/response envelopes and the `Search` operation
//! - api: the HTTP calls themselves
//! - error: what can go wrong talking to the backend

mod api;
mod error;
pub mod graphql;

pub use error::ClientError;

use async_trait::async_trait;
use recall_core::config::AppConfig;
use recall_core::{MemoryRecord, SearchQuery, SearchResult};

/// The two backend operations the front-end needs.
#[async_trait]
pub trait MemoryApi: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError>;
    async fn fetch_memory(&self, id: i64) -> Result<MemoryRecord, ClientError>;
}

/// HTTP implementation of [`MemoryApi`].
#[derive(Clone)]
pub struct ApiClient {
    pub client: reqwest::Client,
    pub api_url: String,
    pub graphql_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            graphql_url: config.graphql_endpoint(),
        })
    }

    pub fn memory_url(&self, id: i64) -> String {
        format!("{}/api/v1/memories/{}", self.api_url, id)
    }
}

#[async_trait]
impl MemoryApi for ApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError> {
        self.run_search(query).await
    }

    async fn fetch_memory(&self, id: i64) -> Result<MemoryRecord, ClientError> {
        self.get_memory(id).await
    }
}
