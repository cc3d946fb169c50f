use serde::{Deserialize, Serialize};

use crate::ClientError;
use recall_core::SearchResult;

pub const SEARCH_QUERY: &str = "query Search($vector: [Float!], $limit: Int) {
  search(vector: $vector, limit: $limit) {
    id
    score
  }
}";

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
    /// The memory backend reports failures as a bare `{"error": "..."}` body.
    pub error: Option<String>,
}

impl<T> GraphQlResponse<T> {
    pub fn into_result(self) -> Result<T, ClientError> {
        if let Some(message) = self.error {
            return Err(ClientError::GraphQl(vec![message]));
        }
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(ClientError::GraphQl(errors.into_iter().map(|e| e.message).collect()));
        }
        self.data.ok_or(ClientError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: Option<Vec<SearchResult>>,
}
