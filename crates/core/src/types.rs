use serde::{Deserialize, Serialize};
use std::fmt;

/// One hit from the search query. Order is whatever the server returned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(alias = "ID")]
    pub id: i64,
    #[serde(alias = "Score")]
    pub score: f64,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Memory {} (score {:.2})", self.id, self.score)
    }
}

/// A stored memory as returned by `GET /api/v1/memories/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    #[serde(alias = "ID")]
    pub id: i64,
    #[serde(rename = "userID", alias = "UserID")]
    pub user_id: i64,
    #[serde(alias = "Content")]
    pub content: String,
    #[serde(rename = "createdAt", alias = "CreatedAt")]
    pub created_at: String,
}

/// Variables of the `Search` GraphQL operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub vector: Vec<f64>,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn result_line_uses_two_decimals() {
        let r = SearchResult { id: 7, score: 0.8312 };
        assert_eq!(r.to_string(), "Memory 7 (score 0.83)");
    }

    #[test]
    fn record_accepts_camel_and_pascal_case() {
        let camel: MemoryRecord = serde_json::from_str(
            r#"{"id":7,"userID":3,"content":"hello","createdAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        let pascal: MemoryRecord = serde_json::from_str(
            r#"{"ID":7,"UserID":3,"Content":"hello","CreatedAt":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(camel, pascal);
        assert_eq!(camel.user_id, 3);
    }

    #[test]
    fn search_result_accepts_backend_field_names() {
        let results: Vec<SearchResult> =
            serde_json::from_str(r#"[{"ID":1,"Score":0.5},{"id":2,"score":0.25}]"#).unwrap();
        assert_eq!(
            results,
            vec![SearchResult { id: 1, score: 0.5 }, SearchResult { id: 2, score: 0.25 }]
        );
    }

    #[test]
    fn query_serializes_as_graphql_variables() {
        let q = SearchQuery { vector: vec![0.1, 0.2], limit: 5 };
        assert_eq!(
            serde_json::to_value(&q).unwrap(),
            serde_json::json!({ "vector": [0.1, 0.2], "limit": 5 })
        );
    }
}
