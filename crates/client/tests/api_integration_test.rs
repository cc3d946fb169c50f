// HTTP tests for the memory API client against a mock backend

use mockito::Matcher;
use pretty_assertions::assert_eq;
use recall_client::{ApiClient, ClientError, MemoryApi};
use recall_core::config::AppConfig;
use recall_core::{MemoryRecord, SearchQuery, SearchResult};
use serde_json::json;

fn client_for(url: &str) -> ApiClient {
    let builder = AppConfig::defaults().unwrap().set_override("api_url", url).unwrap();
    let config = AppConfig::from_builder(builder).unwrap();
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_search_sends_vector_and_limit() {
    let mut server = mockito::Server::new_async().await;

    let m = server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "variables": { "vector": [0.1, 0.2], "limit": 5 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":{"search":[{"id":7,"score":0.83},{"id":2,"score":0.41}]}}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let results = client
        .search(&SearchQuery { vector: vec![0.1, 0.2], limit: 5 })
        .await
        .unwrap();

    m.assert_async().await;
    assert_eq!(
        results,
        vec![SearchResult { id: 7, score: 0.83 }, SearchResult { id: 2, score: 0.41 }]
    );
}

#[tokio::test]
async fn test_search_backend_error_body() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("POST", "/graphql")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"qdrant unavailable"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .search(&SearchQuery { vector: vec![1.0], limit: 1 })
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "qdrant unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_search_graphql_errors() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(r#"{"data":null,"errors":[{"message":"limit must be positive"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .search(&SearchQuery { vector: vec![], limit: -1 })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "GraphQL error: limit must be positive");
}

#[tokio::test]
async fn test_fetch_memory() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/api/v1/memories/7")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":7,"userID":3,"content":"hello","createdAt":"2024-05-01T10:00:00Z"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let record = client.fetch_memory(7).await.unwrap();
    assert_eq!(
        record,
        MemoryRecord {
            id: 7,
            user_id: 3,
            content: "hello".into(),
            created_at: "2024-05-01T10:00:00Z".into(),
        }
    );
}

#[tokio::test]
async fn test_fetch_memory_not_json() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/api/v1/memories/9")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.fetch_memory(9).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_memory_status_without_error_body() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/api/v1/memories/404")
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.fetch_memory(404).await.unwrap_err();
    assert_eq!(err.to_string(), "API error 404: Not Found");
}
