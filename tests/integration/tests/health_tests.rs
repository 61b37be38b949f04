//! Health Endpoint Tests
//!
//! Run with: cargo test -p integration-tests --test health_tests

use integration_tests::TestHealthServer;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_health_check() {
    let data = tempfile::tempdir().unwrap();
    let server = TestHealthServer::start(data.path()).await.unwrap();

    let response = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["name"], "social-credit-bot");
    assert!(body["version"].is_string());

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_ready_when_data_dir_is_writable() {
    let data = tempfile::tempdir().unwrap();
    let server = TestHealthServer::start(&data.path().join("nested")).await.unwrap();

    let response = server.client.get(server.url("/health/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["storage"], true);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn test_not_ready_when_data_dir_is_a_file() {
    let data = tempfile::tempdir().unwrap();
    let blocker = data.path().join("ledger-dir");
    std::fs::write(&blocker, b"not a directory").unwrap();
    let server = TestHealthServer::start(&blocker).await.unwrap();

    let response = server.client.get(server.url("/health/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["storage"], false);

    server.stop().await.unwrap();
}
