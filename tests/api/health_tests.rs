//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::{read_json, TestApp};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
}
