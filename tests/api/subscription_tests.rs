//! Live Subscription Tests
//!
//! Exercise the hub through the HTTP write path: comments created over the
//! API must reach subscribers registered on the same application state.

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{read_json, TestApp};

async fn create_post(app: &TestApp, id: &str) {
    let response = app
        .post_json(
            "/api/v1/posts",
            &json!({ "id": id, "title": "t", "content": "c", "author": "alice" }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn created_comments_reach_live_subscribers() {
    let app = TestApp::new();
    create_post(&app, "p1").await;
    create_post(&app, "p2").await;

    let (_h1, mut rx1) = app.hub.subscribe("p1");
    let (_h2, mut rx2) = app.hub.subscribe("p2");

    let response = app
        .post_json(
            "/api/v1/posts/p1/comments",
            &json!({ "author": "bob", "text": "live" }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json(response).await;

    let received = rx1.recv().await.unwrap();
    assert_eq!(received.id, created["id"].as_str().unwrap());
    assert_eq!(received.text, "live");

    // The other post's subscriber sees nothing
    assert!(rx2.try_recv().is_err());
}

#[tokio::test]
async fn unsubscribed_clients_stop_receiving() {
    let app = TestApp::new();
    create_post(&app, "p1").await;

    let (handle, mut rx) = app.hub.subscribe("p1");
    app.hub.unsubscribe(&handle);

    app.post_json(
        "/api/v1/posts/p1/comments",
        &json!({ "author": "bob", "text": "gone" }).to_string(),
    )
    .await;

    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn rejected_comments_do_not_fan_out() {
    let app = TestApp::new();
    create_post(&app, "p1").await;

    app.patch_json(
        "/api/v1/posts/p1/comments-allowed",
        &json!({ "allowed": false }).to_string(),
    )
    .await;

    let (_handle, mut rx) = app.hub.subscribe("p1");

    let response = app
        .post_json(
            "/api/v1/posts/p1/comments",
            &json!({ "author": "bob", "text": "blocked" }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    assert!(rx.try_recv().is_err());
}
