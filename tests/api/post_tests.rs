//! Post API Tests

use axum::http::StatusCode;
use serde_json::json;

use comments_server::infrastructure::cache::keys;

use crate::common::{read_json, TestApp};

#[tokio::test]
async fn create_post_assigns_an_id_and_allows_comments() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/posts",
            &json!({
                "title": "Hello",
                "content": "First post",
                "author": "alice"
            })
            .to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["comments_allowed"], true);
    assert_eq!(body["comments"], json!([]));
}

#[tokio::test]
async fn create_post_rejects_a_blank_title() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/posts",
            &json!({ "title": "", "content": "body", "author": "alice" }).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_post_returns_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/v1/posts/missing").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn post_lifecycle_covers_commenting_and_moderation() {
    let app = TestApp::new();

    // Create a post with a known id
    let response = app
        .post_json(
            "/api/v1/posts",
            &json!({
                "id": "p1",
                "title": "Hello",
                "content": "First post",
                "author": "alice"
            })
            .to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Comment on it
    let response = app
        .post_json(
            "/api/v1/posts/p1/comments",
            &json!({ "author": "bob", "text": "nice post" }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The comment shows up as the sole root of the materialized tree
    let body = read_json(app.get("/api/v1/posts/p1").await).await;
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["comments"][0]["text"], "nice post");
    assert_eq!(body["comments"][0]["children"], json!([]));

    // Turn commenting off
    let response = app
        .patch_json(
            "/api/v1/posts/p1/comments-allowed",
            &json!({ "allowed": false }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["comments_allowed"], false);

    // Further comments are rejected
    let response = app
        .post_json(
            "/api/v1/posts/p1/comments",
            &json!({ "author": "carol", "text": "too late" }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The rejected comment left no trace
    let body = read_json(app.get("/api/v1/posts/p1").await).await;
    assert_eq!(body["comments_allowed"], false);
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn writes_invalidate_cached_reads() {
    let app = TestApp::new();

    app.post_json(
        "/api/v1/posts",
        &json!({ "id": "p1", "title": "t", "content": "c", "author": "alice" }).to_string(),
    )
    .await;

    // A read populates the cache
    app.get("/api/v1/posts/p1").await;
    app.get("/api/v1/posts").await;
    assert!(app.cache.contains(&keys::post("p1")));
    assert!(app.cache.contains(keys::POSTS_LIST));

    // A moderation write evicts both affected keys
    app.patch_json(
        "/api/v1/posts/p1/comments-allowed",
        &json!({ "allowed": false }).to_string(),
    )
    .await;
    assert!(!app.cache.contains(&keys::post("p1")));
    assert!(!app.cache.contains(keys::POSTS_LIST));

    // The next read observes the write
    let body = read_json(app.get("/api/v1/posts/p1").await).await;
    assert_eq!(body["comments_allowed"], false);
}

#[tokio::test]
async fn repeated_reads_are_answered_from_the_cache() {
    let app = TestApp::new();

    app.post_json(
        "/api/v1/posts",
        &json!({ "id": "p1", "title": "t", "content": "c", "author": "alice" }).to_string(),
    )
    .await;

    let first = read_json(app.get("/api/v1/posts/p1").await).await;
    assert!(app.cache.contains(&keys::post("p1")));
    let second = read_json(app.get("/api/v1/posts/p1").await).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn posts_list_returns_newest_first() {
    let app = TestApp::new();

    for (id, title) in [("p1", "older"), ("p2", "newer")] {
        app.post_json(
            "/api/v1/posts",
            &json!({ "id": id, "title": title, "content": "c", "author": "alice" }).to_string(),
        )
        .await;
    }

    let body = read_json(app.get("/api/v1/posts").await).await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["id"], "p2");
    assert_eq!(posts[1]["id"], "p1");
}
