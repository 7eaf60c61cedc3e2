//! Comment API Tests

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
async fn commenting_on_an_unknown_post_returns_not_found() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/v1/posts/missing/comments",
            &json!({ "author": "bob", "text": "hello" }).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_comment_text_is_rejected() {
    let app = TestApp::new();
    create_post(&app, "p1").await;

    let response = app
        .post_json(
            "/api/v1/posts/p1/comments",
            &json!({ "author": "bob", "text": "" }).to_string(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comments_are_listed_flat_in_creation_order() {
    let app = TestApp::new();
    create_post(&app, "p1").await;

    for (id, text) in [("c1", "first"), ("c2", "second")] {
        app.post_json(
            "/api/v1/posts/p1/comments",
            &json!({ "id": id, "author": "bob", "text": text }).to_string(),
        )
        .await;
    }

    let body = read_json(app.get("/api/v1/posts/p1/comments").await).await;
    let comments = body.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["id"], "c1");
    assert_eq!(comments[1]["id"], "c2");
}

#[tokio::test]
async fn replies_nest_under_their_parent_in_the_tree() {
    let app = TestApp::new();
    create_post(&app, "p1").await;

    app.post_json(
        "/api/v1/posts/p1/comments",
        &json!({ "id": "c1", "author": "bob", "text": "root" }).to_string(),
    )
    .await;
    app.post_json(
        "/api/v1/posts/p1/comments",
        &json!({ "id": "c2", "parent_id": "c1", "author": "carol", "text": "reply" }).to_string(),
    )
    .await;

    let body = read_json(app.get("/api/v1/posts/p1").await).await;
    let roots = body["comments"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["id"], "c1");
    assert_eq!(roots[0]["children"][0]["id"], "c2");

    // The flat listing still carries both, unnested
    let flat = read_json(app.get("/api/v1/posts/p1/comments").await).await;
    assert_eq!(flat.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn a_reply_to_a_missing_parent_surfaces_as_a_root() {
    let app = TestApp::new();
    create_post(&app, "p1").await;

    app.post_json(
        "/api/v1/posts/p1/comments",
        &json!({ "id": "c1", "parent_id": "ghost", "author": "bob", "text": "orphan" })
            .to_string(),
    )
    .await;

    let body = read_json(app.get("/api/v1/posts/p1").await).await;
    let roots = body["comments"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["id"], "c1");
}

#[tokio::test]
async fn a_closed_post_rejects_comments_without_storing_them() {
    let app = TestApp::new();
    create_post(&app, "p1").await;

    app.patch_json(
        "/api/v1/posts/p1/comments-allowed",
        &json!({ "allowed": false }).to_string(),
    )
    .await;

    let response = app
        .post_json(
            "/api/v1/posts/p1/comments",
            &json!({ "author": "bob", "text": "hello" }).to_string(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let flat = read_json(app.get("/api/v1/posts/p1/comments").await).await;
    assert_eq!(flat.as_array().unwrap().len(), 0);
}
