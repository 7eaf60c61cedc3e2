//! Common Test Utilities
//!
//! In-memory storage backends plus a `TestApp` that drives the real router.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;

use comments_server::application::services::{
    CommentService, CommentServiceImpl, PostService, PostServiceImpl,
};
use comments_server::application::subscriptions::SubscriptionHub;
use comments_server::domain::{Comment, CommentStore, Post, PostStore};
use comments_server::infrastructure::cache::MemoryCache;
use comments_server::presentation::http::create_router;
use comments_server::shared::error::AppError;
use comments_server::startup::AppState;

/// In-memory post storage preserving insertion order.
///
/// `list` returns newest first, mirroring the SQL ordering; with insertion
/// order as the tiebreaker the result stays deterministic even when two
/// posts share a creation timestamp.
#[derive(Default)]
pub struct MemoryPostStore {
    posts: Mutex<Vec<Post>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn create(&self, post: &Post) -> Result<(), AppError> {
        self.posts.lock().push(post.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, AppError> {
        Ok(self.posts.lock().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let mut posts = self.posts.lock().clone();
        posts.reverse();
        Ok(posts)
    }

    async fn set_comments_allowed(&self, id: &str, allowed: bool) -> Result<bool, AppError> {
        let mut posts = self.posts.lock();
        match posts.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.comments_allowed = allowed;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory comment storage preserving insertion order, which matches the
/// creation-time ascending ordering of the SQL reads.
#[derive(Default)]
pub struct MemoryCommentStore {
    comments: Mutex<Vec<Comment>>,
}

impl MemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for MemoryCommentStore {
    async fn create(&self, comment: &Comment) -> Result<(), AppError> {
        self.comments.lock().push(comment.clone());
        Ok(())
    }

    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        Ok(self
            .comments
            .lock()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn list_by_posts(&self, post_ids: &[String]) -> Result<Vec<Comment>, AppError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .comments
            .lock()
            .iter()
            .filter(|c| post_ids.contains(&c.post_id))
            .cloned()
            .collect())
    }
}

/// Test application wired with in-memory storage and cache.
pub struct TestApp {
    pub router: Router,
    pub cache: Arc<MemoryCache>,
    pub hub: Arc<SubscriptionHub>,
}

impl TestApp {
    /// Create a new test application backed by in-memory dependencies.
    pub fn new() -> Self {
        let post_store = Arc::new(MemoryPostStore::new());
        let comment_store = Arc::new(MemoryCommentStore::new());
        let cache = Arc::new(MemoryCache::new());
        let hub = Arc::new(SubscriptionHub::new(16));

        let post_service: Arc<dyn PostService> = Arc::new(PostServiceImpl::new(
            post_store.clone(),
            comment_store.clone(),
            Some(cache.clone()),
            300,
        ));
        let comment_service: Arc<dyn CommentService> = Arc::new(CommentServiceImpl::new(
            comment_store,
            post_store,
            Some(cache.clone()),
            hub.clone(),
        ));

        let router = create_router(AppState {
            post_service,
            comment_service,
            hub: hub.clone(),
        });

        Self { router, cache, hub }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a PATCH request with JSON body
    pub async fn patch_json(&self, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Read a response body as JSON
pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
