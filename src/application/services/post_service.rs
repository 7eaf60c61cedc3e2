//! Post Service
//!
//! Handles post creation, cache-aside reads of materialized posts, and the
//! comments-allowed moderation flag.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{build_comment_tree, Comment, CommentStore, Post, PostStore};
use crate::infrastructure::cache::{self, keys, Cache};
use crate::shared::error::AppError;

/// Post service trait
#[async_trait]
pub trait PostService: Send + Sync {
    /// Create a new post. Comments are allowed by default.
    async fn create_post(&self, input: CreatePostInput) -> Result<Post, AppError>;

    /// Get a post with its comment tree materialized.
    async fn get_post(&self, id: &str) -> Result<Post, AppError>;

    /// Get all posts, newest first, each with its comment tree materialized.
    async fn get_post_list(&self) -> Result<Vec<Post>, AppError>;

    /// Open or close a post for new comments. Returns the updated post
    /// without its comment tree.
    async fn set_comments_allowed(&self, id: &str, allowed: bool) -> Result<Post, AppError>;
}

/// Create post request
#[derive(Debug, Clone)]
pub struct CreatePostInput {
    /// Client-supplied identifier; a UUID is generated when absent.
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub author: String,
}

/// PostService implementation.
///
/// Reads follow the cache-aside pattern: probe the cache, fall back to
/// storage on miss, build the comment tree, and re-populate the cache with a
/// time-to-live. Every cache interaction is best-effort; storage remains the
/// source of truth and cache failures never fail a request.
pub struct PostServiceImpl<P, C, K>
where
    P: PostStore,
    C: CommentStore,
    K: Cache,
{
    post_store: Arc<P>,
    comment_store: Arc<C>,
    cache: Option<Arc<K>>,
    cache_ttl_secs: u64,
}

impl<P, C, K> PostServiceImpl<P, C, K>
where
    P: PostStore,
    C: CommentStore,
    K: Cache,
{
    pub fn new(
        post_store: Arc<P>,
        comment_store: Arc<C>,
        cache: Option<Arc<K>>,
        cache_ttl_secs: u64,
    ) -> Self {
        Self {
            post_store,
            comment_store,
            cache,
            cache_ttl_secs,
        }
    }

    fn cache(&self) -> Option<&K> {
        self.cache.as_deref()
    }
}

#[async_trait]
impl<P, C, K> PostService for PostServiceImpl<P, C, K>
where
    P: PostStore + 'static,
    C: CommentStore + 'static,
    K: Cache + 'static,
{
    async fn create_post(&self, input: CreatePostInput) -> Result<Post, AppError> {
        if input.title.is_empty() || input.content.is_empty() || input.author.is_empty() {
            return Err(AppError::Validation(
                "title, content and author are required".into(),
            ));
        }

        let post = Post {
            id: input
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: input.title,
            content: input.content,
            author: input.author,
            comments_allowed: true,
            created_at: Utc::now(),
            comments: Vec::new(),
        };

        self.post_store.create(&post).await?;

        // The listing now contains a post the cached collection lacks
        cache::evict(self.cache(), &[keys::POSTS_LIST]).await;

        Ok(post)
    }

    async fn get_post(&self, id: &str) -> Result<Post, AppError> {
        if id.is_empty() {
            return Err(AppError::Validation("post id is required".into()));
        }

        let key = keys::post(id);
        if let Some(post) = cache::lookup::<K, Post>(self.cache(), &key).await {
            return Ok(post);
        }

        let mut post = self
            .post_store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))?;

        let comments = self.comment_store.list_by_post(id).await?;
        post.comments = build_comment_tree(comments);

        cache::store(self.cache(), &key, &post, self.cache_ttl_secs).await;

        Ok(post)
    }

    async fn get_post_list(&self) -> Result<Vec<Post>, AppError> {
        if let Some(posts) = cache::lookup::<K, Vec<Post>>(self.cache(), keys::POSTS_LIST).await {
            return Ok(posts);
        }

        let mut posts = self.post_store.list().await?;
        if posts.is_empty() {
            return Ok(posts);
        }

        let post_ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
        let comments = self.comment_store.list_by_posts(&post_ids).await?;

        let mut by_post: std::collections::HashMap<String, Vec<Comment>> =
            std::collections::HashMap::new();
        for comment in comments {
            by_post.entry(comment.post_id.clone()).or_default().push(comment);
        }

        for post in &mut posts {
            post.comments = build_comment_tree(by_post.remove(&post.id).unwrap_or_default());
        }

        cache::store(self.cache(), keys::POSTS_LIST, &posts, self.cache_ttl_secs).await;

        Ok(posts)
    }

    async fn set_comments_allowed(&self, id: &str, allowed: bool) -> Result<Post, AppError> {
        if id.is_empty() {
            return Err(AppError::Validation("post id is required".into()));
        }

        let updated = self.post_store.set_comments_allowed(id, allowed).await?;
        if !updated {
            return Err(AppError::NotFound(format!("post {id} not found")));
        }

        cache::evict(self.cache(), &[&keys::post(id), keys::POSTS_LIST]).await;

        // Read back from storage, not the cache, so the eviction holds until
        // the next materializing read
        self.post_store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {id} not found")))
    }
}
