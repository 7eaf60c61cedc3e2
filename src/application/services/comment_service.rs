//! Comment Service
//!
//! Handles comment creation under the moderation-flag rule, cache
//! invalidation for the affected post, and hand-off of persisted comments to
//! the subscription hub for live fan-out.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::application::subscriptions::SubscriptionHub;
use crate::domain::{Comment, CommentStore, PostStore};
use crate::infrastructure::cache::{self, keys, Cache};
use crate::shared::error::AppError;

/// Comment service trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Create a comment on a post that currently allows comments. The
    /// persisted comment is fanned out to the post's live subscribers.
    async fn create_comment(&self, input: CreateCommentInput) -> Result<Comment, AppError>;

    /// Get a post's comments as the flat, creation-ordered list.
    async fn get_comments(&self, post_id: &str) -> Result<Vec<Comment>, AppError>;
}

/// Create comment request
#[derive(Debug, Clone)]
pub struct CreateCommentInput {
    /// Client-supplied identifier; a UUID is generated when absent.
    pub id: Option<String>,
    pub post_id: String,
    /// Parent comment id; None (or empty) makes this a top-level comment.
    pub parent_id: Option<String>,
    pub author: String,
    pub text: String,
}

/// CommentService implementation.
///
/// The comments-allowed check and the insert form one business transaction
/// from the caller's perspective: the flag is read immediately before the
/// write and a rejection happens before anything is persisted.
pub struct CommentServiceImpl<C, P, K>
where
    C: CommentStore,
    P: PostStore,
    K: Cache,
{
    comment_store: Arc<C>,
    post_store: Arc<P>,
    cache: Option<Arc<K>>,
    hub: Arc<SubscriptionHub>,
}

impl<C, P, K> CommentServiceImpl<C, P, K>
where
    C: CommentStore,
    P: PostStore,
    K: Cache,
{
    pub fn new(
        comment_store: Arc<C>,
        post_store: Arc<P>,
        cache: Option<Arc<K>>,
        hub: Arc<SubscriptionHub>,
    ) -> Self {
        Self {
            comment_store,
            post_store,
            cache,
            hub,
        }
    }
}

#[async_trait]
impl<C, P, K> CommentService for CommentServiceImpl<C, P, K>
where
    C: CommentStore + 'static,
    P: PostStore + 'static,
    K: Cache + 'static,
{
    async fn create_comment(&self, input: CreateCommentInput) -> Result<Comment, AppError> {
        if input.post_id.is_empty() || input.author.is_empty() || input.text.is_empty() {
            return Err(AppError::Validation(
                "post id, author and text are required".into(),
            ));
        }

        let post = self
            .post_store
            .get(&input.post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", input.post_id)))?;

        if !post.accepts_comments() {
            return Err(AppError::Forbidden(
                "comments are disabled for this post".into(),
            ));
        }

        let comment = Comment {
            id: input
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            post_id: input.post_id,
            parent_id: input.parent_id.filter(|p| !p.is_empty()),
            author: input.author,
            text: input.text,
            created_at: Utc::now(),
            children: Vec::new(),
        };

        self.comment_store.create(&comment).await?;

        // Both the materialized post and the listing now miss this comment
        cache::evict(
            self.cache.as_deref(),
            &[&keys::post(&comment.post_id), keys::POSTS_LIST],
        )
        .await;

        let delivered = self.hub.publish(&comment);
        debug!(
            post_id = %comment.post_id,
            comment_id = %comment.id,
            delivered,
            "comment fanned out"
        );

        Ok(comment)
    }

    async fn get_comments(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        if post_id.is_empty() {
            return Err(AppError::Validation("post id is required".into()));
        }
        self.comment_store.list_by_post(post_id).await
    }
}
