//! Comment Repository Implementation
//!
//! PostgreSQL implementation of comment persistence. Reads are always
//! ordered by creation time ascending; that order is the contract the tree
//! builder relies on for sibling ordering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Comment, CommentStore};
use crate::shared::error::AppError;

/// PostgreSQL comment repository implementation.
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Creates a new PgCommentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for comment queries.
/// Maps to the comments table schema defined in the migration.
#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: String,
    post_id: String,
    parent_id: Option<String>,
    author: String,
    text: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            parent_id: self.parent_id,
            author: self.author,
            text: self.text,
            created_at: self.created_at,
            children: Vec::new(),
        }
    }
}

#[async_trait]
impl CommentStore for PgCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, parent_id, author, text, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.post_id)
        .bind(&comment.parent_id)
        .bind(&comment.author)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, parent_id, author, text, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_comment()).collect())
    }

    async fn list_by_posts(&self, post_ids: &[String]) -> Result<Vec<Comment>, AppError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, parent_id, author, text, created_at
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_comment()).collect())
    }
}
