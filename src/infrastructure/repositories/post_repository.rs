//! Post Repository Implementation
//!
//! PostgreSQL implementation of post persistence and the comments-allowed
//! moderation flag.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Post, PostStore};
use crate::shared::error::AppError;

/// PostgreSQL post repository implementation.
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Creates a new PgPostRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for post queries.
/// Maps to the posts table schema defined in the migration.
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: String,
    title: String,
    content: String,
    author: String,
    comments_allowed: bool,
    created_at: DateTime<Utc>,
}

impl PostRow {
    /// Converts database row to domain Post entity. Comments are derived at
    /// read time by the services, never loaded here.
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            author: self.author,
            comments_allowed: self.comments_allowed,
            created_at: self.created_at,
            comments: Vec::new(),
        }
    }
}

#[async_trait]
impl PostStore for PgPostRepository {
    async fn create(&self, post: &Post) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, author, comments_allowed, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.author)
        .bind(post.comments_allowed)
        .bind(post.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, comments_allowed, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    /// List all posts, newest first.
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, comments_allowed, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    /// Returns false when no row matched, letting the service surface a
    /// distinguishable not-found.
    async fn set_comments_allowed(&self, id: &str, allowed: bool) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET comments_allowed = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(allowed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
