//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

/// Create post request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Optional client-supplied identifier.
    pub id: Option<String>,

    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: String,

    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
}

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Optional client-supplied identifier.
    pub id: Option<String>,

    /// Parent comment id; absent or empty means a top-level comment.
    pub parent_id: Option<String>,

    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,

    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}

/// Toggle the comments-allowed flag on a post
#[derive(Debug, Deserialize)]
pub struct SetCommentsAllowedRequest {
    pub allowed: bool,
}
