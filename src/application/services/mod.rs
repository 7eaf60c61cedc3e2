//! Application Services
//!
//! Business logic services orchestrating validation, storage, tree building,
//! cache invalidation, and comment fan-out.

pub mod comment_service;
pub mod post_service;

pub use comment_service::{CommentService, CommentServiceImpl, CreateCommentInput};
pub use post_service::{CreatePostInput, PostService, PostServiceImpl};
