//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! ## Available Repositories
//!
//! - **PgPostRepository** - Post persistence and the comments-allowed flag
//! - **PgCommentRepository** - Comment persistence and creation-ordered reads

pub mod comment_repository;
pub mod post_repository;

pub use comment_repository::PgCommentRepository;
pub use post_repository::PgPostRepository;
