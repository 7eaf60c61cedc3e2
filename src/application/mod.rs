//! # Application Layer
//!
//! Business services orchestrating validation, storage, cache invalidation,
//! and live comment fan-out.
//!
//! - **services**: PostService / CommentService traits and implementations
//! - **subscriptions**: per-post publish/subscribe hub for new comments
//! - **dto**: request types consumed by the presentation layer

pub mod dto;
pub mod services;
pub mod subscriptions;
