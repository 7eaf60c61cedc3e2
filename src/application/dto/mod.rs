//! Data Transfer Objects
//!
//! Request bodies for the HTTP API.

pub mod request;

pub use request::{CreateCommentRequest, CreatePostRequest, SetCommentsAllowedRequest};
