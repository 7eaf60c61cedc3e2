//! HTTP Request Handlers

pub mod comment;
pub mod health;
pub mod post;
