//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL)
//! - Cache implementations (Redis, in-memory)

pub mod database;
pub mod cache;
pub mod repositories;
