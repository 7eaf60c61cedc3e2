//! # Domain Layer
//!
//! The domain layer contains the core business logic of the comments server.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Post, Comment) and their repository
//!   traits
//! - **services**: Domain services (comment tree builder)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Pure business logic and domain rules
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::comment_tree::build_comment_tree;
