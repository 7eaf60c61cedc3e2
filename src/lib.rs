//! # Comments Server Library
//!
//! This crate provides a comments-on-posts backend with:
//! - RESTful HTTP API endpoints for posts and comments
//! - Threaded comments materialized as a parent/child tree
//! - A WebSocket stream of newly created comments per post
//! - PostgreSQL for persistent storage
//! - Redis for cache-aside reads with a bounded staleness window
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits, and the
//!   comment tree builder
//! - **Application Layer**: Post/comment services and the subscription hub
//! - **Infrastructure Layer**: Database, cache, and repository implementations
//! - **Presentation Layer**: HTTP handlers and the WebSocket comment stream
//!
//! ## Module Structure
//!
//! ```text
//! comments_server/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, repository traits, tree builder
//! +-- application/    Application services, DTOs, subscription hub
//! +-- infrastructure/ Database and cache implementations
//! +-- presentation/   HTTP routes and WebSocket handler
//! +-- shared/         Common utilities (errors, validation glue)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
