//! Presentation Layer
//!
//! HTTP routes and WebSocket subscription handlers.

pub mod http;
pub mod websocket;
