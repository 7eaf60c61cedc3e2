//! WebSocket Subscriptions

pub mod handler;

pub use handler::ws_comments_handler;
