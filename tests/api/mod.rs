//! REST API endpoint tests

mod comment_tests;
mod health_tests;
mod post_tests;
mod subscription_tests;
