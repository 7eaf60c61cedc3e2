//! Domain services for logic that spans entities.

pub mod comment_tree;
