//! Domain entities and their repository traits.

mod comment;
mod post;

pub use comment::{Comment, CommentStore};
pub use post::{Post, PostStore};

#[cfg(test)]
pub use comment::MockCommentStore;
#[cfg(test)]
pub use post::MockPostStore;
