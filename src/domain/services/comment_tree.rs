//! Comment tree builder.
//!
//! Reconstructs a flat, creation-ordered list of one post's comments into a
//! forest of root comments with their children recursively attached. Pure
//! and deterministic: no I/O, input order among siblings is preserved.
//!
//! Policy for data-integrity anomalies: a comment whose declared parent does
//! not appear in the input set (dangling or foreign parent) fails open and
//! surfaces as a root, rather than being silently discarded.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::Comment;

/// Build the comment forest for one post.
///
/// Single pass grouping by parent id, then attachment driven by an explicit
/// work list — comment thread depth is untrusted input and must not be able
/// to exhaust the stack. O(n) in the number of comments.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<Comment> {
    if comments.is_empty() {
        return Vec::new();
    }

    let known: HashSet<&str> = comments.iter().map(|c| c.id.as_str()).collect();

    // Group children indices under their parent id, preserving input order.
    // Comments with no parent, or a parent outside the input set, are roots.
    let mut children_of: HashMap<String, Vec<usize>> = HashMap::new();
    let mut root_indices: Vec<usize> = Vec::new();
    for (idx, comment) in comments.iter().enumerate() {
        match comment.parent_id.as_deref().filter(|p| known.contains(p)) {
            Some(parent_id) => children_of
                .entry(parent_id.to_string())
                .or_default()
                .push(idx),
            None => root_indices.push(idx),
        }
    }

    let ids: Vec<String> = comments.iter().map(|c| c.id.clone()).collect();
    let mut slots: Vec<Option<Comment>> = comments.into_iter().map(Some).collect();

    // Depth-first attachment. A node is collected only after all of its
    // children have been collected, so subtrees are moved exactly once.
    enum Step {
        Descend(usize),
        Collect(usize),
    }

    let mut work: Vec<Step> = root_indices.iter().rev().map(|&i| Step::Descend(i)).collect();
    while let Some(step) = work.pop() {
        match step {
            Step::Descend(idx) => {
                work.push(Step::Collect(idx));
                if let Some(child_indices) = children_of.get(&ids[idx]) {
                    for &child in child_indices.iter().rev() {
                        work.push(Step::Descend(child));
                    }
                }
            }
            Step::Collect(idx) => {
                if let Some(child_indices) = children_of.get(&ids[idx]) {
                    let attached: Vec<Comment> = child_indices
                        .iter()
                        .filter_map(|&child| slots[child].take())
                        .collect();
                    if let Some(node) = slots[idx].as_mut() {
                        node.children = attached;
                    }
                }
            }
        }
    }

    root_indices
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
