//! Task Tree
//!
//! Generic recursive-tree algorithms shared by every node type:
//! - resolve: walk a path of ids down to a node
//! - mutate: insert / edit / remove producing a new tree
//! - walk: depth-first traversal and id auditing
//!
//! Algorithms only see the structural part of a node (its id and children)
//! through `TreeNode`; field-level edits are passed in as closures.

mod mutate;
mod resolve;
mod walk;

use crate::domain::Task;

pub use mutate::{edit_node, insert_child, patch_task, remove_node, toggle_completion};
pub use resolve::{resolve, resolve_children};
pub use walk::{audit_unique_ids, collect_ids, collect_matching, contains_id, find_first_by_id, walk_depth_first};

/// Structural view of a tree node
pub trait TreeNode: Clone {
    fn node_id(&self) -> &str;

    fn children(&self) -> &[Self];

    fn children_mut(&mut self) -> &mut Vec<Self>;
}

impl TreeNode for Task {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Self> {
        &mut self.children
    }
}

/// Children list at the end of `ids`, root list when `ids` is empty
pub(crate) fn children_mut_at<'a, N: TreeNode>(roots: &'a mut Vec<N>, ids: &[&str]) -> Option<&'a mut Vec<N>> {
    let mut current = roots;
    for id in ids {
        let node = current.iter_mut().find(|n| n.node_id() == *id)?;
        current = node.children_mut();
    }
    Some(current)
}

/// Node at the end of `ids`; `None` for an empty path
pub(crate) fn node_mut_at<'a, N: TreeNode>(roots: &'a mut Vec<N>, ids: &[&str]) -> Option<&'a mut N> {
    let (last, parents) = ids.split_last()?;
    children_mut_at(roots, parents)?
        .iter_mut()
        .find(|n| n.node_id() == *last)
}
