//! Traversal Helpers
//!
//! Depth-first, parent-before-children walks over a node list.

use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::domain::{DomainError, DomainResult};
use super::TreeNode;

/// Visit every node pre-order with its depth (roots are depth 0)
pub fn walk_depth_first<N, F>(roots: &[N], mut visit: F)
where
    N: TreeNode,
    F: FnMut(&N, usize),
{
    fn walk<N: TreeNode, F: FnMut(&N, usize)>(nodes: &[N], depth: usize, visit: &mut F) {
        for node in nodes {
            visit(node, depth);
            walk(node.children(), depth + 1, visit);
        }
    }
    walk(roots, 0, &mut visit);
}

/// Every node satisfying `predicate`, in pre-order
pub fn collect_matching<'a, N, P>(roots: &'a [N], predicate: P) -> Vec<&'a N>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    fn collect<'a, N: TreeNode, P: Fn(&N) -> bool>(nodes: &'a [N], predicate: &P, out: &mut Vec<&'a N>) {
        for node in nodes {
            if predicate(node) {
                out.push(node);
            }
            collect(node.children(), predicate, out);
        }
    }
    let mut out = Vec::new();
    collect(roots, &predicate, &mut out);
    out
}

pub fn collect_ids<N: TreeNode>(roots: &[N]) -> Vec<&str> {
    collect_matching(roots, |_| true)
        .into_iter()
        .map(|n| n.node_id())
        .collect()
}

pub fn contains_id<N: TreeNode>(roots: &[N], id: &str) -> bool {
    find_first_by_id(roots, id).is_some()
}

/// First node with `id` anywhere in the tree, ignoring parentage
///
/// Under id collisions this picks whichever copy comes first in pre-order,
/// so it is only fit for diagnostics. Edits go through paths.
pub fn find_first_by_id<'a, N: TreeNode>(roots: &'a [N], id: &str) -> Option<&'a N> {
    for node in roots {
        if node.node_id() == id {
            return Some(node);
        }
        if let Some(found) = find_first_by_id(node.children(), id) {
            return Some(found);
        }
    }
    None
}

/// `Conflict` naming every id that occurs more than once
pub fn audit_unique_ids<N: TreeNode>(roots: &[N]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for id in collect_ids(roots) {
        if !seen.insert(id) {
            duplicates.insert(id);
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        let ids: Vec<&str> = duplicates.into_iter().collect();
        Err(DomainError::Conflict(format!("Duplicate task ids: {}", ids.join(", "))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::{colliding_tree, deep_tree};

    #[test]
    fn test_walk_is_pre_order() {
        let tree = deep_tree();
        let mut visited = Vec::new();
        walk_depth_first(&tree, |node, depth| visited.push((node.id.clone(), depth)));

        let expected: Vec<(String, usize)> = [("a", 0), ("b", 1), ("c", 2), ("d", 0), ("e", 1)]
            .iter()
            .map(|(id, depth)| (id.to_string(), *depth))
            .collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_collect_ids() {
        assert_eq!(collect_ids(&deep_tree()), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_audit_passes_on_unique_tree() {
        assert!(audit_unique_ids(&deep_tree()).is_ok());
    }

    #[test]
    fn test_audit_reports_collisions() {
        let err = audit_unique_ids(&colliding_tree()).unwrap_err();
        assert_eq!(err, DomainError::Conflict("Duplicate task ids: dup".to_string()));
    }

    #[test]
    fn test_flat_scan_picks_first_branch() {
        // The whole-tree scan cannot tell the two `dup` nodes apart
        let tree = colliding_tree();
        assert_eq!(find_first_by_id(&tree, "dup").unwrap().name, "Left");
    }

    #[test]
    fn test_contains_id() {
        let tree = deep_tree();
        assert!(contains_id(&tree, "e"));
        assert!(!contains_id(&tree, "z"));
    }
}
