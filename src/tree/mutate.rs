//! Tree Mutator
//!
//! Every operation takes the current tree by reference and returns an edited
//! copy. Only the spine from the root to the edited node changes; sibling
//! subtrees are carried over unchanged.
//!
//! Paths that do not resolve fail with `NodeNotFound` instead of creating
//! structure. Ids stay unique: inserts refuse an id already in the tree and
//! edits may not rename a node.

use crate::domain::{DomainError, DomainResult, Task, TaskPatch, TaskPath};
use super::resolve::{resolve, resolve_children};
use super::walk::{collect_ids, collect_matching, contains_id};
use super::{children_mut_at, node_mut_at, TreeNode};

/// Append `node` to the children of `parent_path` (the root list when empty)
pub fn insert_child<N: TreeNode>(roots: &[N], parent_path: &TaskPath, node: N) -> DomainResult<Vec<N>> {
    let incoming = collect_ids(std::slice::from_ref(&node));
    for (i, id) in incoming.iter().enumerate() {
        if contains_id(roots, id) || incoming[..i].contains(id) {
            return Err(DomainError::Conflict(format!("Task id {} already exists", id)));
        }
    }

    let ids: Vec<&str> = parent_path.ids().collect();
    let mut next = roots.to_vec();
    let siblings = children_mut_at(&mut next, &ids)
        .ok_or_else(|| DomainError::NodeNotFound(parent_path.to_string()))?;
    siblings.push(node);
    Ok(next)
}

/// Apply `edit` to the node at `path`
///
/// Exact-path lookup: the last segment names the node and every earlier
/// segment must be its ancestor.
pub fn edit_node<N, F>(roots: &[N], path: &TaskPath, edit: F) -> DomainResult<Vec<N>>
where
    N: TreeNode,
    F: FnOnce(&mut N),
{
    if path.is_root() {
        return Err(DomainError::NodeNotFound(
            "empty path names the root list, not a node".to_string(),
        ));
    }

    let ids: Vec<&str> = path.ids().collect();
    let mut next = roots.to_vec();
    let node = node_mut_at(&mut next, &ids).ok_or_else(|| DomainError::NodeNotFound(path.to_string()))?;

    let original_id = node.node_id().to_string();
    edit(node);
    if node.node_id() != original_id {
        return Err(DomainError::InvalidInput(format!(
            "Edit renamed node {} to {}",
            original_id,
            node.node_id()
        )));
    }
    Ok(next)
}

/// Remove `id` (and its subtree) from within the subtree at `parent_path`
///
/// Nodes outside that subtree are never touched, even if they share the id.
/// An absent id leaves the tree unchanged. More than one match inside the
/// scope is a data-integrity error.
pub fn remove_node<N: TreeNode>(roots: &[N], parent_path: &TaskPath, id: &str) -> DomainResult<Vec<N>> {
    let ids: Vec<&str> = parent_path.ids().collect();
    let scope = resolve_children(roots, &ids).ok_or_else(|| DomainError::NodeNotFound(parent_path.to_string()))?;

    match collect_matching(scope, |n| n.node_id() == id).len() {
        0 => return Ok(roots.to_vec()),
        1 => {}
        n => {
            return Err(DomainError::Conflict(format!(
                "Task id {} occurs {} times under {}",
                id, n, parent_path
            )))
        }
    }

    fn prune<N: TreeNode>(nodes: &mut Vec<N>, id: &str) {
        nodes.retain(|n| n.node_id() != id);
        for node in nodes.iter_mut() {
            prune(node.children_mut(), id);
        }
    }

    let mut next = roots.to_vec();
    let scope = children_mut_at(&mut next, &ids).ok_or_else(|| DomainError::NodeNotFound(parent_path.to_string()))?;
    prune(scope, id);
    Ok(next)
}

/// Shallow-merge `patch` into the task at `path`
pub fn patch_task(roots: &[Task], path: &TaskPath, patch: &TaskPatch) -> DomainResult<Vec<Task>> {
    edit_node(roots, path, |task| task.apply(patch))
}

/// Flip the completion flag of the task at `path`
pub fn toggle_completion(roots: &[Task], path: &TaskPath) -> DomainResult<Vec<Task>> {
    let current = resolve(roots, path.ids()).ok_or_else(|| DomainError::NodeNotFound(path.to_string()))?;
    patch_task(roots, path, &TaskPatch::completed(!current.completed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTask;
    use crate::tree::fixtures::{colliding_tree, deep_tree, scenario_tree};

    fn path(ids: &[&str]) -> TaskPath {
        TaskPath::from_ids(ids.iter().copied())
    }

    #[test]
    fn test_insert_at_root() {
        let tree = deep_tree();
        let next = insert_child(&tree, &TaskPath::root(), Task::with_id("x", "X")).unwrap();
        assert_eq!(next.len(), 3);
        assert_eq!(next[2].id, "x");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_insert_under_nested_parent() {
        let tree = scenario_tree();
        let node = NewTask::named("X").into_task();
        let new_id = node.id.clone();

        let next = insert_child(&tree, &path(&["a", "b"]), node).unwrap();

        let b = &next[0].children[0];
        assert_eq!(b.id, "b");
        assert_eq!(b.children.len(), 1);
        assert_eq!(b.children[0].name, "X");
        assert_eq!(next[0].name, tree[0].name);
        assert_eq!(next[0].children.len(), 1);

        let found = resolve(&next, ["a", "b", new_id.as_str()]).unwrap();
        assert_eq!(found.name, "X");
    }

    #[test]
    fn test_insert_leaves_siblings_untouched() {
        let tree = deep_tree();
        let next = insert_child(&tree, &path(&["a", "b"]), Task::with_id("x", "X")).unwrap();
        assert_eq!(next[1], tree[1]);
    }

    #[test]
    fn test_insert_under_missing_parent_fails() {
        let tree = deep_tree();
        let err = insert_child(&tree, &path(&["a", "z"]), Task::with_id("x", "X")).unwrap_err();
        assert!(matches!(err, DomainError::NodeNotFound(_)));
    }

    #[test]
    fn test_insert_rejects_existing_id() {
        let tree = deep_tree();
        let err = insert_child(&tree, &path(&["d"]), Task::with_id("c", "Again")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_insert_rejects_collisions_inside_new_subtree() {
        let tree = deep_tree();
        let node = Task::with_id("x", "X").with_children(vec![Task::with_id("x", "Inner")]);
        assert!(matches!(
            insert_child(&tree, &TaskPath::root(), node),
            Err(DomainError::Conflict(_))
        ));
    }

    #[test]
    fn test_patch_completed_only() {
        let tree = deep_tree();
        let next = patch_task(&tree, &path(&["a", "b"]), &TaskPatch::completed(true)).unwrap();

        let before = &tree[0].children[0];
        let after = &next[0].children[0];
        assert!(after.completed);
        assert_eq!(after.name, before.name);
        assert_eq!(after.description, before.description);
        assert_eq!(after.children, before.children);
    }

    #[test]
    fn test_patch_requires_exact_path() {
        let tree = deep_tree();
        // `c` exists, but not directly under `a`
        let err = patch_task(&tree, &path(&["a", "c"]), &TaskPatch::completed(true)).unwrap_err();
        assert!(matches!(err, DomainError::NodeNotFound(_)));
    }

    #[test]
    fn test_patch_empty_path_fails() {
        let tree = deep_tree();
        assert!(patch_task(&tree, &TaskPath::root(), &TaskPatch::completed(true)).is_err());
    }

    #[test]
    fn test_edit_cannot_rename() {
        let tree = deep_tree();
        let err = edit_node(&tree, &path(&["d"]), |t: &mut Task| t.id = "c".to_string()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn test_remove_scenario() {
        let tree = scenario_tree();
        let next = remove_node(&tree, &path(&["a"]), "b").unwrap();
        assert!(next[0].children.is_empty());
        assert_eq!(next[0].name, "A");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let tree = scenario_tree();
        let next = remove_node(&tree, &path(&["a"]), "z").unwrap();
        assert_eq!(
            serde_json::to_string(&next).unwrap(),
            serde_json::to_string(&tree).unwrap()
        );
    }

    #[test]
    fn test_remove_deletes_subtree() {
        let tree = deep_tree();
        let next = remove_node(&tree, &TaskPath::root(), "a").unwrap();
        assert_eq!(collect_ids(&next), vec!["d", "e"]);
    }

    #[test]
    fn test_remove_is_scoped_to_branch() {
        let tree = colliding_tree();
        let next = remove_node(&tree, &path(&["a"]), "dup").unwrap();

        assert!(next[0].children.is_empty());
        assert_eq!(next[1].children.len(), 1);
        assert_eq!(next[1].children[0].name, "Right");
    }

    #[test]
    fn test_remove_collision_within_scope_fails() {
        let tree = colliding_tree();
        let err = remove_node(&tree, &TaskPath::root(), "dup").unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn test_remove_under_missing_parent_fails() {
        let tree = deep_tree();
        assert!(matches!(
            remove_node(&tree, &path(&["z"]), "b"),
            Err(DomainError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_toggle_twice_restores() {
        let tree = deep_tree();
        let once = toggle_completion(&tree, &path(&["d", "e"])).unwrap();
        assert!(once[1].children[0].completed);
        let twice = toggle_completion(&once, &path(&["d", "e"])).unwrap();
        assert_eq!(twice, tree);
    }

    #[test]
    fn test_toggle_missing_node_fails() {
        let tree = deep_tree();
        assert!(toggle_completion(&tree, &path(&["d", "x"])).is_err());
    }
}
