//! Path Resolver
//!
//! A missing segment is a normal outcome and yields `None`.

use super::TreeNode;

/// Node named by `path`, starting from the top-level `roots`
///
/// The empty path names the root list rather than a node and resolves to
/// `None`; use [`resolve_children`] for list-level lookups.
pub fn resolve<'a, N, I, S>(roots: &'a [N], path: I) -> Option<&'a N>
where
    N: TreeNode,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = roots;
    let mut found = None;
    for id in path {
        let node = candidates.iter().find(|n| n.node_id() == id.as_ref())?;
        candidates = node.children();
        found = Some(node);
    }
    found
}

/// Children list named by `path`; the empty path yields `roots`
pub fn resolve_children<'a, N, I, S>(roots: &'a [N], path: I) -> Option<&'a [N]>
where
    N: TreeNode,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates = roots;
    for id in path {
        candidates = candidates.iter().find(|n| n.node_id() == id.as_ref())?.children();
    }
    Some(candidates)
}
