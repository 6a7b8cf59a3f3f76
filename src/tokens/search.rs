//! Depth-first walker over a [`DocumentNode`] tree.

use std::ops::ControlFlow;

use crate::document::DocumentNode;

/// Walk `node` in pre-order, calling `visit` on every mapping before its children.
///
/// `parent_key` is the property name the node was reached under; sequence
/// elements are reached under their decimal index. The root has no key.
/// Returning `ControlFlow::Break` from the visitor stops the whole walk.
pub fn search<'a, F>(node: &'a DocumentNode, parent_key: Option<&str>, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&'a DocumentNode, Option<&str>) -> ControlFlow<()>,
{
    match node {
        DocumentNode::Mapping(map) => {
            visit(node, parent_key)?;
            for (key, child) in map {
                search(child, Some(key), visit)?;
            }
        }
        DocumentNode::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                let key = index.to_string();
                search(child, Some(&key), visit)?;
            }
        }
        DocumentNode::Scalar(_) => {}
    }
    ControlFlow::Continue(())
}

/// Walk the whole tree, visiting every mapping.
pub fn visit_all<'a, F>(node: &'a DocumentNode, mut visit: F)
where
    F: FnMut(&'a DocumentNode, Option<&str>),
{
    let _ = search(node, None, &mut |n, key| {
        visit(n, key);
        ControlFlow::Continue(())
    });
}

/// First mapping, in traversal order, accepted by `predicate`.
pub fn find_first<'a, P>(node: &'a DocumentNode, mut predicate: P) -> Option<&'a DocumentNode>
where
    P: FnMut(&'a DocumentNode) -> bool,
{
    let mut found = None;
    let _ = search(node, None, &mut |n, _| {
        if predicate(n) {
            found = Some(n);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}
