//! Adding nodes to the highlight set.

use crate::tree::{DiffTree, NodeClass, is_excluded_container, is_root_container};
use crate::{debug, trace};

/// Mark `node` as different, if it is eligible.
///
/// Only leaf elements are eligible: an element with no element children that
/// is neither a document container (`html`, `head`, `body`) nor a `script` or
/// `style` element. Text children don't make an element a container.
///
/// Returns true when the node was newly marked; absent nodes, ineligible
/// nodes and nodes already marked are left alone.
pub fn highlight<T: DiffTree>(tree: &mut T, node: Option<T::Handle>) -> bool {
    let Some(node) = node else {
        return false;
    };
    if tree.class(node) != NodeClass::Element || tree.is_marked(node) {
        return false;
    }

    let eligible = match tree.tag_name(node) {
        Some(tag) => !is_root_container(tag) && !is_excluded_container(tag),
        None => false,
    };
    if !eligible || tree.element_child_count(node) > 0 {
        trace!(?node, "not a markable leaf");
        return false;
    }

    debug!(?node, tag = ?tree.tag_name(node), "marking");
    tree.set_marked(node, true);
    true
}

/// Remove every mark below `root` (inclusive).
///
/// Wrapper spans created by earlier text splits stay in the tree; they just
/// stop being part of the highlight set.
pub fn clear_marks<T: DiffTree>(tree: &mut T, root: T::Handle) {
    for node in marked_nodes(tree, root) {
        tree.set_marked(node, false);
    }
}

/// The highlight set below `root` (inclusive), in document order.
pub fn marked_nodes<T: DiffTree>(tree: &T, root: T::Handle) -> Vec<T::Handle> {
    let mut marked = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if tree.is_marked(node) {
            marked.push(node);
        }
        let children = tree.children(node);
        stack.extend(children.into_iter().rev());
    }
    marked
}

/// Size of the highlight set below `root`.
pub fn count_marks<T: DiffTree>(tree: &T, root: T::Handle) -> usize {
    marked_nodes(tree, root).len()
}
