//! The tree walker: positional comparison of two parallel trees.
//!
//! Children are paired strictly by index. An insertion near the start of a
//! child list therefore shifts every later sibling and marks the rest of that
//! level; there is no alignment step.

use crate::attrs::attributes_equal;
use crate::dom::Document;
use crate::highlight::{clear_marks, highlight};
use crate::text::{TextSplit, apply_split, split_text};
use crate::tree::{DiffTree, NodeClass, is_excluded_container};
use crate::{debug, trace};

/// Verdict for one node pair, consumed right away by [`compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to mark at this level; children are still compared
    Equivalent,
    /// Same tag, different non-cosmetic attributes; children are still compared
    AttributesDiffer,
    /// Text nodes whose trimmed values differ
    TextDiffers(TextSplit),
    /// Different node kinds or different tags; the branch stops here
    StructurallyDifferent,
}

/// Whitespace as the DOM's `String.prototype.trim` sees it: the Unicode
/// `White_Space` set minus U+0085, plus U+FEFF.
fn is_blank(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{0085}' && c.is_whitespace())
}

fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_blank)
}

/// Judge a single pair, without looking at children or touching the trees.
///
/// # Panics
///
/// If a text node has no value.
pub fn classify<A: DiffTree, B: DiffTree>(
    a_tree: &A,
    a: A::Handle,
    b_tree: &B,
    b: B::Handle,
) -> Outcome {
    let class = a_tree.class(a);
    if class != b_tree.class(b) {
        return Outcome::StructurallyDifferent;
    }

    match class {
        NodeClass::Element => {
            if a_tree.tag_name(a) != b_tree.tag_name(b) {
                Outcome::StructurallyDifferent
            } else if attributes_equal(a_tree, a, b_tree, b) {
                Outcome::Equivalent
            } else {
                Outcome::AttributesDiffer
            }
        }
        NodeClass::Text => {
            let text_a = a_tree.text(a).expect("text node without a value");
            let text_b = b_tree.text(b).expect("text node without a value");
            let (trimmed_a, trimmed_b) = (trim_blank(text_a), trim_blank(text_b));
            if trimmed_a != trimmed_b && (!trimmed_a.is_empty() || !trimmed_b.is_empty()) {
                Outcome::TextDiffers(split_text(text_a, text_b))
            } else {
                Outcome::Equivalent
            }
        }
        NodeClass::Document | NodeClass::Fragment | NodeClass::Other => Outcome::Equivalent,
    }
}

/// Compare two parallel subtrees, marking differing leaves and splitting
/// differing text in place.
///
/// Either side may be absent: the present side is then marked (when it is a
/// markable leaf) and the branch ends. Nodes whose parent is a `script` or
/// `style` element are skipped along with everything below them.
///
/// Marks from earlier passes are not cleared here; see [`clear_marks`].
pub fn compare<A: DiffTree, B: DiffTree>(
    a_tree: &mut A,
    a: Option<A::Handle>,
    b_tree: &mut B,
    b: Option<B::Handle>,
) {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (a, b) => {
            trace!(?a, ?b, "one side absent");
            highlight(a_tree, a);
            highlight(b_tree, b);
            return;
        }
    };

    if inside_excluded_container(a_tree, a) || inside_excluded_container(b_tree, b) {
        trace!(?a, ?b, "inside script/style, skipping");
        return;
    }

    match classify(a_tree, a, b_tree, b) {
        Outcome::StructurallyDifferent => {
            trace!(?a, ?b, "structurally different");
            highlight(a_tree, Some(a));
            highlight(b_tree, Some(b));
            return;
        }
        Outcome::TextDiffers(split) => {
            apply_split(a_tree, a, b_tree, b, &split);
            return;
        }
        Outcome::AttributesDiffer => {
            trace!(?a, ?b, "attributes differ");
            highlight(a_tree, Some(a));
            highlight(b_tree, Some(b));
        }
        Outcome::Equivalent => {}
    }

    if !a_tree.class(a).has_comparable_children() {
        return;
    }

    let children_a = a_tree.children(a);
    let children_b = b_tree.children(b);
    for k in 0..children_a.len().max(children_b.len()) {
        compare(
            a_tree,
            children_a.get(k).copied(),
            b_tree,
            children_b.get(k).copied(),
        );
    }
}

fn inside_excluded_container<T: DiffTree>(tree: &T, node: T::Handle) -> bool {
    tree.parent_tag_name(node).is_some_and(is_excluded_container)
}

/// Clear both documents and compare their `<body>` elements.
///
/// A document without a body is compared from its document node instead.
pub fn compare_documents(a: &mut Document, b: &mut Document) {
    let (root_a, root_b) = (a.root, b.root);
    clear_marks(a, root_a);
    clear_marks(b, root_b);

    let start_a = a.body().unwrap_or(root_a);
    let start_b = b.body().unwrap_or(root_b);
    debug!(?start_a, ?start_b, "comparing documents");
    compare(a, Some(start_a), b, Some(start_b));
}
