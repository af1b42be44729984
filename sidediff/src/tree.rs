//! The tree capabilities the comparison pass needs.
//!
//! Any document model that can answer these questions and perform the two
//! mutations (setting a mark, splitting a text node) can be compared. The
//! arena [`Document`](crate::Document) is the implementation shipped here.

use std::fmt;

/// Kind of a node, as far as the comparison is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Element,
    Text,
    Document,
    Fragment,
    /// Comments, processing instructions, doctypes
    Other,
}

impl NodeClass {
    /// Node kinds whose children are compared position by position.
    pub fn has_comparable_children(self) -> bool {
        matches!(
            self,
            NodeClass::Element | NodeClass::Document | NodeClass::Fragment
        )
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeClass::Element => write!(f, "element"),
            NodeClass::Text => write!(f, "#text"),
            NodeClass::Document => write!(f, "#document"),
            NodeClass::Fragment => write!(f, "#fragment"),
            NodeClass::Other => write!(f, "#other"),
        }
    }
}

/// One replacement node produced when a text node is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPiece<'a> {
    /// Plain text node
    Plain(&'a str),
    /// Marked wrapper element holding the text
    Highlighted(&'a str),
}

/// A document tree the walker can read and annotate.
///
/// Handles are cheap copyable references into the tree; the tree owns the
/// nodes. `parent` is a lookup, never ownership.
pub trait DiffTree {
    type Handle: Copy + Eq + fmt::Debug;

    fn class(&self, node: Self::Handle) -> NodeClass;

    /// Tag name for elements, `None` otherwise.
    fn tag_name(&self, node: Self::Handle) -> Option<&str>;

    /// Value of a text node, `None` otherwise.
    fn text(&self, node: Self::Handle) -> Option<&str>;

    /// Attributes in declaration order; `None` when the node has no attribute
    /// collection at all (every non-element).
    fn attributes(&self, node: Self::Handle) -> Option<Vec<(&str, &str)>>;

    /// Snapshot of the child list.
    fn children(&self, node: Self::Handle) -> Vec<Self::Handle>;

    fn parent(&self, node: Self::Handle) -> Option<Self::Handle>;

    fn is_marked(&self, node: Self::Handle) -> bool;

    /// Add or remove `node` from the highlight set. No-op for non-elements.
    fn set_marked(&mut self, node: Self::Handle, marked: bool);

    /// Replace `node` in its parent's child list by `pieces`, in order.
    fn replace_text(&mut self, node: Self::Handle, pieces: &[TextPiece<'_>]);

    /// Number of element children (text and comments don't count).
    fn element_child_count(&self, node: Self::Handle) -> usize {
        self.children(node)
            .into_iter()
            .filter(|&child| self.class(child) == NodeClass::Element)
            .count()
    }

    /// Tag of the parent, when the parent is an element.
    fn parent_tag_name(&self, node: Self::Handle) -> Option<&str> {
        let parent = self.parent(node)?;
        self.tag_name(parent)
    }
}

/// `script` and `style` contents are never compared nor marked.
pub(crate) fn is_excluded_container(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("script") || tag.eq_ignore_ascii_case("style")
}

/// Document-level containers that never receive a mark.
pub(crate) fn is_root_container(tag: &str) -> bool {
    ["html", "head", "body"]
        .iter()
        .any(|root| tag.eq_ignore_ascii_case(root))
}
