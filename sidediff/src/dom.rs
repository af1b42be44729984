//! Arena-based DOM that the comparison pass reads and annotates.
//!
//! - **indextree Arena**: all nodes of one document live in one arena, parent
//!   and sibling links included
//! - **StrTendril text**: text and attribute values share the parsed source buffer
//! - **Marks on elements**: the highlight set is the `marked` flag of [`ElementData`]

use indexmap::IndexMap;
use indextree::{Arena, NodeId};
use tendril::StrTendril;

use crate::debug;
use crate::tree::{DiffTree, NodeClass, TextPiece};

/// Tag of the wrapper created around a differing text span.
pub const SPAN_TAG: &str = "span";

/// One parsed (or hand-built) document.
#[derive(Debug, Clone)]
pub struct Document {
    /// THE tree - all nodes live here
    pub arena: Arena<NodeData>,

    /// Document node (parent of `<html>`)
    pub root: NodeId,

    /// DOCTYPE if present (usually "html")
    pub doctype: Option<StrTendril>,
}

/// What goes in each arena slot
#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: NodeKind,
    pub ns: Namespace,
}

/// Node types
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Document root (invisible, parent of `<html>`)
    Document,
    /// Detached container for hand-built subtrees
    Fragment,
    /// Element with tag and attributes
    Element(ElementData),
    /// Text content (StrTendril is refcounted - cheap to clone)
    Text(StrTendril),
    /// Comments and processing instructions; never compared
    Comment(StrTendril),
}

/// Element data (tag + attributes + diff mark)
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name as produced by the parser (lowercase for HTML)
    pub tag: StrTendril,

    /// Attributes in declaration order, first occurrence wins
    pub attrs: IndexMap<String, StrTendril>,

    /// Member of the highlight set
    pub marked: bool,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: StrTendril::from(tag),
            attrs: IndexMap::new(),
            marked: false,
        }
    }
}

/// XML namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    pub fn from_url(url: &str) -> Self {
        match url {
            "http://www.w3.org/2000/svg" => Namespace::Svg,
            "http://www.w3.org/1998/Math/MathML" => Namespace::MathMl,
            _ => Namespace::Html,
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::Svg => "http://www.w3.org/2000/svg",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document: a lone Document node.
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData {
            kind: NodeKind::Document,
            ns: Namespace::Html,
        });
        Document {
            arena,
            root,
            doctype: None,
        }
    }

    /// Get immutable reference to node data
    pub fn get(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }

    /// Get mutable reference to node data
    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.arena[id].get_mut()
    }

    /// Element data of `id`, if it is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.get(id).kind {
            NodeKind::Element(elem) => Some(elem),
            _ => None,
        }
    }

    /// Iterate children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// The `<html>` element if present
    pub fn html(&self) -> Option<NodeId> {
        self.child_element(self.root, "html")
    }

    /// Get the `<head>` element if present
    pub fn head(&self) -> Option<NodeId> {
        self.child_element(self.html()?, "head")
    }

    /// Get the `<body>` element if present
    pub fn body(&self) -> Option<NodeId> {
        self.child_element(self.html()?, "body")
    }

    fn child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        parent
            .children(&self.arena)
            .find(|&id| self.element(id).is_some_and(|e| e.tag.as_ref() == tag))
    }

    /// All elements named `tag` below `from` (inclusive), in document order.
    pub fn elements_by_tag(&self, from: NodeId, tag: &str) -> Vec<NodeId> {
        from.descendants(&self.arena)
            .filter(|&id| self.element(id).is_some_and(|e| e.tag.as_ref() == tag))
            .collect()
    }

    /// Concatenated text of `id` and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in id.descendants(&self.arena) {
            if let NodeKind::Text(t) = &self.get(node).kind {
                out.push_str(t);
            }
        }
        out
    }

    /// New detached fragment node, for building subtrees by hand.
    pub fn new_fragment(&mut self) -> NodeId {
        self.arena.new_node(NodeData {
            kind: NodeKind::Fragment,
            ns: Namespace::Html,
        })
    }

    /// New detached element.
    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut data = ElementData::new(tag);
        for &(name, value) in attrs {
            data.attrs
                .entry(name.to_owned())
                .or_insert_with(|| StrTendril::from(value));
        }
        self.arena.new_node(NodeData {
            kind: NodeKind::Element(data),
            ns: Namespace::Html,
        })
    }

    /// New detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.arena.new_node(NodeData {
            kind: NodeKind::Text(StrTendril::from(text)),
            ns: Namespace::Html,
        })
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        parent.append(child, &mut self.arena);
    }

    /// Serialize to HTML string (doctype included, marks rendered with the
    /// default highlight class)
    pub fn to_html(&self) -> String {
        crate::serialize::serialize_document(self, &Default::default())
    }
}

impl DiffTree for Document {
    type Handle = NodeId;

    fn class(&self, node: NodeId) -> NodeClass {
        match &self.get(node).kind {
            NodeKind::Document => NodeClass::Document,
            NodeKind::Fragment => NodeClass::Fragment,
            NodeKind::Element(_) => NodeClass::Element,
            NodeKind::Text(_) => NodeClass::Text,
            NodeKind::Comment(_) => NodeClass::Other,
        }
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_ref())
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.get(node).kind {
            NodeKind::Text(t) => Some(t.as_ref()),
            _ => None,
        }
    }

    fn attributes(&self, node: NodeId) -> Option<Vec<(&str, &str)>> {
        self.element(node).map(|e| {
            e.attrs
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_ref()))
                .collect()
        })
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena[node].parent()
    }

    fn is_marked(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.marked)
    }

    fn set_marked(&mut self, node: NodeId, marked: bool) {
        if let NodeKind::Element(elem) = &mut self.get_mut(node).kind {
            elem.marked = marked;
        }
    }

    fn replace_text(&mut self, node: NodeId, pieces: &[TextPiece<'_>]) {
        if self.arena[node].parent().is_none() {
            debug!(?node, "text node has no parent, leaving it in place");
            return;
        }

        for piece in pieces {
            let replacement = match *piece {
                TextPiece::Plain(text) => self.create_text(text),
                TextPiece::Highlighted(text) => {
                    let span = self.create_element(SPAN_TAG, &[]);
                    self.set_marked(span, true);
                    let inner = self.create_text(text);
                    span.append(inner, &mut self.arena);
                    span
                }
            };
            node.insert_before(replacement, &mut self.arena);
        }
        node.remove(&mut self.arena);
    }
}
