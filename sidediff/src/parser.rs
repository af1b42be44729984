//! HTML5 parsing into the arena [`Document`] via html5ever's `TreeSink`.
//!
//! Tree construction (implied `html`/`head`/`body`, auto-closing, foster
//! parenting) is html5ever's, so both sides of a comparison get the tree a
//! browser would build.

use html5ever::tree_builder::{ElemName, ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute, LocalName, QualName, parse_document};
use indextree::{Arena, NodeId};
use std::borrow::Cow;
use std::cell::RefCell;
use tendril::{StrTendril, TendrilSink};

use crate::dom::{Document, ElementData, Namespace, NodeData, NodeKind};
use crate::trace;

/// Parse an HTML document (or fragment of body content) into a [`Document`].
///
/// Never fails: html5ever recovers from malformed markup the way browsers do.
pub fn parse(html: &str) -> Document {
    let sink = ArenaSink::new();
    parse_document(sink, Default::default()).one(StrTendril::from(html))
}

/// Attribute name as written in the source.
///
/// Foreign content (SVG, MathML) gets `xlink:href`, `xml:lang` and friends
/// split into prefix and local name; the prefix is put back so they stay
/// distinct from the unprefixed attribute.
fn attr_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}

/// Owned element name handed back to the tree builder
#[derive(Debug, Clone)]
struct OwnedElemName(QualName);

impl ElemName for OwnedElemName {
    fn ns(&self) -> &html5ever::Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// TreeSink implementation for building arena-based DOM
struct ArenaSink {
    arena: RefCell<Arena<NodeData>>,

    /// Document node (parent of `<html>`)
    document: NodeId,

    doctype: RefCell<Option<StrTendril>>,
}

impl ArenaSink {
    fn new() -> Self {
        let mut arena = Arena::new();
        let document = arena.new_node(NodeData {
            kind: NodeKind::Document,
            ns: Namespace::Html,
        });

        ArenaSink {
            arena: RefCell::new(arena),
            document,
            doctype: RefCell::new(None),
        }
    }

    fn new_node(&self, kind: NodeKind) -> NodeId {
        self.arena.borrow_mut().new_node(NodeData {
            kind,
            ns: Namespace::Html,
        })
    }

    /// Append text to `existing` when it is a text node; returns false otherwise.
    fn merge_text(
        arena: &mut Arena<NodeData>,
        existing: Option<NodeId>,
        text: &StrTendril,
    ) -> bool {
        if let Some(id) = existing
            && let NodeKind::Text(t) = &mut arena[id].get_mut().kind
        {
            t.push_tendril(text);
            return true;
        }
        false
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeId;
    type Output = Document;
    type ElemName<'a>
        = OwnedElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        Document {
            arena: self.arena.into_inner(),
            root: self.document,
            doctype: self.doctype.into_inner(),
        }
    }

    fn parse_error(&self, _msg: Cow<'static, str>) {
        trace!(msg = %_msg, "recovered parse error");
    }

    fn get_document(&self) -> Self::Handle {
        self.document
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn same_node(&self, a: &Self::Handle, b: &Self::Handle) -> bool {
        a == b
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> OwnedElemName {
        let arena = self.arena.borrow();
        let node = arena[*target].get();

        let (local, ns) = match &node.kind {
            NodeKind::Element(elem) => (LocalName::from(&*elem.tag), node.ns),
            _ => (LocalName::from(""), Namespace::Html),
        };

        OwnedElemName(QualName {
            prefix: None,
            ns: html5ever::Namespace::from(ns.url()),
            local,
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let mut elem = ElementData::new(name.local.as_ref());
        for attr in attrs {
            elem.attrs
                .entry(attr_name(&attr.name))
                .or_insert(attr.value);
        }

        self.arena.borrow_mut().new_node(NodeData {
            kind: NodeKind::Element(elem),
            ns: Namespace::from_url(name.ns.as_ref()),
        })
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.new_node(NodeKind::Comment(text))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        self.new_node(NodeKind::Comment(data))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                parent.append(node, &mut arena);
            }
            NodeOrText::AppendText(text) => {
                let last_child = parent.children(&arena).next_back();
                if Self::merge_text(&mut arena, last_child, &text) {
                    return;
                }
                let text_node = arena.new_node(NodeData {
                    kind: NodeKind::Text(text),
                    ns: Namespace::Html,
                });
                parent.append(text_node, &mut arena);
            }
        }
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => {
                sibling.insert_before(node, &mut arena);
            }
            NodeOrText::AppendText(text) => {
                let previous = arena[*sibling].previous_sibling();
                if Self::merge_text(&mut arena, previous, &text) {
                    return;
                }
                let text_node = arena.new_node(NodeData {
                    kind: NodeKind::Text(text),
                    ns: Namespace::Html,
                });
                sibling.insert_before(text_node, &mut arena);
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.arena.borrow()[*element].parent().is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        *self.doctype.borrow_mut() = Some(name);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // template contents stay inline, under the template element
        *target
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>) {
        let mut arena = self.arena.borrow_mut();
        if let NodeKind::Element(elem) = &mut arena[*target].get_mut().kind {
            for attr in attrs {
                elem.attrs
                    .entry(attr_name(&attr.name))
                    .or_insert(attr.value);
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        target.detach(&mut self.arena.borrow_mut());
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut arena = self.arena.borrow_mut();
        let children: Vec<NodeId> = node.children(&arena).collect();
        for child in children {
            child.detach(&mut arena);
            new_parent.append(child, &mut arena);
        }
    }
}
