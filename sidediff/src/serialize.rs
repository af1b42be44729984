//! HTML output for compared documents.
//!
//! Marks become visible here: a marked element gets the highlight class added
//! to its `class` attribute, so the page's own styles and a single injected
//! rule are enough to paint the differences.

use indextree::NodeId;

use crate::dom::{Document, ElementData, NodeKind};

/// Default class put on marked elements.
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "diff-highlight";

/// How marks are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Class added to marked elements; `None` renders the tree without marks.
    pub highlight_class: Option<String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            highlight_class: Some(DEFAULT_HIGHLIGHT_CLASS.to_owned()),
        }
    }
}

impl SerializeOptions {
    /// Serialize without any highlight class.
    pub fn unmarked() -> Self {
        Self {
            highlight_class: None,
        }
    }
}

/// Whole document, doctype included.
pub fn serialize_document(doc: &Document, opts: &SerializeOptions) -> String {
    let mut out = String::new();
    if let Some(doctype) = &doc.doctype {
        out.push_str("<!DOCTYPE ");
        out.push_str(doctype);
        out.push('>');
    }
    Serializer { doc, opts, out: &mut out }.node(doc.root);
    out
}

/// `node` and its subtree (outer HTML).
pub fn serialize_node(doc: &Document, node: NodeId, opts: &SerializeOptions) -> String {
    let mut out = String::new();
    Serializer { doc, opts, out: &mut out }.node(node);
    out
}

/// Children of `node` only (inner HTML).
pub fn serialize_inner(doc: &Document, node: NodeId, opts: &SerializeOptions) -> String {
    let mut out = String::new();
    let mut ser = Serializer { doc, opts, out: &mut out };
    for child in doc.children(node) {
        ser.node(child);
    }
    out
}

struct Serializer<'a> {
    doc: &'a Document,
    opts: &'a SerializeOptions,
    out: &'a mut String,
}

impl Serializer<'_> {
    fn node(&mut self, node_id: NodeId) {
        let doc = self.doc;
        match &doc.get(node_id).kind {
            NodeKind::Document | NodeKind::Fragment => {
                for child in doc.children(node_id) {
                    self.node(child);
                }
            }
            NodeKind::Element(elem) => self.element(node_id, elem),
            NodeKind::Text(text) => {
                let raw = doc
                    .parent(node_id)
                    .and_then(|p| doc.element(p))
                    .is_some_and(|e| is_raw_text_element(&e.tag));
                if raw {
                    self.out.push_str(text);
                } else {
                    escape_text(self.out, text);
                }
            }
            NodeKind::Comment(text) => {
                self.out.push_str("<!--");
                self.out.push_str(text);
                self.out.push_str("-->");
            }
        }
    }

    fn element(&mut self, node_id: NodeId, elem: &ElementData) {
        let tag = elem.tag.as_ref();
        let highlight = self.opts.highlight_class.as_deref().filter(|_| elem.marked);

        self.out.push('<');
        self.out.push_str(tag);

        let mut class_written = false;
        for (name, value) in &elem.attrs {
            if name == "class"
                && let Some(class) = highlight
            {
                let value = value.trim_end();
                let merged = if value.is_empty() {
                    class.to_owned()
                } else {
                    format!("{value} {class}")
                };
                self.attr(name, &merged);
                class_written = true;
            } else {
                self.attr(name, value);
            }
        }
        if !class_written && let Some(class) = highlight {
            self.attr("class", class);
        }
        self.out.push('>');

        if is_void_element(tag) {
            return;
        }

        let doc = self.doc;
        for child in doc.children(node_id) {
            self.node(child);
        }

        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        for c in value.chars() {
            match c {
                '&' => self.out.push_str("&amp;"),
                '"' => self.out.push_str("&quot;"),
                '<' => self.out.push_str("&lt;"),
                '>' => self.out.push_str("&gt;"),
                _ => self.out.push(c),
            }
        }
        self.out.push('"');
    }
}

fn escape_text(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// HTML5 void elements that never have closing tags
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose text children are written verbatim
fn is_raw_text_element(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext" | "noscript"
    )
}
