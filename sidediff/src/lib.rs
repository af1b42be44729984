//! Side-by-side HTML comparison.
//!
//! sidediff walks two parsed documents in parallel, position by position, and
//! annotates both trees in place:
//! - **Marks**: leaf elements that differ (tag, attributes, presence) join a
//!   highlight set
//! - **Text spans**: differing text nodes are split around their common prefix
//!   and suffix, and the middle is wrapped in a marked `<span>`
//! - **Serialization**: marked elements are written out with a highlight class
//!
//! The walker is generic over [`DiffTree`], so any document model exposing the
//! same handful of queries can be compared.
//!
//! # Example
//!
//! ```rust
//! use sidediff::{SerializeOptions, compare_documents, count_marks, parse, serialize_node};
//!
//! let mut left = parse("<p>the red fox</p><img src=a.png>");
//! let mut right = parse("<p>the blue fox</p><img src=b.png>");
//! compare_documents(&mut left, &mut right);
//!
//! // the img and the span around "blue"
//! assert_eq!(count_marks(&right, right.root), 2);
//!
//! let p = right.elements_by_tag(right.root, "p")[0];
//! assert_eq!(
//!     serialize_node(&right, p, &SerializeOptions::default()),
//!     r#"<p>the <span class="diff-highlight">blue</span> fox</p>"#,
//! );
//! ```

mod tracing_macros;

pub mod attrs;
pub mod compare;
pub mod dom;
pub mod highlight;
mod parser;
pub mod serialize;
pub mod text;
pub mod tree;

pub use parser::parse;

pub use attrs::{IGNORED_ATTRIBUTES, attributes_equal};
pub use compare::{Outcome, classify, compare, compare_documents};
pub use dom::{Document, ElementData, Namespace, NodeData, NodeKind};
pub use highlight::{clear_marks, count_marks, highlight, marked_nodes};
pub use serialize::{
    DEFAULT_HIGHLIGHT_CLASS, SerializeOptions, serialize_document, serialize_inner, serialize_node,
};
pub use text::{TextSplit, apply_split, diff_text, split_text};
pub use tree::{DiffTree, NodeClass, TextPiece};
