//! Isolating the differing span of two text nodes.
//!
//! The common prefix and suffix are stripped and the middle of each side is
//! wrapped in a marked span. Positions are counted in `char`s.

use crate::debug;
use crate::tree::{DiffTree, TextPiece};

/// Split of two strings around their differing middles.
///
/// `prefix` and `suffix` are shared by both sides; `diff_a` and `diff_b` are
/// the middles. Either middle may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSplit {
    pub prefix: String,
    pub diff_a: String,
    pub diff_b: String,
    pub suffix: String,
}

impl TextSplit {
    /// Replacement pieces for one side, `None` when that side's middle is
    /// empty (the node is then left untouched).
    pub fn pieces<'a>(&'a self, diff: &'a str) -> Option<Vec<TextPiece<'a>>> {
        if diff.is_empty() {
            return None;
        }
        let mut pieces = Vec::with_capacity(3);
        if !self.prefix.is_empty() {
            pieces.push(TextPiece::Plain(&self.prefix));
        }
        pieces.push(TextPiece::Highlighted(diff));
        if !self.suffix.is_empty() {
            pieces.push(TextPiece::Plain(&self.suffix));
        }
        Some(pieces)
    }
}

/// Compute the common prefix `i` and the suffix counter `j` of `a` and `b`,
/// then cut each side as `[0, i)`, `[i, len - j + 1)`, `[len - j + 1, len)`.
///
/// The suffix scan stops once `j` exceeds the remaining length of either side
/// after the prefix, so the counter ends one past the shared suffix length.
pub fn split_text(a: &str, b: &str) -> TextSplit {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (len_a, len_b) = (a.len(), b.len());

    let mut i = 0;
    while i < len_a && i < len_b && a[i] == b[i] {
        i += 1;
    }

    let mut j = 1;
    while j <= len_a - i && j <= len_b - i && a[len_a - j] == b[len_b - j] {
        j += 1;
    }

    TextSplit {
        prefix: slice(&a, 0, i),
        diff_a: slice(&a, i, len_a + 1 - j),
        diff_b: slice(&b, i, len_b + 1 - j),
        suffix: slice(&a, len_a + 1 - j, len_a),
    }
}

/// `chars[start..end]`, empty when the range is inverted.
fn slice(chars: &[char], start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    chars[start..end].iter().collect()
}

/// Rebuild whichever side of an already computed split has a non-empty middle.
pub fn apply_split<A: DiffTree, B: DiffTree>(
    a_tree: &mut A,
    a: A::Handle,
    b_tree: &mut B,
    b: B::Handle,
    split: &TextSplit,
) {
    if let Some(pieces) = split.pieces(&split.diff_a) {
        debug!(node = ?a, diff = %split.diff_a, "rebuilding text on side A");
        a_tree.replace_text(a, &pieces);
    }
    if let Some(pieces) = split.pieces(&split.diff_b) {
        debug!(node = ?b, diff = %split.diff_b, "rebuilding text on side B");
        b_tree.replace_text(b, &pieces);
    }
}

/// Split both text nodes in place around their differing middles.
///
/// # Panics
///
/// If either handle is not a text node.
pub fn diff_text<A: DiffTree, B: DiffTree>(
    a_tree: &mut A,
    a: A::Handle,
    b_tree: &mut B,
    b: B::Handle,
) {
    let split = split_text(
        a_tree.text(a).expect("diff_text: side A is not a text node"),
        b_tree.text(b).expect("diff_text: side B is not a text node"),
    );
    apply_split(a_tree, a, b_tree, b, &split);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Document, SerializeOptions, parse, serialize_node};
    use facet_testhelpers::test;

    fn split(a: &str, b: &str) -> (String, String, String, String) {
        let s = split_text(a, b);
        (s.prefix, s.diff_a, s.diff_b, s.suffix)
    }

    fn owned(parts: (&str, &str, &str, &str)) -> (String, String, String, String) {
        (
            parts.0.to_owned(),
            parts.1.to_owned(),
            parts.2.to_owned(),
            parts.3.to_owned(),
        )
    }

    #[test]
    fn test_common_prefix_only() {
        assert_eq!(
            split("hello world", "hello mars"),
            owned(("hello ", "world", "mars", ""))
        );
    }

    #[test]
    fn test_common_prefix_and_suffix() {
        assert_eq!(
            split("the red fox", "the blue fox"),
            owned(("the ", "red", "blue", " fox"))
        );
    }

    #[test]
    fn test_nothing_in_common() {
        assert_eq!(split("abc", "xyz"), owned(("", "abc", "xyz", "")));
    }

    #[test]
    fn test_strict_extension_with_repeated_tail() {
        // prefix consumes the whole shorter side, suffix scan is bounded to zero
        assert_eq!(split("aa", "aaa"), owned(("aa", "", "a", "")));
        assert_eq!(split("aaa", "aa"), owned(("aa", "a", "", "")));
    }

    #[test]
    fn test_repeated_suffix_never_overlaps_prefix() {
        assert_eq!(split("abcabc", "abc"), owned(("abc", "abc", "", "")));
        assert_eq!(split("xaaa", "yaaa"), owned(("", "x", "y", "aaa")));
        assert_eq!(split("aab", "ab"), owned(("a", "a", "", "b")));
    }

    #[test]
    fn test_insertion_in_the_middle() {
        assert_eq!(split("abc", "abXc"), owned(("ab", "", "X", "c")));
    }

    #[test]
    fn test_multibyte_chars() {
        assert_eq!(split("naïve café", "naïve cafè"), owned(("naïve caf", "é", "è", "")));
    }

    #[test]
    fn test_pieces_skip_empty_affixes() {
        let s = split_text("abc", "xyz");
        assert_eq!(s.pieces(&s.diff_a), Some(vec![TextPiece::Highlighted("abc")]));

        let s = split_text("aa", "aaa");
        assert_eq!(s.pieces(&s.diff_a), None);
    }

    #[test]
    fn test_diff_text_rebuilds_both_sides() {
        let mut a = parse("<p>hello world</p>");
        let mut b = parse("<p>hello mars</p>");
        let p_a = a.elements_by_tag(a.root, "p")[0];
        let p_b = b.elements_by_tag(b.root, "p")[0];
        let text_a = a.children(p_a).next().expect("text in A");
        let text_b = b.children(p_b).next().expect("text in B");

        diff_text(&mut a, text_a, &mut b, text_b);

        let opts = SerializeOptions::default();
        assert_eq!(
            serialize_node(&a, p_a, &opts),
            r#"<p>hello <span class="diff-highlight">world</span></p>"#
        );
        assert_eq!(
            serialize_node(&b, p_b, &opts),
            r#"<p>hello <span class="diff-highlight">mars</span></p>"#
        );
    }

    #[test]
    fn test_diff_text_leaves_empty_side_untouched() {
        let mut a = parse("<p>aa</p>");
        let mut b = parse("<p>aaa</p>");
        let p_a = a.elements_by_tag(a.root, "p")[0];
        let p_b = b.elements_by_tag(b.root, "p")[0];
        let text_a = a.children(p_a).next().expect("text in A");
        let text_b = b.children(p_b).next().expect("text in B");

        diff_text(&mut a, text_a, &mut b, text_b);

        let opts = SerializeOptions::default();
        assert_eq!(serialize_node(&a, p_a, &opts), "<p>aa</p>");
        assert_eq!(
            serialize_node(&b, p_b, &opts),
            r#"<p>aa<span class="diff-highlight">a</span></p>"#
        );
    }

    #[test]
    #[should_panic(expected = "not a text node")]
    fn test_diff_text_on_element_fails_fast() {
        let mut a = Document::new();
        let mut b = Document::new();
        let el = a.create_element("p", &[]);
        let text = b.create_text("x");
        diff_text(&mut a, el, &mut b, text);
    }
}
