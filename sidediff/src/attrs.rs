//! Attribute equivalence between two elements.

use std::cmp::Ordering;

use crate::tree::DiffTree;

/// Cosmetic attributes, left out of the equivalence relation.
pub const IGNORED_ATTRIBUTES: [&str; 2] = ["style", "class"];

/// Whether `a` and `b` carry the same non-cosmetic attributes, in any order.
///
/// When either side has no attribute collection, the result is true only if
/// both sides lack one.
pub fn attributes_equal<A: DiffTree, B: DiffTree>(
    a_tree: &A,
    a: A::Handle,
    b_tree: &B,
    b: B::Handle,
) -> bool {
    let (attrs_a, attrs_b) = match (a_tree.attributes(a), b_tree.attributes(b)) {
        (Some(attrs_a), Some(attrs_b)) => (attrs_a, attrs_b),
        (attrs_a, attrs_b) => return attrs_a.is_none() && attrs_b.is_none(),
    };

    let attrs_a = significant(attrs_a);
    let attrs_b = significant(attrs_b);

    attrs_a.len() == attrs_b.len()
        && attrs_a
            .iter()
            .zip(&attrs_b)
            .all(|((name_a, value_a), (name_b, value_b))| name_a == name_b && value_a == value_b)
}

fn significant<'a, 'b>(mut attrs: Vec<(&'a str, &'b str)>) -> Vec<(&'a str, &'b str)> {
    attrs.retain(|(name, _)| !IGNORED_ATTRIBUTES.contains(name));
    attrs.sort_by(|(x, _), (y, _)| collate(x, y));
    attrs
}

/// Dictionary-style ordering: case-insensitive first, then by code point so
/// distinct names never compare equal.
fn collate(x: &str, y: &str) -> Ordering {
    let folded = x
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(y.chars().flat_map(char::to_lowercase));
    folded.then_with(|| x.cmp(y))
}
