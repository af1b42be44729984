//! End-to-end behavior of a comparison pass on parsed documents.

use sidediff::{
    Document, DiffTree, SerializeOptions, compare, compare_documents, count_marks, marked_nodes,
    parse, serialize_inner, serialize_node,
};

fn compared(left: &str, right: &str) -> (Document, Document) {
    facet_testhelpers::setup();
    let mut a = parse(left);
    let mut b = parse(right);
    compare_documents(&mut a, &mut b);
    (a, b)
}

fn marks(doc: &Document) -> usize {
    count_marks(doc, doc.root)
}

fn body_html(doc: &Document) -> String {
    let body = doc.body().expect("document should have a body");
    serialize_inner(doc, body, &SerializeOptions::default())
}

#[test]
fn identical_documents_have_no_marks() {
    let html = r#"<!DOCTYPE html><html><head><title>t</title></head><body>
        <nav><a href="/">home</a></nav>
        <main><h1 id="top">Title</h1><p>Some <em>text</em> here.</p><img src="a.png"></main>
    </body></html>"#;
    let (a, b) = compared(html, html);

    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
    assert_eq!(a.to_html(), parse(html).to_html());
}

#[test]
fn attribute_order_and_cosmetic_attributes_are_ignored() {
    let (a, b) = compared(
        r#"<a href="/x" title="y" class="btn">go</a>"#,
        r#"<a title="y" style="color: red" href="/x" class="btn primary">go</a>"#,
    );
    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
}

#[test]
fn whitespace_only_differences_are_ignored() {
    let (a, b) = compared(
        "<div>\n  <p>hello</p>\n</div>",
        "<div> <p>  hello\n</p>   </div>",
    );
    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
}

#[test]
fn differing_text_keeps_common_affixes_outside_the_span() {
    let (a, b) = compared("<p>the red fox</p>", "<p>the blue fox</p>");

    assert_eq!(
        body_html(&a),
        r#"<p>the <span class="diff-highlight">red</span> fox</p>"#
    );
    assert_eq!(
        body_html(&b),
        r#"<p>the <span class="diff-highlight">blue</span> fox</p>"#
    );
    assert_eq!(marks(&a), 1);
    assert_eq!(marks(&b), 1);
}

#[test]
fn text_appended_marks_only_the_longer_side() {
    let (a, b) = compared("<p>Price: 10</p>", "<p>Price: 100</p>");

    assert_eq!(body_html(&a), "<p>Price: 10</p>");
    assert_eq!(
        body_html(&b),
        r#"<p>Price: 10<span class="diff-highlight">0</span></p>"#
    );
}

#[test]
fn only_leaves_are_marked() {
    let (a, b) = compared(
        r#"<div id="one"><p>same</p></div>"#,
        r#"<div id="two"><p>same</p></div>"#,
    );
    // the divs differ but have element children
    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
}

#[test]
fn tag_mismatch_marks_leaves_without_splitting_text() {
    let (a, b) = compared("<div>same</div>", "<span>same text</span>");

    let div = a.elements_by_tag(a.root, "div")[0];
    let span = b.elements_by_tag(b.root, "span")[0];
    assert!(a.is_marked(div));
    assert!(b.is_marked(span));

    // the branch ended: no wrapper spans were created
    assert!(a.elements_by_tag(a.root, "span").is_empty());
    assert_eq!(b.elements_by_tag(b.root, "span").len(), 1);
}

#[test]
fn tag_mismatch_on_containers_stops_the_branch() {
    let (a, b) = compared(
        "<section><b>left</b></section>",
        "<article><b>right</b></article>",
    );
    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
    assert_eq!(body_html(&a), "<section><b>left</b></section>");
}

#[test]
fn extra_trailing_child_is_marked() {
    let (a, b) = compared(
        "<ul><li>a</li><li>b</li></ul>",
        "<ul><li>a</li><li>b</li><li>c</li></ul>",
    );
    assert_eq!(marks(&a), 0);

    let items = b.elements_by_tag(b.root, "li");
    assert_eq!(marked_nodes(&b, b.root), vec![items[2]]);
}

#[test]
fn insertion_shifts_every_later_sibling() {
    let (a, b) = compared(
        "<ul><li>a</li><li>b</li></ul>",
        "<ul><li>new</li><li>a</li><li>b</li></ul>",
    );
    // li[0] and li[1] are paired with shifted content, li[2] has no partner
    assert_eq!(marks(&a), 2);
    assert_eq!(marks(&b), 3);
}

#[test]
fn script_and_style_contents_are_skipped() {
    let (a, b) = compared(
        r#"<p>x</p><style>p { color: red }</style><script src="a.js">var a = 1;</script>"#,
        r#"<p>x</p><style>p { color: blue }</style><script src="b.js">var a = 2;</script>"#,
    );
    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
    assert!(a.elements_by_tag(a.root, "span").is_empty());
}

#[test]
fn head_differences_are_not_compared() {
    let (a, b) = compared(
        "<html><head><title>one</title></head><body><p>x</p></body></html>",
        "<html><head><title>two</title></head><body><p>x</p></body></html>",
    );
    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
}

#[test]
fn comments_never_produce_marks() {
    let (a, b) = compared("<p>x</p><!-- one -->", "<p>x</p><!-- two -->");
    assert_eq!(marks(&a), 0);
    assert_eq!(marks(&b), 0);
}

#[test]
fn rerunning_with_attribute_differences_is_idempotent() {
    let mut a = parse(r#"<img src="a.png"><a href="/1">link</a><input value="x">"#);
    let mut b = parse(r#"<img src="b.png"><a href="/2">link</a><input value="x">"#);

    compare_documents(&mut a, &mut b);
    let first_a = marked_nodes(&a, a.root);
    let first_b = marked_nodes(&b, b.root);
    assert_eq!(first_a.len(), 2);

    compare_documents(&mut a, &mut b);
    assert_eq!(marked_nodes(&a, a.root), first_a);
    assert_eq!(marked_nodes(&b, b.root), first_b);
}

#[test]
fn comparing_twice_without_clearing_keeps_the_same_marks() {
    let mut a = parse(r#"<ul><li data-k="1">a</li><li>b</li></ul><br>"#);
    let mut b = parse(r#"<ul><li data-k="2">a</li><li>b</li><li>c</li></ul>"#);
    let body_a = a.body();
    let body_b = b.body();

    compare(&mut a, body_a, &mut b, body_b);
    let once_a = marked_nodes(&a, a.root);
    let once_b = marked_nodes(&b, b.root);
    assert_eq!(once_a.len(), 2);
    assert_eq!(once_b.len(), 2);

    compare(&mut a, body_a, &mut b, body_b);
    assert_eq!(marked_nodes(&a, a.root), once_a);
    assert_eq!(marked_nodes(&b, b.root), once_b);
}

#[test]
fn rerunning_keeps_wrapper_spans_from_earlier_passes() {
    let mut a = parse("<p>old</p>");
    let mut b = parse("<p>new</p>");
    compare_documents(&mut a, &mut b);
    compare_documents(&mut a, &mut b);

    // earlier wrappers stay in the tree, only the innermost one is marked
    let p = a.elements_by_tag(a.root, "p")[0];
    assert_eq!(
        serialize_node(&a, p, &SerializeOptions::default()),
        r#"<p><span><span class="diff-highlight">old</span></span></p>"#
    );
    assert_eq!(marks(&a), 1);
}

#[test]
fn marks_render_with_a_custom_class() {
    let (_, b) = compared("<p>a</p><hr>", "<p>a</p><hr><br>");
    let body = b.body().expect("body");
    let opts = SerializeOptions {
        highlight_class: Some("changed".to_owned()),
    };
    assert_eq!(
        serialize_inner(&b, body, &opts),
        r#"<p>a</p><hr><br class="changed">"#
    );
}

#[test]
fn prefixed_svg_attribute_differs_from_unprefixed() {
    let (a, b) = compared(
        r##"<svg><use xlink:href="#icon"></use></svg>"##,
        r##"<svg><use href="#icon"></use></svg>"##,
    );
    assert_eq!(marks(&a), 1);
    assert_eq!(marks(&b), 1);
    assert!(body_html(&a).contains(r##"<use xlink:href="#icon" class="diff-highlight">"##));
}
