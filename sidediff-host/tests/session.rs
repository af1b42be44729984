//! A full session over local fixture files.

use std::path::PathBuf;

use sidediff_host::{
    CompareError, ComparisonSession, FileProvider, HostConfig, Side, Stage, render_report,
    render_side,
};

fn fixtures() -> ComparisonSession<FileProvider> {
    facet_testhelpers::setup();
    ComparisonSession::new(FileProvider {
        base: Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")),
    })
}

#[test]
fn release_notes_differences() {
    let comparison = fixtures()
        .run("before.html", "after.html")
        .expect("comparison should succeed");

    // version span + chart image
    assert_eq!(comparison.summary.left.marks, 2);
    // version span + new list item + chart image
    assert_eq!(comparison.summary.right.marks, 3);

    let right = render_side(&comparison, Side::Right, &HostConfig::default());
    assert!(right.contains(r#"Version 1.<span class="diff-highlight">5</span> ships"#));
    assert!(right.contains(r#"<li class="diff-highlight">New logo</li>"#));
    assert!(right.contains(r#"<img src="/img/chart-v2.png" alt="benchmark chart" class="diff-highlight">"#));
    // script and head changes are not compared
    assert!(right.contains(r#"window.build = "d4e5f6";"#));
    assert!(right.contains("<title>Release notes (updated)</title>"));
}

#[test]
fn comparing_a_page_with_itself() {
    let comparison = fixtures()
        .run("before.html", "before.html")
        .expect("comparison should succeed");
    assert!(comparison.summary.is_identical());

    let report = render_report(&comparison, &HostConfig::default());
    assert!(report.contains("before.html (0 marked)"));
    assert!(!report.contains("diff-highlight&quot;&gt;"));
}

#[test]
fn missing_file_is_a_fetch_error() {
    let err = fixtures()
        .run("before.html", "nope.html")
        .expect_err("right side is missing");
    assert!(matches!(err, CompareError::Read { .. }));
    assert_eq!(err.stage(), Stage::Fetch);
    assert!(err.to_string().contains("nope.html"));
}

#[test]
fn summary_serializes_to_json() {
    let comparison = fixtures()
        .run("before.html", "after.html")
        .expect("comparison should succeed");
    let json = comparison.summary.to_json().expect("summary should serialize");
    assert!(json.contains("before.html"));
    assert!(json.contains("after.html"));
}
