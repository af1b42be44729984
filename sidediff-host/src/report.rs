//! Standalone side-by-side report page.

use sidediff::serialize_document;

use crate::config::{HostConfig, Side};
use crate::scroll::ScrollSync;
use crate::session::Comparison;

/// Insert `content` right after the opening `<head>` tag.
///
/// When there is no head, content is prepended to the whole document.
pub fn inject_into_head(html: &str, content: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut search_from = 0;
    while let Some(found) = lower[search_from..].find("<head") {
        let head_start = search_from + found;
        let after_name = head_start + "<head".len();
        // skip <header>, <heading-x> and friends
        let is_head = matches!(
            lower.as_bytes().get(after_name),
            Some(b'>' | b' ' | b'\t' | b'\n' | b'\r' | b'/')
        );
        if is_head && let Some(head_end) = html[head_start..].find('>') {
            let insert_pos = head_start + head_end + 1;
            let mut result = String::with_capacity(html.len() + content.len());
            result.push_str(&html[..insert_pos]);
            result.push_str(content);
            result.push_str(&html[insert_pos..]);
            return result;
        }
        search_from = after_name;
    }

    let mut result = String::with_capacity(html.len() + content.len());
    result.push_str(content);
    result.push_str(html);
    result
}

/// Serialized document for one view, stylesheet included when that side is styled.
pub fn render_side(comparison: &Comparison, side: Side, config: &HostConfig) -> String {
    let doc = match side {
        Side::Left => &comparison.left,
        Side::Right => &comparison.right,
    };
    let html = serialize_document(doc, &config.highlight.serialize_options());
    if config.styled_sides.includes(side) {
        inject_into_head(&html, &config.highlight.stylesheet())
    } else {
        html
    }
}

/// The full report: both documents in `srcdoc` iframes, side by side, with
/// scroll mirroring.
pub fn render_report(comparison: &Comparison, config: &HostConfig) -> String {
    let left = render_side(comparison, Side::Left, config);
    let right = render_side(comparison, Side::Right, config);
    let summary = &comparison.summary;

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>sidediff: {left_target} / {right_target}</title>
<style>
html, body {{ margin: 0; height: 100%; }}
body {{ display: flex; font: 13px sans-serif; }}
.pane {{ flex: 1; display: flex; flex-direction: column; min-width: 0; }}
.pane + .pane {{ border-left: 1px solid #ccc; }}
.pane header {{ padding: 4px 8px; background: #f4f4f4; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }}
.pane iframe {{ flex: 1; border: 0; width: 100%; }}
</style>
</head>
<body>
<div class="pane"><header>{left_target} ({left_marks} marked)</header><iframe id="left" srcdoc="{left_srcdoc}"></iframe></div>
<div class="pane"><header>{right_target} ({right_marks} marked)</header><iframe id="right" srcdoc="{right_srcdoc}"></iframe></div>
{script}
</body>
</html>
"#,
        left_target = escape(&summary.left.target),
        right_target = escape(&summary.right.target),
        left_marks = summary.left.marks,
        right_marks = summary.right.marks,
        left_srcdoc = escape(&left),
        right_srcdoc = escape(&right),
        script = ScrollSync::from_config(config).script(),
    )
}

/// Escape text for use in HTML content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
