//! Markdown-subset formatter for generated prose.
//!
//! This is an ordered series of regex substitutions, not a parser. Passes do
//! not know about each other, so markup inside one construct can be picked up
//! by a later pass (`**` inside a backtick span still turns bold). Headings
//! collapse: `#` and `##` both become `<h2>`, `###` becomes `<h3>`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::escape_html;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("invalid bold regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("invalid italic regex"));
static HEADING_3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").expect("invalid h3 regex"));
static HEADING_2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").expect("invalid h2 regex"));
static HEADING_1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("invalid h1 regex"));
static BULLET_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[*-] (.*)$").expect("invalid bullet regex"));
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\. (.*)$").expect("invalid numbered regex"));
static ITEM_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^<li>.*</li>\n?)+").expect("invalid item run regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("invalid inline code regex"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("invalid paragraph regex"));

/// Format generated prose written in a small markdown subset as HTML.
///
/// The raw text is HTML-escaped first, then bold, italic, headings, list
/// items, list wrapping, inline code, paragraph breaks and line breaks are
/// substituted in that order, and the result is wrapped in one `<p>`.
/// Blank input yields an empty string.
///
/// # Examples
///
/// ```
/// use richdoc_render::format_prose;
///
/// assert_eq!(
///     format_prose("Use **care**.\n\n- one\n- two"),
///     "<p>Use <strong>care</strong>.</p><p><ul><li>one</li><li>two</li></ul></p>"
/// );
/// ```
pub fn format_prose(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let text = escape_html(trimmed);
    let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = HEADING_3.replace_all(&text, "<h3>${1}</h3>");
    let text = HEADING_2.replace_all(&text, "<h2>${1}</h2>");
    let text = HEADING_1.replace_all(&text, "<h2>${1}</h2>");
    let text = BULLET_ITEM.replace_all(&text, "<li>${1}</li>");
    let text = NUMBERED_ITEM.replace_all(&text, "<li>${1}</li>");
    let text = ITEM_RUN.replace_all(&text, |caps: &Captures| {
        let run = &caps[0];
        let trailing = if run.ends_with('\n') { "\n" } else { "" };
        format!("<ul>{}</ul>{trailing}", run.trim_end_matches('\n').replace('\n', ""))
    });
    let text = INLINE_CODE.replace_all(&text, "<code>${1}</code>");
    let text = PARAGRAPH_BREAK.replace_all(&text, "</p><p>");
    let text = text.replace('\n', "<br>");

    format!("<p>{text}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_wrapped_once() {
        assert_eq!(format_prose("Hello there"), "<p>Hello there</p>");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(format_prose(""), "");
        assert_eq!(format_prose(" \n\t"), "");
    }

    #[test]
    fn test_bold_and_italic() {
        assert_eq!(
            format_prose("**strong** and *soft*"),
            "<p><strong>strong</strong> and <em>soft</em></p>"
        );
    }

    #[test]
    fn test_heading_levels_collapse() {
        assert_eq!(
            format_prose("# Big\n## Mid\n### Small"),
            "<p><h2>Big</h2><br><h2>Mid</h2><br><h3>Small</h3></p>"
        );
    }

    #[test]
    fn test_bullets_wrapped_in_single_list() {
        assert_eq!(
            format_prose("- a\n* b\n- c"),
            "<p><ul><li>a</li><li>b</li><li>c</li></ul></p>"
        );
    }

    #[test]
    fn test_numbered_items_become_unordered_list() {
        assert_eq!(
            format_prose("1. first\n2. second"),
            "<p><ul><li>first</li><li>second</li></ul></p>"
        );
    }

    #[test]
    fn test_separate_runs_get_separate_lists() {
        assert_eq!(
            format_prose("- a\n\ntext\n\n- b"),
            "<p><ul><li>a</li></ul></p><p>text</p><p><ul><li>b</li></ul></p>"
        );
    }

    #[test]
    fn test_inline_code() {
        assert_eq!(
            format_prose("run `cargo test` now"),
            "<p>run <code>cargo test</code> now</p>"
        );
    }

    #[test]
    fn test_paragraphs_and_line_breaks() {
        assert_eq!(
            format_prose("one\ntwo\n\n\nthree"),
            "<p>one<br>two</p><p>three</p>"
        );
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(format_prose("a\r\nb\r\n\r\nc"), "<p>a<br>b</p><p>c</p>");
    }

    #[test]
    fn test_mixed_document() {
        let input = "Here is **bold** and *it*.\n\n## Steps\n1. First\n2. Second\n\nUse `cargo`.\nDone";
        assert_eq!(
            format_prose(input),
            concat!(
                "<p>Here is <strong>bold</strong> and <em>it</em>.</p>",
                "<p><h2>Steps</h2><br><ul><li>First</li><li>Second</li></ul></p>",
                "<p>Use <code>cargo</code>.<br>Done</p>"
            )
        );
    }

    #[test]
    fn test_raw_html_is_escaped() {
        assert_eq!(
            format_prose("<script>x</script> & **y**"),
            "<p>&lt;script&gt;x&lt;/script&gt; &amp; <strong>y</strong></p>"
        );
    }

    #[test]
    fn test_bold_inside_code_span_is_not_protected() {
        assert_eq!(
            format_prose("`a **b** c`"),
            "<p><code>a <strong>b</strong> c</code></p>"
        );
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(format_prose("#hashtag"), "<p>#hashtag</p>");
    }
}
