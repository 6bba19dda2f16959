//! HTML text escaping.

use std::borrow::Cow;

/// Escape the five HTML-significant characters (`& < > " '`).
///
/// Every other character passes through unchanged, including existing
/// entities: escaping twice yields `&amp;amp;`, so callers escape each raw
/// fragment exactly once. Returns the input borrowed when nothing needs
/// replacing.
///
/// # Examples
///
/// ```
/// use richdoc_render::escape_html;
///
/// assert_eq!(escape_html("<b>\"hi\"</b>"), "&lt;b&gt;&quot;hi&quot;&lt;/b&gt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let Some(first) = text.find(['&', '<', '>', '"', '\'']) else {
        return Cow::Borrowed(text);
    };

    let mut out = String::with_capacity(text.len() + 16);
    out.push_str(&text[..first]);
    for c in text[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_special_characters() {
        assert_eq!(escape_html(r#"& < > " '"#), "&amp; &lt; &gt; &quot; &#39;");
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape_html("nothing to do"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_keeps_other_characters() {
        assert_eq!(escape_html("café → ünïcode\t\n"), "café → ünïcode\t\n");
    }

    #[test]
    fn test_escape_is_not_idempotent() {
        let once = escape_html("a & b").into_owned();
        assert_eq!(once, "a &amp; b");
        assert_eq!(escape_html(&once), "a &amp;amp; b");
    }

    #[test]
    fn test_escape_existing_entity_is_escaped() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_escape_prefix_preserved() {
        assert_eq!(escape_html("abc<def"), "abc&lt;def");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_html(""), "");
    }
}
