//! URL scheme filtering for links and image sources.

/// Schemes that execute script when followed.
const SCRIPT_SCHEMES: [&str; 2] = ["javascript:", "vbscript:"];

/// Return `url`, or `#` when it uses a script or `data:` scheme.
pub(crate) fn safe_href(url: &str) -> &str {
    let scheme = normalized_prefix(url);
    if is_script(&scheme) || scheme.starts_with("data:") {
        "#"
    } else {
        url
    }
}

/// Return `url`, or an empty string when it uses a script or non-image `data:` scheme.
pub(crate) fn safe_src(url: &str) -> &str {
    let scheme = normalized_prefix(url);
    if is_script(&scheme) || (scheme.starts_with("data:") && !scheme.starts_with("data:image/")) {
        ""
    } else {
        url
    }
}

fn is_script(prefix: &str) -> bool {
    SCRIPT_SCHEMES.iter().any(|s| prefix.starts_with(s))
}

/// Lowercased leading characters of `url` with whitespace and control
/// characters removed, which browsers ignore when resolving the scheme.
fn normalized_prefix(url: &str) -> String {
    url.chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_href_passes_http() {
        assert_eq!(safe_href("https://x.com/a?b=c"), "https://x.com/a?b=c");
        assert_eq!(safe_href("/relative/path"), "/relative/path");
        assert_eq!(safe_href("mailto:a@b.c"), "mailto:a@b.c");
    }

    #[test]
    fn test_safe_href_blocks_script() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("  JavaScript:alert(1)"), "#");
        assert_eq!(safe_href("java\tscript:alert(1)"), "#");
        assert_eq!(safe_href("vbscript:msgbox"), "#");
    }

    #[test]
    fn test_safe_href_blocks_data() {
        assert_eq!(safe_href("data:text/html,<script>"), "#");
        assert_eq!(safe_href("data:image/png;base64,AAAA"), "#");
    }

    #[test]
    fn test_safe_src_allows_data_images() {
        assert_eq!(
            safe_src("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
        assert_eq!(safe_src("data:text/html,x"), "");
        assert_eq!(safe_src("javascript:x"), "");
        assert_eq!(safe_src("https://cdn/x.png"), "https://cdn/x.png");
    }
}
