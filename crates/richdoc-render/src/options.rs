//! Renderer options shared by both dialects.

/// Default CSS class prefix for block-dialect fragments.
pub const DEFAULT_CLASS_PREFIX: &str = "rd";

/// Language assumed for code blocks that do not name one.
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Options controlling HTML output.
///
/// The defaults reproduce the established output byte for byte; both
/// hardening switches are opt-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix for CSS classes on block-dialect fragments (`rd` -> `rd-paragraph`).
    pub class_prefix: String,
    /// Language handed to the code highlighter when a code block has none.
    pub default_code_language: String,
    /// Replace `javascript:`, `vbscript:` and non-image `data:` URLs in links
    /// and image sources.
    pub sanitize_urls: bool,
    /// Escape block-dialect fields that are otherwise injected as trusted markup.
    pub escape_block_html: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            class_prefix: DEFAULT_CLASS_PREFIX.to_owned(),
            default_code_language: DEFAULT_CODE_LANGUAGE.to_owned(),
            sanitize_urls: false,
            escape_block_html: false,
        }
    }
}
