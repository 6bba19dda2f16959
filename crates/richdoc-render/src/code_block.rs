//! Code block rendering seam.
//!
//! Block-dialect code blocks are handed to a [`CodeHighlighter`]. The crate
//! ships [`PlainHighlighter`], which emits escaped source in a
//! `<pre><code class="language-…">` pair for a client-side highlighter to pick
//! up; applications with a server-side highlighter plug it in with
//! [`BlockRenderer::with_highlighter`](crate::BlockRenderer::with_highlighter).

use std::fmt::Write;

use crate::escape::escape_html;

/// Renders a code block to HTML.
///
/// Implementations must escape `code` themselves; it arrives raw.
///
/// # Example
///
/// ```
/// use richdoc_render::{BlockRenderer, CodeHighlighter};
///
/// struct Shout;
///
/// impl CodeHighlighter for Shout {
///     fn highlight(&self, language: &str, code: &str, out: &mut String) {
///         out.push_str(&format!("<pre data-lang=\"{language}\">{}</pre>", code.len()));
///     }
/// }
///
/// let renderer = BlockRenderer::new().with_highlighter(Shout);
/// let html = renderer
///     .render(r#"{"blocks":[{"type":"code","data":{"code":"abc","language":"python"}}]}"#)
///     .unwrap();
/// assert_eq!(html, r#"<pre data-lang="python">3</pre>"#);
/// ```
pub trait CodeHighlighter: Send + Sync {
    /// Append the rendered block for `code` in `language` to `out`.
    fn highlight(&self, language: &str, code: &str, out: &mut String);
}

/// Highlighter that performs no highlighting.
#[derive(Clone, Debug)]
pub struct PlainHighlighter {
    pre_class: String,
}

impl PlainHighlighter {
    /// Create a highlighter whose `<pre>` carries `{class_prefix}-code`.
    pub fn new(class_prefix: &str) -> Self {
        Self {
            pre_class: format!("{class_prefix}-code"),
        }
    }
}

impl CodeHighlighter for PlainHighlighter {
    fn highlight(&self, language: &str, code: &str, out: &mut String) {
        write!(
            out,
            r#"<pre class="{}"><code class="language-{}">{}</code></pre>"#,
            self.pre_class,
            escape_html(language),
            escape_html(code)
        )
        .unwrap();
    }
}
