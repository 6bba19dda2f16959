//! Tree-dialect HTML renderer.

use std::fmt::Write;

use crate::escape::escape_html;
use crate::options::RenderOptions;
use crate::tree::model::{Mark, MarkKind, Node, NodeKind};
use crate::url::{safe_href, safe_src};

/// Renders tree-dialect documents to HTML fragments.
///
/// Rendering is total: unknown node kinds render their children without a
/// wrapper, invalid nodes render nothing, and every raw string (text, `href`,
/// `src`, `alt`, code language) is escaped exactly once.
///
/// # Example
///
/// ```
/// use richdoc_render::{Node, NodeKind, TreeRenderer};
///
/// let doc = Node::doc(vec![
///     Node::new(NodeKind::Paragraph).with_content(vec![Node::text("Hello")]),
/// ]);
/// assert_eq!(TreeRenderer::new().render(&doc), "<p>Hello</p>");
/// ```
#[derive(Clone, Debug, Default)]
pub struct TreeRenderer {
    options: RenderOptions,
}

impl TreeRenderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a node and its descendants.
    pub fn render(&self, node: &Node) -> String {
        let mut out = String::with_capacity(1024);
        self.render_node(node, &mut out);
        out
    }

    /// Decode and render serialized tree-dialect JSON.
    ///
    /// Input that is not JSON is rendered as a single escaped paragraph of
    /// literal text; blank input renders nothing.
    pub fn render_str(&self, input: &str) -> String {
        match Node::from_json(input) {
            Ok(node) => self.render(&node),
            Err(e) => {
                tracing::debug!(error = %e, "Tree document is not JSON, rendering as literal text");
                let text = input.trim();
                if text.is_empty() {
                    String::new()
                } else {
                    format!("<p>{}</p>", escape_html(text))
                }
            }
        }
    }

    fn render_node(&self, node: &Node, out: &mut String) {
        match &node.kind {
            NodeKind::Doc => self.render_children(node, out),
            NodeKind::Text => self.render_text(node, out),
            NodeKind::Paragraph => {
                out.push_str("<p>");
                let start = out.len();
                self.render_children(node, out);
                if out.len() == start {
                    out.push_str("<br>");
                }
                out.push_str("</p>");
            }
            NodeKind::Heading => {
                let level = node.heading_level();
                write!(out, "<h{level}>").unwrap();
                self.render_children(node, out);
                write!(out, "</h{level}>").unwrap();
            }
            NodeKind::BulletList => self.wrap("<ul>", "</ul>", node, out),
            NodeKind::OrderedList => match node.attr_int("start") {
                Some(start) if start != 1 => {
                    write!(out, r#"<ol start="{start}">"#).unwrap();
                    self.render_children(node, out);
                    out.push_str("</ol>");
                }
                _ => self.wrap("<ol>", "</ol>", node, out),
            },
            NodeKind::ListItem => self.wrap("<li>", "</li>", node, out),
            NodeKind::Blockquote => self.wrap("<blockquote>", "</blockquote>", node, out),
            NodeKind::CodeBlock => {
                let language = node.attr_str("language").unwrap_or_default();
                write!(
                    out,
                    r#"<pre><code class="language-{}">"#,
                    escape_html(language)
                )
                .unwrap();
                self.render_children(node, out);
                out.push_str("</code></pre>");
            }
            NodeKind::HorizontalRule => out.push_str("<hr>"),
            NodeKind::HardBreak => out.push_str("<br>"),
            NodeKind::Image => self.render_image(node, out),
            NodeKind::Unknown(tag) => {
                tracing::debug!(node_type = %tag, "Unknown node type, rendering children only");
                self.render_children(node, out);
            }
            NodeKind::Invalid => {}
        }
    }

    fn render_children(&self, node: &Node, out: &mut String) {
        for child in &node.content {
            self.render_node(child, out);
        }
    }

    fn wrap(&self, open: &str, close: &str, node: &Node, out: &mut String) {
        out.push_str(open);
        self.render_children(node, out);
        out.push_str(close);
    }

    fn render_image(&self, node: &Node, out: &mut String) {
        let mut src = node.attr_str("src").unwrap_or_default();
        if self.options.sanitize_urls {
            src = safe_src(src);
        }
        let alt = node.attr_str("alt").unwrap_or_default();
        write!(
            out,
            r#"<img src="{}" alt="{}""#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
        if let Some(title) = node.attr_str("title") {
            write!(out, r#" title="{}""#, escape_html(title)).unwrap();
        }
        out.push_str(" />");
    }

    /// Escape the text, then wrap it in each mark in order so the first mark
    /// ends up innermost. Repeated mark kinds apply once.
    fn render_text(&self, node: &Node, out: &mut String) {
        let mut html = escape_html(node.text.as_deref().unwrap_or_default()).into_owned();
        let mut applied: Vec<&MarkKind> = Vec::with_capacity(node.marks.len());

        for mark in &node.marks {
            if applied.contains(&&mark.kind) {
                continue;
            }
            applied.push(&mark.kind);
            html = match &mark.kind {
                MarkKind::Bold => format!("<strong>{html}</strong>"),
                MarkKind::Italic => format!("<em>{html}</em>"),
                MarkKind::Strike => format!("<s>{html}</s>"),
                MarkKind::Code => format!("<code>{html}</code>"),
                MarkKind::Link => format!(
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{html}</a>"#,
                    escape_html(self.link_href(mark))
                ),
                MarkKind::Unknown(tag) => {
                    tracing::debug!(mark_type = %tag, "Ignoring unknown mark");
                    continue;
                }
            };
        }

        out.push_str(&html);
    }

    fn link_href<'a>(&self, mark: &'a Mark) -> &'a str {
        let href = mark.href().unwrap_or("#");
        if self.options.sanitize_urls {
            safe_href(href)
        } else {
            href
        }
    }
}
