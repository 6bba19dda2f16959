//! Block-dialect HTML renderer.

use std::borrow::Cow;
use std::fmt::Write;

use serde_json::Value;

use crate::block::model::{Block, BlockData, BlockDocument, ChecklistItem, ImageData, ListItem};
use crate::code_block::{CodeHighlighter, PlainHighlighter};
use crate::escape::escape_html;
use crate::options::RenderOptions;
use crate::url::safe_src;

/// Renders block-dialect documents to HTML fragments.
///
/// Blocks never nest; each maps to one fixed fragment shape. Text-bearing
/// fields (paragraph and header text, list items, quote text and caption,
/// warning title and message, checklist text, image caption) are produced by
/// an editor that already sanitizes inline formatting and are inserted as
/// trusted markup unless [`RenderOptions::escape_block_html`] is set. URLs,
/// `alt` text, code and the literal-text fallback are always escaped.
pub struct BlockRenderer {
    options: RenderOptions,
    prefix: String,
    highlighter: Box<dyn CodeHighlighter>,
}

impl BlockRenderer {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(RenderOptions::default())
    }

    /// Create a renderer with the given options.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        let prefix = escape_html(&options.class_prefix).into_owned();
        Self {
            highlighter: Box::new(PlainHighlighter::new(&prefix)),
            prefix,
            options,
        }
    }

    /// Replace the code block highlighter.
    #[must_use]
    pub fn with_highlighter<H: CodeHighlighter + 'static>(mut self, highlighter: H) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Render serialized block-dialect JSON.
    ///
    /// - A `{"blocks": [...]}` document renders its blocks.
    /// - Input that fails to decode and does not start with `{` or `[` is
    ///   rendered as one escaped literal paragraph.
    /// - Input that looks structured but fails to decode yields `None`.
    /// - Blank input yields `None`.
    pub fn render(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            tracing::debug!("Block document is empty");
            return None;
        }

        match BlockDocument::from_json(trimmed) {
            Ok(doc) => Some(self.render_document(&doc)),
            Err(e) if looks_structured(trimmed) => {
                tracing::warn!(error = %e, "Failed to decode block document");
                None
            }
            Err(_) => Some(self.literal_paragraph(trimmed)),
        }
    }

    /// Render an already-decoded JSON value.
    ///
    /// A JSON string is treated like serialized input and goes through
    /// [`render`](Self::render).
    pub fn render_value(&self, value: &Value) -> Option<String> {
        if let Value::String(input) = value {
            return self.render(input);
        }
        match BlockDocument::from_value(value) {
            Ok(doc) => Some(self.render_document(&doc)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode block document");
                None
            }
        }
    }

    /// Render every block of a decoded document.
    pub fn render_document(&self, doc: &BlockDocument) -> String {
        let mut out = String::with_capacity(doc.blocks.len() * 128);
        for block in &doc.blocks {
            self.render_block(block, &mut out);
        }
        out
    }

    /// Render a single block, appending to `out`.
    pub fn render_block(&self, block: &Block, out: &mut String) {
        let p = &self.prefix;
        match &block.data {
            BlockData::Paragraph { text } => {
                write!(out, r#"<p class="{p}-paragraph">{}</p>"#, self.trusted(text)).unwrap();
            }
            BlockData::Header { text, level } => {
                let level = match level {
                    Some(level @ 1..=6) => *level,
                    _ => 3,
                };
                write!(
                    out,
                    r#"<h{level} class="{p}-header">{}</h{level}>"#,
                    self.trusted(text)
                )
                .unwrap();
            }
            BlockData::List { ordered, items } => self.render_list(*ordered, items, out),
            BlockData::Delimiter => out.push_str("<hr>"),
            BlockData::Image(image) => self.render_image(block, image, out),
            BlockData::Code { code, language } => {
                let language = language
                    .as_deref()
                    .unwrap_or(&self.options.default_code_language);
                self.highlighter.highlight(language, code, out);
            }
            BlockData::Quote {
                text,
                caption,
                alignment,
            } => {
                write!(out, r#"<blockquote class="{p}-quote"#).unwrap();
                if alignment.as_deref() == Some("center") {
                    write!(out, " {p}-quote--center").unwrap();
                }
                write!(out, r#""><p>{}</p>"#, self.trusted(text)).unwrap();
                if !caption.is_empty() {
                    write!(out, "<footer>{}</footer>", self.trusted(caption)).unwrap();
                }
                out.push_str("</blockquote>");
            }
            BlockData::Warning { title, message } => {
                write!(out, r#"<div class="{p}-warning" role="note">"#).unwrap();
                if !title.is_empty() {
                    write!(
                        out,
                        r#"<p class="{p}-warning-title">{}</p>"#,
                        self.trusted(title)
                    )
                    .unwrap();
                }
                write!(
                    out,
                    r#"<p class="{p}-warning-message">{}</p></div>"#,
                    self.trusted(message)
                )
                .unwrap();
            }
            BlockData::Checklist { items } => self.render_checklist(items, out),
            BlockData::Unknown { kind } => {
                tracing::warn!(block_type = %kind, block_id = ?block.id, "Skipping unknown block type");
            }
            BlockData::Invalid { kind, reason } => {
                tracing::warn!(block_type = %kind, block_id = ?block.id, reason = %reason, "Skipping malformed block");
            }
        }
    }

    fn render_list(&self, ordered: bool, items: &[ListItem], out: &mut String) {
        let tag = if ordered { "ol" } else { "ul" };
        write!(out, r#"<{tag} class="{}-list">"#, self.prefix).unwrap();
        for item in items {
            out.push_str("<li>");
            match item {
                ListItem::Text(text) => out.push_str(&self.trusted(text)),
                ListItem::Nested(nested) => {
                    out.push_str(&self.trusted(&nested.content));
                    if !nested.items.is_empty() {
                        self.render_list(ordered, &nested.items, out);
                    }
                }
            }
            out.push_str("</li>");
        }
        write!(out, "</{tag}>").unwrap();
    }

    fn render_image(&self, block: &Block, image: &ImageData, out: &mut String) {
        let Some(url) = image.url.as_deref() else {
            tracing::warn!(block_id = ?block.id, "Skipping image block without a URL");
            return;
        };
        let url = if self.options.sanitize_urls {
            safe_src(url)
        } else {
            url
        };

        let p = &self.prefix;
        write!(out, r#"<figure class="{p}-image"#).unwrap();
        for (enabled, modifier) in [
            (image.with_border, "bordered"),
            (image.with_background, "background"),
            (image.stretched, "stretched"),
        ] {
            if enabled {
                write!(out, " {p}-image--{modifier}").unwrap();
            }
        }
        write!(
            out,
            r#""><img src="{}" alt="{}" />"#,
            escape_html(url),
            escape_html(&image.caption)
        )
        .unwrap();
        if !image.caption.is_empty() {
            write!(out, "<figcaption>{}</figcaption>", self.trusted(&image.caption)).unwrap();
        }
        out.push_str("</figure>");
    }

    fn render_checklist(&self, items: &[ChecklistItem], out: &mut String) {
        let p = &self.prefix;
        write!(out, r#"<ul class="{p}-checklist">"#).unwrap();
        for item in items {
            let text = self.trusted(&item.text);
            if item.checked {
                write!(
                    out,
                    r#"<li class="{p}-checklist-item {p}-checklist-item--checked"><input type="checkbox" disabled checked /><span><s>{text}</s></span></li>"#
                )
                .unwrap();
            } else {
                write!(
                    out,
                    r#"<li class="{p}-checklist-item"><input type="checkbox" disabled /><span>{text}</span></li>"#
                )
                .unwrap();
            }
        }
        out.push_str("</ul>");
    }

    fn literal_paragraph(&self, text: &str) -> String {
        format!(
            r#"<p class="{}-paragraph">{}</p>"#,
            self.prefix,
            escape_html(text)
        )
    }

    /// Pre-formed markup field, escaped only when hardening is enabled.
    fn trusted<'a>(&self, html: &'a str) -> Cow<'a, str> {
        if self.options.escape_block_html {
            escape_html(html)
        } else {
            Cow::Borrowed(html)
        }
    }
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether input starts like a JSON object or array.
pub(crate) fn looks_structured(input: &str) -> bool {
    input.trim_start().starts_with(['{', '['])
}
