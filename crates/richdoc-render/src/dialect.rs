//! Input dialect detection and dispatch.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::block::{BlockRenderer, looks_structured};
use crate::options::RenderOptions;
use crate::tree::{Node, TreeRenderer};

/// Serialized document dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    /// Nested `doc` node tree from the editing surface.
    Tree,
    /// Flat `{"blocks": [...]}` document.
    Block,
    /// Not a recognizable document; rendered as literal text.
    Text,
}

impl Dialect {
    /// Guess the dialect of serialized input.
    ///
    /// A JSON object with a `blocks` member is [`Dialect::Block`], one with a
    /// `type` member is [`Dialect::Tree`], anything else is [`Dialect::Text`].
    #[must_use]
    pub fn detect(input: &str) -> Self {
        match serde_json::from_str::<Value>(input.trim()) {
            Ok(Value::Object(obj)) if obj.contains_key("blocks") => Self::Block,
            Ok(Value::Object(obj)) if obj.contains_key("type") => Self::Tree,
            _ => Self::Text,
        }
    }

    /// Return dialect as string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Block => "block",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Debug, thiserror::Error)]
#[error("unknown dialect `{0}` (expected tree, block or text)")]
pub struct UnknownDialect(String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Self::Tree),
            "block" => Ok(Self::Block),
            "text" => Ok(Self::Text),
            other => Err(UnknownDialect(other.to_owned())),
        }
    }
}

/// Render serialized input in whichever dialect it is written in.
///
/// Returns `None` when the input is blank, renders to nothing, or looks like
/// a structured document but cannot be decoded.
///
/// # Examples
///
/// ```
/// use richdoc_render::{RenderOptions, render_auto};
///
/// let options = RenderOptions::default();
/// let tree = r#"{"type":"doc","content":[{"type":"horizontalRule"}]}"#;
/// assert_eq!(render_auto(tree, &options).as_deref(), Some("<hr>"));
///
/// let blocks = r#"{"blocks":[{"type":"delimiter"}]}"#;
/// assert_eq!(render_auto(blocks, &options).as_deref(), Some("<hr>"));
/// ```
pub fn render_auto(input: &str, options: &RenderOptions) -> Option<String> {
    render_as(Dialect::detect(input), input, options)
}

/// Render serialized input as the given dialect.
pub fn render_as(dialect: Dialect, input: &str, options: &RenderOptions) -> Option<String> {
    tracing::debug!(%dialect, len = input.len(), "Rendering document");
    match dialect {
        Dialect::Tree => match Node::from_json(input) {
            Ok(node) => Some(TreeRenderer::with_options(options.clone()).render(&node))
                .filter(|html| !html.is_empty()),
            Err(e) if looks_structured(input) => {
                tracing::warn!(error = %e, "Failed to decode tree document");
                None
            }
            Err(_) => Some(TreeRenderer::with_options(options.clone()).render_str(input))
                .filter(|html| !html.is_empty()),
        },
        Dialect::Block | Dialect::Text => {
            BlockRenderer::with_options(options.clone()).render(input)
        }
    }
}
