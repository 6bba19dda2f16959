//! Rich-text document model and HTML renderers.
//!
//! Two serialized document dialects render to the same HTML fragment output:
//!
//! - **Tree dialect** ([`Node`], [`TreeRenderer`]): the nested `doc` / node /
//!   marks JSON written by the rich-text editing surface. Every raw string is
//!   escaped; unknown nodes degrade to their children.
//! - **Block dialect** ([`BlockDocument`], [`BlockRenderer`]): a flat list of
//!   typed blocks from the older content pipeline. Text fields are trusted
//!   pre-formed markup unless [`RenderOptions::escape_block_html`] is set.
//!
//! [`format_prose`] turns a small markdown subset in generated prose into HTML,
//! and [`render_auto`] dispatches serialized input to the right renderer.
//!
//! Rendering is synchronous and pure: the same input always produces the same
//! bytes, and renderers can be shared across threads.
//!
//! # Example
//!
//! ```
//! use richdoc_render::TreeRenderer;
//!
//! let json = r#"{"type":"doc","content":[{"type":"paragraph","content":[
//!     {"type":"text","text":"<b>hi</b>"}]}]}"#;
//! assert_eq!(
//!     TreeRenderer::new().render_str(json),
//!     "<p>&lt;b&gt;hi&lt;/b&gt;</p>"
//! );
//! ```

mod block;
mod code_block;
mod dialect;
mod error;
mod escape;
mod options;
mod prose;
mod tree;
mod url;

pub use block::{
    Block, BlockData, BlockDocument, BlockRenderer, ChecklistItem, ImageData, ListItem,
    NestedListItem,
};
pub use code_block::{CodeHighlighter, PlainHighlighter};
pub use dialect::{Dialect, UnknownDialect, render_as, render_auto};
pub use error::DocumentError;
pub use escape::escape_html;
pub use options::{DEFAULT_CLASS_PREFIX, DEFAULT_CODE_LANGUAGE, RenderOptions};
pub use prose::format_prose;
pub use tree::{Attrs, Mark, MarkKind, Node, NodeKind, TreeRenderer};
