//! Tree dialect: nested `doc` documents from the rich-text editing surface.

mod model;
mod renderer;

pub use model::{Attrs, Mark, MarkKind, Node, NodeKind};
pub use renderer::TreeRenderer;
