//! Block dialect: flat `{"blocks": [...]}` documents.

mod model;
mod renderer;

pub use model::{Block, BlockData, BlockDocument, ChecklistItem, ImageData, ListItem, NestedListItem};
pub use renderer::BlockRenderer;
pub(crate) use renderer::looks_structured;
