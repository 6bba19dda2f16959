//! Error types for document decoding.

/// Error produced when a serialized document cannot be decoded.
///
/// Rendering never fails; this error only surfaces from the explicit decode
/// entry points ([`Node::from_json`](crate::Node::from_json),
/// [`BlockDocument::from_json`](crate::BlockDocument::from_json)).
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Input is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is valid JSON but not a document of the expected shape.
    #[error("unexpected document shape: {0}")]
    Shape(String),
}
