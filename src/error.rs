use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the editing engine.
///
/// Empty-stack undo/redo and the degenerate resize-and-rotate case are
/// defined no-ops, not errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A persisted record's `type` discriminator doesn't match the shape
    /// variant it was decoded against. Fatal to that record only; callers
    /// may skip it and keep decoding the rest of the list.
    #[error("wrong shape type: expected {expected:?}, found {found:?}")]
    WrongShapeType {
        expected: &'static str,
        found: String,
    },

    /// A persisted record names a shape variant this engine doesn't know.
    #[error("unsupported shape type {0:?}")]
    UnsupportedShapeType(String),

    /// A persisted record carried a field the engine cannot interpret
    /// (malformed id, bad color string, ...).
    #[error("invalid shape record: {0}")]
    InvalidRecord(String),

    /// An operation referenced a shape that is no longer in the drawing.
    #[error("shape {0} not found in drawing")]
    ShapeNotFound(Uuid),

    #[error("failed to serialize shape: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations
pub type EngineResult<T = ()> = Result<T, EngineError>;
