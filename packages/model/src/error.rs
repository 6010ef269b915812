use thiserror::Error;

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Unknown element kind: {0}")]
    UnknownElementKind(String),

    #[error("Invalid geometry for element {id}: {width}x{height}")]
    InvalidGeometry { id: String, width: f64, height: f64 },

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Document has no pages")]
    NoPages,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
