//! Errors raised by the presentation layer.
use thiserror::Error;

/// Result type for presentation operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

#[derive(Error, Debug)]
pub enum OoxmlError {
    /// Package layer failure
    #[error("OPC error: {0}")]
    Opc(#[from] crate::ooxml::opc::error::OpcError),

    /// Malformed or unexpected XML content
    #[error("XML error: {0}")]
    Xml(String),

    #[error("Part not found: {0}")]
    PartNotFound(String),

    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// No placeholder in the inheritance chain supplies the requested value
    #[error("Placeholder not found: {0}")]
    PlaceholderNotFound(String),

    /// The target shape is not in a state that allows the operation
    #[error("State mismatch: {0}")]
    StateMismatch(String),

    #[error("Shape not found: {0}")]
    ShapeNotFound(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Image bytes could not be identified or measured
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
