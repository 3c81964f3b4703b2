//! Error types for code generation.

use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Rejected before any text is emitted, e.g. an empty signature list.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A type that does not parse or has no payload rendering.
    #[error("Unsupported type '{type_text}' in {signature}: {reason}")]
    UnsupportedType {
        signature: String,
        type_text: String,
        reason: String,
    },

    /// Inconsistent output, e.g. two variants with the same tag.
    #[error("Generation of {union_name} failed: {message}")]
    GenerationFailed {
        union_name: String,
        message: String,
    },

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// Invalid options file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    pub(crate) fn generation_failed(union_name: &str, message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            union_name: union_name.to_string(),
            message: message.into(),
        }
    }
}
