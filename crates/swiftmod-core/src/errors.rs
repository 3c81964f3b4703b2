//! Error types shared by the swiftmod crates.

use thiserror::Error;

/// Errors while parsing a type spelling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unresolvable type '{text}': {reason}")]
    UnresolvableType { text: String, reason: String },
}

impl ParseError {
    pub fn unresolvable(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnresolvableType {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// The offending type text, verbatim.
    pub fn text(&self) -> &str {
        match self {
            Self::UnresolvableType { text, .. } => text,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::UnresolvableType { reason, .. } => reason,
        }
    }
}
