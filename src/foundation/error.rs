/// Convenience result type used across Remedia.
pub type RemediaResult<T> = Result<T, RemediaError>;

/// Top-level error taxonomy used by conversion APIs.
#[derive(thiserror::Error, Debug)]
pub enum RemediaError {
    /// Source resource unreadable, corrupt, or of an unsupported type.
    #[error("decode error: {0}")]
    Decode(String),

    /// A precondition on caller-supplied input was violated.
    #[error("input error: {0}")]
    Input(String),

    /// Requested target has no encoder and no fallback mapping.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RemediaError {
    /// Build a [`RemediaError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`RemediaError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`RemediaError::UnsupportedFormat`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
