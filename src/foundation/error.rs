/// Convenience result type used across tagmontage.
pub type MontageResult<T> = Result<T, MontageError>;

/// Top-level error taxonomy used by the generation pipeline.
///
/// Only [`MontageError::InvalidInput`] and [`MontageError::Encode`] abort a request. Decode
/// failures are recovered per image and collaborator failures fall back to direct composition;
/// both variants exist so the recovering layer can log what it skipped.
#[derive(thiserror::Error, Debug)]
pub enum MontageError {
    /// Request-level input that cannot be rendered (no images, bad options, bad canvas bounds).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A single source image could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The output writer rejected the rendered frames.
    #[error("encode error: {0}")]
    Encode(String),

    /// The prompt elaboration service was unreachable or replied with garbage.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MontageError {
    /// Build a [`MontageError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`MontageError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`MontageError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`MontageError::Collaborator`] value.
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
