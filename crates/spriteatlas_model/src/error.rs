use spriteatlas_collections::EmptyName;
use thiserror::Error;

pub type Result<T, E = AtlasError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtlasError {
    /// An empty name was passed to a by-name lookup.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] EmptyName),

    /// Structurally inconsistent input, such as out of range frame indices.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("atlas was accessed after its pixel buffer had been released")]
    UseAfterRelease,
}

impl AtlasError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}
