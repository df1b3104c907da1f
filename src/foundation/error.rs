/// Convenience result type used across the pixel pipeline.
pub type PixelResult<T> = Result<T, PixelError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixelError {
    /// A caller broke an operation's contract (wrong format family, bad dimensions,
    /// unsupported level count or target). The operation produced no output.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid configuration, or a collaborator required by the request is not installed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or collaborators.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixelError {
    /// Build a [`PixelError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`PixelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
