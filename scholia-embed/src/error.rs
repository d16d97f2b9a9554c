//! Error types for the model and store collaborators.

/// Result type for model/store operations.
///
/// Convenience alias using [`ModelError`] as the error type, used throughout
/// the crate and by callers driving the capability traits.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Error type for the externally supplied model and store capabilities.
///
/// The retrieval core has no fallback strategy for a missing or failing
/// model, so failures of the embedding function, the pairwise scorer, or the
/// vector store all surface through the single [`ModelError::Dependency`]
/// kind rather than being masked internally.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// An external model or store call failed.
    #[error("Dependency failure: {source}")]
    Dependency {
        #[from]
        source: anyhow::Error,
    },

    /// Input that a capability cannot meaningfully process.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// IO errors from providers that read local model files.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Async task join errors from providers that offload blocking inference.
    #[error("Async task failed: {source}")]
    AsyncTask {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl ModelError {
    /// Wrap any error from an external model or store as a dependency failure.
    pub fn dependency<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Dependency {
            source: anyhow::Error::new(source),
        }
    }

    /// Create an invalid-input error with a custom message.
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
