use thiserror::Error;

/// Result type for asset operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur during asset operations
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Asset not found: {key}")]
    NotFound { key: String },

    #[error("Invalid request: {message}")]
    Invalid { message: String },

    #[error("Asset size {size} exceeds maximum {max}")]
    TooLarge { size: u64, max: u64 },

    #[error("Content type not allowed: {content_type}")]
    ContentTypeNotAllowed { content_type: String },

    #[error("Reference does not belong to this store: {reference}")]
    ForeignReference { reference: String },

    #[error("Storage backend error: {source}")]
    Backend {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl BlobError {
    /// Create a backend error from any error type
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            source: Box::new(error),
        }
    }

    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(key: S) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn foreign<S: Into<String>>(reference: S) -> Self {
        Self::ForeignReference {
            reference: reference.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the request itself was rejected before reaching the backend.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Invalid { .. }
                | Self::TooLarge { .. }
                | Self::ContentTypeNotAllowed { .. }
                | Self::ForeignReference { .. }
        )
    }
}
