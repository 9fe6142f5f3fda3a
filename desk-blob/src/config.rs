/// Configuration for asset uploads
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Absolute max size allowed for a single asset (safety guard)
    pub max_blob_bytes: u64,

    /// Accepted content types. An entry ending in `/` matches a whole
    /// family (`image/` accepts `image/png`, `image/webp`, ...).
    /// Empty means anything goes.
    pub allowed_content_types: Vec<String>,

    /// Reject uploads whose content type is neither declared nor
    /// guessable from the filename.
    pub require_content_type: bool,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            max_blob_bytes: 10 * 1024 * 1024, // 10MB
            allowed_content_types: vec!["image/".to_string()],
            require_content_type: false,
        }
    }
}

impl BlobConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_blob_bytes(mut self, bytes: u64) -> Self {
        self.max_blob_bytes = bytes;
        self
    }

    pub fn with_allowed_content_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_content_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Accept any content type.
    pub fn allow_any_content_type(mut self) -> Self {
        self.allowed_content_types.clear();
        self
    }

    pub fn require_content_type(mut self) -> Self {
        self.require_content_type = true;
        self
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        if self.allowed_content_types.is_empty() {
            return true;
        }
        let content_type = content_type.trim().to_ascii_lowercase();
        self.allowed_content_types.iter().any(|allowed| {
            let allowed = allowed.trim().to_ascii_lowercase();
            if allowed.ends_with('/') {
                content_type.starts_with(&allowed)
            } else {
                content_type == allowed
            }
        })
    }
}
