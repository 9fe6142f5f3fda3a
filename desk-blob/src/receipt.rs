/// What the adapter hands back after storing an asset.
///
/// `url` is the reference that gets written into the owning record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReceipt {
    pub key: String,
    pub url: String,
    pub size_bytes: u64,
    pub content_type: Option<String>,
    pub etag: Option<String>,
}

impl AssetReceipt {
    pub fn new(key: String, url: String, size_bytes: u64) -> Self {
        Self {
            key,
            url,
            size_bytes,
            content_type: None,
            etag: None,
        }
    }

    pub fn with_content_type(mut self, content_type: String) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn with_etag(mut self, etag: String) -> Self {
        self.etag = Some(etag);
        self
    }
}
