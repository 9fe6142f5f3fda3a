use async_trait::async_trait;
use bytes::Bytes;

use crate::{AssetUpload, BlobResult};

/// Core asset storage operations - implemented by every backend
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `body` under `key`, replacing whatever was there.
    async fn put(&self, key: &str, content_type: Option<&str>, body: Bytes)
        -> BlobResult<PutResult>;

    /// Read an asset back.
    async fn get(&self, key: &str) -> BlobResult<GetResult>;

    /// Delete an asset. Backends that can tell report a missing key as
    /// `BlobError::NotFound`.
    async fn delete(&self, key: &str) -> BlobResult<()>;

    /// Retrievable URL for a stored key.
    fn url_for(&self, key: &str) -> String;

    /// Map a reference (a URL produced by `url_for`, or a bare key) back
    /// to its key. `None` when the reference points somewhere else.
    fn key_for_url(&self, reference: &str) -> Option<String>;
}

/// Result of a successful put operation
#[derive(Debug, Clone)]
pub struct PutResult {
    pub etag: Option<String>,
    pub size_bytes: u64,
}

/// Result of a get operation
#[derive(Debug, Clone)]
pub struct GetResult {
    pub body: Bytes,
    pub content_type: Option<String>,
    pub etag: Option<String>,
}

/// Shared `key_for_url` logic: strip `base/`, accept bare keys, reject
/// anything else that looks like a URL.
pub(crate) fn key_under_base(base: &str, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    let base = base.trim_end_matches('/');
    if let Some(rest) = reference.strip_prefix(base) {
        if rest.starts_with('/') {
            let key = rest.trim_start_matches('/');
            return (!key.is_empty()).then(|| key.to_string());
        }
    }

    if reference.contains("://") {
        return None;
    }
    Some(reference.trim_start_matches('/').to_string())
}

/// Strategy for generating asset keys
pub trait AssetKeyStrategy: Send + Sync {
    fn object_key(&self, collection: &str, record_id: &str, upload: &AssetUpload) -> String;
}

/// One fixed key per record: `collection/record_id.ext`.
///
/// A replacement upload overwrites the previous asset in place.
#[derive(Debug, Clone)]
pub struct RecordKeyStrategy {
    extension: String,
}

impl RecordKeyStrategy {
    pub fn new<S: Into<String>>(extension: S) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl AssetKeyStrategy for RecordKeyStrategy {
    fn object_key(&self, collection: &str, record_id: &str, _upload: &AssetUpload) -> String {
        format!("{}/{}.{}", collection, record_id, self.extension)
    }
}

/// A fresh key per upload: `collection/record_id-millis-filename`.
///
/// Replacements land next to the previous asset, which then has to be
/// deleted separately.
#[derive(Debug, Clone, Default)]
pub struct TimestampedKeyStrategy;

impl AssetKeyStrategy for TimestampedKeyStrategy {
    fn object_key(&self, collection: &str, record_id: &str, upload: &AssetUpload) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let filename = upload
            .filename
            .as_deref()
            .map(sanitize_filename)
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| "asset".to_string());

        format!("{}/{}-{}-{}", collection, record_id, millis, filename)
    }
}

/// Lowercase, keep `[a-z0-9.]`, collapse everything else to single `-`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut out = String::with_capacity(base.len());
    let mut prev_dash = false;

    for c in base.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' {
            out.push(c);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }

    out.trim_matches(|c| c == '-' || c == '.').to_string()
}
