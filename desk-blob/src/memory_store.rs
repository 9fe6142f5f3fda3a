use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::store::key_under_base;
use crate::{AssetStore, BlobError, BlobResult, GetResult, PutResult};

const MEMORY_BASE_URL: &str = "memory://assets";

#[derive(Debug, Clone)]
struct StoredAsset {
    body: Bytes,
    content_type: Option<String>,
    etag: String,
}

/// In-process asset store. URLs look like `memory://assets/{key}`.
#[derive(Default)]
pub struct MemoryAssetStore {
    objects: RwLock<HashMap<String, StoredAsset>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.objects.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn put(
        &self,
        key: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> BlobResult<PutResult> {
        let size_bytes = body.len() as u64;
        let etag = format!("{:x}-{}", chrono::Utc::now().timestamp_micros(), size_bytes);

        self.objects.write().await.insert(
            key.to_string(),
            StoredAsset {
                body,
                content_type: content_type.map(str::to_string),
                etag: etag.clone(),
            },
        );

        Ok(PutResult {
            etag: Some(etag),
            size_bytes,
        })
    }

    async fn get(&self, key: &str) -> BlobResult<GetResult> {
        let objects = self.objects.read().await;
        let stored = objects.get(key).ok_or_else(|| BlobError::not_found(key))?;
        Ok(GetResult {
            body: stored.body.clone(),
            content_type: stored.content_type.clone(),
            etag: Some(stored.etag.clone()),
        })
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        self.objects
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| BlobError::not_found(key))
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{}", MEMORY_BASE_URL, key)
    }

    fn key_for_url(&self, reference: &str) -> Option<String> {
        key_under_base(MEMORY_BASE_URL, reference)
    }
}
