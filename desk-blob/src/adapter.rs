use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::{AssetReceipt, AssetStore, AssetUpload, BlobConfig, BlobError, BlobResult};

/// The asset adapter - what catalog services embed to talk to the blob store
pub struct AssetAdapter {
    store: Arc<dyn AssetStore>,
    config: BlobConfig,
}

impl AssetAdapter {
    pub fn new<S: AssetStore + 'static>(store: S, config: BlobConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Share a store that is also held elsewhere (tests keep a handle to inspect it).
    pub fn from_arc(store: Arc<dyn AssetStore>, config: BlobConfig) -> Self {
        Self { store, config }
    }

    /// Size and content-type guard, without touching the store.
    pub fn check(&self, upload: &AssetUpload) -> BlobResult<()> {
        let size = upload.size();
        if size > self.config.max_blob_bytes {
            return Err(BlobError::TooLarge {
                size,
                max: self.config.max_blob_bytes,
            });
        }

        match upload.effective_content_type().as_deref() {
            Some(ct) if !self.config.accepts(ct) => Err(BlobError::ContentTypeNotAllowed {
                content_type: ct.to_string(),
            }),
            None if self.config.require_content_type => {
                Err(BlobError::invalid("Asset content type is required"))
            }
            _ => Ok(()),
        }
    }

    /// Validate and store an upload under `key`.
    pub async fn put(&self, key: &str, upload: AssetUpload) -> BlobResult<AssetReceipt> {
        self.check(&upload)?;
        let content_type = upload.effective_content_type();

        if key.trim().is_empty() {
            return Err(BlobError::invalid("Asset key must not be empty"));
        }

        let result = self
            .store
            .put(key, content_type.as_deref(), upload.bytes)
            .await?;

        debug!("stored asset {key} ({} bytes)", result.size_bytes);

        let mut receipt = AssetReceipt::new(key.to_string(), self.store.url_for(key), result.size_bytes);
        if let Some(ct) = content_type {
            receipt = receipt.with_content_type(ct);
        }
        if let Some(etag) = result.etag {
            receipt = receipt.with_etag(etag);
        }

        Ok(receipt)
    }

    /// Read the bytes a reference points at.
    pub async fn open(&self, reference: &str) -> BlobResult<Bytes> {
        let key = self.resolve_key(reference)?;
        Ok(self.store.get(&key).await?.body)
    }

    /// Delete the asset behind a reference.
    pub async fn delete(&self, reference: &str) -> BlobResult<()> {
        let key = self.resolve_key(reference)?;
        self.store.delete(&key).await?;
        debug!("deleted asset {key}");
        Ok(())
    }

    /// Storage key behind a reference, if it belongs to this store.
    pub fn key_for(&self, reference: &str) -> Option<String> {
        self.store.key_for_url(reference)
    }

    fn resolve_key(&self, reference: &str) -> BlobResult<String> {
        self.key_for(reference)
            .ok_or_else(|| BlobError::foreign(reference))
    }

    pub fn config(&self) -> &BlobConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryAssetStore;

    fn adapter() -> AssetAdapter {
        AssetAdapter::new(MemoryAssetStore::new(), BlobConfig::new().with_max_blob_bytes(8))
    }

    #[tokio::test]
    async fn put_then_open_by_url() {
        let adapter = adapter();
        let upload = AssetUpload::new(&b"png!"[..]).with_filename("a.png");

        let receipt = adapter.put("blogs/b1.png", upload).await.unwrap();
        assert_eq!(receipt.key, "blogs/b1.png");
        assert_eq!(receipt.content_type.as_deref(), Some("image/png"));

        let bytes = adapter.open(&receipt.url).await.unwrap();
        assert_eq!(&bytes[..], b"png!");
    }

    #[tokio::test]
    async fn rejects_oversized_and_wrong_type() {
        let adapter = adapter();

        let err = adapter
            .put("k", AssetUpload::new(vec![0u8; 9]).with_content_type("image/png"))
            .await
            .unwrap_err();
        assert!(matches!(err, BlobError::TooLarge { size: 9, max: 8 }));

        let err = adapter
            .put("k", AssetUpload::new(&b"x"[..]).with_filename("notes.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, BlobError::ContentTypeNotAllowed { .. }));
        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn delete_missing_and_foreign_references() {
        let adapter = adapter();

        let err = adapter.delete("blogs/gone.png").await.unwrap_err();
        assert!(err.is_not_found());

        let err = adapter.delete("https://elsewhere.test/x.png").await.unwrap_err();
        assert!(matches!(err, BlobError::ForeignReference { .. }));
    }
}
