#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use desk_blob::{
    AssetAdapter, AssetStore, AssetUpload, BlobConfig, BlobError, BlobResult, GetResult,
    MemoryAssetStore, PutResult,
};
use desk_core::{AdminContext, Fields, MemoryRecordStore, Record, RecordStore};
use serde_json::{json, Value};

/// Memory asset store with switchable failures and call counters.
#[derive(Default)]
pub struct FlakyAssetStore {
    pub inner: MemoryAssetStore,
    pub fail_put: AtomicBool,
    pub fail_delete: AtomicBool,
    pub puts: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl FlakyAssetStore {
    pub fn fail_puts(&self) {
        self.fail_put.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

fn outage() -> BlobError {
    BlobError::backend(std::io::Error::new(std::io::ErrorKind::Other, "blob store unavailable"))
}

#[async_trait]
impl AssetStore for FlakyAssetStore {
    async fn put(&self, key: &str, content_type: Option<&str>, body: Bytes) -> BlobResult<PutResult> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(outage());
        }
        self.inner.put(key, content_type, body).await
    }

    async fn get(&self, key: &str) -> BlobResult<GetResult> {
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(outage());
        }
        self.inner.delete(key).await
    }

    fn url_for(&self, key: &str) -> String {
        self.inner.url_for(key)
    }

    fn key_for_url(&self, reference: &str) -> Option<String> {
        self.inner.key_for_url(reference)
    }
}

/// Memory record store whose `patch` can be made to fail.
#[derive(Default)]
pub struct FlakyRecordStore {
    pub inner: MemoryRecordStore,
    pub fail_patch: AtomicBool,
    pub creates: AtomicUsize,
    pub patches: AtomicUsize,
}

impl FlakyRecordStore {
    pub fn fail_patches(&self) {
        self.fail_patch.store(true, Ordering::SeqCst);
    }

    pub fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn patch_count(&self) -> usize {
        self.patches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for FlakyRecordStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<Record> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(collection, fields).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Record> {
        self.inner.get(collection, id).await
    }

    async fn find(&self, collection: &str) -> Result<Vec<Record>> {
        self.inner.find(collection).await
    }

    async fn patch(&self, collection: &str, id: &str, fields: Fields) -> Result<Record> {
        self.patches.fetch_add(1, Ordering::SeqCst);
        if self.fail_patch.load(Ordering::SeqCst) {
            anyhow::bail!("document store timed out");
        }
        self.inner.patch(collection, id, fields).await
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<Record> {
        self.inner.remove(collection, id).await
    }
}

pub struct Harness {
    pub records: Arc<FlakyRecordStore>,
    pub assets: Arc<FlakyAssetStore>,
    pub adapter: Arc<AssetAdapter>,
    pub ctx: AdminContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(BlobConfig::default())
    }

    pub fn with_config(config: BlobConfig) -> Self {
        let records = Arc::new(FlakyRecordStore::default());
        let assets = Arc::new(FlakyAssetStore::default());
        let adapter = Arc::new(AssetAdapter::from_arc(
            Arc::clone(&assets) as Arc<dyn AssetStore>,
            config,
        ));
        Self {
            records,
            assets,
            adapter,
            ctx: AdminContext::new("admin-uid"),
        }
    }

    pub fn records(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.records) as Arc<dyn RecordStore>
    }

    pub async fn stored_keys(&self) -> Vec<String> {
        self.assets.inner.keys().await
    }
}

pub fn png(name: &str) -> AssetUpload {
    AssetUpload::new(&b"\x89PNG\r\n"[..]).with_filename(name)
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

pub fn blog_fields(title: &str) -> Fields {
    fields(json!({
        "title": title,
        "category": "news",
        "status": "draft",
        "readTime": 3,
        "content": "body",
    }))
}
