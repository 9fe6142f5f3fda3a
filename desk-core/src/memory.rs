use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::DeskError;
use crate::records::{Fields, Record, RecordStore};

/// In-process record store.
///
/// Documents live in one map per collection, ordered by id the way a
/// document database lists them. Ids are random and never reused.
#[derive(Default)]
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Fields>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub async fn len(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map(|c| c.len()).unwrap_or(0)
    }

    fn new_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn not_found(collection: &str, id: &str) -> anyhow::Error {
        DeskError::not_found(format!("No record '{id}' in '{collection}'"))
            .with_data(serde_json::json!({ "collection": collection, "id": id }))
            .into_anyhow()
    }

    fn without_id(mut fields: Fields) -> Fields {
        fields.remove("id");
        fields
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, collection: &str, fields: Fields) -> Result<Record> {
        let id = Self::new_id();
        let fields = Self::without_id(fields);

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), fields.clone());

        debug!("created {collection}/{id}");
        Ok(Record::new(id, fields))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Record> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|fields| Record::new(id, fields.clone()))
            .ok_or_else(|| Self::not_found(collection, id))
    }

    async fn find(&self, collection: &str) -> Result<Vec<Record>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .into_iter()
            .flat_map(|c| c.iter())
            .map(|(id, fields)| Record::new(id.clone(), fields.clone()))
            .collect())
    }

    async fn patch(&self, collection: &str, id: &str, fields: Fields) -> Result<Record> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| Self::not_found(collection, id))?;

        for (k, v) in Self::without_id(fields) {
            existing.insert(k, v);
        }

        debug!("patched {collection}/{id}");
        Ok(Record::new(id, existing.clone()))
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<Record> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|c| c.remove(id))
            .ok_or_else(|| Self::not_found(collection, id))?;

        debug!("removed {collection}/{id}");
        Ok(Record::new(id, removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: serde_json::Value) -> Fields {
        v.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn create_assigns_id_and_ignores_supplied_one() {
        let store = MemoryRecordStore::new();
        let rec = store
            .create("zones", fields(json!({"id": "mine", "name": "CBD"})))
            .await
            .unwrap();

        assert_ne!(rec.id, "mine");
        assert!(rec.get("id").is_none());
        assert_eq!(store.get("zones", &rec.id).await.unwrap(), rec);
    }

    #[tokio::test]
    async fn patch_merges_fields() {
        let store = MemoryRecordStore::new();
        let rec = store
            .create("blogs", fields(json!({"title": "A", "status": "draft"})))
            .await
            .unwrap();

        let patched = store
            .patch("blogs", &rec.id, fields(json!({"status": "archived"})))
            .await
            .unwrap();

        assert_eq!(patched.str_field("title"), Some("A"));
        assert_eq!(patched.str_field("status"), Some("archived"));
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let store = MemoryRecordStore::new();

        let err = store.get("blogs", "nope").await.unwrap_err();
        assert!(DeskError::is_not_found(&err));

        let err = store.patch("blogs", "nope", Fields::new()).await.unwrap_err();
        assert!(DeskError::is_not_found(&err));

        let err = store.remove("blogs", "nope").await.unwrap_err();
        assert!(DeskError::is_not_found(&err));
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = MemoryRecordStore::new();
        let blog = store.create("blogs", Fields::new()).await.unwrap();
        store.create("zones", Fields::new()).await.unwrap();

        assert_eq!(store.find("blogs").await.unwrap().len(), 1);
        assert!(store.get("zones", &blog.id).await.is_err());

        store.remove("blogs", &blog.id).await.unwrap();
        assert_eq!(store.len("blogs").await, 0);
        assert_eq!(store.len("zones").await, 1);
    }
}
