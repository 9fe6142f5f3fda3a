use async_trait::async_trait;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entity attributes as stored in the document database.
pub type Fields = Map<String, Value>;

/// A document plus the id the record store assigned to it.
///
/// Serializes flat (`{"id": ..., "title": ...}`), the shape the
/// dashboard reads back from the document database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    /// A string field that is present and not blank.
    ///
    /// Asset references use `""` for "no asset", so this is how callers
    /// ask whether a record actually points at a blob.
    pub fn non_empty_str(&self, key: &str) -> Option<&str> {
        self.str_field(key).filter(|s| !s.trim().is_empty())
    }
}

/// Document store capability, one collection per entity kind:
///
/// - `create` → insert, store assigns the id
/// - `get`    → fetch one by id (`NotFound` when absent)
/// - `find`   → list a whole collection
/// - `patch`  → merge the given fields into an existing document
/// - `remove` → delete by id, returning what was removed
///
/// Implementations report a missing document with
/// `DeskError::not_found` so callers can tell it apart from a
/// failing backend.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, collection: &str, fields: Fields) -> Result<Record>;

    async fn get(&self, collection: &str, id: &str) -> Result<Record>;

    async fn find(&self, collection: &str) -> Result<Vec<Record>>;

    async fn patch(&self, collection: &str, id: &str, fields: Fields) -> Result<Record>;

    async fn remove(&self, collection: &str, id: &str) -> Result<Record>;
}
