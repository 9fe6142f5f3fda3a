use std::sync::Arc;

use anyhow::Result;
use desk_blob::{AssetAdapter, AssetUpload, RecordKeyStrategy};
use desk_core::{AdminContext, Fields, Record, RecordStore};
use serde_json::{json, Value};
use tracing::info;

use crate::lifecycle::{EntityDef, EntityLifecycle, Outcome};
use crate::services::to_fields;
use crate::validation::check;

use super::{BlogInput, BlogStatus};

pub const COLLECTION: &str = "blogs";
pub const COVER_FIELD: &str = "coverImage";

const ERROR_MESSAGE: &str = "Blog validation failed";

/// Blogs keep one cover per post at `blogs/{id}.png`, overwritten on edit.
pub fn blog_def() -> EntityDef {
    EntityDef::new(COLLECTION, COVER_FIELD, RecordKeyStrategy::new("png")).with_slug_from("title")
}

pub struct BlogsService {
    lifecycle: EntityLifecycle,
}

impl BlogsService {
    pub fn new(records: Arc<dyn RecordStore>, assets: Arc<AssetAdapter>) -> Self {
        Self {
            lifecycle: EntityLifecycle::new(blog_def(), records, assets),
        }
    }

    pub async fn create(
        &self,
        ctx: &AdminContext,
        input: BlogInput,
        cover: Option<AssetUpload>,
    ) -> Result<Outcome<Record>> {
        check(&input, ERROR_MESSAGE)?;

        let mut fields = to_fields(&input)?;
        for counter in ["likes", "views", "commentsCount"] {
            fields.insert(counter.to_string(), json!(0));
        }

        self.lifecycle.create(ctx, fields, cover).await
    }

    pub async fn update(
        &self,
        ctx: &AdminContext,
        id: &str,
        input: BlogInput,
        cover: Option<AssetUpload>,
    ) -> Result<Outcome<Record>> {
        check(&input, ERROR_MESSAGE)?;
        let fields = to_fields(&input)?;
        self.lifecycle.update(ctx, id, fields, cover).await
    }

    /// Hide a post without deleting it.
    pub async fn archive(&self, ctx: &AdminContext, id: &str) -> Result<Record> {
        let mut fields = Fields::new();
        fields.insert(
            "status".to_string(),
            Value::String(BlogStatus::Archived.as_str().to_string()),
        );
        let record = self.lifecycle.patch(ctx, id, fields).await?;
        info!(id, "blog archived");
        Ok(record)
    }

    pub async fn remove(&self, ctx: &AdminContext, id: &str) -> Result<Outcome<Record>> {
        self.lifecycle.remove(ctx, id).await
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        self.lifecycle.get(id).await
    }

    pub async fn find(&self) -> Result<Vec<Record>> {
        self.lifecycle.find().await
    }

    pub async fn cover(&self, record: &Record) -> Result<Option<bytes::Bytes>> {
        self.lifecycle.open_asset(record).await
    }
}
