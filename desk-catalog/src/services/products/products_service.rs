use std::sync::Arc;

use anyhow::Result;
use desk_blob::{AssetAdapter, AssetUpload, TimestampedKeyStrategy};
use desk_core::{AdminContext, Record, RecordStore};

use crate::lifecycle::{EntityDef, EntityLifecycle, Outcome};
use crate::services::to_fields;
use crate::validation::check;

use super::ProductInput;

pub const COLLECTION: &str = "products";
pub const IMAGE_FIELD: &str = "image";

const ERROR_MESSAGE: &str = "Product validation failed";

/// Each product image upload gets its own key; the replaced one is
/// cleaned up after the record points at the new image.
pub fn product_def() -> EntityDef {
    EntityDef::new(COLLECTION, IMAGE_FIELD, TimestampedKeyStrategy)
}

pub struct ProductsService {
    lifecycle: EntityLifecycle,
}

impl ProductsService {
    pub fn new(records: Arc<dyn RecordStore>, assets: Arc<AssetAdapter>) -> Self {
        Self {
            lifecycle: EntityLifecycle::new(product_def(), records, assets),
        }
    }

    pub async fn create(
        &self,
        ctx: &AdminContext,
        input: ProductInput,
        image: Option<AssetUpload>,
    ) -> Result<Outcome<Record>> {
        check(&input, ERROR_MESSAGE)?;
        let fields = to_fields(&input)?;
        self.lifecycle.create(ctx, fields, image).await
    }

    pub async fn update(
        &self,
        ctx: &AdminContext,
        id: &str,
        input: ProductInput,
        image: Option<AssetUpload>,
    ) -> Result<Outcome<Record>> {
        check(&input, ERROR_MESSAGE)?;
        let fields = to_fields(&input)?;
        self.lifecycle.update(ctx, id, fields, image).await
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
}
