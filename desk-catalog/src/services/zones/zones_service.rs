use std::sync::Arc;

use anyhow::Result;
use desk_core::{AdminContext, DeskError, Record, RecordStore};
use tracing::{info, instrument};

use crate::lifecycle::{now_ts, CREATED_AT, UPDATED_AT};
use crate::services::to_fields;
use crate::validation::check;

use super::ZoneInput;

pub const COLLECTION: &str = "zones";

const ERROR_MESSAGE: &str = "Zone validation failed";

/// Zones carry no asset, so they go straight to the record store.
pub struct ZonesService {
    records: Arc<dyn RecordStore>,
}

impl ZonesService {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    fn store_failed(action: &str, err: anyhow::Error) -> anyhow::Error {
        DeskError::collaborator(format!("Failed to {action} zone"), err)
    }

    #[instrument(skip(self, ctx, input), fields(principal = %ctx.principal, request_id = %ctx.request_id))]
    pub async fn create(&self, ctx: &AdminContext, input: ZoneInput) -> Result<Record> {
        check(&input, ERROR_MESSAGE)?;

        let now = now_ts();
        let mut fields = to_fields(&input)?;
        fields.insert(CREATED_AT.to_string(), now.clone());
        fields.insert(UPDATED_AT.to_string(), now);

        let record = self
            .records
            .create(COLLECTION, fields)
            .await
            .map_err(|e| Self::store_failed("create", e))?;
        info!(id = %record.id, "zone created");
        Ok(record)
    }

    #[instrument(skip(self, ctx, input), fields(principal = %ctx.principal, request_id = %ctx.request_id))]
    pub async fn update(&self, ctx: &AdminContext, id: &str, input: ZoneInput) -> Result<Record> {
        check(&input, ERROR_MESSAGE)?;

        let mut fields = to_fields(&input)?;
        fields.insert(UPDATED_AT.to_string(), now_ts());

        let record = self
            .records
            .patch(COLLECTION, id, fields)
            .await
            .map_err(|e| Self::store_failed("update", e))?;
        info!(id, "zone updated");
        Ok(record)
    }

    #[instrument(skip(self, ctx), fields(principal = %ctx.principal, request_id = %ctx.request_id))]
    pub async fn remove(&self, ctx: &AdminContext, id: &str) -> Result<Record> {
        let record = self
            .records
            .remove(COLLECTION, id)
            .await
            .map_err(|e| Self::store_failed("delete", e))?;
        info!(id, "zone deleted");
        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Result<Record> {
        self.records
            .get(COLLECTION, id)
            .await
            .map_err(|e| Self::store_failed("load", e))
    }

    pub async fn find(&self) -> Result<Vec<Record>> {
        self.records
            .find(COLLECTION)
            .await
            .map_err(|e| Self::store_failed("list", e))
    }
}
