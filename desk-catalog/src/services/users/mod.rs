//! Read-only view over the `users` collection written by the storefront.

use std::sync::Arc;

use anyhow::Result;
use desk_core::{DeskError, Record, RecordStore};
use serde::Serialize;

pub const COLLECTION: &str = "users";

const NO_NAME: &str = "No name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    pub created_at: String,
}

impl UserProfile {
    pub fn from_record(record: &Record) -> Self {
        let text = |key: &str| record.non_empty_str(key).unwrap_or_default().to_string();
        Self {
            uid: record.id.clone(),
            full_name: record.non_empty_str("fullName").unwrap_or(NO_NAME).to_string(),
            email: text("email"),
            phone: text("phone"),
            photo_url: text("photoURL"),
            created_at: text("createdAt"),
        }
    }
}

pub struct UsersService {
    records: Arc<dyn RecordStore>,
}

impl UsersService {
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self { records }
    }

    pub async fn find(&self) -> Result<Vec<UserProfile>> {
        let records = self
            .records
            .find(COLLECTION)
            .await
            .map_err(|e| DeskError::collaborator("Failed to list users", e))?;
        Ok(records.iter().map(UserProfile::from_record).collect())
    }

    pub async fn get(&self, uid: &str) -> Result<UserProfile> {
        let record = self
            .records
            .get(COLLECTION, uid)
            .await
            .map_err(|e| DeskError::collaborator("Failed to load user", e))?;
        Ok(UserProfile::from_record(&record))
    }
}
