//! Typed settings read from a [`DeskConfigSnapshot`].

use anyhow::Result;
use desk_blob::{AssetAdapter, BlobConfig, MemoryAssetStore, S3AssetStore, S3Config};
use desk_core::DeskConfigSnapshot;
use tracing::info;

pub const ENV_PREFIX: &str = "SHOPDESK__";

/// Upload guard from `assets.max_bytes` / `assets.allowed_content_types`.
/// An explicit `*` allows any content type.
pub fn blob_config(config: &DeskConfigSnapshot) -> BlobConfig {
    let mut blob = BlobConfig::new();
    if let Some(max) = config.get_u64("assets.max_bytes") {
        blob = blob.with_max_blob_bytes(max);
    }
    match config.get_list("assets.allowed_content_types") {
        Some(types) if types.iter().any(|t| t == "*") => blob = blob.allow_any_content_type(),
        Some(types) if !types.is_empty() => blob = blob.with_allowed_content_types(types),
        _ => {}
    }
    if config.get_bool("assets.require_content_type") == Some(true) {
        blob = blob.require_content_type();
    }
    blob
}

/// S3 settings, present only when `s3.bucket` is configured.
pub fn s3_config(config: &DeskConfigSnapshot) -> Result<Option<S3Config>> {
    if config.get("s3.bucket").is_none() {
        return Ok(None);
    }
    Ok(Some(S3Config {
        bucket: config.require("s3.bucket")?,
        region: config.require("s3.region")?,
        endpoint_url: config.require("s3.endpoint_url")?,
        access_key_id: config.require("s3.access_key_id")?,
        secret_access_key: config.require("s3.secret_access_key")?,
        public_base_url: config.get_string("s3.public_base_url"),
    }))
}

/// S3-backed adapter when a bucket is configured, in-memory otherwise.
pub async fn asset_adapter(config: &DeskConfigSnapshot) -> Result<AssetAdapter> {
    let blob = blob_config(config);
    let adapter = match s3_config(config)? {
        Some(s3) => {
            info!(bucket = %s3.bucket, "using S3-compatible asset store");
            AssetAdapter::new(S3AssetStore::new(s3).await, blob)
        }
        None => {
            info!("no s3.bucket configured, using in-memory asset store");
            AssetAdapter::new(MemoryAssetStore::new(), blob)
        }
    };
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use desk_core::DeskConfig;

    use super::*;

    #[test]
    fn blob_config_reads_limits() {
        let mut config = DeskConfig::new();
        config.set("assets.max_bytes", "1024");
        config.set("assets.allowed_content_types", "image/png, image/jpeg");

        let blob = blob_config(&config.snapshot());
        assert_eq!(blob.max_blob_bytes, 1024);
        assert!(blob.accepts("image/png"));
        assert!(!blob.accepts("image/gif"));
    }

    #[test]
    fn star_allows_anything() {
        let mut config = DeskConfig::new();
        config.set("assets.allowed_content_types", "*");
        assert!(blob_config(&config.snapshot()).accepts("application/pdf"));
    }

    #[test]
    fn s3_is_optional_but_complete_when_present() {
        let config = DeskConfig::new();
        assert!(s3_config(&config.snapshot()).unwrap().is_none());

        let mut config = DeskConfig::new();
        config.set("s3.bucket", "shop");
        let err = s3_config(&config.snapshot()).unwrap_err();
        assert!(err.to_string().contains("s3.region"));
    }
}
