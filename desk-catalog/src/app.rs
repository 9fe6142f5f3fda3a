use std::sync::Arc;

use anyhow::Result;
use desk_blob::{AssetAdapter, BlobConfig, MemoryAssetStore};
use desk_core::{
    AdminGate, DeskConfig, DeskConfigSnapshot, IdentityProvider, MemoryRecordStore, RecordStore,
};

use crate::services::{BlogsService, ProductsService, UsersService, ZonesService};
use crate::settings;

/// Every catalog service, wired against one record store and one asset
/// adapter.
pub struct AdminApp {
    pub config: DeskConfigSnapshot,
    pub records: Arc<dyn RecordStore>,
    pub assets: Arc<AssetAdapter>,
    pub blogs: BlogsService,
    pub products: ProductsService,
    pub zones: ZonesService,
    pub users: UsersService,
}

impl AdminApp {
    pub fn new(
        records: Arc<dyn RecordStore>,
        assets: Arc<AssetAdapter>,
        config: DeskConfigSnapshot,
    ) -> Self {
        Self {
            blogs: BlogsService::new(Arc::clone(&records), Arc::clone(&assets)),
            products: ProductsService::new(Arc::clone(&records), Arc::clone(&assets)),
            zones: ZonesService::new(Arc::clone(&records)),
            users: UsersService::new(Arc::clone(&records)),
            config,
            records,
            assets,
        }
    }

    /// Everything in memory, default upload limits.
    pub fn in_memory() -> Self {
        let assets = AssetAdapter::new(MemoryAssetStore::new(), BlobConfig::default());
        Self::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(assets),
            DeskConfig::new().snapshot(),
        )
    }

    /// Layer `SHOPDESK__*` variables over `config` and build the asset
    /// adapter from the result.
    pub async fn from_config(mut config: DeskConfig, records: Arc<dyn RecordStore>) -> Result<Self> {
        config.load_env(settings::ENV_PREFIX);
        let snapshot = config.snapshot();
        let assets = settings::asset_adapter(&snapshot).await?;
        Ok(Self::new(records, Arc::new(assets), snapshot))
    }

    /// Gate admitting only `admin.allowed_uid`.
    pub fn gate<I: IdentityProvider>(&self, provider: I) -> Result<AdminGate<I>> {
        AdminGate::from_config(provider, &self.config)
    }
}
