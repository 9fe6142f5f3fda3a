//! # desk-blob: asset storage for shopdesk
//!
//! Product photos and blog covers live in a hosted blob store; records only
//! keep a URL to them. This crate owns that boundary:
//!
//! ```text
//! ┌──────────────────┐
//! │ Catalog services │  ← business logic only
//! ├──────────────────┤
//! │   AssetAdapter   │  ← size/type guard, key → URL, delete by reference
//! ├──────────────────┤
//! │    AssetStore    │  ← storage primitives (memory, S3-compatible)
//! └──────────────────┘
//! ```
//!
//! ```rust
//! use desk_blob::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> BlobResult<()> {
//! let adapter = AssetAdapter::new(MemoryAssetStore::new(), BlobConfig::default());
//!
//! let upload = AssetUpload::new(&b"\x89PNG"[..]).with_filename("cover.png");
//! let receipt = adapter.put("blogs/b1.png", upload).await?;
//!
//! let bytes = adapter.open(&receipt.url).await?;
//! assert_eq!(&bytes[..], b"\x89PNG");
//! adapter.delete(&receipt.url).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
mod config;
mod error;
mod memory_store;
mod receipt;
mod s3_store;
pub mod store;
mod types;

pub use adapter::AssetAdapter;
pub use config::BlobConfig;
pub use error::{BlobError, BlobResult};
pub use memory_store::MemoryAssetStore;
pub use receipt::AssetReceipt;
pub use s3_store::{S3AssetStore, S3Config};
pub use store::{
    sanitize_filename, AssetKeyStrategy, AssetStore, GetResult, PutResult, RecordKeyStrategy,
    TimestampedKeyStrategy,
};
pub use types::AssetUpload;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AssetAdapter, AssetReceipt, AssetStore, AssetUpload, BlobConfig, BlobError, BlobResult,
        MemoryAssetStore,
    };
}
