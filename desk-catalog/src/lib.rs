//! # desk-catalog
//!
//! Catalog services for the shopdesk back office: blogs, products,
//! delivery zones and a read-only user list. Entities that own an uploaded
//! asset go through [`EntityLifecycle`], which sequences record writes,
//! uploads and cleanup of replaced assets.
//!
//! ```rust
//! use desk_blob::AssetUpload;
//! use desk_catalog::{AdminApp, BlogInput};
//! use desk_core::AdminContext;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let app = AdminApp::in_memory();
//! let ctx = AdminContext::new("admin-uid");
//!
//! let cover = AssetUpload::new(&b"\x89PNG"[..]).with_filename("cover.png");
//! let created = app
//!     .blogs
//!     .create(&ctx, BlogInput::new("Hello World!", "news", "..."), Some(cover))
//!     .await?;
//!
//! assert_eq!(created.value.str_field("slug"), Some("hello-world"));
//! assert!(created.value.non_empty_str("coverImage").is_some());
//! # Ok(())
//! # }
//! ```

mod app;
pub mod lifecycle;
pub mod services;
pub mod settings;
mod telemetry;
pub mod validation;

pub use app::AdminApp;
pub use lifecycle::{resolve_asset_ref, CleanupWarning, EntityDef, EntityLifecycle, Outcome};
pub use services::{
    BlogInput, BlogStatus, BlogsService, ProductCategory, ProductInput, ProductsService,
    UserProfile, UsersService, ZoneInput, ZonesService,
};
pub use telemetry::init_tracing;
