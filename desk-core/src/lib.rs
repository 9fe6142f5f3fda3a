//! desk-core: framework-agnostic core for the shopdesk admin back office.
//!
//! Errors, configuration, the admin context, the record-store seam and
//! its in-memory implementation, the single-admin gate and the slug
//! generator. Nothing here knows about blobs or concrete entities.

pub mod auth;
pub mod config;
pub mod context;
pub mod errors;
pub mod memory;
pub mod records;
pub mod slug;

pub use auth::{AdminGate, Credential, IdentityProvider, Principal};
pub use config::{DeskConfig, DeskConfigSnapshot};
pub use context::{AdminContext, PrincipalId};
pub use errors::{DeskError, DeskResult, ErrorKind};
pub use memory::MemoryRecordStore;
pub use records::{Fields, Record, RecordStore};
pub use slug::slugify;
