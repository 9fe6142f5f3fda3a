use desk_core::{DeskError, Fields};
use serde::Serialize;
use serde_json::Value;

pub mod blogs;
pub mod products;
pub mod users;
pub mod zones;

pub use blogs::{BlogInput, BlogStatus, BlogsService};
pub use products::{ProductCategory, ProductInput, ProductsService};
pub use users::{UserProfile, UsersService};
pub use zones::{ZoneInput, ZonesService};

/// Serialize a typed input into the document shape the record store takes.
pub(crate) fn to_fields<T: Serialize>(input: &T) -> anyhow::Result<Fields> {
    match serde_json::to_value(input)? {
        Value::Object(map) => Ok(map),
        other => Err(DeskError::general_error(format!(
            "expected an object, got {other}"
        ))
        .into_anyhow()),
    }
}
