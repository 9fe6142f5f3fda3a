pub mod products_schema;
pub mod products_service;

pub use products_schema::{ProductCategory, ProductInput};
pub use products_service::{product_def, ProductsService};
