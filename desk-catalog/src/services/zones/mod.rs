pub mod zones_schema;
pub mod zones_service;

pub use zones_schema::ZoneInput;
pub use zones_service::ZonesService;
