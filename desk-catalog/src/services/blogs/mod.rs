pub mod blogs_schema;
pub mod blogs_service;

pub use blogs_schema::{BlogInput, BlogStatus};
pub use blogs_service::{blog_def, BlogsService};
