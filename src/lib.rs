pub mod error;
pub mod identity;
pub mod models;
pub mod services;
pub mod store;

pub use error::{FetchFailed, StoreError};
pub use models::{Chapter, Course, CourseKind};
pub use services::CatalogView;
pub use store::{CatalogClient, SanityCatalogClient, StaticCatalog, StoreConfig};
