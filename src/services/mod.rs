pub mod catalog_view;

pub use catalog_view::{CatalogView, RefreshTicket};
