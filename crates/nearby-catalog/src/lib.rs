pub mod client;
pub mod error;
pub mod extract;
pub mod types;

pub use client::VenueClient;
pub use error::CatalogError;
pub use extract::extract_listings;
pub use types::{CatalogResponse, Section};
