//! Catalog response envelope for `GET <base>?lat=..&lon=..`.
//!
//! ## Observed shape
//!
//! ```json
//! { "sections": [ { "name": "banners", "items": [...] },
//!                 { "name": "categories", "items": [...] },
//!                 { "name": "restaurants-delivering-venues", "items": [ { "venue": {...}, "image": {...} } ] },
//!                 ... ] }
//! ```
//!
//! Only the third section carries venue listings. The banner and category
//! sections use unrelated item shapes, so section items are kept as raw JSON
//! and only the venue section is decoded into [`nearby_core::VenueListing`]
//! (see [`crate::extract`]). Unknown fields anywhere are ignored.

use serde::Deserialize;

/// Top-level catalog response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    pub sections: Vec<Section>,
}

/// One content group of the catalog page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub name: Option<String>,

    /// Raw items. Missing `items` decodes as an empty list.
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}
