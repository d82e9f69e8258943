//! Venue records as decoded from the catalog response.
//!
//! ## Observed shape of a catalog item
//!
//! ```json
//! { "venue": { "id": "5ae6013cf78b6a000c4dbd4b", "name": "Pizzeria", "short_description": "..." },
//!   "image": { "url": "https://prod-wolt-venue-images-cdn.wolt.com/..." } }
//! ```
//!
//! Items without a `venue` object (promotional tiles) or without an `image`
//! object do occur and are decoded as `None` rather than failing the whole
//! response. They are dropped by [`VenueListing::is_valid`] before display,
//! as are venues with an empty `id`.

use serde::{Deserialize, Serialize};

use crate::constants::PLACEHOLDER_IMAGE_URL;

/// A restaurant record from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,

    /// Display name. Absent names decode as an empty string.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub short_description: String,
}

/// A listing thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueImage {
    #[serde(default)]
    pub url: String,
}

impl VenueImage {
    /// `true` when the URL is non-empty and uses the `http` or `https` scheme.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.url.is_empty()
            && (self.url.starts_with("http://") || self.url.starts_with("https://"))
    }

    /// The image URL, or the fixed placeholder when the URL is not usable.
    #[must_use]
    pub fn resolved_url(&self) -> &str {
        if self.is_valid() {
            &self.url
        } else {
            PLACEHOLDER_IMAGE_URL
        }
    }
}

/// One catalog entry: a venue paired with its thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueListing {
    #[serde(default)]
    pub venue: Option<Venue>,

    #[serde(default)]
    pub image: Option<VenueImage>,
}

impl VenueListing {
    #[must_use]
    pub fn new(venue: Venue, image: VenueImage) -> Self {
        Self {
            venue: Some(venue),
            image: Some(image),
        }
    }

    /// Displayable iff both the venue and the image are present and the
    /// venue id is non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.venue.as_ref().is_some_and(|v| !v.id.is_empty()) && self.image.is_some()
    }

    /// Venue id, or `""` when no venue is present.
    #[must_use]
    pub fn id(&self) -> &str {
        self.venue.as_ref().map_or("", |v| v.id.as_str())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.venue.as_ref().map_or("", |v| v.name.as_str())
    }

    #[must_use]
    pub fn short_description(&self) -> &str {
        self.venue
            .as_ref()
            .map_or("", |v| v.short_description.as_str())
    }

    /// Thumbnail URL with the placeholder substituted for missing or invalid images.
    #[must_use]
    pub fn image_url(&self) -> &str {
        self.image
            .as_ref()
            .map_or(PLACEHOLDER_IMAGE_URL, VenueImage::resolved_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(id: &str) -> Venue {
        Venue {
            id: id.to_string(),
            name: "Kamppi Pizza".to_string(),
            short_description: "Wood-fired".to_string(),
        }
    }

    fn image(url: &str) -> VenueImage {
        VenueImage {
            url: url.to_string(),
        }
    }

    #[test]
    fn image_validity_requires_http_scheme() {
        assert!(image("https://cdn.example.com/a.jpg").is_valid());
        assert!(image("http://cdn.example.com/a.jpg").is_valid());
        assert!(!image("").is_valid());
        assert!(!image("ftp://cdn.example.com/a.jpg").is_valid());
        assert!(!image("cdn.example.com/a.jpg").is_valid());
    }

    #[test]
    fn invalid_image_resolves_to_placeholder() {
        assert_eq!(image("").resolved_url(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            image("https://cdn.example.com/a.jpg").resolved_url(),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn listing_valid_only_with_venue_and_image() {
        assert!(VenueListing::new(venue("a"), image("https://x/y.jpg")).is_valid());

        let no_image = VenueListing {
            venue: Some(venue("a")),
            image: None,
        };
        assert!(!no_image.is_valid());

        let no_venue = VenueListing {
            venue: None,
            image: Some(image("https://x/y.jpg")),
        };
        assert!(!no_venue.is_valid());
    }

    #[test]
    fn listing_with_empty_venue_id_is_invalid() {
        let listing = VenueListing::new(venue(""), image("https://x/y.jpg"));
        assert!(!listing.is_valid());
    }

    #[test]
    fn listing_without_venue_has_empty_id() {
        let listing = VenueListing {
            venue: None,
            image: None,
        };
        assert_eq!(listing.id(), "");
        assert_eq!(listing.name(), "");
        assert_eq!(listing.image_url(), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn listing_decodes_with_missing_optional_fields() {
        let json = r#"{"venue": {"id": "abc"}}"#;
        let listing: VenueListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.id(), "abc");
        assert_eq!(listing.short_description(), "");
        assert!(listing.image.is_none());
        assert!(!listing.is_valid());
    }

    #[test]
    fn venue_without_id_fails_to_decode() {
        let json = r#"{"venue": {"name": "No id"}, "image": {"url": "https://x/y.jpg"}}"#;
        assert!(serde_json::from_str::<VenueListing>(json).is_err());
    }
}
