//! Extraction of displayable listings from a [`CatalogResponse`].

use nearby_core::constants::{MAX_VENUES, VENUE_SECTION_INDEX};
use nearby_core::VenueListing;

use crate::types::CatalogResponse;

/// Returns the valid listings of the venue section, in response order,
/// capped at [`MAX_VENUES`].
///
/// A response with fewer than `VENUE_SECTION_INDEX + 1` sections yields an
/// empty list. Listings missing a venue, a venue id or an image are dropped
/// before the cap is applied.
///
/// # Errors
///
/// Returns the `serde_json` error if any item in the venue section does not
/// decode as a listing.
pub fn extract_listings(response: CatalogResponse) -> Result<Vec<VenueListing>, serde_json::Error> {
    let Some(section) = response.sections.into_iter().nth(VENUE_SECTION_INDEX) else {
        return Ok(Vec::new());
    };

    let decoded = section
        .items
        .into_iter()
        .map(serde_json::from_value::<VenueListing>)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(decoded
        .into_iter()
        .filter(VenueListing::is_valid)
        .take(MAX_VENUES)
        .collect())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::types::Section;

    fn item(id: &str) -> Value {
        json!({
            "venue": { "id": id, "name": format!("Venue {id}"), "short_description": "Food" },
            "image": { "url": format!("https://img.example.com/{id}.jpg") }
        })
    }

    fn response_with_venue_section(items: Vec<Value>) -> CatalogResponse {
        CatalogResponse {
            sections: vec![
                Section::default(),
                Section::default(),
                Section {
                    name: Some("restaurants".to_string()),
                    items,
                },
            ],
        }
    }

    #[test]
    fn fewer_than_three_sections_yields_empty() {
        for count in 0..3 {
            let response = CatalogResponse {
                sections: vec![
                    Section {
                        name: None,
                        items: vec![item("x")],
                    };
                    count
                ],
            };
            assert!(extract_listings(response).unwrap().is_empty());
        }
    }

    #[test]
    fn caps_at_max_venues_preserving_order() {
        let items = (0..20).map(|i| item(&format!("v{i}"))).collect();
        let listings = extract_listings(response_with_venue_section(items)).unwrap();
        assert_eq!(listings.len(), MAX_VENUES);
        let ids: Vec<&str> = listings.iter().map(VenueListing::id).collect();
        let expected: Vec<String> = (0..15).map(|i| format!("v{i}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn drops_listings_missing_venue_or_image() {
        let items = vec![
            item("a"),
            json!({ "image": { "url": "https://img.example.com/promo.jpg" } }),
            item("b"),
            json!({ "venue": { "id": "no-image", "name": "n", "short_description": "d" } }),
            item("c"),
        ];
        let listings = extract_listings(response_with_venue_section(items)).unwrap();
        let ids: Vec<&str> = listings.iter().map(VenueListing::id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn drops_venues_with_empty_id() {
        let items = vec![
            item("a"),
            json!({
                "venue": { "id": "", "name": "Ghost" },
                "image": { "url": "https://img.example.com/ghost.jpg" }
            }),
            item("b"),
        ];
        let listings = extract_listings(response_with_venue_section(items)).unwrap();
        let ids: Vec<&str> = listings.iter().map(VenueListing::id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn cap_applies_after_filtering() {
        let mut items: Vec<Value> = (0..5).map(|_| json!({ "image": { "url": "" } })).collect();
        items.extend((0..16).map(|i| item(&format!("v{i}"))));
        let listings = extract_listings(response_with_venue_section(items)).unwrap();
        assert_eq!(listings.len(), MAX_VENUES);
        assert_eq!(listings[0].id(), "v0");
    }

    #[test]
    fn other_sections_are_not_decoded() {
        let mut response = response_with_venue_section(vec![item("a")]);
        response.sections[0].items = vec![json!({ "venue": "not-an-object" })];
        response.sections.push(Section {
            name: None,
            items: vec![json!(42)],
        });
        let listings = extract_listings(response).unwrap();
        assert_eq!(listings.len(), 1);
    }

    #[test]
    fn malformed_venue_item_is_an_error() {
        let response = response_with_venue_section(vec![item("a"), json!({ "venue": 7 })]);
        assert!(extract_listings(response).is_err());
    }
}
