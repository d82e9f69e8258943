//! Fixed tunables for the catalog client, the location simulator and the
//! favorites store. None of these are read from the environment.

use crate::position::Position;

/// Catalog endpoint returning nearby venues for a coordinate.
pub const CATALOG_BASE_URL: &str = "https://restaurant-api.wolt.com/v1/pages/restaurants";

/// Whole-request timeout for a catalog fetch.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub const CONNECT_TIMEOUT_SECS: u64 = 10;

pub const USER_AGENT: &str = "nearby/0.1 (venue-walk)";

/// Decimal places used for the `lat`/`lon` query parameters.
pub const COORDINATE_PRECISION: usize = 6;

/// Only this section of the catalog response carries venue listings; the
/// preceding sections hold banners and categories.
pub const VENUE_SECTION_INDEX: usize = 2;

/// Upper bound on the number of listings returned by one fetch.
pub const MAX_VENUES: usize = 15;

/// Seconds between simulated position changes.
pub const REFRESH_INTERVAL_SECS: u64 = 10;

/// Key under which the favorite venue ids are persisted.
pub const FAVORITES_STORAGE_KEY: &str = "com.nearby.favorites.venue_ids";

/// Shown in place of a listing image whose URL is empty or not http(s).
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x400?text=No+Image";

/// Buffer size of the broadcast change streams.
pub const CHANGE_STREAM_CAPACITY: usize = 64;

/// The walking loop through Helsinki city center, visited in order and
/// wrapped around after the last point.
pub const COORDINATE_PATH: [Position; 10] = [
    Position::new(60.170_187, 24.930_599),
    Position::new(60.169_418, 24.931_618),
    Position::new(60.169_818, 24.932_906),
    Position::new(60.170_005, 24.935_105),
    Position::new(60.169_108, 24.936_210),
    Position::new(60.168_355, 24.934_869),
    Position::new(60.167_560, 24.932_562),
    Position::new(60.168_254, 24.931_532),
    Position::new(60.169_012, 24.930_341),
    Position::new(60.170_085, 24.929_569),
];
