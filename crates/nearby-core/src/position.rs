use serde::{Deserialize, Serialize};

use crate::constants::COORDINATE_PRECISION;

/// A simulated (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude formatted with the fixed query precision, e.g. `"60.170187"`.
    #[must_use]
    pub fn latitude_param(&self) -> String {
        format!("{:.*}", COORDINATE_PRECISION, self.latitude)
    }

    /// Longitude formatted with the fixed query precision.
    #[must_use]
    pub fn longitude_param(&self) -> String {
        format!("{:.*}", COORDINATE_PRECISION, self.longitude)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude_param(), self.longitude_param())
    }
}
