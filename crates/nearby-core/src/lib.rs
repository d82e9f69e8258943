pub mod app_config;
pub mod config;
pub mod constants;
pub mod position;
pub mod venue;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use position::Position;
pub use venue::{Venue, VenueImage, VenueListing};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
