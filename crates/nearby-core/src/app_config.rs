use std::path::PathBuf;

/// Deployment settings for the `nearby` binary.
///
/// Functional tunables (timeouts, refresh interval, venue cap, coordinate
/// path) live in [`crate::constants`] and are not configurable.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// JSON file backing the durable key-value store.
    pub favorites_path: PathBuf,
}
