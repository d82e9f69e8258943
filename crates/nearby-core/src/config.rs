use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load deployment configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load deployment configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can supply a plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let non_empty_or_default = |var: &str, default: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(raw) if raw.trim().is_empty() => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            }),
            Ok(raw) => Ok(raw),
            Err(_) => Ok(default.to_string()),
        }
    };

    let log_level = non_empty_or_default("NEARBY_LOG_LEVEL", "info")?;
    let favorites_path = PathBuf::from(non_empty_or_default(
        "NEARBY_FAVORITES_PATH",
        "./nearby-favorites.json",
    )?);

    Ok(AppConfig {
        log_level,
        favorites_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
