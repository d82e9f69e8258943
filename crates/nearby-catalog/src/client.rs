//! HTTP client for the venue catalog endpoint.

use std::time::Duration;

use nearby_core::constants::{
    CATALOG_BASE_URL, CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS, USER_AGENT,
};
use nearby_core::{Position, VenueListing};
use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::extract::extract_listings;
use crate::types::CatalogResponse;

/// Client for the venue catalog.
///
/// Performs exactly one attempt per call. Retrying is left to the caller.
/// Cloning is cheap: clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct VenueClient {
    client: Client,
    base_url: String,
}

impl VenueClient {
    /// Creates a client pointed at the production catalog endpoint with the
    /// fixed 30-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(CATALOG_BASE_URL, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Creates a client with a custom base URL and timeout (for testing with wiremock).
    ///
    /// The base URL is not validated here; an unparseable URL surfaces as
    /// [`CatalogError::InvalidRequest`] from [`VenueClient::fetch_venues`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Transport`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_owned(),
        })
    }

    /// Fetches the venues near `position`.
    ///
    /// Returns at most [`nearby_core::constants::MAX_VENUES`] valid listings
    /// in response order.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidRequest`] if the base URL cannot be parsed.
    /// - [`CatalogError::Transport`] on DNS, connection or timeout failure.
    /// - [`CatalogError::BadStatus`] on any non-2xx status.
    /// - [`CatalogError::EmptyResponse`] if the body has zero bytes.
    /// - [`CatalogError::MalformedResponse`] if the body does not decode.
    pub async fn fetch_venues(&self, position: Position) -> Result<Vec<VenueListing>, CatalogError> {
        let url = Self::venues_url(&self.base_url, position)?;
        tracing::debug!(url = %url, "requesting venues");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "catalog returned non-2xx");
            return Err(CatalogError::BadStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(CatalogError::EmptyResponse {
                url: url.to_string(),
            });
        }

        let context = || format!("venues at {position}");
        let parsed = serde_json::from_slice::<CatalogResponse>(&body).map_err(|e| {
            CatalogError::MalformedResponse {
                context: context(),
                source: e,
            }
        })?;
        let section_count = parsed.sections.len();
        let listings =
            extract_listings(parsed).map_err(|e| CatalogError::MalformedResponse {
                context: context(),
                source: e,
            })?;

        tracing::info!(
            position = %position,
            sections = section_count,
            venues = listings.len(),
            "fetched venues"
        );
        Ok(listings)
    }

    /// Builds `<base>?lat=<6dp>&lon=<6dp>`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidRequest`] if `base_url` is not a valid
    /// absolute URL.
    fn venues_url(base_url: &str, position: Position) -> Result<Url, CatalogError> {
        let mut url = Url::parse(base_url).map_err(|e| CatalogError::InvalidRequest {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        url.query_pairs_mut()
            .append_pair("lat", &position.latitude_param())
            .append_pair("lon", &position.longitude_param());

        Ok(url)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
