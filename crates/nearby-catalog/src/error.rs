use thiserror::Error;

/// Errors returned by [`crate::VenueClient::fetch_venues`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The base endpoint could not be turned into a request URL. Signals a
    /// configuration bug rather than a runtime condition.
    #[error("invalid catalog URL \"{base_url}\": {reason}")]
    InvalidRequest { base_url: String, reason: String },

    /// DNS, connection, TLS or timeout failure from the underlying HTTP client.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    BadStatus { status: u16, url: String },

    #[error("empty response body from {url}")]
    EmptyResponse { url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    MalformedResponse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The fetch was superseded or abandoned. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,
}

impl CatalogError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CatalogError::Cancelled)
    }

    /// Text shown to the user when a fetch fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::InvalidRequest { .. } => {
                "The venue service address is misconfigured.".to_string()
            }
            CatalogError::Transport(e) if e.is_timeout() => {
                "The request timed out. Check your connection and try again.".to_string()
            }
            CatalogError::Transport(_) => {
                "Could not reach the venue service. Check your connection and try again."
                    .to_string()
            }
            CatalogError::BadStatus { status, .. } => {
                format!("The venue service responded with an error (HTTP {status}).")
            }
            CatalogError::EmptyResponse { .. } => "The venue service returned no data.".to_string(),
            CatalogError::MalformedResponse { .. } => {
                "The venue service returned data in an unexpected format.".to_string()
            }
            CatalogError::Cancelled => "The request was cancelled.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_status_message_includes_code() {
        let err = CatalogError::BadStatus {
            status: 503,
            url: "https://example.com".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "The venue service responded with an error (HTTP 503)."
        );
    }

    #[test]
    fn only_cancelled_is_cancelled() {
        assert!(CatalogError::Cancelled.is_cancelled());
        assert!(!CatalogError::EmptyResponse {
            url: "https://example.com".to_string()
        }
        .is_cancelled());
    }
}
