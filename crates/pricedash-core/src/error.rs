//! Errors surfaced by the request router.

use crate::upstream::UpstreamError;

/// Every failure an action can end in. The router turns each into the JSON
/// error envelope; the message text is what the dashboard displays.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure or unexpected status from the upstream API.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    /// The listing is absent under the account(s) consulted.
    #[error("Listing {listing_id} not found")]
    NotFound { listing_id: String },
    /// No configured account owns the listing.
    #[error("Listing {listing_id} not found in any account")]
    Resolution { listing_id: String },
    /// A required query parameter was missing or empty.
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),
    /// The `action` parameter named no known action.
    #[error("Invalid action: {0}")]
    InvalidAction(String),
    /// The response could not be encoded as JSON.
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    /// Short machine-readable category, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Upstream(_) => "upstream",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Resolution { .. } => "resolution",
            ApiError::MissingParameter(_) => "missing_parameter",
            ApiError::InvalidAction(_) => "invalid_action",
            ApiError::Encode(_) => "encode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_dashboard_expectations() {
        assert_eq!(
            ApiError::MissingParameter("listingId").to_string(),
            "listingId parameter is required"
        );
        assert_eq!(
            ApiError::InvalidAction("bogus".into()).to_string(),
            "Invalid action: bogus"
        );
        assert_eq!(
            ApiError::Resolution {
                listing_id: "L7".into()
            }
            .to_string(),
            "Listing L7 not found in any account"
        );
    }

    #[test]
    fn upstream_errors_keep_their_message() {
        let err = ApiError::from(UpstreamError::from_status(403, b"forbidden"));
        assert_eq!(err.to_string(), "API Error (403): forbidden");
        assert_eq!(err.kind(), "upstream");
    }
}
