//! Upstream failure type.

/// Longest response body excerpt carried in a status error.
const BODY_EXCERPT_CHARS: usize = 200;

/// A hard failure talking to the upstream API: transport, non-2xx status, or bad JSON.
///
/// A 404 from the single-listing endpoint is not an `UpstreamError`; it is
/// reported as [`super::FetchOutcome::NotFound`].
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Configured base URL did not parse.
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),
    /// Base URL cannot carry path segments (e.g. `mailto:`).
    #[error("upstream base URL cannot carry a path: {0}")]
    BaseUrl(String),
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("upstream request failed: {0}")]
    Transport(#[from] curl::Error),
    /// HTTP response had an unexpected status.
    #[error("API Error ({status}): {body}")]
    Status { status: u32, body: String },
    /// Response body was not the JSON shape we expected.
    #[error("upstream returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl UpstreamError {
    /// Build a status error, keeping at most the first 200 characters of the body.
    pub fn from_status(status: u32, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        UpstreamError::Status {
            status,
            body: text.chars().take(BODY_EXCERPT_CHARS).collect(),
        }
    }

    /// HTTP status, when the failure was a status error.
    pub fn status(&self) -> Option<u32> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_truncates_body() {
        let body = "x".repeat(500);
        let err = UpstreamError::from_status(502, body.as_bytes());
        match &err {
            UpstreamError::Status { status, body } => {
                assert_eq!(*status, 502);
                assert_eq!(body.len(), 200);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(err.to_string().starts_with("API Error (502): xxx"));
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "é".repeat(300);
        let err = UpstreamError::from_status(500, body.as_bytes());
        if let UpstreamError::Status { body, .. } = err {
            assert_eq!(body.chars().count(), 200);
        }
    }
}
