/// Error type returned by this crate.
///
/// Variants are produced by the transport layer so that retry eligibility
/// is decided from the tag alone.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The attempt did not complete within its timeout.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },
    /// The request never reached the server or the connection broke mid-flight.
    #[error("connection error: {0}")]
    Connection(reqwest::Error),
    /// Any other `reqwest` failure (request building, redirect policy, ...).
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Response body is not JSON or does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
    /// Request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(String),
    /// `base_url + path` is not a valid URL.
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// A caller-supplied header name or value is malformed.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Classifies a `reqwest` failure into a tagged variant.
    pub(crate) fn from_transport(err: reqwest::Error, url: &str, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                url: url.to_owned(),
                timeout_ms,
            };
        }

        // is_connect() is not available on wasm32 targets (no TCP)
        #[cfg(not(target_arch = "wasm32"))]
        let connect = err.is_connect();
        #[cfg(target_arch = "wasm32")]
        let connect = false;

        if connect || err.is_request() || err.is_body() {
            Self::Connection(err)
        } else {
            Self::Transport(err)
        }
    }

    /// Returns `true` for failures worth another attempt.
    ///
    /// Timeouts and connection failures always qualify. HTTP `429` and `5xx`
    /// qualify only when `retry_server_errors` is set.
    pub fn is_retryable(&self, retry_server_errors: bool) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection(_) => true,
            Self::Http { status, .. } => retry_server_errors && is_transient_status(*status),
            _ => false,
        }
    }

    /// Returns the HTTP status for [`FetchError::Http`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn is_transient_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}
