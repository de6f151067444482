/// Default backend address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Backend location and mock-mode switch.
///
/// Built once at startup and handed to [`crate::ApiClient`]; calls never
/// read process state themselves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to. Trailing `/` is trimmed.
    pub base_url: String,
    /// When set, requests carrying a fallback return it without network access.
    pub use_mock_data: bool,
}

impl ClientConfig {
    /// Creates a config for `base_url` with mock mode off.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
            use_mock_data: false,
        }
    }

    /// Enables or disables mock mode.
    pub fn with_mock_data(mut self, enabled: bool) -> Self {
        self.use_mock_data = enabled;
        self
    }

    /// Creates a config from environment variables.
    ///
    /// Reads:
    /// - `KILNVIEW_API_URL`: backend base URL (default `http://localhost:8000`)
    /// - `KILNVIEW_USE_MOCK_DATA`: `true` or `1` enables mock mode
    ///
    /// Returns an error if `KILNVIEW_API_URL` is set but empty.
    ///
    /// **Not available on `wasm32` targets**: environment variables do not
    /// exist in browser runtimes. Use [`ClientConfig::new`] instead.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        let base_url = match std::env::var("KILNVIEW_API_URL") {
            Ok(url) if url.trim().is_empty() => {
                return Err("KILNVIEW_API_URL is set but empty".to_owned())
            }
            Ok(url) => url,
            Err(_) => DEFAULT_BASE_URL.to_owned(),
        };
        let use_mock_data = std::env::var("KILNVIEW_USE_MOCK_DATA")
            .map(|value| parse_flag(&value))
            .unwrap_or(false);
        Ok(Self::new(base_url).with_mock_data(use_mock_data))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Configures HTTP timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry delay in milliseconds (linear: `retry_delay_ms * n` before retry `n`).
    pub retry_delay_ms: u64,
    /// Whether HTTP `429` and `5xx` responses are retried like transport failures.
    pub retry_server_errors: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_retries: 2,
            retry_delay_ms: 1_000,
            retry_server_errors: true,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}
