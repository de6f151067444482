use std::time::Duration;

use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Method, Url,
};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;

use crate::{timer, ClientConfig, ClientOptions, FetchError, ParamValue, Request, Result};

/// HTTP client for the plant telemetry backend.
///
/// Every call goes through [`ApiClient::fetch`], which applies the per-attempt
/// timeout, retries transient failures with linear backoff and substitutes
/// the request's fallback when the backend cannot provide data.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    config: ClientConfig,
    options: ClientOptions,
}

impl ApiClient {
    /// Creates a client for the given configuration with default options.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            options: ClientOptions::default(),
        }
    }

    /// Creates a client for `base_url` with mock mode off.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(ClientConfig::new(base_url))
    }

    /// Creates a client from `KILNVIEW_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        ClientConfig::from_env().map(Self::new)
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Performs `request` and decodes the response body into `T`.
    ///
    /// Returns the fallback instead of an error when one is configured and
    /// the backend is unreachable, answers with an error, or returns `null`
    /// or an empty array. Errors surface only without a fallback, or when
    /// the URL or a header is invalid, or the call was cancelled.
    pub async fn fetch<T: DeserializeOwned>(&self, request: Request<T>) -> Result<T> {
        let Request {
            path,
            method,
            headers,
            body,
            params,
            fallback,
            timeout,
            cancel,
        } = request;

        if self.config.use_mock_data {
            if let Some(fallback) = fallback {
                #[cfg(feature = "tracing")]
                tracing::debug!(endpoint = %path, "mock mode enabled, using fallback data");
                return Ok(fallback);
            }
        }

        let url = self.endpoint_url(&path, &params)?;
        let headers = request_headers(&headers)?;
        let timeout = timeout.unwrap_or(Duration::from_millis(self.options.timeout_ms));
        let mut attempt = 0usize;

        loop {
            let outcome = self
                .attempt_cancellable(
                    &method,
                    &url,
                    &headers,
                    body.as_ref(),
                    timeout,
                    cancel.as_ref(),
                )
                .await;

            let err = match outcome {
                Ok(value) => {
                    if is_empty_payload(&value) {
                        if let Some(fallback) = fallback {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(
                                endpoint = %path,
                                "backend returned empty data, using fallback data"
                            );
                            return Ok(fallback);
                        }
                    }
                    match decode::<T>(value, &path) {
                        Ok(decoded) => return Ok(decoded),
                        Err(err) => err,
                    }
                }
                Err(FetchError::Cancelled) => return Err(FetchError::Cancelled),
                Err(err) => err,
            };

            if err.is_retryable(self.options.retry_server_errors)
                && attempt < self.options.max_retries
            {
                attempt += 1;
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    endpoint = %path,
                    attempt,
                    error = %err,
                    "fetch attempt failed, retrying"
                );
                self.wait_before_retry(attempt, cancel.as_ref()).await?;
                continue;
            }

            return match fallback {
                Some(fallback) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        endpoint = %path,
                        attempts = attempt + 1,
                        error = %err,
                        "fetch failed, using fallback data"
                    );
                    Ok(fallback)
                }
                None => {
                    #[cfg(feature = "tracing")]
                    tracing::error!(
                        endpoint = %path,
                        attempts = attempt + 1,
                        error = %err,
                        "fetch failed"
                    );
                    Err(err)
                }
            };
        }
    }

    /// Joins the base URL and `path` and appends `params` in order.
    pub(crate) fn endpoint_url(&self, path: &str, params: &[(String, ParamValue)]) -> Result<Url> {
        let raw = if path.starts_with('/') || path.is_empty() {
            format!("{}{path}", self.config.base_url)
        } else {
            format!("{}/{path}", self.config.base_url)
        };
        let mut url = Url::parse(&raw).map_err(|err| FetchError::InvalidUrl {
            url: raw.clone(),
            reason: err.to_string(),
        })?;

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, &value.to_string());
            }
        }

        Ok(url)
    }

    async fn attempt_cancellable(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        body: Option<&JsonValue>,
        timeout: Duration,
        cancel: Option<&CancellationToken>,
    ) -> Result<JsonValue> {
        let attempt = self.attempt(method, url, headers, body, timeout);
        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(FetchError::Cancelled),
                    outcome = attempt => outcome,
                }
            }
            None => attempt.await,
        }
    }

    /// Sends one request and parses the body as JSON.
    async fn attempt(
        &self,
        method: &Method,
        url: &Url,
        headers: &HeaderMap,
        body: Option<&JsonValue>,
        timeout: Duration,
    ) -> Result<JsonValue> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        // On WASM, reqwest uses AbortController for timeout; the `.timeout()`
        // method is available on both targets and covers the body read.
        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(headers.clone())
            .timeout(timeout);
        // `json` keeps an existing Content-Type, so a caller override survives.
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| FetchError::from_transport(err, url.as_str(), timeout_ms))?;
        read_json(response, url, timeout_ms).await
    }

    /// Waits `retry_delay_ms * retry` before retry number `retry` (1-based).
    async fn wait_before_retry(
        &self,
        retry: usize,
        cancel: Option<&CancellationToken>,
    ) -> Result<()> {
        let multiplier = u64::try_from(retry).unwrap_or(u64::MAX);
        let delay = Duration::from_millis(self.options.retry_delay_ms.saturating_mul(multiplier));

        #[cfg(feature = "tracing")]
        tracing::debug!("retrying request after {} ms", delay.as_millis());

        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(FetchError::Cancelled),
                    _ = timer::sleep(delay) => Ok(()),
                }
            }
            None => {
                timer::sleep(delay).await;
                Ok(())
            }
        }
    }
}

/// Default headers overlaid with the caller's; the caller wins on conflicts.
fn request_headers(extra: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    for (name, value) in extra {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|err| FetchError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|err| FetchError::InvalidHeader {
                name: name.clone(),
                reason: err.to_string(),
            })?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Reads the body, maps non-2xx to [`FetchError::Http`] and parses JSON.
pub(crate) async fn read_json(
    response: reqwest::Response,
    url: &Url,
    timeout_ms: u64,
) -> Result<JsonValue> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|err| FetchError::from_transport(err, url.as_str(), timeout_ms))?;

    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
            body: text,
        });
    }

    serde_json::from_str::<JsonValue>(&text)
        .map_err(|err| FetchError::Decode(format!("invalid JSON from {url}: {err}")))
}

fn is_empty_payload(value: &JsonValue) -> bool {
    value.is_null() || value.as_array().is_some_and(Vec::is_empty)
}

pub(crate) fn decode<T: DeserializeOwned>(value: JsonValue, path: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|err| {
        FetchError::Decode(format!("unexpected response shape from {path}: {err}"))
    })
}
