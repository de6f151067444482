use std::time::Duration;

use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::ParamValue;

/// Describes one logical call to the backend.
///
/// `T` is the type the response body decodes into; the optional fallback is
/// of the same type and is returned when the backend is unreachable, empty,
/// or erroring.
#[derive(Clone, Debug)]
pub struct Request<T> {
    /// Endpoint path appended to the base URL, e.g. `/api/data/kiln-operations`.
    pub path: String,
    /// HTTP verb. Defaults to `GET`.
    pub method: Method,
    /// Extra headers sent on every attempt.
    pub headers: Vec<(String, String)>,
    /// JSON body for non-GET requests.
    pub body: Option<serde_json::Value>,
    /// Query-string pairs in insertion order.
    pub params: Vec<(String, ParamValue)>,
    /// Substitute value used on failure or empty payload.
    pub fallback: Option<T>,
    /// Overrides the client's per-attempt timeout.
    pub timeout: Option<Duration>,
    /// Lets the caller abandon the call.
    pub cancel: Option<CancellationToken>,
}

impl<T> Request<T> {
    /// Creates a `GET` request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `POST` request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            headers: Vec::new(),
            body: None,
            params: Vec::new(),
            fallback: None,
            timeout: None,
            cancel: None,
        }
    }

    /// Appends a query-string parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Appends a query-string parameter when `value` is `Some`.
    pub fn param_opt<V: Into<ParamValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the JSON request body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the value returned in place of a failed or empty response.
    pub fn fallback(mut self, value: T) -> Self {
        self.fallback = Some(value);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Binds the call to `token`; cancelling it aborts pending attempts.
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
