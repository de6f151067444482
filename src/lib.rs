//! `kilnview-client` is a resilient async HTTP client for cement-plant
//! telemetry dashboards.
//!
//! Every call goes through [`ApiClient::fetch`], which applies a per-attempt
//! timeout, retries transient failures with linear backoff and substitutes a
//! fallback value when the backend is unreachable or has no data:
//! - [`ApiClient::fetch`] for arbitrary endpoints
//! - typed endpoint helpers such as [`ApiClient::kiln_operations`],
//!   [`ApiClient::kpis`] and [`ApiClient::send_chat_message`]

mod api;
mod client;
mod error;
pub mod fallback;
mod options;
mod query;
mod request;
mod timer;
mod types;

pub use api::DEFAULT_LIMIT;
pub use client::ApiClient;
pub use error::FetchError;
pub use options::{ClientConfig, ClientOptions, DEFAULT_BASE_URL};
pub use query::ParamValue;
pub use request::Request;
pub use types::{
    AiRecommendation, ChatMessage, ChatRequest, ChatResponse, ChatRole, KpiMetric, Kpis,
    OptimizationOpportunity, PlantLocation, Priority, TelemetryRecord, VisionAnalysis,
};

pub use reqwest::Method;
pub use tokio_util::sync::CancellationToken;

pub type Result<T> = std::result::Result<T, FetchError>;
