//! Typed dashboard endpoints.
//!
//! Each method wires its path and query parameters into a [`Request`] and,
//! where the dashboard has a sensible substitute, the matching dataset from
//! [`crate::fallback`].

use std::time::Duration;

use reqwest::multipart::{Form, Part};

use crate::{
    client::{decode, read_json},
    fallback, AiRecommendation, ApiClient, ChatMessage, ChatRequest, ChatResponse, FetchError,
    Kpis, OptimizationOpportunity, ParamValue, PlantLocation, Request, Result, TelemetryRecord,
    VisionAnalysis,
};

/// Row limit the dashboard panels request by default.
pub const DEFAULT_LIMIT: u32 = 50;

const VISION_ANALYZE_PATH: &str = "/api/vision/analyze";

impl ApiClient {
    async fn records(
        &self,
        path: &str,
        limit: u32,
        fallback: Vec<TelemetryRecord>,
    ) -> Result<Vec<TelemetryRecord>> {
        self.fetch(Request::get(path).param("limit", limit).fallback(fallback))
            .await
    }

    pub async fn kiln_operations(&self, limit: u32) -> Result<Vec<TelemetryRecord>> {
        self.records(
            "/api/data/kiln-operations",
            limit,
            fallback::kiln_operations(),
        )
        .await
    }

    /// Fetches one kiln reading. There is no fallback; a missing backend is an error.
    pub async fn kiln_operation(&self, id: &str) -> Result<TelemetryRecord> {
        self.fetch(Request::get(format!("/api/data/kiln-operations/{id}")))
            .await
    }

    pub async fn alternative_fuels(&self, limit: u32) -> Result<Vec<TelemetryRecord>> {
        self.records(
            "/api/data/alternative-fuels",
            limit,
            fallback::alternative_fuels(),
        )
        .await
    }

    /// Fetches optimization results, optionally filtered by `kind` (sent as `type`).
    pub async fn optimization_results(
        &self,
        limit: u32,
        kind: Option<&str>,
    ) -> Result<Vec<TelemetryRecord>> {
        self.fetch(
            Request::get("/api/data/optimization-results")
                .param("limit", limit)
                .param_opt("type", kind)
                .fallback(fallback::optimization_results()),
        )
        .await
    }

    pub async fn utilities_monitoring(&self, limit: u32) -> Result<Vec<TelemetryRecord>> {
        self.records(
            "/api/data/utilities-monitoring",
            limit,
            fallback::utilities_monitoring(),
        )
        .await
    }

    pub async fn raw_material_feed(&self, limit: u32) -> Result<Vec<TelemetryRecord>> {
        self.records(
            "/api/data/raw-material-feed",
            limit,
            fallback::raw_material_feed(),
        )
        .await
    }

    pub async fn grinding_operations(&self, limit: u32) -> Result<Vec<TelemetryRecord>> {
        self.records(
            "/api/data/grinding-operations",
            limit,
            fallback::grinding_operations(),
        )
        .await
    }

    pub async fn quality_control(&self, limit: u32) -> Result<Vec<TelemetryRecord>> {
        self.records(
            "/api/data/quality-control",
            limit,
            fallback::quality_control(),
        )
        .await
    }

    /// Fetches AI recommendations, optionally filtered by `status`.
    pub async fn ai_recommendations(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<AiRecommendation>> {
        self.fetch(
            Request::get("/api/data/ai-recommendations")
                .param_opt("status", status)
                .fallback(fallback::ai_recommendations()),
        )
        .await
    }

    pub async fn kpis(&self) -> Result<Kpis> {
        self.fetch(Request::get("/api/analytics/kpis").fallback(fallback::kpis()))
            .await
    }

    pub async fn optimization_opportunities(&self) -> Result<Vec<OptimizationOpportunity>> {
        self.fetch(
            Request::get("/api/analytics/optimization-opportunities")
                .fallback(fallback::optimization_opportunities()),
        )
        .await
    }

    /// Sends a chat message with prior conversation turns.
    ///
    /// Falls back to a canned assistant reply when the AI backend is down.
    pub async fn send_chat_message(
        &self,
        message: impl Into<String>,
        history: &[ChatMessage],
    ) -> Result<ChatResponse> {
        let payload = ChatRequest {
            message: message.into(),
            session_id: None,
            history: history.to_vec(),
        };
        self.send_chat(payload).await
    }

    /// Sends a fully specified chat request.
    pub async fn send_chat(&self, payload: ChatRequest) -> Result<ChatResponse> {
        let body = serde_json::to_value(&payload)
            .map_err(|err| FetchError::Encode(format!("chat request: {err}")))?;
        self.fetch(
            Request::post("/api/ai-chat/chat")
                .json(body)
                .fallback(fallback::chat_response()),
        )
        .await
    }

    pub async fn chat_history(&self, session_id: Option<&str>) -> Result<Vec<ChatMessage>> {
        self.fetch(
            Request::get("/api/ai-chat/history")
                .param_opt("session_id", session_id)
                .fallback(fallback::chat_history()),
        )
        .await
    }

    pub async fn plant_locations(&self) -> Result<Vec<PlantLocation>> {
        self.fetch(Request::get("/api/locations/locations").fallback(fallback::plant_locations()))
            .await
    }

    /// Uploads a sample photo for defect and quality analysis.
    ///
    /// The multipart form is consumed by the send, so this call makes a single
    /// attempt and has no fallback; failures always surface to the caller.
    pub async fn analyze_image(
        &self,
        file_name: impl Into<String>,
        image: Vec<u8>,
        mime: &str,
        sample_id: Option<&str>,
    ) -> Result<VisionAnalysis> {
        let params: Vec<(String, ParamValue)> = sample_id
            .map(|id| ("sample_id".to_owned(), ParamValue::text(id)))
            .into_iter()
            .collect();
        let url = self.endpoint_url(VISION_ANALYZE_PATH, &params)?;
        let timeout_ms = self.options().timeout_ms;

        let part = Part::bytes(image)
            .file_name(file_name.into())
            .mime_str(mime)
            .map_err(FetchError::Transport)?;
        // reqwest sets the multipart Content-Type with its boundary.
        let response = self
            .http
            .post(url.clone())
            .multipart(Form::new().part("file", part))
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
            .map_err(|err| FetchError::from_transport(err, url.as_str(), timeout_ms))?;

        let value = read_json(response, &url, timeout_ms).await?;
        decode(value, VISION_ANALYZE_PATH)
    }
}
