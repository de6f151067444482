use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One telemetry row (kiln, fuel, utilities, quality, ...).
///
/// Column sets differ per category and backend version, so everything beyond
/// the common columns lands in `metrics`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, JsonValue>,
}

impl TelemetryRecord {
    /// Returns a metric by column name.
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.metrics.get(name)
    }

    /// Returns a numeric metric by column name.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name)?.as_f64()
    }

    /// Returns a text metric by column name.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }
}

/// Urgency of a recommendation: a label (`"High"`) or a numeric level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Level(i64),
    Label(String),
}

/// Operator-facing optimization advice produced by the AI service.
///
/// Accepts both the dashboard shape (`category`, `priority`, `title`) and the
/// table columns (`process_area`, `priority_level`, `recommendation_type`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, alias = "process_area")]
    pub category: Option<String>,
    #[serde(default, alias = "priority_level")]
    pub priority: Option<Priority>,
    #[serde(default, alias = "recommendation_type")]
    pub title: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_impact: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Remaining columns such as `estimated_savings_cost`.
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// A single KPI figure with its target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiMetric {
    #[serde(alias = "value")]
    pub current: f64,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

/// Plant-wide KPIs keyed by metric name (`production`, `efficiency`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, KpiMetric>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOpportunity {
    pub category: String,
    pub title: String,
    pub potential_savings: f64,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantLocation {
    pub id: i64,
    pub plant_code: String,
    pub plant_name: String,
    pub location: String,
    pub city: String,
    pub state: String,
    #[serde(default = "default_country")]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub capacity_tpd: Option<i64>,
    #[serde(default)]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub commissioned_year: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_country() -> String {
    "India".to_owned()
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: None,
        }
    }
}

/// Body of `POST /api/ai-chat/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<ChatMessage>,
}

/// Assistant reply from `POST /api/ai-chat/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Result of `POST /api/vision/analyze` for a sample photo.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisionAnalysis {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub defects_detected: Vec<String>,
    pub confidence_score: f64,
    pub quality_score: f64,
    #[serde(default)]
    pub labels: Vec<String>,
    pub analysis_timestamp: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        AiRecommendation, ChatMessage, ChatRequest, ChatRole, Kpis, PlantLocation, Priority,
        TelemetryRecord,
    };

    #[test]
    fn telemetry_record_keeps_unknown_columns() {
        let record: TelemetryRecord = serde_json::from_value(json!({
            "id": 7,
            "created_at": "2025-01-01T00:00:00Z",
            "kiln_id": "KILN-1",
            "temperature": 1432.5
        }))
        .expect("record must decode");

        assert_eq!(record.id, 7);
        assert_eq!(record.location, None);
        assert_eq!(record.get_text("kiln_id"), Some("KILN-1"));
        assert_eq!(record.get_f64("temperature"), Some(1432.5));
        assert_eq!(record.get_f64("kiln_id"), None);
    }

    #[test]
    fn recommendation_decodes_dashboard_shape() {
        let rec: AiRecommendation = serde_json::from_value(json!({
            "id": 2,
            "timestamp": "2025-01-15T05:00:00Z",
            "category": "Alternative Fuels",
            "priority": "High",
            "title": "Increase RDF Substitution",
            "description": "Increase RDF usage to 30% thermal substitution.",
            "expected_impact": "15% reduction in CO2 emissions",
            "status": "Implemented",
            "location": "Mangrol",
            "created_at": "2025-01-15T05:00:00Z"
        }))
        .expect("recommendation must decode");

        assert_eq!(rec.priority, Some(Priority::Label("High".to_owned())));
        assert_eq!(rec.category.as_deref(), Some("Alternative Fuels"));
        assert_eq!(rec.location.as_deref(), Some("Mangrol"));
        assert!(rec.extra.is_empty());
    }

    #[test]
    fn recommendation_decodes_table_columns() {
        let rec: AiRecommendation = serde_json::from_value(json!({
            "id": 11,
            "created_at": "2025-01-15T05:00:00Z",
            "process_area": "kiln",
            "recommendation_type": "fuel_mix",
            "priority_level": 1,
            "description": "Raise alternative fuel share.",
            "estimated_savings_cost": 42000.0,
            "action_taken": false
        }))
        .expect("table row must decode");

        assert_eq!(rec.priority, Some(Priority::Level(1)));
        assert_eq!(rec.category.as_deref(), Some("kiln"));
        assert_eq!(rec.title.as_deref(), Some("fuel_mix"));
        assert_eq!(rec.status, None);
        assert_eq!(rec.extra.get("action_taken"), Some(&json!(false)));
    }

    #[test]
    fn recommendation_requires_description() {
        let result = serde_json::from_value::<AiRecommendation>(json!({"id": 1, "title": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn kpis_accept_value_alias_and_timestamp() {
        let kpis: Kpis = serde_json::from_value(json!({
            "quality_score": { "value": 98.5, "target": 99.0, "unit": "%" },
            "timestamp": "2025-01-01T00:00:00"
        }))
        .expect("kpis must decode");

        assert_eq!(kpis.timestamp.as_deref(), Some("2025-01-01T00:00:00"));
        assert_eq!(kpis.metrics["quality_score"].current, 98.5);
    }

    #[test]
    fn kpis_reject_error_object() {
        let result = serde_json::from_value::<Kpis>(json!({"error": "No data available"}));
        assert!(result.is_err());
    }

    #[test]
    fn plant_location_defaults_country() {
        let plant: PlantLocation = serde_json::from_value(json!({
            "id": 1,
            "plant_code": "JK_GOTAN",
            "plant_name": "JK Cement Gotan",
            "location": "Gotan, Rajasthan",
            "city": "Gotan",
            "state": "Rajasthan",
            "latitude": 26.79,
            "longitude": 73.44
        }))
        .expect("plant must decode");
        assert_eq!(plant.country, "India");
        assert_eq!(plant.capacity_tpd, None);
    }

    #[test]
    fn chat_request_omits_empty_history() {
        let request = ChatRequest {
            message: "status?".to_owned(),
            session_id: None,
            history: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&request).expect("must encode"),
            json!({"message": "status?"})
        );

        let with_history = ChatRequest {
            history: vec![ChatMessage::user("hi")],
            ..request
        };
        assert_eq!(
            serde_json::to_value(&with_history).expect("must encode")["history"][0]["role"],
            json!("user")
        );
        assert_eq!(with_history.history[0].role, ChatRole::User);
    }
}
