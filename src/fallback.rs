//! Static representative dataset used as fallback values.
//!
//! Values are deterministic so dashboards render the same figures every time
//! the backend is offline.

use std::collections::BTreeMap;

use serde_json::{json, Value as JsonValue};

use crate::{
    AiRecommendation, ChatMessage, ChatResponse, ChatRole, KpiMetric, Kpis,
    OptimizationOpportunity, PlantLocation, Priority, TelemetryRecord,
};

const LOCATIONS: [&str; 3] = ["Nimbahera", "Mangrol", "Gotan"];
const PRODUCT_TYPES: [&str; 3] = ["OPC 43", "OPC 53", "PPC"];

/// Hourly timestamp `index` hours after the dataset epoch.
fn timestamp(index: usize) -> String {
    format!("2025-01-15T{:02}:00:00Z", index % 24)
}

fn record(id: usize, metrics: Vec<(&str, JsonValue)>) -> TelemetryRecord {
    let created_at = timestamp(id);
    let mut metrics: BTreeMap<String, JsonValue> = metrics
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value))
        .collect();
    metrics.insert("timestamp".to_owned(), json!(created_at));

    TelemetryRecord {
        id: i64::try_from(id).unwrap_or(i64::MAX),
        created_at: Some(created_at),
        location: Some(LOCATIONS[(id - 1) % LOCATIONS.len()].to_owned()),
        metrics,
    }
}

/// Cycles through `values` by record index.
fn pick<'a>(values: &[&'a str], index: usize) -> &'a str {
    values[index % values.len()]
}

/// Deterministic spread in `[0, 1)` used to vary numeric columns.
fn wobble(index: usize) -> f64 {
    ((index * 37) % 100) as f64 / 100.0
}

pub fn kiln_operations() -> Vec<TelemetryRecord> {
    (1..=12)
        .map(|id| {
            let w = wobble(id);
            record(
                id,
                vec![
                    ("kiln_id", json!(format!("KILN-{}", (id - 1) % 3 + 1))),
                    ("temperature", json!(1400.0 + 50.0 * w)),
                    ("feed_rate", json!(180.0 + 20.0 * w)),
                    ("rotation_speed", json!(3.2 + 0.3 * w)),
                    ("pressure", json!(25.0 + 5.0 * w)),
                    ("fuel_consumption", json!(45.0 + 5.0 * w)),
                    ("thermal_efficiency", json!(78.0 + 8.0 * w)),
                    ("production_rate", json!(250.0 + 30.0 * w)),
                    ("status", json!(if w > 0.2 { "Normal" } else { "Warning" })),
                ],
            )
        })
        .collect()
}

pub fn alternative_fuels() -> Vec<TelemetryRecord> {
    const FUELS: [&str; 5] = [
        "Biomass",
        "RDF",
        "Plastic Waste",
        "Municipal Waste",
        "Agricultural Waste",
    ];
    (1..=10)
        .map(|id| {
            let w = wobble(id);
            record(
                id,
                vec![
                    ("fuel_type", json!(pick(&FUELS, id - 1))),
                    ("quantity_used", json!(50.0 + 100.0 * w)),
                    ("substitution_rate", json!(20.0 + 15.0 * w)),
                    ("cost_savings", json!(50_000.0 + 100_000.0 * w)),
                    ("emissions_reduced", json!(100.0 + 200.0 * w)),
                    ("energy_content", json!(15.0 + 10.0 * w)),
                    ("kiln_id", json!(format!("KILN-{}", (id - 1) % 3 + 1))),
                ],
            )
        })
        .collect()
}

pub fn optimization_results() -> Vec<TelemetryRecord> {
    const KINDS: [&str; 5] = ["Energy", "Fuel", "Production", "Quality", "Maintenance"];
    (1..=10)
        .map(|id| {
            let w = wobble(id);
            record(
                id,
                vec![
                    ("optimization_type", json!(pick(&KINDS, id - 1))),
                    ("description", json!(format!("Optimization recommendation {id}"))),
                    ("current_value", json!(100.0 + 50.0 * w)),
                    ("optimized_value", json!(120.0 + 60.0 * w)),
                    ("savings", json!(25_000.0 + 75_000.0 * w)),
                    ("status", json!(if w > 0.3 { "Implemented" } else { "Pending" })),
                ],
            )
        })
        .collect()
}

pub fn utilities_monitoring() -> Vec<TelemetryRecord> {
    const UTILITIES: [(&str, &str); 4] = [
        ("Electricity", "kWh"),
        ("Water", "m³"),
        ("Compressed Air", "m³"),
        ("Steam", "kg"),
    ];
    (1..=12)
        .map(|id| {
            let w = wobble(id);
            let (utility, unit) = UTILITIES[(id - 1) % UTILITIES.len()];
            record(
                id,
                vec![
                    ("utility_type", json!(utility)),
                    ("consumption", json!(500.0 + 500.0 * w)),
                    ("cost", json!(10_000.0 + 50_000.0 * w)),
                    ("unit", json!(unit)),
                    ("efficiency", json!(75.0 + 20.0 * w)),
                ],
            )
        })
        .collect()
}

pub fn raw_material_feed() -> Vec<TelemetryRecord> {
    const MATERIALS: [&str; 5] = ["Limestone", "Clay", "Iron Ore", "Gypsum", "Fly Ash"];
    const SOURCES: [&str; 4] = ["Quarry A", "Quarry B", "Supplier 1", "Supplier 2"];
    const GRADES: [&str; 3] = ["A", "B", "A+"];
    (1..=10)
        .map(|id| {
            let w = wobble(id);
            record(
                id,
                vec![
                    ("material_type", json!(pick(&MATERIALS, id - 1))),
                    ("quantity", json!(500.0 + 1000.0 * w)),
                    ("source", json!(pick(&SOURCES, id - 1))),
                    ("quality_grade", json!(pick(&GRADES, id))),
                    ("cost_per_ton", json!(800.0 + 400.0 * w)),
                ],
            )
        })
        .collect()
}

pub fn grinding_operations() -> Vec<TelemetryRecord> {
    (1..=8)
        .map(|id| {
            let w = wobble(id);
            record(
                id,
                vec![
                    ("mill_id", json!(format!("MILL-{}", (id - 1) % 2 + 1))),
                    ("feed_rate", json!(120.0 + 30.0 * w)),
                    ("fineness", json!(3200.0 + 400.0 * w)),
                    ("power_consumption", json!(180.0 + 40.0 * w)),
                    ("production_rate", json!(100.0 + 30.0 * w)),
                    ("product_type", json!(pick(&PRODUCT_TYPES, id - 1))),
                ],
            )
        })
        .collect()
}

pub fn quality_control() -> Vec<TelemetryRecord> {
    (1..=10)
        .map(|id| {
            let w = wobble(id);
            record(
                id,
                vec![
                    ("sample_id", json!(format!("QC-{}", 999 + id))),
                    ("product_type", json!(pick(&PRODUCT_TYPES, id - 1))),
                    ("strength_3day", json!(18.0 + 4.0 * w)),
                    ("strength_7day", json!(28.0 + 5.0 * w)),
                    ("strength_28day", json!(45.0 + 8.0 * w)),
                    ("fineness", json!(3200.0 + 400.0 * w)),
                    ("cao", json!(62.0 + 3.0 * w)),
                    ("sio2", json!(20.0 + 2.0 * w)),
                    ("al2o3", json!(5.0 + w)),
                    ("fe2o3", json!(3.0 + 0.5 * w)),
                    ("loi", json!(2.0 + w)),
                    ("status", json!(if w > 0.15 { "Pass" } else { "Review" })),
                ],
            )
        })
        .collect()
}

pub fn ai_recommendations() -> Vec<AiRecommendation> {
    let entries = [
        (
            "Energy Efficiency",
            "High",
            "Optimize Kiln Feed Rate",
            "Reduce kiln feed rate by 5% during off-peak hours to improve thermal efficiency \
             and reduce energy costs.",
            "Expected savings: ₹2.5L per month, 8% reduction in fuel consumption",
            "Pending",
        ),
        (
            "Alternative Fuels",
            "High",
            "Increase RDF Substitution",
            "Increase RDF usage from 20% to 30% thermal substitution rate. Quality tests show \
             no impact on clinker quality.",
            "Expected savings: ₹4L per month, 15% reduction in CO₂ emissions",
            "Implemented",
        ),
        (
            "Maintenance",
            "Medium",
            "Schedule Mill Liner Replacement",
            "Mill-2 showing 12% efficiency drop. Recommend liner inspection and replacement \
             within 2 weeks.",
            "Prevent 20% further efficiency loss, maintain production targets",
            "Pending",
        ),
        (
            "Quality Control",
            "Low",
            "Adjust Limestone Proportion",
            "Recent quality tests suggest increasing limestone proportion by 2% to improve CaO \
             content consistency.",
            "Improved quality consistency, reduce rejection rate by 3%",
            "Under Review",
        ),
        (
            "Production",
            "High",
            "Optimize Grinding Circuit",
            "Adjust separator speed to reduce circulating load and improve mill throughput by 8%.",
            "Increase production by 800 TPD, reduce specific power consumption",
            "Implemented",
        ),
    ];

    entries
        .into_iter()
        .enumerate()
        .map(
            |(index, (category, priority, title, description, impact, status))| {
                let id = index + 1;
                let created_at = timestamp(id * 3);
                AiRecommendation {
                    id: i64::try_from(id).unwrap_or(i64::MAX),
                    timestamp: Some(created_at.clone()),
                    category: Some(category.to_owned()),
                    priority: Some(Priority::Label(priority.to_owned())),
                    title: Some(title.to_owned()),
                    description: description.to_owned(),
                    expected_impact: Some(impact.to_owned()),
                    status: Some(status.to_owned()),
                    location: Some(LOCATIONS[index % LOCATIONS.len()].to_owned()),
                    created_at: Some(created_at),
                    extra: BTreeMap::new(),
                }
            },
        )
        .collect()
}

fn kpi(current: f64, target: f64, unit: &str, trend: &str, change: f64) -> KpiMetric {
    KpiMetric {
        current,
        target: Some(target),
        unit: Some(unit.to_owned()),
        trend: Some(trend.to_owned()),
        change: Some(change),
    }
}

pub fn kpis() -> Kpis {
    let metrics = [
        ("production", kpi(2850.0, 3000.0, "TPD", "up", 5.2)),
        ("efficiency", kpi(82.6, 85.0, "%", "up", 2.1)),
        ("thermal_substitution", kpi(25.5, 30.0, "%", "up", 3.8)),
        ("energy_consumption", kpi(88.5, 85.0, "kWh/ton", "down", -2.3)),
        ("quality_compliance", kpi(98.2, 98.0, "%", "stable", 0.1)),
        ("cost_savings", kpi(4.76, 5.0, "Cr/month", "up", 12.5)),
    ];

    Kpis {
        timestamp: None,
        metrics: metrics
            .into_iter()
            .map(|(name, metric)| (name.to_owned(), metric))
            .collect(),
    }
}

pub fn optimization_opportunities() -> Vec<OptimizationOpportunity> {
    [
        ("Energy", "Reduce Peak Hour Consumption", 180_000.0, "Easy", "Medium"),
        ("Fuel", "Increase Alternative Fuel Usage", 450_000.0, "Medium", "High"),
        ("Production", "Optimize Kiln Rotation Speed", 120_000.0, "Easy", "Low"),
        ("Maintenance", "Predictive Maintenance Implementation", 300_000.0, "Hard", "High"),
    ]
    .into_iter()
    .map(|(category, title, potential_savings, difficulty, impact)| OptimizationOpportunity {
        category: category.to_owned(),
        title: title.to_owned(),
        potential_savings,
        difficulty: Some(difficulty.to_owned()),
        impact: Some(impact.to_owned()),
    })
    .collect()
}

pub fn plant_locations() -> Vec<PlantLocation> {
    [
        ("JK_NIMBAHERA", "Nimbahera", 24.6219, 74.6869, 10_000, "Integrated", 1982,
         "Integrated cement plant with state-of-the-art manufacturing facilities"),
        ("JK_MANGROL", "Mangrol", 25.3492, 76.5084, 8_333, "Integrated", 2008,
         "Modern integrated cement plant with advanced automation"),
        ("JK_GOTAN", "Gotan", 26.7929, 73.4413, 6_667, "Grinding", 2012,
         "Grinding unit with efficient production capabilities"),
    ]
    .into_iter()
    .enumerate()
    .map(
        |(index, (code, city, latitude, longitude, capacity, plant_type, year, description))| {
            PlantLocation {
                id: i64::try_from(index + 1).unwrap_or(i64::MAX),
                plant_code: code.to_owned(),
                plant_name: format!("JK Cement {city}"),
                location: format!("{city}, Rajasthan"),
                city: city.to_owned(),
                state: "Rajasthan".to_owned(),
                country: "India".to_owned(),
                latitude,
                longitude,
                capacity_tpd: Some(capacity),
                plant_type: Some(plant_type.to_owned()),
                commissioned_year: Some(year),
                status: Some("Active".to_owned()),
                contact_email: Some(format!("{}@jkcement.com", city.to_lowercase())),
                contact_phone: Some(format!("+91-123456789{index}")),
                description: Some(description.to_owned()),
            }
        },
    )
    .collect()
}

pub fn chat_response() -> ChatResponse {
    ChatResponse {
        message: "Based on current kiln operations data, I recommend optimizing the fuel mix to \
                  increase alternative fuel ratio from 15% to 20%. This could reduce coal \
                  consumption by approximately 50 kg/ton and lower CO2 emissions by 8%."
            .to_owned(),
        session_id: Some("offline_session".to_owned()),
        timestamp: timestamp(12),
        recommendations: vec![
            "Increase alternative fuel ratio to 20%".to_owned(),
            "Reduce coal consumption by 50 kg/ton".to_owned(),
            "Monitor kiln temperature stability during transition".to_owned(),
        ],
    }
}

pub fn chat_history() -> Vec<ChatMessage> {
    [
        (ChatRole::User, "What's the current status of kiln operations?"),
        (
            ChatRole::Assistant,
            "The kiln is operating at 95% efficiency with a temperature of 1420°C. Coal \
             consumption is at 120 kg/ton with 15% alternative fuel ratio.",
        ),
        (ChatRole::User, "How can we improve fuel efficiency?"),
        (
            ChatRole::Assistant,
            "I recommend increasing the alternative fuel ratio to reduce coal dependency. \
             Current data shows stable kiln conditions suitable for optimization.",
        ),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (role, content))| ChatMessage {
        role,
        content: content.to_owned(),
        timestamp: Some(timestamp(10 + index)),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datasets_are_non_empty_and_deterministic() {
        assert!(!kiln_operations().is_empty());
        assert_eq!(kiln_operations(), kiln_operations());
        assert_eq!(quality_control(), quality_control());
        assert_eq!(ai_recommendations().len(), 5);
        assert_eq!(ai_recommendations(), ai_recommendations());
        assert_eq!(plant_locations().len(), 3);
        assert_eq!(optimization_opportunities().len(), 4);
        assert_eq!(chat_history().len(), 4);
    }

    #[test]
    fn records_cycle_plant_locations() {
        let records = kiln_operations();
        assert_eq!(records[0].location.as_deref(), Some("Nimbahera"));
        assert_eq!(records[1].location.as_deref(), Some("Mangrol"));
        assert_eq!(records[2].location.as_deref(), Some("Gotan"));
        assert_eq!(records[0].get_text("kiln_id"), Some("KILN-1"));
        assert!(records[0].get_f64("temperature").is_some());
    }

    #[test]
    fn recommendations_match_decoded_backend_shape() {
        let recommendations = ai_recommendations();
        assert_eq!(
            recommendations[0].priority,
            Some(Priority::Label("High".to_owned()))
        );
        assert_eq!(recommendations[1].location.as_deref(), Some("Mangrol"));

        let json = serde_json::to_string(&recommendations).expect("must encode");
        let decoded: Vec<AiRecommendation> = serde_json::from_str(&json).expect("must decode");
        assert_eq!(decoded, recommendations);
    }

    #[test]
    fn kpis_cover_dashboard_cards() {
        let kpis = kpis();
        assert_eq!(kpis.metrics.len(), 6);
        assert_eq!(kpis.metrics["production"].current, 2850.0);
        assert_eq!(kpis.metrics["energy_consumption"].trend.as_deref(), Some("down"));
    }

    #[test]
    fn fallback_records_decode_as_backend_rows() {
        let records = utilities_monitoring();
        let json = serde_json::to_string(&records).expect("must encode");
        let decoded: Vec<TelemetryRecord> = serde_json::from_str(&json).expect("must decode");
        assert_eq!(decoded.len(), records.len());
        assert_eq!(decoded[0].id, 1);
        assert_eq!(decoded[0].get_text("utility_type"), Some("Electricity"));
        assert_eq!(decoded[1].get_text("unit"), Some("m³"));
        assert_eq!(decoded[0].location, records[0].location);
    }

    #[test]
    fn canned_chat_response_has_recommendations() {
        let response = chat_response();
        assert_eq!(response.recommendations.len(), 3);
        assert!(!response.message.is_empty());
    }
}
