use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point of the multi-cloud cost series. Sequences are chronological;
/// order is meaningful and preserved everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostPoint {
    pub timestamp: String,
    pub aws: f64,
    pub gcp: f64,
    pub azure: f64,
    pub utilization: f64,
}

/// One point of the AWS per-service cost breakdown series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePoint {
    pub timestamp: String,
    pub ec2: f64,
    pub s3: f64,
    pub lambda: f64,
    pub rds: f64,
    pub utilization: f64,
}

/// API usage snapshot row, one per (team, endpoint). Unordered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRow {
    pub team: String,
    pub endpoint: String,
    pub calls: u64,
    pub latency: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Cost analysis computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAnalysis {
    pub total_costs: f64,
    pub avg_utilization: f64,
    pub highest_provider: (String, f64),
    pub anomalies: Vec<CostPoint>,
    pub recommendations: Vec<String>,
}

/// Reserved-instance purchase suggestion from the forecast analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiRecommendation {
    pub provider: String,
    pub count: u32,
    pub duration: String,
    pub potential_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastAnalysis {
    pub predicted_costs: Vec<CostPoint>,
    pub recommended_instances: Vec<RiRecommendation>,
    pub utilization_trend: UtilizationTrend,
    pub recommendations: Vec<String>,
}

/// Every backend response nests its payload under a `data` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// One fetch cycle's worth of dashboard data. Transient: rebuilt on every
/// refresh, never persisted. The last successful snapshot stays on screen
/// when a refresh fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub cost: Vec<CostPoint>,
    pub forecast: Vec<CostPoint>,
    pub services: Vec<ServicePoint>,
    pub usage: Vec<UsageRow>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cost_point_round_trips_wire_shape() {
        let raw = json!({
            "timestamp": "2024-03-01",
            "aws": 1200.5,
            "gcp": 300.0,
            "azure": 150.25,
            "utilization": 64.0
        });
        let point: CostPoint = serde_json::from_value(raw.clone()).expect("decode cost point");
        assert_eq!(point.aws, 1200.5);
        assert_eq!(serde_json::to_value(&point).expect("encode cost point"), raw);
    }

    #[test]
    fn envelope_unwraps_nested_data() {
        let raw = json!({ "data": [{ "team": "ml", "endpoint": "/v1/infer", "calls": 42, "latency": 120.0, "cost": 3.5 }] });
        let env: Envelope<Vec<UsageRow>> = serde_json::from_value(raw).expect("decode envelope");
        assert_eq!(env.data.len(), 1);
        assert_eq!(env.data[0].team, "ml");
    }

    #[test]
    fn chat_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChatRole::Assistant).expect("encode role"),
            "\"assistant\""
        );
    }

    #[test]
    fn forecast_analysis_uses_camel_case_keys() {
        let raw = json!({
            "predictedCosts": [],
            "recommendedInstances": [
                { "provider": "aws", "count": 3, "duration": "1yr", "potentialSavings": 420.0 }
            ],
            "utilizationTrend": "stable",
            "recommendations": ["rightsize ec2"]
        });
        let analysis: ForecastAnalysis = serde_json::from_value(raw).expect("decode analysis");
        assert_eq!(analysis.utilization_trend, UtilizationTrend::Stable);
        assert_eq!(analysis.recommended_instances[0].potential_savings, 420.0);
    }
}
