use crate::models::domain::{MatchOutcome, RecommendedSet};
use serde::{Deserialize, Serialize};

/// Response for the draw schedule endpoint.
///
/// The schedule fields are always present; the draw-number fields are absent
/// when no draw history is available, matching the original client which
/// renders the date regardless and marks the numbers as unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(rename = "nextDrawDate")]
    pub next_draw_date: chrono::NaiveDate,
    #[serde(rename = "latestDrawNumber")]
    pub latest_draw_number: Option<u32>,
    #[serde(rename = "nextDrawNumber")]
    pub next_draw_number: Option<u32>,
}

/// A stored recommended set together with its on-demand outcome against the
/// latest recorded draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationView {
    #[serde(flatten)]
    pub set: RecommendedSet,
    #[serde(rename = "latestMatch")]
    pub latest_match: Option<MatchOutcome>,
}

/// Response for the recommendation listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<RecommendationView>,
    #[serde(rename = "latestDrawNumber")]
    pub latest_draw_number: Option<u32>,
}

/// Response for the generate endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub recommendations: Vec<RecommendedSet>,
    #[serde(rename = "latestDrawNumber")]
    pub latest_draw_number: Option<u32>,
}

/// Response for the record-draw endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDrawResponse {
    pub success: bool,
    #[serde(rename = "drawNumber")]
    pub draw_number: u32,
}

/// Response for the delete-recommendation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
