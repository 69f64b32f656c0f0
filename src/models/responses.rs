use serde::{Deserialize, Serialize};

use crate::core::RecommendationResult;
use crate::models::scoring::ProfileKind;

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(rename = "seekerId")]
    pub seeker_id: String,
    pub profile: ProfileKind,
    #[serde(flatten)]
    pub result: RecommendationResult,
    #[serde(rename = "persistedId")]
    pub persisted_id: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
