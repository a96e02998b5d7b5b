use serde::{Deserialize, Serialize};

use crate::models::domain::MatchResult;

/// Response for the match endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub results: Vec<MatchResult>,
    pub total_active: usize,
}

/// Response wrapper for all generated copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyResponse {
    pub text: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
