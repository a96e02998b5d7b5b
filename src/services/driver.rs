use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AdStyle, EmailContext, Lead, MatchResult, Property, ValuationInput, ValuationResult,
};

/// Errors surfaced by engine drivers.
///
/// Entity lookups happen against the store before a driver is called, so
/// drivers never report missing ids; any remote non-success status is the
/// generic `OperationFailed`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("operation failed: {0}")]
    OperationFailed(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// The engine surface consumed by the HTTP layer.
///
/// Two implementations exist: a local deterministic one and a remote
/// HTTP-backed one. The driver is injected into application state at
/// startup; nothing in the crate holds a global instance.
#[async_trait]
pub trait AiDriver: Send + Sync {
    /// Score every active listing for the given lead, best first.
    async fn match_lead(
        &self,
        lead: &Lead,
        properties: &[Property],
    ) -> Result<Vec<MatchResult>, EngineError>;

    /// Estimate a market price for an address and feature set.
    async fn estimate_price(&self, input: &ValuationInput) -> Result<ValuationResult, EngineError>;

    /// Generate ad copy for a listing.
    async fn write_ad(&self, property: &Property, style: AdStyle) -> Result<String, EngineError>;

    /// Generate an outreach email.
    async fn write_email(&self, context: &EmailContext) -> Result<String, EngineError>;

    /// Generate a reel shooting script sized to the requested duration.
    async fn write_reel_script(
        &self,
        property: &Property,
        duration_secs: u16,
    ) -> Result<String, EngineError>;
}
