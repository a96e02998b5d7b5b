//! Inmo Engine - matching, valuation and copywriting for the Inmo real-estate CRM
//!
//! This library provides the heuristics behind the CRM's assisted features:
//! scoring leads against the active catalog, estimating market prices with
//! synthetic comparables, and generating ad/email/reel copy. The same
//! operations are exposed over HTTP by the binary target, behind an
//! interchangeable local/remote driver.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{estimate_price, format_price, rate_for_city, score_property, Matcher};
pub use crate::models::{
    AdStyle, Lead, LeadPreferences, MatchResult, Property, PropertyStatus, ScoringAdjustments,
    ValuationInput, ValuationResult,
};
pub use crate::services::{AiDriver, EngineError, InMemoryStore, LocalDriver, RemoteDriver};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(rate_for_city("Madrid"), 4500.0);
        let matcher = Matcher::with_default_adjustments();
        let _ = format!("{:?}", matcher);
    }
}
