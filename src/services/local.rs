use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::core::{copy, estimate_price, Matcher};
use crate::models::{
    AdStyle, EmailContext, Lead, MatchResult, Property, ScoringAdjustments, ValuationInput,
    ValuationResult,
};
use crate::services::driver::{AiDriver, EngineError};

/// Deterministic in-process engine.
///
/// Matching and the valuation figures are pure functions; the RNG only
/// feeds comparable synthesis and reel hook selection. Seeding it (via
/// config) makes those reproducible as well.
pub struct LocalDriver {
    matcher: Matcher,
    rng: Mutex<StdRng>,
}

impl LocalDriver {
    pub fn new(adjustments: ScoringAdjustments) -> Self {
        Self::with_rng(adjustments, StdRng::from_entropy())
    }

    pub fn with_seed(adjustments: ScoringAdjustments, seed: u64) -> Self {
        Self::with_rng(adjustments, StdRng::seed_from_u64(seed))
    }

    fn with_rng(adjustments: ScoringAdjustments, rng: StdRng) -> Self {
        Self {
            matcher: Matcher::new(adjustments),
            rng: Mutex::new(rng),
        }
    }
}

impl Default for LocalDriver {
    fn default() -> Self {
        Self::new(ScoringAdjustments::default())
    }
}

#[async_trait]
impl AiDriver for LocalDriver {
    async fn match_lead(
        &self,
        lead: &Lead,
        properties: &[Property],
    ) -> Result<Vec<MatchResult>, EngineError> {
        Ok(self.matcher.match_lead(lead, properties))
    }

    async fn estimate_price(&self, input: &ValuationInput) -> Result<ValuationResult, EngineError> {
        let mut rng = self.rng.lock().await;
        Ok(estimate_price(input, &mut *rng))
    }

    async fn write_ad(&self, property: &Property, style: AdStyle) -> Result<String, EngineError> {
        Ok(copy::write_ad(property, style))
    }

    async fn write_email(&self, context: &EmailContext) -> Result<String, EngineError> {
        Ok(copy::write_email(context))
    }

    async fn write_reel_script(
        &self,
        property: &Property,
        duration_secs: u16,
    ) -> Result<String, EngineError> {
        let mut rng = self.rng.lock().await;
        Ok(copy::write_reel_script(property, duration_secs, &mut *rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, LeadPreferences, LeadStage, PropertyFeatures, PropertyStatus, PropertyType};
    use chrono::Utc;

    fn test_input() -> ValuationInput {
        ValuationInput {
            address: Address {
                street: "Calle Mayor 1".to_string(),
                city: "Madrid".to_string(),
                state: None,
                zip: None,
                country: "ES".to_string(),
                lat: None,
                lng: None,
            },
            property_type: Some(PropertyType::Flat),
            features: PropertyFeatures {
                rooms: 3,
                baths: 1,
                area_sqm: 120.0,
                floor: None,
                elevator: false,
                balcony: false,
                parking: false,
                heating: None,
                construction_year: None,
                energy_label: None,
            },
        }
    }

    #[tokio::test]
    async fn test_seeded_drivers_agree_on_comparables() {
        let a = LocalDriver::with_seed(ScoringAdjustments::default(), 42);
        let b = LocalDriver::with_seed(ScoringAdjustments::default(), 42);

        let result_a = a.estimate_price(&test_input()).await.unwrap();
        let result_b = b.estimate_price(&test_input()).await.unwrap();

        assert_eq!(result_a.suggested_price, result_b.suggested_price);
        for (x, y) in result_a.comparables.iter().zip(result_b.comparables.iter()) {
            assert_eq!(x.price, y.price);
            assert_eq!(x.reference, y.reference);
        }
    }

    #[tokio::test]
    async fn test_match_lead_delegates_to_matcher() {
        let driver = LocalDriver::default();
        let lead = Lead {
            id: "lead-1".to_string(),
            name: "Test".to_string(),
            email: None,
            phone: None,
            stage: LeadStage::New,
            budget: Some(600_000.0),
            preferences: LeadPreferences::default(),
            source: None,
            note: None,
            lost_reason: None,
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let property = Property {
            id: "prop-1".to_string(),
            reference: "REF-0001".to_string(),
            price: 540_000.0,
            currency: "EUR".to_string(),
            status: PropertyStatus::Active,
            property_type: PropertyType::Flat,
            address: Address {
                street: "Calle Mayor 1".to_string(),
                city: "Madrid".to_string(),
                state: None,
                zip: None,
                country: "ES".to_string(),
                lat: None,
                lng: None,
            },
            features: PropertyFeatures {
                rooms: 3,
                baths: 1,
                area_sqm: 120.0,
                floor: None,
                elevator: false,
                balcony: false,
                parking: false,
                heating: None,
                construction_year: None,
                energy_label: None,
            },
            media: vec![],
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let results = driver.match_lead(&lead, &[property]).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 70);
    }
}
