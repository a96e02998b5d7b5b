use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    default_currency, Address, AdStyle, EmailContext, Lead, LeadPreferences, LeadStage, Property,
    PropertyFeatures, PropertyStatus, PropertyType, ValuationInput,
};

/// Request to score the active catalog against one lead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    pub lead_id: String,
}

/// Request for a price estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationRequest {
    pub address: Address,
    #[serde(default, rename = "type")]
    pub property_type: Option<PropertyType>,
    pub features: PropertyFeatures,
}

impl ValuationRequest {
    pub fn into_input(self) -> ValuationInput {
        ValuationInput {
            address: self.address,
            property_type: self.property_type,
            features: self.features,
        }
    }
}

/// Request to generate an ad for a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdRequest {
    #[validate(length(min = 1))]
    pub property_id: String,
    pub style: AdStyle,
}

/// Request to generate an outreach email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[validate(length(min = 1))]
    pub recipient: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

impl EmailRequest {
    pub fn into_context(self) -> EmailContext {
        EmailContext {
            recipient: self.recipient,
            subject: self.subject,
            goal: self.goal,
            bullets: self.bullets,
        }
    }
}

/// Request to generate a reel script for a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReelRequest {
    #[validate(length(min = 1))]
    pub property_id: String,
    #[validate(range(min = 5, max = 30))]
    #[serde(default = "default_reel_duration")]
    pub duration_seconds: u16,
}

fn default_reel_duration() -> u16 {
    15
}

/// Payload for creating a listing. Id and timestamps are assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1))]
    pub reference: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_property_status")]
    pub status: PropertyStatus,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub address: Address,
    pub features: PropertyFeatures,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_property_status() -> PropertyStatus {
    PropertyStatus::Draft
}

impl CreatePropertyRequest {
    pub fn into_property(self) -> Property {
        let now = chrono::Utc::now();
        Property {
            id: uuid::Uuid::new_v4().to_string(),
            reference: self.reference,
            price: self.price,
            currency: self.currency,
            status: self.status,
            property_type: self.property_type,
            address: self.address,
            features: self.features,
            media: self.media,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a listing: status and/or price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    #[serde(default)]
    pub status: Option<PropertyStatus>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// Payload for creating a lead. Id and timestamps are assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_lead_stage")]
    pub stage: LeadStage,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub preferences: LeadPreferences,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_lead_stage() -> LeadStage {
    LeadStage::New
}

impl CreateLeadRequest {
    pub fn into_lead(self) -> Lead {
        let now = chrono::Utc::now();
        Lead {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            stage: self.stage,
            budget: self.budget,
            preferences: self.preferences,
            source: self.source,
            note: self.note,
            lost_reason: None,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request to move a lead to another pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadStageRequest {
    pub stage: LeadStage,
    /// Honored only when the new stage is `lost`; ignored otherwise.
    #[serde(default)]
    pub lost_reason: Option<String>,
}
