use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a listing. Only `active` listings are matchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Draft,
    Active,
    Reserved,
    Sold,
    Rented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Flat,
    House,
    Studio,
    Office,
    Plot,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Flat => "flat",
            PropertyType::House => "house",
            PropertyType::Studio => "studio",
            PropertyType::Office => "office",
            PropertyType::Plot => "plot",
        }
    }
}

/// Energy efficiency grade, A (best) to G (worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnergyLabel {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl EnergyLabel {
    /// A and B grades qualify for the valuation premium.
    pub fn is_efficient(&self) -> bool {
        matches!(self, EnergyLabel::A | EnergyLabel::B)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

fn default_country() -> String {
    "ES".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFeatures {
    pub rooms: u8,
    #[serde(default)]
    pub baths: u8,
    pub area_sqm: f64,
    #[serde(default)]
    pub floor: Option<i8>,
    #[serde(default)]
    pub elevator: bool,
    #[serde(default)]
    pub balcony: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub heating: Option<String>,
    #[serde(default)]
    pub construction_year: Option<u16>,
    #[serde(default)]
    pub energy_label: Option<EnergyLabel>,
}

/// A listing in the catalog. Identity is immutable; status, price and
/// features change over the listing's lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub reference: String,
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: PropertyStatus,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub address: Address,
    pub features: PropertyFeatures,
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn is_active(&self) -> bool {
        self.status == PropertyStatus::Active
    }
}

pub(crate) fn default_currency() -> String {
    "EUR".to_string()
}

/// Pipeline position of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStage {
    New,
    Qualified,
    Visiting,
    Offer,
    Won,
    Lost,
}

/// Amenities the lead insists on. Each one that is requested and present
/// on a listing contributes a small score bonus.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MustHaves {
    #[serde(default)]
    pub elevator: bool,
    #[serde(default)]
    pub balcony: bool,
    #[serde(default)]
    pub parking: bool,
}

/// Stated search preferences. Every field is optional: an absent field
/// means the criterion was not requested and contributes no score delta.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPreferences {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
    #[serde(default)]
    pub min_rooms: Option<u8>,
    #[serde(default)]
    pub min_area_sqm: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub must_haves: MustHaves,
}

/// A prospective buyer/renter tracked through the sales pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub stage: LeadStage,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub preferences: LeadPreferences,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    /// Set only while the lead sits in the `lost` stage.
    #[serde(default)]
    pub lost_reason: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compatibility of one lead with one listing. Derived on demand,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub lead_id: String,
    pub property_id: String,
    pub score: u8,
    pub reasons: Vec<String>,
}

/// A synthetic nearby listing used to justify a valuation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparable {
    pub reference: String,
    pub distance_km: f64,
    pub price: f64,
    pub area_sqm: f64,
    pub rooms: u8,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

/// Suggested market price with supporting evidence. Derived, not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub suggested_price: f64,
    pub range: PriceRange,
    pub comparables: Vec<Comparable>,
    pub rationale: Vec<String>,
}

/// Input for a price estimate: where the property is and what it offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationInput {
    pub address: Address,
    #[serde(default, rename = "type")]
    pub property_type: Option<PropertyType>,
    pub features: PropertyFeatures,
}

/// Tone selector for generated ads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStyle {
    Friendly,
    Luxury,
    Investor,
}

/// Everything an outreach email interpolates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailContext {
    pub recipient: String,
    pub subject: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Score deltas applied by the matching scorer. The final score always
/// starts at `base` and is clamped into [0, 100].
#[derive(Debug, Clone, Copy)]
pub struct ScoringAdjustments {
    pub base: i32,
    pub budget_within: i32,
    pub budget_over: i32,
    pub budget_over_threshold: f64,
    pub city: i32,
    pub property_type: i32,
    pub rooms: i32,
    pub area: i32,
    pub amenity: i32,
}

impl Default for ScoringAdjustments {
    fn default() -> Self {
        Self {
            base: 50,
            budget_within: 20,
            budget_over: -15,
            budget_over_threshold: 1.2,
            city: 15,
            property_type: 10,
            rooms: 10,
            area: 10,
            amenity: 5,
        }
    }
}
