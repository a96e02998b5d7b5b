// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AdStyle, Address, Comparable, EmailContext, EnergyLabel, Lead, LeadPreferences, LeadStage,
    MatchResult, MustHaves, PriceRange, Property, PropertyFeatures, PropertyStatus, PropertyType,
    ScoringAdjustments, ValuationInput, ValuationResult,
};
pub use requests::{
    AdRequest, CreateLeadRequest, CreatePropertyRequest, EmailRequest, MatchRequest, ReelRequest,
    UpdateLeadStageRequest, UpdatePropertyRequest, ValuationRequest,
};
pub use responses::{CopyResponse, ErrorResponse, HealthResponse, MatchResponse};
