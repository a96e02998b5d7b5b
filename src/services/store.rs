use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{
    Address, Lead, LeadPreferences, LeadStage, MustHaves, Property, PropertyFeatures,
    PropertyStatus, PropertyType,
};

/// Errors that can occur with store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("property not found: {0}")]
    PropertyNotFound(String),

    #[error("lead not found: {0}")]
    LeadNotFound(String),
}

/// Single-session in-memory store backing the mocked REST surface.
///
/// No persistence and no cross-entity referential integrity beyond id
/// lookups; everything lives for the lifetime of the process.
pub struct InMemoryStore {
    properties: RwLock<HashMap<String, Property>>,
    leads: RwLock<HashMap<String, Lead>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            properties: RwLock::new(HashMap::new()),
            leads: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-seeded with a small deterministic catalog, used when
    /// the service runs as a frontend mock.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        {
            let mut properties = store
                .properties
                .try_write()
                .expect("fresh store lock is uncontended");
            for property in demo_properties() {
                properties.insert(property.id.clone(), property);
            }
            let mut leads = store
                .leads
                .try_write()
                .expect("fresh store lock is uncontended");
            for lead in demo_leads() {
                leads.insert(lead.id.clone(), lead);
            }
        }
        store
    }

    /// All listings, newest first.
    pub async fn list_properties(&self) -> Vec<Property> {
        let properties = self.properties.read().await;
        let mut all: Vec<Property> = properties.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        all
    }

    pub async fn get_property(&self, id: &str) -> Result<Property, StoreError> {
        self.properties
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::PropertyNotFound(id.to_string()))
    }

    pub async fn insert_property(&self, property: Property) -> Property {
        let mut properties = self.properties.write().await;
        properties.insert(property.id.clone(), property.clone());
        tracing::debug!("Inserted property {} ({})", property.id, property.reference);
        property
    }

    /// Update the mutable parts of a listing: status and/or price.
    pub async fn update_property(
        &self,
        id: &str,
        status: Option<PropertyStatus>,
        price: Option<f64>,
    ) -> Result<Property, StoreError> {
        let mut properties = self.properties.write().await;
        let property = properties
            .get_mut(id)
            .ok_or_else(|| StoreError::PropertyNotFound(id.to_string()))?;

        if let Some(status) = status {
            property.status = status;
        }
        if let Some(price) = price {
            property.price = price;
        }
        property.updated_at = chrono::Utc::now();

        Ok(property.clone())
    }

    /// All leads, newest first.
    pub async fn list_leads(&self) -> Vec<Lead> {
        let leads = self.leads.read().await;
        let mut all: Vec<Lead> = leads.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        all
    }

    pub async fn get_lead(&self, id: &str) -> Result<Lead, StoreError> {
        self.leads
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::LeadNotFound(id.to_string()))
    }

    pub async fn insert_lead(&self, lead: Lead) -> Lead {
        let mut leads = self.leads.write().await;
        leads.insert(lead.id.clone(), lead.clone());
        tracing::debug!("Inserted lead {} ({})", lead.id, lead.name);
        lead
    }

    /// Move a lead to another pipeline stage.
    ///
    /// `lost_reason` is stored only when the new stage is `lost`; moving
    /// to any other stage clears it.
    pub async fn update_lead_stage(
        &self,
        id: &str,
        stage: LeadStage,
        lost_reason: Option<String>,
    ) -> Result<Lead, StoreError> {
        let mut leads = self.leads.write().await;
        let lead = leads
            .get_mut(id)
            .ok_or_else(|| StoreError::LeadNotFound(id.to_string()))?;

        lead.stage = stage;
        lead.lost_reason = if stage == LeadStage::Lost {
            lost_reason
        } else {
            None
        };
        lead.updated_at = chrono::Utc::now();

        tracing::debug!("Lead {} moved to stage {:?}", id, stage);

        Ok(lead.clone())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_address(street: &str, city: &str, zip: &str) -> Address {
    Address {
        street: street.to_string(),
        city: city.to_string(),
        state: None,
        zip: Some(zip.to_string()),
        country: "ES".to_string(),
        lat: None,
        lng: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn demo_property(
    id: &str,
    reference: &str,
    price: f64,
    status: PropertyStatus,
    property_type: PropertyType,
    address: Address,
    features: PropertyFeatures,
    tags: &[&str],
) -> Property {
    let now = chrono::Utc::now();
    Property {
        id: id.to_string(),
        reference: reference.to_string(),
        price,
        currency: "EUR".to_string(),
        status,
        property_type,
        address,
        features,
        media: vec![],
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        created_at: now,
        updated_at: now,
    }
}

fn demo_properties() -> Vec<Property> {
    vec![
        demo_property(
            "prop-serrano",
            "REF-1001",
            750_000.0,
            PropertyStatus::Active,
            PropertyType::Flat,
            demo_address("Calle Serrano 21", "Madrid", "28001"),
            PropertyFeatures {
                rooms: 4,
                baths: 2,
                area_sqm: 140.0,
                floor: Some(5),
                elevator: true,
                balcony: true,
                parking: false,
                heating: Some("central".to_string()),
                construction_year: Some(2015),
                energy_label: Some(crate::models::EnergyLabel::B),
            },
            &["exclusive"],
        ),
        demo_property(
            "prop-lavapies",
            "REF-1002",
            320_000.0,
            PropertyStatus::Active,
            PropertyType::Flat,
            demo_address("Calle Argumosa 8", "Madrid", "28012"),
            PropertyFeatures {
                rooms: 2,
                baths: 1,
                area_sqm: 68.0,
                floor: Some(3),
                elevator: false,
                balcony: true,
                parking: false,
                heating: None,
                construction_year: Some(1972),
                energy_label: Some(crate::models::EnergyLabel::E),
            },
            &[],
        ),
        demo_property(
            "prop-gracia",
            "REF-1003",
            495_000.0,
            PropertyStatus::Active,
            PropertyType::Flat,
            demo_address("Carrer de Verdi 50", "Barcelona", "08012"),
            PropertyFeatures {
                rooms: 3,
                baths: 2,
                area_sqm: 95.0,
                floor: Some(2),
                elevator: true,
                balcony: false,
                parking: true,
                heating: Some("gas".to_string()),
                construction_year: Some(2012),
                energy_label: Some(crate::models::EnergyLabel::C),
            },
            &["renovated"],
        ),
        demo_property(
            "prop-ruzafa",
            "REF-1004",
            210_000.0,
            PropertyStatus::Active,
            PropertyType::Studio,
            demo_address("Carrer de Cuba 12", "Valencia", "46006"),
            PropertyFeatures {
                rooms: 1,
                baths: 1,
                area_sqm: 45.0,
                floor: Some(1),
                elevator: false,
                balcony: false,
                parking: false,
                heating: None,
                construction_year: Some(1998),
                energy_label: Some(crate::models::EnergyLabel::D),
            },
            &[],
        ),
        demo_property(
            "prop-triana",
            "REF-1005",
            380_000.0,
            PropertyStatus::Reserved,
            PropertyType::House,
            demo_address("Calle Betis 3", "Sevilla", "41010"),
            PropertyFeatures {
                rooms: 4,
                baths: 2,
                area_sqm: 160.0,
                floor: None,
                elevator: false,
                balcony: true,
                parking: true,
                heating: None,
                construction_year: Some(1985),
                energy_label: Some(crate::models::EnergyLabel::F),
            },
            &[],
        ),
        demo_property(
            "prop-abando",
            "REF-1006",
            610_000.0,
            PropertyStatus::Draft,
            PropertyType::Office,
            demo_address("Gran Vía 40", "Bilbao", "48011"),
            PropertyFeatures {
                rooms: 6,
                baths: 2,
                area_sqm: 210.0,
                floor: Some(4),
                elevator: true,
                balcony: false,
                parking: true,
                heating: Some("central".to_string()),
                construction_year: Some(2008),
                energy_label: Some(crate::models::EnergyLabel::C),
            },
            &["commercial"],
        ),
    ]
}

fn demo_leads() -> Vec<Lead> {
    let now = chrono::Utc::now();
    vec![
        Lead {
            id: "lead-lucia".to_string(),
            name: "Lucía García".to_string(),
            email: Some("lucia@example.com".to_string()),
            phone: Some("+34 600 000 001".to_string()),
            stage: LeadStage::Qualified,
            budget: Some(800_000.0),
            preferences: LeadPreferences {
                city: Some("Madrid".to_string()),
                property_types: vec![PropertyType::Flat],
                min_rooms: Some(3),
                min_area_sqm: Some(100.0),
                max_price: Some(800_000.0),
                must_haves: MustHaves {
                    elevator: true,
                    balcony: false,
                    parking: false,
                },
            },
            source: Some("website".to_string()),
            note: Some("Prefers Salamanca district".to_string()),
            lost_reason: None,
            tags: vec!["buyer".to_string()],
            created_at: now,
            updated_at: now,
        },
        Lead {
            id: "lead-marc".to_string(),
            name: "Marc Vidal".to_string(),
            email: Some("marc@example.com".to_string()),
            phone: None,
            stage: LeadStage::New,
            budget: Some(350_000.0),
            preferences: LeadPreferences {
                city: Some("Barcelona".to_string()),
                property_types: vec![PropertyType::Flat, PropertyType::Studio],
                min_rooms: None,
                min_area_sqm: None,
                max_price: Some(350_000.0),
                must_haves: MustHaves::default(),
            },
            source: Some("referral".to_string()),
            note: None,
            lost_reason: None,
            tags: vec![],
            created_at: now,
            updated_at: now,
        },
        Lead {
            id: "lead-ana".to_string(),
            name: "Ana Ruiz".to_string(),
            email: None,
            phone: Some("+34 600 000 003".to_string()),
            stage: LeadStage::Visiting,
            budget: None,
            preferences: LeadPreferences::default(),
            source: Some("walk-in".to_string()),
            note: Some("Flexible on location".to_string()),
            lost_reason: None,
            tags: vec![],
            created_at: now,
            updated_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_unknown_property_is_not_found() {
        let store = InMemoryStore::new();
        let err = store.get_property("missing").await.unwrap_err();
        assert!(matches!(err, StoreError::PropertyNotFound(_)));
        assert_eq!(err.to_string(), "property not found: missing");
    }

    #[tokio::test]
    async fn test_insert_and_get_property() {
        let store = InMemoryStore::with_demo_data();
        let property = store.get_property("prop-serrano").await.unwrap();
        assert_eq!(property.reference, "REF-1001");
        assert!(property.is_active());
    }

    #[tokio::test]
    async fn test_update_property_status_and_price() {
        let store = InMemoryStore::with_demo_data();

        let updated = store
            .update_property("prop-serrano", Some(PropertyStatus::Reserved), Some(720_000.0))
            .await
            .unwrap();

        assert_eq!(updated.status, PropertyStatus::Reserved);
        assert_eq!(updated.price, 720_000.0);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_lost_reason_lifecycle() {
        let store = InMemoryStore::with_demo_data();

        let lost = store
            .update_lead_stage("lead-marc", LeadStage::Lost, Some("bought elsewhere".to_string()))
            .await
            .unwrap();
        assert_eq!(lost.lost_reason.as_deref(), Some("bought elsewhere"));

        // Moving back out of lost clears the reason.
        let revived = store
            .update_lead_stage("lead-marc", LeadStage::Qualified, None)
            .await
            .unwrap();
        assert_eq!(revived.lost_reason, None);
    }

    #[tokio::test]
    async fn test_lost_reason_ignored_for_other_stages() {
        let store = InMemoryStore::with_demo_data();

        let lead = store
            .update_lead_stage("lead-ana", LeadStage::Offer, Some("should be dropped".to_string()))
            .await
            .unwrap();

        assert_eq!(lead.stage, LeadStage::Offer);
        assert_eq!(lead.lost_reason, None);
    }

    #[tokio::test]
    async fn test_demo_data_has_active_listings() {
        let store = InMemoryStore::with_demo_data();
        let active = store
            .list_properties()
            .await
            .into_iter()
            .filter(|p| p.is_active())
            .count();
        assert_eq!(active, 4);
    }
}
