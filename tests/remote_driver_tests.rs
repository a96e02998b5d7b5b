// Remote driver tests against a mocked engine endpoint

use chrono::Utc;
use inmo_engine::models::{
    Address, AdStyle, EmailContext, Lead, LeadPreferences, LeadStage, Property, PropertyFeatures,
    PropertyStatus, PropertyType, ValuationInput,
};
use inmo_engine::{AiDriver, EngineError, RemoteDriver};

fn sample_property() -> Property {
    Property {
        id: "prop-1".to_string(),
        reference: "REF-0001".to_string(),
        price: 450_000.0,
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
            baths: 2,
            area_sqm: 100.0,
            floor: Some(2),
            elevator: true,
            balcony: false,
            parking: false,
            heating: None,
            construction_year: Some(2012),
            energy_label: None,
        },
        media: vec![],
        tags: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn sample_lead() -> Lead {
    Lead {
        id: "lead-1".to_string(),
        name: "Test Lead".to_string(),
        email: None,
        phone: None,
        stage: LeadStage::Qualified,
        budget: Some(500_000.0),
        preferences: LeadPreferences::default(),
        source: None,
        note: None,
        lost_reason: None,
        tags: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_remote_match_parses_results() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/match")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results": [{"leadId": "lead-1", "propertyId": "prop-1", "score": 85, "reasons": ["Price within budget"]}]}"#,
        )
        .create_async()
        .await;

    let driver = RemoteDriver::new(server.url(), None);
    let results = driver
        .match_lead(&sample_lead(), &[sample_property()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].property_id, "prop-1");
    assert_eq!(results[0].score, 85);
}

#[tokio::test]
async fn test_remote_valuation_parses_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/valuation")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "suggestedPrice": 450000.0,
                "range": {"low": 405000.0, "high": 495000.0},
                "comparables": [
                    {"reference": "REF-1042", "distanceKm": 0.3, "price": 442000.0, "areaSqm": 96.0, "rooms": 3}
                ],
                "rationale": ["Base rate for Madrid: 4500 €/m²"]
            }"#,
        )
        .create_async()
        .await;

    let driver = RemoteDriver::new(server.url(), Some("secret".to_string()));
    let input = ValuationInput {
        address: sample_property().address,
        property_type: Some(PropertyType::Flat),
        features: sample_property().features,
    };
    let result = driver.estimate_price(&input).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.suggested_price, 450_000.0);
    assert_eq!(result.range.low, 405_000.0);
    assert_eq!(result.comparables.len(), 1);
    assert_eq!(result.comparables[0].reference, "REF-1042");
}

#[tokio::test]
async fn test_remote_sends_api_key_header() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/copy/ad")
        .match_header("x-api-key", "secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"text": "Your next home in Madrid is waiting!"}"#)
        .create_async()
        .await;

    let driver = RemoteDriver::new(server.url(), Some("secret".to_string()));
    let ad = driver
        .write_ad(&sample_property(), AdStyle::Friendly)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(ad.contains("Madrid"));
}

#[tokio::test]
async fn test_remote_404_maps_to_operation_failed() {
    // Any non-success status is the generic failure, 404 included.
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/copy/email")
        .with_status(404)
        .create_async()
        .await;

    let driver = RemoteDriver::new(server.url(), None);
    let context = EmailContext {
        recipient: "Lucía".to_string(),
        subject: "Shortlist".to_string(),
        goal: None,
        bullets: vec![],
    };
    let err = driver.write_email(&context).await.unwrap_err();

    assert!(matches!(err, EngineError::OperationFailed(_)));
}

#[tokio::test]
async fn test_remote_server_error_maps_to_operation_failed() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/copy/reel")
        .with_status(500)
        .create_async()
        .await;

    let driver = RemoteDriver::new(server.url(), None);
    let err = driver
        .write_reel_script(&sample_property(), 20)
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::OperationFailed(_)));
}

#[tokio::test]
async fn test_remote_malformed_body_maps_to_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/match")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let driver = RemoteDriver::new(server.url(), None);
    let err = driver
        .match_lead(&sample_lead(), &[sample_property()])
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidResponse(_)));
}
