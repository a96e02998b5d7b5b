// Unit tests for the Inmo engine core

use chrono::Utc;
use inmo_engine::core::{
    copy::{format_price, format_thousands, write_ad, write_email, write_reel_script, REEL_HOOKS},
    matching::score_property,
    valuation::{estimate_price, rate_for_city, DEFAULT_RATE_EUR_SQM},
};
use inmo_engine::models::{
    Address, AdStyle, EmailContext, EnergyLabel, Lead, LeadPreferences, LeadStage, MustHaves,
    Property, PropertyFeatures, PropertyStatus, PropertyType, ScoringAdjustments, ValuationInput,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn address(city: &str) -> Address {
    Address {
        street: "Calle Mayor 1".to_string(),
        city: city.to_string(),
        state: None,
        zip: None,
        country: "ES".to_string(),
        lat: None,
        lng: None,
    }
}

fn features(area_sqm: f64, rooms: u8) -> PropertyFeatures {
    PropertyFeatures {
        rooms,
        baths: 1,
        area_sqm,
        floor: None,
        elevator: false,
        balcony: false,
        parking: false,
        heating: None,
        construction_year: None,
        energy_label: None,
    }
}

fn property(id: &str, city: &str, price: f64, status: PropertyStatus) -> Property {
    Property {
        id: id.to_string(),
        reference: format!("REF-{}", id),
        price,
        currency: "EUR".to_string(),
        status,
        property_type: PropertyType::Flat,
        address: address(city),
        features: features(90.0, 3),
        media: vec![],
        tags: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn lead(budget: Option<f64>, preferences: LeadPreferences) -> Lead {
    Lead {
        id: "lead-1".to_string(),
        name: "Test Lead".to_string(),
        email: None,
        phone: None,
        stage: LeadStage::New,
        budget,
        preferences,
        source: None,
        note: None,
        lost_reason: None,
        tags: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn test_score_is_always_in_range() {
    let adjustments = ScoringAdjustments::default();
    let budgets = [None, Some(100_000.0), Some(1_000_000.0)];
    let prices = [50_000.0, 150_000.0, 500_000.0, 2_000_000.0];

    for budget in budgets {
        for price in prices {
            let preferences = LeadPreferences {
                city: Some("Madrid".to_string()),
                property_types: vec![PropertyType::Flat],
                min_rooms: Some(1),
                min_area_sqm: Some(10.0),
                max_price: budget,
                must_haves: MustHaves {
                    elevator: true,
                    balcony: true,
                    parking: true,
                },
            };
            let (score, reasons) = score_property(
                &lead(budget, preferences),
                &property("1", "Madrid", price, PropertyStatus::Active),
                &adjustments,
            );
            assert!(score <= 100, "score {} out of range", score);
            assert!(!reasons.is_empty());
        }
    }
}

#[test]
fn test_scorer_handles_empty_preferences() {
    let (score, reasons) = score_property(
        &lead(None, LeadPreferences::default()),
        &property("1", "Madrid", 400_000.0, PropertyStatus::Active),
        &ScoringAdjustments::default(),
    );

    assert_eq!(score, 50);
    assert_eq!(reasons, vec!["Basic compatibility".to_string()]);
}

#[test]
fn test_city_match_is_case_insensitive() {
    let preferences = LeadPreferences {
        city: Some("MADRID".to_string()),
        ..Default::default()
    };
    let (score, _) = score_property(
        &lead(None, preferences),
        &property("1", "madrid", 400_000.0, PropertyStatus::Active),
        &ScoringAdjustments::default(),
    );

    assert_eq!(score, 65);
}

#[test]
fn test_city_rate_fallback() {
    assert_eq!(rate_for_city("Madrid"), 4500.0);
    assert_eq!(rate_for_city("Cuenca"), DEFAULT_RATE_EUR_SQM);
    assert_eq!(rate_for_city(""), DEFAULT_RATE_EUR_SQM);
}

#[test]
fn test_valuation_madrid_worked_example() {
    let input = ValuationInput {
        address: address("Madrid"),
        property_type: None,
        features: features(120.0, 3),
    };

    let mut rng = StdRng::seed_from_u64(0);
    let result = estimate_price(&input, &mut rng);

    assert_eq!(result.suggested_price, 540_000.0);
    assert_eq!(result.range.low, 486_000.0);
    assert_eq!(result.range.high, 594_000.0);
    assert_eq!(result.comparables.len(), 3);
    assert!(result.rationale[0].contains("4500"));
}

#[test]
fn test_valuation_all_multipliers() {
    let mut full = features(100.0, 4);
    full.elevator = true;
    full.balcony = true;
    full.parking = true;
    full.energy_label = Some(EnergyLabel::B);
    full.construction_year = Some(2020);

    let input = ValuationInput {
        address: address("Zaragoza"),
        property_type: Some(PropertyType::Flat),
        features: full,
    };

    let mut rng = StdRng::seed_from_u64(0);
    let result = estimate_price(&input, &mut rng);

    let expected = (1900.0 * 100.0 * 1.05 * 1.03 * 1.08 * 1.04 * 1.02_f64).round();
    assert_eq!(result.suggested_price, expected);
    // base + area + five adjustments + closing line
    assert_eq!(result.rationale.len(), 8);
}

#[test]
fn test_valuation_monotone_in_area() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut previous = 0.0;
    for area in [40.0, 70.0, 100.0, 130.0, 250.0] {
        let input = ValuationInput {
            address: address("Bilbao"),
            property_type: None,
            features: features(area, 3),
        };
        let result = estimate_price(&input, &mut rng);
        assert!(result.suggested_price > previous);
        previous = result.suggested_price;
    }
}

#[test]
fn test_format_thousands_grouping() {
    assert_eq!(format_thousands(540_000.0), "540.000");
    assert_eq!(format_thousands(4_500.0), "4.500");
    assert_eq!(format_thousands(12.0), "12");
    assert_eq!(format_price(750_000.0, "EUR"), "750.000 €");
}

#[test]
fn test_luxury_ad_contract() {
    let mut listing = property("1", "Barcelona", 1_250_000.0, PropertyStatus::Active);
    listing.features.baths = 3;

    let ad = write_ad(&listing, AdStyle::Luxury);

    assert!(ad.contains("BARCELONA"));
    assert!(ad.contains("1.250.000 €"));
    assert!(ad.contains(&listing.reference));
}

#[test]
fn test_friendly_and_investor_ads_differ() {
    let listing = property("1", "Valencia", 300_000.0, PropertyStatus::Active);

    let friendly = write_ad(&listing, AdStyle::Friendly);
    let investor = write_ad(&listing, AdStyle::Investor);

    assert_ne!(friendly, investor);
    assert!(investor.contains("Investment opportunity"));
}

#[test]
fn test_email_renders_bullets_in_order() {
    let context = EmailContext {
        recipient: "Marc".to_string(),
        subject: "Shortlist".to_string(),
        goal: Some("Here are this week's picks:".to_string()),
        bullets: vec!["first".to_string(), "second".to_string()],
    };

    let email = write_email(&context);
    let first = email.find("- first").expect("first bullet missing");
    let second = email.find("- second").expect("second bullet missing");
    assert!(first < second);
    assert!(email.contains("Here are this week's picks:"));
}

#[test]
fn test_reel_duration_templates() {
    let listing = property("1", "Madrid", 400_000.0, PropertyStatus::Active);
    let mut rng = StdRng::seed_from_u64(5);

    let short = write_reel_script(&listing, 12, &mut rng);
    let long = write_reel_script(&listing, 28, &mut rng);

    assert!(short.contains("12-15s:"));
    assert!(!short.contains("22-27s:"));
    assert!(long.contains("22-27s:"));
    assert!(long.contains("27-30s:"));

    for script in [&short, &long] {
        let hook_line = script.lines().next().unwrap();
        assert!(
            REEL_HOOKS.iter().any(|hook| hook_line.ends_with(hook)),
            "unknown hook line: {}",
            hook_line
        );
    }
}
