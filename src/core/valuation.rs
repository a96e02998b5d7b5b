use rand::Rng;

use crate::models::{Comparable, PriceRange, ValuationInput, ValuationResult};

/// Rate applied when the city is not in the table.
pub const DEFAULT_RATE_EUR_SQM: f64 = 2000.0;

/// Fixed per-city base rates, lowercased keys.
const CITY_RATES_EUR_SQM: [(&str, f64); 7] = [
    ("madrid", 4500.0),
    ("barcelona", 4200.0),
    ("valencia", 2200.0),
    ("sevilla", 2400.0),
    ("málaga", 2800.0),
    ("bilbao", 3100.0),
    ("zaragoza", 1900.0),
];

/// Distances of the three synthetic comparables, nearest first.
const COMPARABLE_DISTANCES_KM: [f64; 3] = [0.3, 0.7, 1.2];

/// Price perturbation band per comparable, widening with distance.
const COMPARABLE_PRICE_BANDS: [(f64, f64); 3] = [(0.95, 1.04), (0.92, 1.06), (0.90, 1.08)];

/// Look up the base €/m² rate for a city, case-insensitively.
pub fn rate_for_city(city: &str) -> f64 {
    let needle = city.trim().to_lowercase();
    CITY_RATES_EUR_SQM
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_RATE_EUR_SQM)
}

/// Estimate a market price for the given address and features.
///
/// The suggested price and range are fully deterministic for identical
/// inputs; only the synthetic comparables draw from `rng`. Adjustments
/// apply multiplicatively in a fixed order, each adding a rationale line:
/// elevator x1.05, balcony x1.03, parking x1.08, energy label A/B x1.04,
/// construction year after 2010 x1.02. The range is +/-10% around the
/// suggested price, all figures rounded to whole euros.
pub fn estimate_price<R: Rng>(input: &ValuationInput, rng: &mut R) -> ValuationResult {
    let city = &input.address.city;
    let rate = rate_for_city(city);
    let area = input.features.area_sqm;

    let mut suggested = rate * area;
    let mut rationale = vec![
        format!("Base rate for {}: {} €/m²", city, rate as i64),
        format!("Area: {} m²", area),
    ];

    if input.features.elevator {
        suggested *= 1.05;
        rationale.push("Elevator: +5%".to_string());
    }
    if input.features.balcony {
        suggested *= 1.03;
        rationale.push("Balcony: +3%".to_string());
    }
    if input.features.parking {
        suggested *= 1.08;
        rationale.push("Parking: +8%".to_string());
    }
    if input
        .features
        .energy_label
        .map_or(false, |label| label.is_efficient())
    {
        suggested *= 1.04;
        rationale.push("Energy label A/B: +4%".to_string());
    }
    if input
        .features
        .construction_year
        .map_or(false, |year| year > 2010)
    {
        suggested *= 1.02;
        rationale.push("Recent construction: +2%".to_string());
    }

    rationale.push("Comparison with similar listings in the area".to_string());

    let suggested = suggested.round();
    let range = PriceRange {
        low: (suggested * 0.9).round(),
        high: (suggested * 1.1).round(),
    };

    let comparables = synthesize_comparables(input, suggested, rng);

    ValuationResult {
        suggested_price: suggested,
        range,
        comparables,
        rationale,
    }
}

/// Build three presentation stand-in comparables around the suggested
/// price. Not market data: randomized variance is the point.
fn synthesize_comparables<R: Rng>(
    input: &ValuationInput,
    suggested: f64,
    rng: &mut R,
) -> Vec<Comparable> {
    COMPARABLE_DISTANCES_KM
        .iter()
        .zip(COMPARABLE_PRICE_BANDS.iter())
        .map(|(&distance_km, &(low, high))| {
            let price = (suggested * rng.gen_range(low..high)).round();
            let area_delta: f64 = rng.gen_range(-12.0..12.0);
            let area_sqm = (input.features.area_sqm + area_delta).max(20.0).round();
            let room_delta: i16 = rng.gen_range(-1..=1);
            let rooms = (i16::from(input.features.rooms) + room_delta).clamp(1, 255) as u8;

            Comparable {
                reference: format!("REF-{:04}", rng.gen_range(1000..10000)),
                distance_km,
                price,
                area_sqm,
                rooms,
            }
        })
        .collect()
}
