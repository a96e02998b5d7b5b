use crate::models::{Lead, MatchResult, Property, ScoringAdjustments};

/// Score one listing for one lead, returning the clamped score and the
/// list of human-readable reasons.
///
/// Additive model:
/// - start at the base score (50 by default)
/// - price within budget: +20, price above 1.2x budget: -15
///   (prices between 1.0x and 1.2x of budget deliberately get no
///   adjustment either way)
/// - preferred city matches: +15
/// - preferred property type: +10
/// - enough rooms: +10
/// - enough area: +10
/// - each requested must-have amenity present: +5
///
/// If no positive adjustment fired, the reason list is the single generic
/// "Basic compatibility" entry. The final score is clamped into [0, 100].
pub fn score_property(
    lead: &Lead,
    property: &Property,
    adjustments: &ScoringAdjustments,
) -> (u8, Vec<String>) {
    let mut score = adjustments.base;
    let mut reasons = Vec::new();
    let mut positive = false;

    if let Some(budget) = lead.budget {
        if property.price <= budget {
            score += adjustments.budget_within;
            reasons.push("Price within budget".to_string());
            positive = true;
        } else if property.price > budget * adjustments.budget_over_threshold {
            score += adjustments.budget_over;
            reasons.push("Price above budget".to_string());
        }
    }

    if let Some(city) = &lead.preferences.city {
        if city_matches(city, &property.address.city) {
            score += adjustments.city;
            reasons.push(format!("Located in {}", property.address.city));
            positive = true;
        }
    }

    if lead
        .preferences
        .property_types
        .contains(&property.property_type)
    {
        score += adjustments.property_type;
        reasons.push(format!("Preferred type: {}", property.property_type.label()));
        positive = true;
    }

    if let Some(min_rooms) = lead.preferences.min_rooms {
        if property.features.rooms >= min_rooms {
            score += adjustments.rooms;
            reasons.push(format!("{} rooms available", property.features.rooms));
            positive = true;
        }
    }

    if let Some(min_area) = lead.preferences.min_area_sqm {
        if property.features.area_sqm >= min_area {
            score += adjustments.area;
            reasons.push(format!("{} m² of living space", property.features.area_sqm));
            positive = true;
        }
    }

    let must_haves = &lead.preferences.must_haves;
    if must_haves.elevator && property.features.elevator {
        score += adjustments.amenity;
        reasons.push("Has elevator".to_string());
        positive = true;
    }
    if must_haves.balcony && property.features.balcony {
        score += adjustments.amenity;
        reasons.push("Has balcony".to_string());
        positive = true;
    }
    if must_haves.parking && property.features.parking {
        score += adjustments.amenity;
        reasons.push("Has parking".to_string());
        positive = true;
    }

    if !positive {
        reasons = vec!["Basic compatibility".to_string()];
    }

    (score.clamp(0, 100) as u8, reasons)
}

/// Case-insensitive substring match in either direction, so
/// "madrid" matches "Madrid Centro" and vice versa.
fn city_matches(preferred: &str, city: &str) -> bool {
    let preferred = preferred.trim().to_lowercase();
    let city = city.trim().to_lowercase();
    if preferred.is_empty() || city.is_empty() {
        return false;
    }
    city.contains(&preferred) || preferred.contains(&city)
}

/// Matching orchestrator: scores the active catalog against one lead and
/// ranks the results.
#[derive(Debug, Clone)]
pub struct Matcher {
    adjustments: ScoringAdjustments,
}

impl Matcher {
    pub fn new(adjustments: ScoringAdjustments) -> Self {
        Self { adjustments }
    }

    pub fn with_default_adjustments() -> Self {
        Self {
            adjustments: ScoringAdjustments::default(),
        }
    }

    /// Score every active listing for the given lead.
    ///
    /// Non-active listings (draft/reserved/sold/rented) are excluded
    /// entirely. Results come back sorted by descending score; ties keep
    /// catalog order (the sort is stable).
    pub fn match_lead(&self, lead: &Lead, properties: &[Property]) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = properties
            .iter()
            .filter(|property| property.is_active())
            .map(|property| {
                let (score, reasons) = score_property(lead, property, &self.adjustments);
                MatchResult {
                    lead_id: lead.id.clone(),
                    property_id: property.id.clone(),
                    score,
                    reasons,
                }
            })
            .collect();

        results.sort_by(|a, b| b.score.cmp(&a.score));

        results
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_adjustments()
    }
}
