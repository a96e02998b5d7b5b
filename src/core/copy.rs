use rand::Rng;

use crate::models::{AdStyle, EmailContext, Property};

/// Opening lines for reel scripts. One is drawn at random per script.
pub const REEL_HOOKS: [&str; 4] = [
    "Stop scrolling. This one has a terrace.",
    "POV: you just found your next home.",
    "This listing will be gone by Friday.",
    "Nobody is talking about this neighborhood yet.",
];

/// Group an amount into thousands with '.' separators, rounded to whole
/// units: 540000.0 -> "540.000".
pub fn format_thousands(amount: f64) -> String {
    let value = amount.round() as i64;
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Render a price with its currency symbol: "540.000 €".
pub fn format_price(amount: f64, currency: &str) -> String {
    let symbol = match currency {
        "EUR" => "€",
        other => other,
    };
    format!("{} {}", format_thousands(amount), symbol)
}

/// Generate ad copy for a listing in the requested style.
pub fn write_ad(property: &Property, style: AdStyle) -> String {
    match style {
        AdStyle::Friendly => friendly_ad(property),
        AdStyle::Luxury => luxury_ad(property),
        AdStyle::Investor => investor_ad(property),
    }
}

fn friendly_ad(property: &Property) -> String {
    let features = &property.features;
    let mut extras = Vec::new();
    if features.balcony {
        extras.push("a sunny balcony");
    }
    if features.elevator {
        extras.push("an elevator");
    }
    if features.parking {
        extras.push("your own parking spot");
    }
    let extras_line = if extras.is_empty() {
        String::new()
    } else {
        format!(" You also get {}.", extras.join(", "))
    };

    format!(
        "Your next home in {city} is waiting!\n\n\
         This cozy {kind} offers {rooms} rooms and {area} m² of living space.{extras}\n\n\
         Priced at {price} — come see it before it's gone.\n\
         Ref: {reference}",
        city = property.address.city,
        kind = property.property_type.label(),
        rooms = features.rooms,
        area = features.area_sqm,
        extras = extras_line,
        price = format_price(property.price, &property.currency),
        reference = property.reference,
    )
}

fn luxury_ad(property: &Property) -> String {
    let features = &property.features;
    let year_line = features
        .construction_year
        .map(|year| format!("A {} build, finished to exacting standards.\n", year))
        .unwrap_or_default();

    format!(
        "AN EXCLUSIVE RESIDENCE IN {city}\n\n\
         {area} m² of refined living across {rooms} rooms and {baths} bathrooms.\n\
         {year_line}\
         Offered at {price}.\n\n\
         Private viewings by appointment only. Ref: {reference}",
        city = property.address.city.to_uppercase(),
        area = features.area_sqm,
        rooms = features.rooms,
        baths = features.baths,
        year_line = year_line,
        price = format_price(property.price, &property.currency),
        reference = property.reference,
    )
}

fn investor_ad(property: &Property) -> String {
    let features = &property.features;
    let per_sqm = if features.area_sqm > 0.0 {
        property.price / features.area_sqm
    } else {
        0.0
    };

    format!(
        "Investment opportunity in {city}\n\n\
         Asset: {kind}, {area} m², {rooms} rooms\n\
         Asking price: {price} ({per_sqm} €/m²)\n\
         Status: {tags}\n\n\
         Full dossier on request. Ref: {reference}",
        city = property.address.city,
        kind = property.property_type.label(),
        area = features.area_sqm,
        rooms = features.rooms,
        price = format_price(property.price, &property.currency),
        per_sqm = format_thousands(per_sqm),
        tags = if property.tags.is_empty() {
            "ready to list".to_string()
        } else {
            property.tags.join(", ")
        },
        reference = property.reference,
    )
}

/// Generate an outreach email from the given context. Missing optional
/// fields render as empty strings.
pub fn write_email(context: &EmailContext) -> String {
    let goal = context.goal.as_deref().unwrap_or("");
    let bullets = context
        .bullets
        .iter()
        .map(|bullet| format!("- {}", bullet))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Subject: {subject}\n\n\
         Hi {recipient},\n\n\
         {goal}\n\n\
         {bullets}\n\n\
         Best regards,\n\
         Your Inmo agent",
        subject = context.subject,
        recipient = context.recipient,
        goal = goal,
        bullets = bullets,
    )
}

/// Generate a timestamped reel shooting script sized to the requested
/// duration: a short cut for clips up to 15 seconds, a longer sequence
/// for 16-30 second clips. The opening hook is drawn from a fixed pool.
pub fn write_reel_script<R: Rng>(property: &Property, duration_secs: u16, rng: &mut R) -> String {
    let hook = REEL_HOOKS[rng.gen_range(0..REEL_HOOKS.len())];
    let features = &property.features;
    let price = format_price(property.price, &property.currency);

    let mut lines = vec![format!("HOOK: {}", hook)];

    if duration_secs <= 15 {
        lines.push(format!(
            "0-3s: Front door opens into the {} m² main space",
            features.area_sqm
        ));
        lines.push("3-8s: Fast pan through every room".to_string());
        lines.push(format!("8-12s: Hold on {}", highlight(property)));
        lines.push(format!("12-15s: Price card: {} — link in bio", price));
    } else {
        lines.push(format!(
            "0-3s: Street shot, arriving at the building in {}",
            property.address.city
        ));
        lines.push(format!(
            "3-10s: Walkthrough of the {} rooms",
            features.rooms
        ));
        lines.push("10-16s: Kitchen and bathrooms in detail".to_string());
        lines.push(format!("16-22s: Hold on {}", highlight(property)));
        lines.push("22-27s: Neighborhood montage".to_string());
        lines.push(format!("27-30s: Price card: {} — DM to book a visit", price));
    }

    lines.join("\n")
}

fn highlight(property: &Property) -> &'static str {
    let features = &property.features;
    if features.balcony {
        "the balcony"
    } else if features.parking {
        "the parking spot"
    } else if features.elevator {
        "the elevator lobby"
    } else {
        "the light-filled main room"
    }
}
