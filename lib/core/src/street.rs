//! Effective street resolution
//!
//! Taggers sometimes file part of the street (or all of it) under the
//! locality, e.g. "Bayswater Road" tagged as a locality. The effective
//! street folds such localities back in.

use crate::components::{AddressComponents, ComponentKey};

/// Street-type words; a locality containing any of them is street-like
pub const STREET_KEYWORDS: [&str; 17] = [
    "street", "road", "avenue", "lane", "drive",
    "close", "court", "place", "crescent", "grove",
    "terrace", "way", "row", "square", "gardens", "gate", "mews",
];

/// Case-insensitive substring match against [`STREET_KEYWORDS`]
pub fn is_street_like(text: &str) -> bool {
    let lower = text.to_lowercase();
    STREET_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Derive the street string used for scoring.
///
/// - street name + street-like locality: both, space-joined
/// - street name only: the street name
/// - no street name but street-like locality: the locality
/// - otherwise: none
pub fn effective_street(components: &AddressComponents) -> Option<String> {
    let street = components.get(ComponentKey::StreetName);
    let locality = components
        .get(ComponentKey::Locality)
        .filter(|locality| is_street_like(locality));

    match (street, locality) {
        (Some(street), Some(locality)) => Some(format!("{} {}", street, locality)),
        (Some(street), None) => Some(street.to_string()),
        (None, Some(locality)) => Some(locality.to_string()),
        (None, None) => None,
    }
}
