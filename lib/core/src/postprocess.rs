//! Repairs applied to tagger output before scoring
//!
//! Each step takes ownership of the components and hands back the
//! repaired mapping, so the tagger result has a single writer.

use crate::components::{AddressComponents, ComponentKey};
use crate::units::normalise_units;

/// Fix a building number the tagger left holding two numbers.
///
/// `BuildingNumber = "8 16A"` with no sub-building becomes
/// `SubBuildingName = "8"`, `BuildingNumber = "16A"`.
pub fn repair_split_number(mut components: AddressComponents) -> AddressComponents {
    if components.contains(ComponentKey::SubBuildingName) {
        return components;
    }

    let parts: Option<(String, String)> = components
        .get(ComponentKey::BuildingNumber)
        .and_then(|number| {
            let parts: Vec<&str> = number.split_whitespace().collect();
            match parts.as_slice() {
                [sub, number] => Some((sub.to_string(), number.to_string())),
                _ => None,
            }
        });

    if let Some((sub, number)) = parts {
        components.set(ComponentKey::SubBuildingName, Some(sub));
        components.set(ComponentKey::BuildingNumber, Some(number));
    }

    components
}

/// Run the unit normalizer over the sub-building and building names.
/// A name that reduces to nothing (e.g. just "Flat") becomes absent.
pub fn normalise_component_text(mut components: AddressComponents) -> AddressComponents {
    for key in [ComponentKey::SubBuildingName, ComponentKey::BuildingName] {
        if let Some(value) = components.take(key) {
            components.set(key, Some(normalise_units(&value)));
        }
    }
    components
}

/// Split-number repair followed by unit-text cleanup
pub fn post_process(components: AddressComponents) -> AddressComponents {
    normalise_component_text(repair_split_number(components))
}
