//! Garden/floor vocabulary reconciliation
//!
//! In UK listings a "garden flat" is the ground or basement flat. When one
//! side says "garden" and the other an equivalent floor word, both words
//! are dropped from both vectors: neither a vocabulary mismatch nor an
//! exact-match bonus.

use addrmatch_core::FrequencyVector;

/// Unit words and the floor words they are interchangeable with.
/// Equivalents are tried in the listed order.
pub const GARDEN_EQUIVALENCE: [(&str, &[&str]); 1] = [("garden", &["ground", "basement"])];

/// Neutralize garden/floor equivalences across a pair of vectors
pub fn reconcile_garden_units(
    mut v1: FrequencyVector,
    mut v2: FrequencyVector,
) -> (FrequencyVector, FrequencyVector) {
    for (garden, equivalents) in GARDEN_EQUIVALENCE.iter() {
        for equiv in equivalents.iter() {
            let crosses = (v1.contains(garden) && v2.contains(equiv))
                || (v2.contains(garden) && v1.contains(equiv));
            if crosses {
                for v in [&mut v1, &mut v2] {
                    v.remove(garden);
                    v.remove(equiv);
                }
            }
        }
    }

    (v1, v2)
}
