//! Numeric mismatch penalties
//!
//! Bag-of-words cosine barely notices that "12" became "22". The penalizer
//! looks at the structured house and flat numbers and scales the cosine
//! down once per disagreement. A near-perfect cosine whose pair mentions a
//! single number overall is trusted as is.

use crate::config::ScoringConfig;
use addrmatch_core::{AddressComponents, ComponentKey};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+[a-zA-Z]?").expect("numeric token pattern is valid"));

/// Lower-cased number tokens ("16a", "137") found in the building number
/// and sub-building name
pub fn extract_numeric_tokens(components: &AddressComponents) -> BTreeSet<String> {
    [ComponentKey::BuildingNumber, ComponentKey::SubBuildingName]
        .iter()
        .filter_map(|key| components.get(*key))
        .flat_map(|value| NUMERIC_TOKEN.find_iter(value))
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

type RulePredicate = fn(&AddressComponents, &AddressComponents) -> bool;

/// One penalty rule: a symmetric predicate over both sides and the factor
/// it applies when it holds
#[derive(Debug, Clone, Copy)]
pub struct PenaltyRule {
    pub name: &'static str,
    pub multiplier: f64,
    predicate: RulePredicate,
}

impl PenaltyRule {
    pub fn new(name: &'static str, multiplier: f64, predicate: RulePredicate) -> Self {
        Self { name, multiplier, predicate }
    }

    #[inline]
    pub fn applies(&self, a: &AddressComponents, b: &AddressComponents) -> bool {
        (self.predicate)(a, b)
    }
}

fn both_present_and_differ(key: ComponentKey, a: &AddressComponents, b: &AddressComponents) -> bool {
    match (a.get(key), b.get(key)) {
        (Some(x), Some(y)) => x != y,
        _ => false,
    }
}

fn house_numbers_differ(a: &AddressComponents, b: &AddressComponents) -> bool {
    both_present_and_differ(ComponentKey::BuildingNumber, a, b)
}

fn flat_numbers_differ(a: &AddressComponents, b: &AddressComponents) -> bool {
    both_present_and_differ(ComponentKey::SubBuildingName, a, b)
}

fn flat_presence_differs(a: &AddressComponents, b: &AddressComponents) -> bool {
    a.contains(ComponentKey::SubBuildingName) != b.contains(ComponentKey::SubBuildingName)
}

fn house_presence_differs_without_flats(a: &AddressComponents, b: &AddressComponents) -> bool {
    !a.contains(ComponentKey::SubBuildingName)
        && !b.contains(ComponentKey::SubBuildingName)
        && a.contains(ComponentKey::BuildingNumber) != b.contains(ComponentKey::BuildingNumber)
}

/// The default rule list, every rule using `multiplier`
pub fn default_rules(multiplier: f64) -> Vec<PenaltyRule> {
    vec![
        PenaltyRule::new("house_number_mismatch", multiplier, house_numbers_differ),
        PenaltyRule::new("flat_number_mismatch", multiplier, flat_numbers_differ),
        PenaltyRule::new("flat_presence_mismatch", multiplier, flat_presence_differs),
        PenaltyRule::new(
            "house_number_presence_mismatch",
            multiplier,
            house_presence_differs_without_flats,
        ),
    ]
}

/// How the penalizer treated one pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PenaltyOutcome {
    /// Cosine after penalties
    pub similarity: f64,
    /// True when the single-number bypass accepted the cosine unchanged
    pub bypassed: bool,
    /// Product of the triggered rules' multipliers
    pub multiplier: f64,
    /// Names of the triggered rules, in rule order
    pub triggered: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub struct MismatchPenalizer {
    bypass_threshold: f64,
    rules: Vec<PenaltyRule>,
}

impl Default for MismatchPenalizer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl MismatchPenalizer {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            bypass_threshold: config.bypass_threshold,
            rules: default_rules(config.mismatch_multiplier),
        }
    }

    /// Use a custom rule list
    pub fn with_rules(bypass_threshold: f64, rules: Vec<PenaltyRule>) -> Self {
        Self { bypass_threshold, rules }
    }

    pub fn rules(&self) -> &[PenaltyRule] {
        &self.rules
    }

    /// High cosine and exactly one distinct number across both sides,
    /// whichever field it was tagged into
    pub fn is_confirmed_match(&self, cosine: f64, a: &AddressComponents, b: &AddressComponents) -> bool {
        if cosine < self.bypass_threshold {
            return false;
        }
        let mut numbers = extract_numeric_tokens(a);
        numbers.extend(extract_numeric_tokens(b));
        numbers.len() == 1
    }

    pub fn evaluate(&self, cosine: f64, a: &AddressComponents, b: &AddressComponents) -> PenaltyOutcome {
        if self.is_confirmed_match(cosine, a, b) {
            return PenaltyOutcome {
                similarity: cosine,
                bypassed: true,
                multiplier: 1.0,
                triggered: Vec::new(),
            };
        }

        let mut multiplier = 1.0;
        let mut triggered = Vec::new();
        for rule in &self.rules {
            if rule.applies(a, b) {
                multiplier *= rule.multiplier;
                triggered.push(rule.name);
            }
        }

        PenaltyOutcome {
            similarity: cosine * multiplier,
            bypassed: false,
            multiplier,
            triggered,
        }
    }

    /// Penalized similarity
    pub fn apply(&self, cosine: f64, a: &AddressComponents, b: &AddressComponents) -> f64 {
        self.evaluate(cosine, a, b).similarity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house(number: &str) -> AddressComponents {
        AddressComponents::new().with(ComponentKey::BuildingNumber, number)
    }

    fn flat(flat: &str, number: &str) -> AddressComponents {
        house(number).with(ComponentKey::SubBuildingName, flat)
    }

    #[test]
    fn test_extract_numeric_tokens() {
        let components = flat("Flat 9B", "137-139");
        let numbers: Vec<String> = extract_numeric_tokens(&components).into_iter().collect();
        assert_eq!(numbers, vec!["137", "139", "9b"]);

        assert!(extract_numeric_tokens(&AddressComponents::new()).is_empty());
    }

    #[test]
    fn test_house_number_mismatch() {
        let penalizer = MismatchPenalizer::default();
        let outcome = penalizer.evaluate(0.8, &house("12"), &house("22"));
        assert!(!outcome.bypassed);
        assert_eq!(outcome.triggered, vec!["house_number_mismatch"]);
        assert!((outcome.similarity - 0.56).abs() < 1e-12);
    }

    #[test]
    fn test_flat_mismatch_and_presence() {
        let penalizer = MismatchPenalizer::default();

        let outcome = penalizer.evaluate(0.9, &flat("1", "5"), &flat("2", "5"));
        assert_eq!(outcome.triggered, vec!["flat_number_mismatch"]);

        let outcome = penalizer.evaluate(0.9, &flat("9", "137-139"), &house("137-139"));
        assert_eq!(outcome.triggered, vec!["flat_presence_mismatch"]);
        assert!((outcome.similarity - 0.9 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_house_presence_without_flats() {
        let penalizer = MismatchPenalizer::default();
        let street_only = AddressComponents::new().with(ComponentKey::StreetName, "High Street");
        let outcome = penalizer.evaluate(0.9, &house("5"), &street_only);
        assert_eq!(outcome.triggered, vec!["house_number_presence_mismatch"]);

        // with a flat on one side only the flat presence rule fires
        let outcome = penalizer.evaluate(0.9, &flat("2", "5"), &street_only);
        assert_eq!(outcome.triggered, vec!["flat_presence_mismatch"]);
    }

    #[test]
    fn test_rules_compound() {
        let penalizer = MismatchPenalizer::default();
        let outcome = penalizer.evaluate(1.0, &flat("1", "5"), &flat("2", "7"));
        assert_eq!(outcome.triggered, vec!["house_number_mismatch", "flat_number_mismatch"]);
        assert!((outcome.multiplier - 0.49).abs() < 1e-12);
        assert!((outcome.similarity - 0.49).abs() < 1e-12);
    }

    #[test]
    fn test_bypass_single_number_anywhere() {
        let penalizer = MismatchPenalizer::default();
        let a = house("12");
        let b = AddressComponents::new().with(ComponentKey::SubBuildingName, "12");

        let outcome = penalizer.evaluate(0.99, &a, &b);
        assert!(outcome.bypassed);
        assert_eq!(outcome.similarity, 0.99);

        // same pair below the threshold is penalized
        let outcome = penalizer.evaluate(0.97, &a, &b);
        assert!(!outcome.bypassed);
        assert_eq!(outcome.triggered, vec!["flat_presence_mismatch"]);
    }

    #[test]
    fn test_bypass_needs_exactly_one_number() {
        let penalizer = MismatchPenalizer::default();
        assert!(!penalizer.is_confirmed_match(1.0, &house("137-139"), &house("137-139")));
        assert!(!penalizer.is_confirmed_match(1.0, &AddressComponents::new(), &AddressComponents::new()));
        assert!(penalizer.is_confirmed_match(0.98, &house("16A"), &house("16a")));
    }

    #[test]
    fn test_no_rules_no_penalty() {
        let penalizer = MismatchPenalizer::default();
        let outcome = penalizer.evaluate(0.75, &flat("3", "8"), &flat("3", "8"));
        assert!(outcome.triggered.is_empty());
        assert_eq!(outcome.similarity, 0.75);
    }

    #[test]
    fn test_custom_rules() {
        let penalizer = MismatchPenalizer::with_rules(
            0.98,
            vec![PenaltyRule::new("house_number_mismatch", 0.5, house_numbers_differ)],
        );
        assert_eq!(penalizer.rules().len(), 1);
        assert_eq!(penalizer.apply(0.8, &house("1"), &house("2")), 0.4);
    }

    #[test]
    fn test_rules_symmetric() {
        let penalizer = MismatchPenalizer::default();
        let cases = [
            (house("12"), house("22")),
            (flat("9", "137-139"), house("137-139")),
            (house("5"), AddressComponents::new()),
            (flat("1", "5"), flat("2", "7")),
        ];
        for (a, b) in cases.iter() {
            assert_eq!(penalizer.evaluate(0.9, a, b), penalizer.evaluate(0.9, b, a));
        }
    }
}
