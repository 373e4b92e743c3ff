//! Address tagging
//!
//! Splitting a raw address into named components is an injected
//! capability: anything implementing [`AddressTagger`] can drive the
//! normalizer. Two taggers ship with the crate:
//!
//! - [`FixedTagger`] - a lookup table of pre-parsed records (handy in tests)
//! - [`RuleTagger`] - a deterministic heuristic tagger for UK addresses

use crate::components::{AddressComponents, ComponentKey};
use crate::error::Result;
use crate::street::STREET_KEYWORDS;
use crate::units::is_floor_abbreviation;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Splits a raw address string into [`AddressComponents`].
///
/// Called exactly once per address. Returning an empty mapping means
/// "nothing recognised"; an `Err` aborts the scoring call that made it.
pub trait AddressTagger: Send + Sync {
    fn tag(&self, raw: &str) -> Result<AddressComponents>;
}

/// Tagger backed by a table of already-parsed addresses.
/// Unknown input yields an empty mapping.
#[derive(Debug, Clone, Default)]
pub struct FixedTagger {
    entries: HashMap<String, AddressComponents>,
}

impl FixedTagger {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, raw: impl Into<String>, components: AddressComponents) {
        self.entries.insert(raw.into(), components);
    }

    #[must_use]
    pub fn with(mut self, raw: impl Into<String>, components: AddressComponents) -> Self {
        self.insert(raw, components);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AddressTagger for FixedTagger {
    fn tag(&self, raw: &str) -> Result<AddressComponents> {
        Ok(self.entries.get(raw).cloned().unwrap_or_default())
    }
}

static POSTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([A-Z]{1,2}[0-9][A-Z0-9]?)\s*([0-9][A-Z]{2})\b")
        .expect("postcode pattern is valid")
});

static HOUSE_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+[A-Za-z]?(?:-\d+[A-Za-z]?)?$").expect("house number pattern is valid")
});

static UNIT_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+[A-Za-z]?|[A-Za-z])$").expect("unit identifier pattern is valid")
});

/// Unit words that are followed by an identifier ("Flat 9", "Unit B")
const NUMBERED_UNIT_WORDS: [&str; 7] = ["flat", "apartment", "apt", "unit", "suite", "room", "studio"];

const PLAIN_UNIT_WORDS: [&str; 2] = ["maisonette", "floor"];

const FLOOR_WORDS: [&str; 10] = [
    "ground", "basement", "lower", "upper", "top",
    "first", "second", "third", "fourth", "garden",
];

/// Street-type abbreviations expanded when they close a street name
const STREET_ABBREVIATIONS: [(&str, &str); 19] = [
    ("st", "Street"),
    ("rd", "Road"),
    ("ave", "Avenue"),
    ("av", "Avenue"),
    ("ln", "Lane"),
    ("dr", "Drive"),
    ("cl", "Close"),
    ("ct", "Court"),
    ("pl", "Place"),
    ("cres", "Crescent"),
    ("cr", "Crescent"),
    ("gr", "Grove"),
    ("gro", "Grove"),
    ("terr", "Terrace"),
    ("ter", "Terrace"),
    ("sq", "Square"),
    ("gdns", "Gardens"),
    ("gdn", "Gardens"),
    ("mws", "Mews"),
];

#[derive(Debug, Clone)]
struct Token {
    text: String,
    lower: String,
    segment: usize,
}

impl Token {
    fn is_house_number(&self) -> bool {
        HOUSE_NUMBER.is_match(&self.text)
    }

    fn is_street_keyword(&self) -> bool {
        STREET_KEYWORDS.contains(&self.lower.as_str())
    }

    fn street_abbreviation(&self) -> Option<&'static str> {
        STREET_ABBREVIATIONS
            .iter()
            .find(|(abbr, _)| *abbr == self.lower)
            .map(|(_, full)| *full)
    }

    fn is_unit_word(&self) -> bool {
        let word = self.lower.as_str();
        NUMBERED_UNIT_WORDS.contains(&word)
            || PLAIN_UNIT_WORDS.contains(&word)
            || FLOOR_WORDS.contains(&word)
            || is_floor_abbreviation(word)
    }

    fn has_digit(&self) -> bool {
        self.text.chars().any(|c| c.is_ascii_digit())
    }
}

/// Heuristic tagger for UK postal addresses.
///
/// Reads, in order: postcode (last match anywhere), leading flat/floor
/// descriptors, an optional building name segment, the house number,
/// the street up to its street-type word, and the locality.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTagger;

impl RuleTagger {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn tokenize(text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut segment = 0;

        for part in text.split(',') {
            let before = tokens.len();
            for word in part.split_whitespace() {
                let word = word.trim_matches(|c: char| !c.is_alphanumeric());
                if word.is_empty() {
                    continue;
                }
                tokens.push(Token {
                    text: word.to_string(),
                    lower: word.to_lowercase(),
                    segment,
                });
            }
            if tokens.len() > before {
                segment += 1;
            }
        }

        tokens
    }

    /// Index one past the last token sharing `tokens[start]`'s segment
    fn segment_end(tokens: &[Token], start: usize) -> usize {
        let segment = tokens[start].segment;
        tokens[start..]
            .iter()
            .position(|t| t.segment != segment)
            .map_or(tokens.len(), |offset| start + offset)
    }

    fn join(tokens: &[Token]) -> Option<String> {
        if tokens.is_empty() {
            return None;
        }
        Some(
            tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    fn take_postcode(raw: &str) -> (Option<String>, String) {
        match POSTCODE.captures_iter(raw).last() {
            Some(caps) => {
                let whole = caps.get(0).map_or(0..0, |m| m.range());
                let postcode = format!(
                    "{} {}",
                    caps[1].to_uppercase(),
                    caps[2].to_uppercase()
                );
                let rest = format!("{} {}", &raw[..whole.start], &raw[whole.end..]);
                (Some(postcode), rest)
            }
            None => (None, raw.to_string()),
        }
    }

    /// Leading flat/floor descriptors, e.g. "Ground Floor Flat 1"
    fn take_sub_building(tokens: &[Token], mut i: usize) -> usize {
        while i < tokens.len() && tokens[i].is_unit_word() {
            // "First Avenue" is a street, not a floor
            let next_is_street = tokens
                .get(i + 1)
                .is_some_and(|t| t.is_street_keyword() || t.street_abbreviation().is_some());
            if next_is_street {
                break;
            }

            let numbered = NUMBERED_UNIT_WORDS.contains(&tokens[i].lower.as_str());
            i += 1;
            if numbered && tokens.get(i).is_some_and(|t| UNIT_IDENTIFIER.is_match(&t.text)) {
                i += 1;
            }
        }
        i
    }

    /// A comma segment naming the building, e.g. "Rose Court, 5 High Street"
    fn take_building_name(tokens: &[Token], i: usize) -> usize {
        if i >= tokens.len() || tokens[i].is_house_number() {
            return i;
        }

        let end = Self::segment_end(tokens, i);
        if end >= tokens.len() || tokens[i..end].iter().any(Token::has_digit) {
            return i;
        }

        if tokens[end].is_house_number() {
            return end;
        }

        let no_digits_left = !tokens[end..].iter().any(Token::has_digit);
        let names_a_street = tokens[i..end].iter().any(Token::is_street_keyword);
        if no_digits_left && !names_a_street {
            return end;
        }

        i
    }

    /// One house number, or two in a row ("8 16A") for the post-processor to split
    fn take_building_number(tokens: &[Token], mut i: usize) -> usize {
        for _ in 0..2 {
            if tokens.get(i).is_some_and(Token::is_house_number) {
                i += 1;
            } else {
                break;
            }
        }
        i
    }

    /// Street tokens (with closing abbreviations expanded) and the end index
    fn take_street(tokens: &[Token], start: usize) -> (Vec<Token>, usize) {
        if start >= tokens.len() {
            return (Vec::new(), start);
        }

        let segment_end = Self::segment_end(tokens, start);
        let closing = (start..segment_end).find(|&j| {
            tokens[j].is_street_keyword() || (j > start && tokens[j].street_abbreviation().is_some())
        });

        let end = match closing {
            Some(j) => {
                let mut end = j + 1;
                while end < segment_end && tokens[end].is_street_keyword() {
                    end += 1;
                }
                end
            }
            None if segment_end < tokens.len() => segment_end,
            None => tokens.len(),
        };

        let street = tokens[start..end]
            .iter()
            .enumerate()
            .map(|(offset, token)| match token.street_abbreviation() {
                Some(full) if offset > 0 && closing.is_some_and(|j| start + offset >= j) => Token {
                    text: full.to_string(),
                    lower: full.to_lowercase(),
                    segment: token.segment,
                },
                _ => token.clone(),
            })
            .collect();

        (street, end)
    }
}

impl AddressTagger for RuleTagger {
    fn tag(&self, raw: &str) -> Result<AddressComponents> {
        let (postcode, rest) = Self::take_postcode(raw);
        let tokens = Self::tokenize(&rest);

        let mut components = AddressComponents::new();
        components.set(ComponentKey::Postcode, postcode);
        if tokens.is_empty() {
            return Ok(components);
        }

        let sub_end = Self::take_sub_building(&tokens, 0);
        let name_end = Self::take_building_name(&tokens, sub_end);
        let number_end = Self::take_building_number(&tokens, name_end);
        let (street, street_end) = Self::take_street(&tokens, number_end);

        components.set(ComponentKey::SubBuildingName, Self::join(&tokens[..sub_end]));
        components.set(ComponentKey::BuildingName, Self::join(&tokens[sub_end..name_end]));
        components.set(ComponentKey::BuildingNumber, Self::join(&tokens[name_end..number_end]));
        components.set(ComponentKey::StreetName, Self::join(&street));
        components.set(ComponentKey::Locality, Self::join(&tokens[street_end..]));

        Ok(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(raw: &str) -> AddressComponents {
        RuleTagger::new().tag(raw).unwrap()
    }

    #[test]
    fn test_fixed_tagger_lookup() {
        let components = AddressComponents::new().with(ComponentKey::BuildingNumber, "12");
        let tagger = FixedTagger::new().with("12 Some Road", components.clone());

        assert_eq!(tagger.len(), 1);
        assert_eq!(tagger.tag("12 Some Road").unwrap(), components);
        assert!(tagger.tag("unknown").unwrap().is_empty());
    }

    #[test]
    fn test_simple_address() {
        let c = tag("12 Norcutt Road, Twickenham, TW2 6SR");
        assert_eq!(c.get(ComponentKey::BuildingNumber), Some("12"));
        assert_eq!(c.get(ComponentKey::StreetName), Some("Norcutt Road"));
        assert_eq!(c.get(ComponentKey::Locality), Some("Twickenham"));
        assert_eq!(c.get(ComponentKey::Postcode), Some("TW2 6SR"));
        assert!(!c.contains(ComponentKey::SubBuildingName));
    }

    #[test]
    fn test_flat_and_range_number() {
        let c = tag("FLAT 9 137-139 GLOUCESTER TERRACE LONDON W2 6DX");
        assert_eq!(c.get(ComponentKey::SubBuildingName), Some("FLAT 9"));
        assert_eq!(c.get(ComponentKey::BuildingNumber), Some("137-139"));
        assert_eq!(c.get(ComponentKey::StreetName), Some("GLOUCESTER TERRACE"));
        assert_eq!(c.get(ComponentKey::Locality), Some("LONDON"));
        assert_eq!(c.get(ComponentKey::Postcode), Some("W2 6DX"));
    }

    #[test]
    fn test_floor_descriptors() {
        let c = tag("Ground Floor Flat 1 X Street");
        assert_eq!(c.get(ComponentKey::SubBuildingName), Some("Ground Floor Flat 1"));
        assert!(!c.contains(ComponentKey::BuildingNumber));
        assert_eq!(c.get(ComponentKey::StreetName), Some("X Street"));

        let c = tag("GFF 4 Elm Grove, London");
        assert_eq!(c.get(ComponentKey::SubBuildingName), Some("GFF"));
        assert_eq!(c.get(ComponentKey::BuildingNumber), Some("4"));
        assert_eq!(c.get(ComponentKey::StreetName), Some("Elm Grove"));
    }

    #[test]
    fn test_street_abbreviation_expanded() {
        let c = tag("10 Downing St, Westminster, London SW1A 2AA");
        assert_eq!(c.get(ComponentKey::StreetName), Some("Downing Street"));
        assert_eq!(c.get(ComponentKey::Locality), Some("Westminster London"));
        assert_eq!(c.get(ComponentKey::Postcode), Some("SW1A 2AA"));
    }

    #[test]
    fn test_leading_abbreviation_not_expanded() {
        let c = tag("3 St Marks Road, London");
        assert_eq!(c.get(ComponentKey::StreetName), Some("St Marks Road"));
    }

    #[test]
    fn test_floor_word_before_street_type() {
        let c = tag("First Avenue, Hove");
        assert!(!c.contains(ComponentKey::SubBuildingName));
        assert_eq!(c.get(ComponentKey::StreetName), Some("First Avenue"));
        assert_eq!(c.get(ComponentKey::Locality), Some("Hove"));
    }

    #[test]
    fn test_two_numbers_kept_together() {
        let c = tag("8 16A High Street");
        assert_eq!(c.get(ComponentKey::BuildingNumber), Some("8 16A"));
        assert!(!c.contains(ComponentKey::SubBuildingName));
    }

    #[test]
    fn test_building_name_segment() {
        let c = tag("Flat 2, Rose Court, 5 High Street, Bath BA1 1AA");
        assert_eq!(c.get(ComponentKey::SubBuildingName), Some("Flat 2"));
        assert_eq!(c.get(ComponentKey::BuildingName), Some("Rose Court"));
        assert_eq!(c.get(ComponentKey::BuildingNumber), Some("5"));
        assert_eq!(c.get(ComponentKey::StreetName), Some("High Street"));
        assert_eq!(c.get(ComponentKey::Locality), Some("Bath"));

        let c = tag("Rose Cottage, Mill Lane, Bath");
        assert_eq!(c.get(ComponentKey::BuildingName), Some("Rose Cottage"));
        assert_eq!(c.get(ComponentKey::StreetName), Some("Mill Lane"));
    }

    #[test]
    fn test_lowercase_postcode() {
        let c = tag("1 acacia avenue w2 6dx");
        assert_eq!(c.get(ComponentKey::Postcode), Some("W2 6DX"));
        assert_eq!(c.get(ComponentKey::StreetName), Some("acacia avenue"));
    }

    #[test]
    fn test_nothing_to_tag() {
        assert!(tag("").is_empty());
        assert!(tag(" , ,").is_empty());
    }
}
