//! Unit and floor vocabulary normalization
//!
//! Expands floor abbreviations used in UK listings ("gff", "1ff", "bf" ...)
//! to canonical words and drops generic unit-type nouns, so that
//! "GFF Flat" and "Ground Floor" both reduce to "ground".

use once_cell::sync::Lazy;
use regex::Regex;

/// Floor abbreviations and their canonical expansion, applied in order.
/// Every pattern is anchored on word boundaries so no two can collide.
const FLOOR_EXPANSIONS: [(&str, &str); 12] = [
    (r"\bgff\b", "ground"),
    (r"\bgf\b", "ground"),
    (r"\blgf\b", "basement"),
    (r"\bbf\b", "basement"),
    (r"\btff\b", "first"),
    (r"\btf\b", "first"),
    (r"\b1ff\b", "first"),
    (r"\b2ff\b", "second"),
    (r"\b3ff\b", "third"),
    (r"\b4ff\b", "fourth"),
    (r"\buf\b", "upper"),
    (r"\bum\b", "upper"),
];

/// Generic unit-type nouns that carry no identifying information
pub const UNIT_STOPWORDS: [&str; 4] = ["floor", "flat", "maisonette", "apartment"];

static FLOOR_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    FLOOR_EXPANSIONS
        .iter()
        .map(|(pattern, replacement)| {
            (Regex::new(pattern).expect("floor pattern is valid"), *replacement)
        })
        .collect()
});

static UNIT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9']+").expect("unit token pattern is valid"));

/// Normalize a sub-building or building name.
///
/// Lower-cases, expands floor abbreviations, drops [`UNIT_STOPWORDS`] and
/// re-joins the remaining tokens with single spaces. Empty input is
/// returned unchanged. Running it twice gives the same result as once.
pub fn normalise_units(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut t = text.to_lowercase();
    for (pattern, replacement) in FLOOR_PATTERNS.iter() {
        if pattern.is_match(&t) {
            t = pattern.replace_all(&t, *replacement).into_owned();
        }
    }

    UNIT_TOKEN
        .find_iter(&t)
        .map(|m| m.as_str())
        .filter(|token| !UNIT_STOPWORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `word` is a floor abbreviation [`normalise_units`] expands
pub fn is_floor_abbreviation(word: &str) -> bool {
    let lower = word.to_lowercase();
    FLOOR_PATTERNS.iter().any(|(pattern, _)| {
        pattern
            .find(&lower)
            .is_some_and(|m| m.start() == 0 && m.end() == lower.len())
    })
}
