use ahash::RandomState;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Bag-of-words representation of a normalized address: token -> count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyVector {
    counts: HashMap<String, u32, RandomState>,
}

impl FrequencyVector {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the `\w+` tokens of `text`. Empty text gives an empty vector.
    pub fn from_text(text: &str) -> Self {
        let mut counts: HashMap<String, u32, RandomState> = HashMap::default();
        for token in WORD.find_iter(text) {
            *counts.entry(token.as_str().to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    #[inline]
    pub fn get(&self, token: &str) -> u32 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.counts.contains_key(token)
    }

    /// Remove a token; a no-op when absent
    #[inline]
    pub fn remove(&mut self, token: &str) -> Option<u32> {
        self.counts.remove(token)
    }

    /// Number of distinct tokens
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// Dot product over the shared tokens
    pub fn dot(&self, other: &FrequencyVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .counts
            .iter()
            .map(|(token, count)| f64::from(*count) * f64::from(large.get(token)))
            .sum()
    }

    /// Sum of squared counts
    pub fn norm_squared(&self) -> f64 {
        self.counts
            .values()
            .map(|count| f64::from(*count).powi(2))
            .sum()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Cosine similarity; 0.0 when either vector has zero magnitude.
    ///
    /// Counts are integers, so taking one square root of the product of
    /// squared norms keeps identical vectors at exactly 1.0 and never
    /// rounds above it.
    pub fn cosine_similarity(&self, other: &FrequencyVector) -> f64 {
        let sum_a = self.norm_squared();
        let sum_b = other.norm_squared();

        if sum_a == 0.0 || sum_b == 0.0 {
            return 0.0;
        }

        self.dot(other) / (sum_a * sum_b).sqrt()
    }
}

impl<'a> FromIterator<&'a str> for FrequencyVector {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts: HashMap<String, u32, RandomState> = HashMap::default();
        for token in iter {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_counts_tokens() {
        let v = FrequencyVector::from_text("12 high street high w2 6dx");
        assert_eq!(v.len(), 5);
        assert_eq!(v.get("high"), 2);
        assert_eq!(v.get("12"), 1);
        assert_eq!(v.get("road"), 0);
    }

    #[test]
    fn test_tokenizer_splits_on_non_word_characters() {
        let v = FrequencyVector::from_text("137-139 st john's");
        let mut tokens: Vec<&str> = v.iter().map(|(t, _)| t).collect();
        tokens.sort();
        assert_eq!(tokens, vec!["137", "139", "john", "s", "st"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(FrequencyVector::from_text("").is_empty());
        assert!(FrequencyVector::from_text(" - ").is_empty());
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let mut v = FrequencyVector::from_text("garden 1");
        assert_eq!(v.remove("garden"), Some(1));
        assert_eq!(v.remove("garden"), None);
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_cosine_similarity() {
        let a = FrequencyVector::from_text("12 norcutt road tw2 6sr");
        let b = FrequencyVector::from_text("22 norcutt road tw2 6sr");
        assert!((a.cosine_similarity(&b) - 0.8).abs() < 1e-12);
        assert_eq!(a.cosine_similarity(&a), 1.0);

        let c = FrequencyVector::from_text("a a b");
        let d = FrequencyVector::from_text("a b b");
        // (2*1 + 1*2) / (sqrt(5) * sqrt(5))
        assert!((c.cosine_similarity(&d) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_symmetric() {
        let a = FrequencyVector::from_text("9 137 139 gloucester terrace w2 6dx");
        let b = FrequencyVector::from_text("137 139 gloucester terrace w2 6dx");
        assert_eq!(a.cosine_similarity(&b), b.cosine_similarity(&a));
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        let empty = FrequencyVector::new();
        let v = FrequencyVector::from_text("1 high street");
        assert_eq!(empty.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&empty), 0.0);
        assert_eq!(empty.cosine_similarity(&empty), 0.0);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let v = FrequencyVector::from_text("flat flat 2");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json, serde_json::json!({"flat": 2, "2": 1}));
    }

    #[test]
    fn test_from_iterator() {
        let v: FrequencyVector = ["a", "b", "a"].into_iter().collect();
        assert_eq!(v.get("a"), 2);
        assert_eq!(v, FrequencyVector::from_text("a b a"));
    }
}
