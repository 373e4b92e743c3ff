//! Explainability for pair scores
//!
//! Exposes every intermediate step of a pair comparison, and simple
//! statistics over a scored batch.

use crate::scorer::ScoreResult;
use addrmatch_core::{FrequencyVector, NormalizedAddress};
use serde::Serialize;

/// Everything that went into one pair's similarity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// First address after normalization
    pub address1: NormalizedAddress,
    /// Second address after normalization
    pub address2: NormalizedAddress,
    /// Word counts of the first address after reconciliation
    pub vector1: FrequencyVector,
    /// Word counts of the second address after reconciliation
    pub vector2: FrequencyVector,
    /// Raw cosine similarity
    pub cosine: f64,
    /// Whether the single-number bypass accepted the cosine unchanged
    pub bypassed: bool,
    /// Product of triggered penalty multipliers
    pub multiplier: f64,
    /// Names of the penalty rules that fired
    pub triggered_rules: Vec<&'static str>,
    /// Final similarity
    pub similarity: f64,
}

/// Summary statistics for a scored batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub pairs_count: usize,
    pub avg_similarity: f64,
    pub min_similarity: f64,
    pub max_similarity: f64,
    /// Pairs scoring at or above `threshold`
    pub matches_count: usize,
    pub threshold: f64,
}

impl ScoreSummary {
    pub fn compute(results: &[ScoreResult], threshold: f64) -> Self {
        if results.is_empty() {
            return Self {
                pairs_count: 0,
                avg_similarity: 0.0,
                min_similarity: 0.0,
                max_similarity: 0.0,
                matches_count: 0,
                threshold,
            };
        }

        let scores: Vec<f64> = results.iter().map(|r| r.similarity).collect();
        let avg_similarity = scores.iter().sum::<f64>() / scores.len() as f64;
        let min_similarity = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max_similarity = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let matches_count = scores.iter().filter(|s| **s >= threshold).count();

        Self {
            pairs_count: results.len(),
            avg_similarity,
            min_similarity,
            max_similarity,
            matches_count,
            threshold,
        }
    }
}
