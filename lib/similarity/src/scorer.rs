//! Pair scoring
//!
//! Normalize both sides, vectorize, reconcile garden/floor vocabulary,
//! take the cosine and apply mismatch penalties. Every pair is scored on
//! its own; nothing is cached between pairs or calls.

use crate::config::ScoringConfig;
use crate::explain::ScoreBreakdown;
use crate::penalty::MismatchPenalizer;
use crate::reconcile::reconcile_garden_units;
use addrmatch_core::{AddressNormalizer, AddressTagger, FrequencyVector, RawAddress, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Two addresses to compare, by position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressPair {
    pub address1: RawAddress,
    pub address2: RawAddress,
}

impl AddressPair {
    pub fn new(address1: impl Into<RawAddress>, address2: impl Into<RawAddress>) -> Self {
        Self {
            address1: address1.into(),
            address2: address2.into(),
        }
    }
}

/// The original pair with its final similarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub address1: RawAddress,
    pub address2: RawAddress,
    pub similarity: f64,
}

#[derive(Debug, Clone)]
pub struct PairScorer {
    normalizer: AddressNormalizer,
    penalizer: MismatchPenalizer,
}

impl PairScorer {
    /// Scorer with the default configuration
    pub fn new(tagger: Arc<dyn AddressTagger>) -> Self {
        Self::with_config(tagger, &ScoringConfig::default())
    }

    pub fn with_config(tagger: Arc<dyn AddressTagger>, config: &ScoringConfig) -> Self {
        Self {
            normalizer: AddressNormalizer::new(tagger),
            penalizer: MismatchPenalizer::new(config),
        }
    }

    pub fn with_penalizer(tagger: Arc<dyn AddressTagger>, penalizer: MismatchPenalizer) -> Self {
        Self {
            normalizer: AddressNormalizer::new(tagger),
            penalizer,
        }
    }

    pub fn normalizer(&self) -> &AddressNormalizer {
        &self.normalizer
    }

    pub fn penalizer(&self) -> &MismatchPenalizer {
        &self.penalizer
    }

    /// Full scoring trace for one pair. Each address is tagged exactly once.
    pub fn explain(&self, address1: &RawAddress, address2: &RawAddress) -> Result<ScoreBreakdown> {
        let left = self.normalizer.normalize(address1)?;
        let right = self.normalizer.normalize(address2)?;

        let (vector1, vector2) = reconcile_garden_units(
            FrequencyVector::from_text(&left.text),
            FrequencyVector::from_text(&right.text),
        );

        let cosine = vector1.cosine_similarity(&vector2);
        let outcome = self
            .penalizer
            .evaluate(cosine, &left.components, &right.components);

        debug!(
            "Scored {:?} vs {:?}: cosine={:.4} similarity={:.4} bypassed={} rules={:?}",
            left.text, right.text, cosine, outcome.similarity, outcome.bypassed, outcome.triggered
        );

        Ok(ScoreBreakdown {
            address1: left,
            address2: right,
            vector1,
            vector2,
            cosine,
            bypassed: outcome.bypassed,
            multiplier: outcome.multiplier,
            triggered_rules: outcome.triggered,
            similarity: outcome.similarity,
        })
    }

    /// Final similarity of one pair
    pub fn score_pair(&self, address1: &RawAddress, address2: &RawAddress) -> Result<f64> {
        Ok(self.explain(address1, address2)?.similarity)
    }

    /// Score every pair in order. A tagger failure aborts the whole batch.
    pub fn score_pairs(&self, pairs: &[AddressPair]) -> Result<Vec<ScoreResult>> {
        pairs
            .iter()
            .map(|pair| {
                let similarity = self.score_pair(&pair.address1, &pair.address2)?;
                Ok(ScoreResult {
                    address1: pair.address1.clone(),
                    address2: pair.address2.clone(),
                    similarity,
                })
            })
            .collect()
    }
}
