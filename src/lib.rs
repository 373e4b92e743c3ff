//! # addrmatch
//!
//! Scores pairs of free-text postal addresses for likely equivalence.
//!
//! Each address is tagged into structured components, normalized (floor
//! abbreviations expanded, unit nouns dropped, street-like localities
//! folded into the street), turned into a bag of words and compared by
//! cosine similarity. House and flat number disagreements then scale the
//! score down, and "garden" flats are reconciled with ground/basement ones.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! addrmatch --http-port 8000
//! curl -X POST localhost:8000/score -H 'content-type: application/json' \
//!   -d '{"pairs":[{"address1":"12 Norcutt Road, Twickenham, TW2 6SR","address2":"22 Norcutt Road, Twickenham, TW2 6SR"}]}'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use addrmatch::prelude::*;
//! use std::sync::Arc;
//!
//! let scorer = PairScorer::new(Arc::new(RuleTagger::new()));
//! let results = scorer
//!     .score_pairs(&[AddressPair::new(
//!         "12 Norcutt Road, Twickenham, TW2 6SR",
//!         "22 Norcutt Road, Twickenham, TW2 6SR",
//!     )])
//!     .unwrap();
//! assert!(results[0].similarity < 0.6);
//! ```
//!
//! ## Crate Structure
//!
//! - `addrmatch-core` - Components, tagging, normalization, frequency vectors
//! - `addrmatch-similarity` - Reconciliation, penalties, pair scoring, explanations
//! - `addrmatch-api` - REST API

// Re-export core types
pub use addrmatch_core::{
    AddressComponents, AddressNormalizer, AddressTagger, ComponentKey,
    FixedTagger, FrequencyVector, NormalizedAddress, RawAddress, RuleTagger,
    Error, Result,
};

// Re-export scoring
pub use addrmatch_similarity::{
    AddressPair, MismatchPenalizer, PairScorer, ScoreBreakdown, ScoreResult,
    ScoreSummary, ScoringConfig,
};

// Re-export API
pub use addrmatch_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AddressComponents, AddressNormalizer, AddressTagger, ComponentKey,
        FixedTagger, FrequencyVector, NormalizedAddress, RawAddress, RuleTagger,
        Error, Result,
        AddressPair, MismatchPenalizer, PairScorer, ScoreBreakdown, ScoreResult,
        ScoreSummary, ScoringConfig,
        RestApi,
    };
}
