//! # addrmatch Similarity
//!
//! Pair scoring on top of the addrmatch normalization pipeline.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Normalize  │────>│  Vectorize  │────>│  Reconcile  │
//! │ (tag once)  │     │  (\w+ bag)  │     │(garden/flr) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Penalize   │<────│   Cosine    │
//!                     │  (numbers)  │     │             │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use addrmatch_similarity::{AddressPair, PairScorer};
//! use addrmatch_core::RuleTagger;
//! use std::sync::Arc;
//!
//! let scorer = PairScorer::new(Arc::new(RuleTagger::new()));
//! let results = scorer
//!     .score_pairs(&[AddressPair::new(
//!         "10 Downing Street London SW1A 2AA",
//!         "10 Downing St, Westminster, London SW1A 2AA",
//!     )])
//!     .unwrap();
//! assert!((results[0].similarity - 1.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod explain;
pub mod penalty;
pub mod reconcile;
pub mod scorer;

pub use config::{ConfigError, ScoringConfig, DEFAULT_BYPASS_THRESHOLD, DEFAULT_MISMATCH_MULTIPLIER};
pub use explain::{ScoreBreakdown, ScoreSummary};
pub use penalty::{extract_numeric_tokens, MismatchPenalizer, PenaltyOutcome, PenaltyRule};
pub use reconcile::{reconcile_garden_units, GARDEN_EQUIVALENCE};
pub use scorer::{AddressPair, PairScorer, ScoreResult};
