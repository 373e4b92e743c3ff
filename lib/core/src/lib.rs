//! # addrmatch Core
//!
//! Core library for the addrmatch address matcher.
//!
//! This crate provides the data model and the normalization pipeline:
//!
//! - [`AddressComponents`] - Tagged components of one address
//! - [`AddressTagger`] - The injected parsing capability ([`RuleTagger`], [`FixedTagger`])
//! - [`normalise_units`] - Floor abbreviation expansion and unit stopword removal
//! - [`post_process`] - Split-number repair and unit-text cleanup
//! - [`effective_street`] - Street name folded together with street-like localities
//! - [`AddressNormalizer`] - Tagging + post-processing into a scoring string
//! - [`FrequencyVector`] - Bag-of-words vector with cosine similarity
//!
//! ## Example
//!
//! ```rust
//! use addrmatch_core::{AddressNormalizer, FrequencyVector, RuleTagger};
//! use std::sync::Arc;
//!
//! let normalizer = AddressNormalizer::new(Arc::new(RuleTagger::new()));
//! let a = normalizer.normalize_str("12 Norcutt Road, Twickenham, TW2 6SR").unwrap();
//! let b = normalizer.normalize_str("22 Norcutt Road, Twickenham, TW2 6SR").unwrap();
//! assert_eq!(a.text, "12 norcutt road tw2 6sr");
//!
//! let cosine = FrequencyVector::from_text(&a.text)
//!     .cosine_similarity(&FrequencyVector::from_text(&b.text));
//! assert!((cosine - 0.8).abs() < 1e-9);
//! ```

pub mod components;
pub mod error;
pub mod normalize;
pub mod postprocess;
pub mod street;
pub mod tagger;
pub mod units;
pub mod vector;

pub use components::{AddressComponents, ComponentKey};
pub use error::{Error, Result};
pub use normalize::{AddressNormalizer, NormalizedAddress, RawAddress};
pub use postprocess::{normalise_component_text, post_process, repair_split_number};
pub use street::{effective_street, is_street_like, STREET_KEYWORDS};
pub use tagger::{AddressTagger, FixedTagger, RuleTagger};
pub use units::{normalise_units, UNIT_STOPWORDS};
pub use vector::FrequencyVector;
