//! Address normalization
//!
//! One tagger call per address, then post-processing and street
//! resolution, producing the lower-cased string that gets vectorized plus
//! the components kept for numeric reconciliation.

use crate::components::{AddressComponents, ComponentKey};
use crate::error::Result;
use crate::postprocess::post_process;
use crate::street::effective_street;
use crate::tagger::AddressTagger;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{trace, warn};

/// A raw address as received from a caller.
///
/// Wraps any JSON value: records coming from external feeds are not
/// guaranteed to hold a string. Only string values are ever tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAddress(Value);

impl RawAddress {
    #[inline]
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The address text, if the value is a string
    pub fn as_text(&self) -> Option<&str> {
        self.0.as_str()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for RawAddress {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl From<String> for RawAddress {
    fn from(s: String) -> Self {
        Self(Value::String(s))
    }
}

impl From<Value> for RawAddress {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Result of normalizing one address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedAddress {
    /// Lower-cased, space-joined scoring text
    pub text: String,
    /// Post-processed components
    pub components: AddressComponents,
}

/// Turns raw addresses into [`NormalizedAddress`] values using an injected tagger
#[derive(Clone)]
pub struct AddressNormalizer {
    tagger: Arc<dyn AddressTagger>,
}

impl fmt::Debug for AddressNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressNormalizer").finish_non_exhaustive()
    }
}

impl AddressNormalizer {
    pub fn new(tagger: Arc<dyn AddressTagger>) -> Self {
        Self { tagger }
    }

    /// Normalize a raw value. Non-string values normalize to an empty address.
    pub fn normalize(&self, raw: &RawAddress) -> Result<NormalizedAddress> {
        match raw.as_text() {
            Some(text) => self.normalize_str(text),
            None => Ok(NormalizedAddress::default()),
        }
    }

    /// Normalize address text.
    ///
    /// The ordered parts are sub-building name, building name, building
    /// number, effective street and postcode; absent parts are skipped.
    /// Empty input is returned as an empty address without tagging.
    pub fn normalize_str(&self, raw: &str) -> Result<NormalizedAddress> {
        if raw.is_empty() {
            return Ok(NormalizedAddress::default());
        }

        let tagged = self.tagger.tag(raw).map_err(|e| {
            warn!("Tagger failed for {:?}: {}", raw, e);
            e
        })?;

        let components = post_process(tagged);
        let street = effective_street(&components);

        let parts = [
            components.get(ComponentKey::SubBuildingName),
            components.get(ComponentKey::BuildingName),
            components.get(ComponentKey::BuildingNumber),
            street.as_deref(),
            components.get(ComponentKey::Postcode),
        ];

        let text = parts
            .iter()
            .flatten()
            .map(|part| part.trim().to_lowercase())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        trace!("Normalized {:?} -> {:?}", raw, text);

        Ok(NormalizedAddress { text, components })
    }
}
