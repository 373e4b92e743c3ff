//! Structured address components
//!
//! The fixed key vocabulary produced by an address tagger. Every value is
//! either a non-empty string or absent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of the components a tagger may fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKey {
    SubBuildingName,
    BuildingName,
    BuildingNumber,
    StreetName,
    Locality,
    Postcode,
}

impl ComponentKey {
    pub const ALL: [ComponentKey; 6] = [
        ComponentKey::SubBuildingName,
        ComponentKey::BuildingName,
        ComponentKey::BuildingNumber,
        ComponentKey::StreetName,
        ComponentKey::Locality,
        ComponentKey::Postcode,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKey::SubBuildingName => "SubBuildingName",
            ComponentKey::BuildingName => "BuildingName",
            ComponentKey::BuildingNumber => "BuildingNumber",
            ComponentKey::StreetName => "StreetName",
            ComponentKey::Locality => "Locality",
            ComponentKey::Postcode => "Postcode",
        }
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged components of a single address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_building_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

impl AddressComponents {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, see [`AddressComponents::set`]
    #[must_use]
    pub fn with(mut self, key: ComponentKey, value: impl Into<String>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    pub fn get(&self, key: ComponentKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    /// Set a component. Empty or whitespace-only values are stored as absent.
    pub fn set(&mut self, key: ComponentKey, value: Option<String>) {
        *self.slot_mut(key) = value.filter(|v| !v.trim().is_empty());
    }

    pub fn take(&mut self, key: ComponentKey) -> Option<String> {
        self.slot_mut(key).take()
    }

    pub fn contains(&self, key: ComponentKey) -> bool {
        self.slot(key).is_some()
    }

    /// True when no component is present
    pub fn is_empty(&self) -> bool {
        ComponentKey::ALL.iter().all(|k| !self.contains(*k))
    }

    /// Present components in key order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentKey, &str)> + '_ {
        ComponentKey::ALL
            .iter()
            .filter_map(move |k| self.get(*k).map(|v| (*k, v)))
    }

    fn slot(&self, key: ComponentKey) -> &Option<String> {
        match key {
            ComponentKey::SubBuildingName => &self.sub_building_name,
            ComponentKey::BuildingName => &self.building_name,
            ComponentKey::BuildingNumber => &self.building_number,
            ComponentKey::StreetName => &self.street_name,
            ComponentKey::Locality => &self.locality,
            ComponentKey::Postcode => &self.postcode,
        }
    }

    fn slot_mut(&mut self, key: ComponentKey) -> &mut Option<String> {
        match key {
            ComponentKey::SubBuildingName => &mut self.sub_building_name,
            ComponentKey::BuildingName => &mut self.building_name,
            ComponentKey::BuildingNumber => &mut self.building_number,
            ComponentKey::StreetName => &mut self.street_name,
            ComponentKey::Locality => &mut self.locality,
            ComponentKey::Postcode => &mut self.postcode,
        }
    }
}
