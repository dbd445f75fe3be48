//! Hierarchical dropdown payloads.
//!
//! Both endpoints return the whole hierarchy in one document: a root list
//! plus one map per deeper level, keyed by ancestor values joined with `|`.

use std::collections::HashMap;

use assetry_core::CompositeKey;
use serde::{Deserialize, Serialize};

/// Response of `GET /masters/dropdowns/assets`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDropdowns {
    /// Root options.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Keyed by `category`.
    #[serde(default)]
    pub sub_categories: HashMap<String, Vec<String>>,
    /// Keyed by `category|sub_category`.
    #[serde(default)]
    pub asset_groups: HashMap<String, Vec<String>>,
    /// Keyed by `asset_group`.
    #[serde(default)]
    pub asset_types: HashMap<String, Vec<String>>,
    /// Keyed by `asset_type`.
    #[serde(default)]
    pub makes: HashMap<String, Vec<String>>,
    /// Keyed by `make`.
    #[serde(default)]
    pub models: HashMap<String, Vec<String>>,
    /// Keyed by `make|model`.
    #[serde(default)]
    pub model_details: HashMap<String, ModelDetail>,
}

impl AssetDropdowns {
    /// The existing model id for a make and model, if the master data has one.
    pub fn model_id(&self, make: &str, model: &str) -> Option<&str> {
        let key = CompositeKey::from_parts([make, model]);
        self.model_details
            .get(key.as_str())
            .map(|detail| detail.model_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// Details recorded for one make/model pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDetail {
    /// Backend-assigned model identifier.
    #[serde(default)]
    pub model_id: String,
}

/// Response of `GET /masters/dropdowns/locations`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDropdowns {
    /// Root options.
    #[serde(default)]
    pub countries: Vec<String>,
    /// Keyed by `country`.
    #[serde(default)]
    pub states: HashMap<String, Vec<String>>,
    /// Keyed by `country|state`.
    #[serde(default)]
    pub cities: HashMap<String, Vec<String>>,
    /// Keyed by `country|state|city`.
    #[serde(default)]
    pub units: HashMap<String, Vec<String>>,
    /// Keyed by `country|state|city|unit`.
    #[serde(default)]
    pub names: HashMap<String, Vec<LocationOption>>,
}

/// A named site together with its location id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    /// Display name of the site.
    pub name: String,
    /// Location identifier.
    pub id: String,
}
