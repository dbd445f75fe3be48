//! Master records and identifier generation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /masters/asset-masters/generate-id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerateModelIdRequest {
    /// Category value.
    pub category: String,
    /// Sub-category value.
    pub sub_category: String,
    /// Asset group value.
    pub asset_group: String,
    /// Asset type value.
    pub asset_type: String,
    /// Make value.
    pub make: String,
    /// Model value.
    pub model: String,
}

/// Response of `POST /masters/asset-masters/generate-id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateModelIdResponse {
    /// The generated identifier; absent when the backend declined.
    #[serde(default)]
    pub model_id: Option<String>,
}

/// An asset master record: one classification path and its model id.
///
/// Fields the client does not interpret (vendor, warranty, lifecycle
/// status, ...) round-trip through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetMaster {
    /// Backend-assigned model identifier.
    #[serde(default)]
    pub model_id: String,
    /// Category value.
    #[serde(default)]
    pub category: String,
    /// Sub-category value.
    #[serde(default)]
    pub sub_category: String,
    /// Asset group value.
    #[serde(default)]
    pub asset_group: String,
    /// Asset type value.
    #[serde(default)]
    pub asset_type: String,
    /// Make value.
    #[serde(default)]
    pub make: String,
    /// Model value.
    #[serde(default)]
    pub model: String,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A location master record: one geographic path and its location id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationMaster {
    /// Location identifier.
    #[serde(default)]
    pub location_id: String,
    /// Country value.
    #[serde(default)]
    pub country: String,
    /// State value.
    #[serde(default)]
    pub state: String,
    /// City value.
    #[serde(default)]
    pub city: String,
    /// Unit value.
    #[serde(default)]
    pub unit: String,
    /// Site name.
    #[serde(default)]
    pub name: String,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters for master list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterQuery {
    /// Free-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Number of records to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Maximum number of records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl MasterQuery {
    /// A query with a search term.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// Set paging.
    pub fn with_page(mut self, skip: u32, limit: u32) -> Self {
        self.skip = Some(skip);
        self.limit = Some(limit);
        self
    }
}
