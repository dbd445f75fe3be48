//! Master record forms.
//!
//! A [`MasterForm`] wraps a picker and the other fields of the record being
//! edited. Submission is blocked until the picker has produced what the
//! record needs; the payload carries the hierarchy values, the resolved
//! identifier, and every extra field (blank strings sent as `null`).

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use assetry_client::{AssetMaster, ClientError, LocationMaster, MastersBackend};
use assetry_core::{AssetLevel, Level, LocationLevel, SelectionPath};

use crate::picker::Picker;
use crate::resolver::ResolvedIdentifier;
use crate::source::{AssetSource, HierarchySource, LocationSource};

/// Asset master form backed by the masters API.
pub type AssetForm<B> = MasterForm<AssetLevel, AssetSource<B>>;

/// Location master form backed by the masters API.
pub type LocationForm<B> = MasterForm<LocationLevel, LocationSource<B>>;

/// Why a form cannot be submitted.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FormError {
    /// The path has no resolved identifier.
    #[error("{}", identifier_hint(hierarchy))]
    IdentifierRequired {
        /// Hierarchy name
        hierarchy: &'static str,
    },

    /// A hierarchy level is still empty.
    #[error("{level} is required")]
    Incomplete {
        /// Hierarchy name
        hierarchy: &'static str,
        /// First empty level
        level: &'static str,
    },

    /// Loading or saving the record failed.
    #[error(transparent)]
    Backend(#[from] ClientError),
}

fn identifier_hint(hierarchy: &str) -> &'static str {
    match hierarchy {
        "location" => "complete location to resolve an identifier",
        _ => "complete classification to generate an identifier",
    }
}

/// A path that passed submit validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSelection<L: Level> {
    /// The complete path.
    pub path: SelectionPath<L>,
    /// Its identifier; `None` only when the form does not require one.
    pub identifier: Option<ResolvedIdentifier>,
}

impl<L: Level> CompletedSelection<L> {
    /// The value at `level`.
    pub fn value(&self, level: L) -> String {
        self.path.value(level).unwrap_or_default().to_string()
    }

    /// The identifier text, empty when unresolved.
    pub fn identifier_value(&self) -> String {
        self.identifier
            .as_ref()
            .map(|id| id.value.clone())
            .unwrap_or_default()
    }
}

/// A record form around one picker session.
pub struct MasterForm<L: Level, S: ?Sized> {
    picker: Picker<L, S>,
    require_identifier: bool,
    fields: Map<String, Value>,
    editing: Option<String>,
}

impl<L, S> MasterForm<L, S>
where
    L: Level,
    S: HierarchySource<L> + ?Sized,
{
    /// Wrap a picker. An identifier is required by default.
    pub fn new(picker: Picker<L, S>) -> Self {
        Self {
            picker,
            require_identifier: true,
            fields: Map::new(),
            editing: None,
        }
    }

    /// Open a fresh picker session over `source`.
    pub async fn open(source: S) -> Self
    where
        S: Sized,
    {
        Self::new(Picker::open(source).await)
    }

    /// Set whether submission needs a resolved identifier.
    pub fn with_required_identifier(mut self, required: bool) -> Self {
        self.require_identifier = required;
        self
    }

    /// Set a non-hierarchy field of the record.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// A non-hierarchy field of the record.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Every non-hierarchy field.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The picker.
    pub fn picker(&self) -> &Picker<L, S> {
        &self.picker
    }

    /// The picker, for input.
    pub fn picker_mut(&mut self) -> &mut Picker<L, S> {
        &mut self.picker
    }

    /// Identifier of the record being edited; `None` for a new record.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Check whether the form can be submitted.
    pub fn validate(&self) -> Result<CompletedSelection<L>, FormError> {
        let identifier = self.picker.identifier().cloned();
        if self.require_identifier && identifier.is_none() {
            return Err(FormError::IdentifierRequired {
                hierarchy: L::HIERARCHY,
            });
        }
        if let Some(level) = self.picker.path().first_missing() {
            return Err(FormError::Incomplete {
                hierarchy: L::HIERARCHY,
                level: level.label(),
            });
        }
        Ok(CompletedSelection {
            path: self.picker.path().clone(),
            identifier,
        })
    }

    fn start_editing(&mut self, id: &str, fields: Map<String, Value>) {
        self.editing = Some(id.to_string());
        self.fields = fields;
    }

    fn sanitized_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) if s.trim().is_empty() => Value::Null,
                    other => other.clone(),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

impl<S> MasterForm<AssetLevel, S>
where
    S: HierarchySource<AssetLevel> + ?Sized,
{
    /// Build the asset master record.
    pub fn payload(&self) -> Result<AssetMaster, FormError> {
        let done = self.validate()?;
        Ok(AssetMaster {
            model_id: done.identifier_value(),
            category: done.value(AssetLevel::Category),
            sub_category: done.value(AssetLevel::SubCategory),
            asset_group: done.value(AssetLevel::AssetGroup),
            asset_type: done.value(AssetLevel::AssetType),
            make: done.value(AssetLevel::Make),
            model: done.value(AssetLevel::Model),
            extra: self.sanitized_fields(),
        })
    }
}

impl<S> MasterForm<LocationLevel, S>
where
    S: HierarchySource<LocationLevel> + ?Sized,
{
    /// Build the location master record.
    pub fn payload(&self) -> Result<LocationMaster, FormError> {
        let done = self.validate()?;
        Ok(LocationMaster {
            location_id: done.identifier_value(),
            country: done.value(LocationLevel::Country),
            state: done.value(LocationLevel::State),
            city: done.value(LocationLevel::City),
            unit: done.value(LocationLevel::Unit),
            name: done.value(LocationLevel::Name),
            extra: self.sanitized_fields(),
        })
    }
}

impl<B: MastersBackend> AssetForm<B> {
    /// Open a form prefilled from the stored asset master `model_id`.
    pub async fn edit(backend: B, model_id: &str) -> Result<Self, FormError> {
        let master = backend.asset_master(model_id).await?;
        let mut form = Self::open(AssetSource::new(backend)).await;
        let identifier = non_blank(&master.model_id).unwrap_or(model_id);
        form.picker.prefill(
            [
                &master.category,
                &master.sub_category,
                &master.asset_group,
                &master.asset_type,
                &master.make,
                &master.model,
            ],
            Some(identifier),
        );
        form.start_editing(model_id, master.extra);
        Ok(form)
    }

    /// Create or update the asset master.
    pub async fn submit(&self) -> Result<AssetMaster, FormError> {
        let payload = self.payload()?;
        let backend = self.picker.source().backend();
        let saved = match &self.editing {
            Some(id) => backend.update_asset_master(id, &payload).await?,
            None => backend.create_asset_master(&payload).await?,
        };
        log::info!("saved asset master {}", saved.model_id);
        Ok(saved)
    }
}

impl<B: MastersBackend> LocationForm<B> {
    /// Open a form prefilled from the stored location master `location_id`.
    pub async fn edit(backend: B, location_id: &str) -> Result<Self, FormError> {
        let master = backend.location_master(location_id).await?;
        let mut form = Self::open(LocationSource::new(backend)).await;
        let identifier = non_blank(&master.location_id).unwrap_or(location_id);
        form.picker.prefill(
            [
                &master.country,
                &master.state,
                &master.city,
                &master.unit,
                &master.name,
            ],
            Some(identifier),
        );
        form.start_editing(location_id, master.extra);
        Ok(form)
    }

    /// Create or update the location master.
    pub async fn submit(&self) -> Result<LocationMaster, FormError> {
        let payload = self.payload()?;
        let backend = self.picker.source().backend();
        let saved = match &self.editing {
            Some(id) => backend.update_location_master(id, &payload).await?,
            None => backend.create_location_master(&payload).await?,
        };
        log::info!("saved location master {}", saved.location_id);
        Ok(saved)
    }
}

impl<L: Level, S: ?Sized> fmt::Debug for MasterForm<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterForm")
            .field("picker", &self.picker)
            .field("require_identifier", &self.require_identifier)
            .field("fields", &self.fields)
            .field("editing", &self.editing)
            .finish()
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
