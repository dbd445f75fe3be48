//! Hierarchy sources: where a picker gets its dropdown graph and new
//! identifiers from.

use async_trait::async_trait;

use assetry_client::{GenerateModelIdRequest, MastersBackend};
use assetry_core::{AssetLevel, Level, LocationLevel, SelectionPath};

use crate::error::{Error, Result};
use crate::graph::DropdownGraph;

/// Backend operations one hierarchy needs.
#[async_trait]
pub trait HierarchySource<L: Level>: Send + Sync {
    /// Fetch the whole dropdown graph in one call.
    async fn fetch_graph(&self) -> Result<DropdownGraph<L>>;

    /// The identifier the backend holds for a complete path right now.
    ///
    /// Reads fresh data on every call, never a session's cached graph, so
    /// identifiers minted after the session opened are found. The default
    /// refetches the whole graph and reads its identifier table.
    async fn lookup(&self, path: &SelectionPath<L>) -> Result<Option<String>> {
        let Some(key) = path.identifier_key().filter(|_| path.is_complete()) else {
            return Ok(None);
        };
        let graph = self.fetch_graph().await?;
        Ok(graph.identifier(&key).map(str::to_string))
    }

    /// Ask the backend to mint an identifier for a complete path.
    ///
    /// Hierarchies without a generate endpoint keep the default, which
    /// reports [`Error::IdentifierNotFound`].
    async fn generate(&self, path: &SelectionPath<L>) -> Result<String> {
        Err(Error::IdentifierNotFound {
            hierarchy: L::HIERARCHY,
            key: path
                .identifier_key()
                .map(|key| key.to_string())
                .unwrap_or_default(),
        })
    }
}

/// Asset classification backed by the masters API.
#[derive(Debug, Clone)]
pub struct AssetSource<B> {
    backend: B,
}

impl<B: MastersBackend> AssetSource<B> {
    /// Wrap a masters backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: MastersBackend> HierarchySource<AssetLevel> for AssetSource<B> {
    async fn fetch_graph(&self) -> Result<DropdownGraph<AssetLevel>> {
        let dropdowns = self.backend.asset_dropdowns().await?;
        Ok(DropdownGraph::from(dropdowns))
    }

    async fn lookup(&self, path: &SelectionPath<AssetLevel>) -> Result<Option<String>> {
        let (Some(make), Some(model)) = (path.value(AssetLevel::Make), path.value(AssetLevel::Model))
        else {
            return Ok(None);
        };
        let dropdowns = self.backend.asset_dropdowns().await?;
        Ok(dropdowns.model_id(make, model).map(str::to_string))
    }

    async fn generate(&self, path: &SelectionPath<AssetLevel>) -> Result<String> {
        let request = generate_request(path)?;
        log::debug!(
            "requesting model id for {}|{}",
            request.make,
            request.model
        );
        Ok(self.backend.generate_model_id(&request).await?)
    }
}

/// Location hierarchy backed by the masters API.
///
/// Locations cannot be generated; a path whose name carries no id in the
/// current dropdown data stays unresolved.
#[derive(Debug, Clone)]
pub struct LocationSource<B> {
    backend: B,
}

impl<B: MastersBackend> LocationSource<B> {
    /// Wrap a masters backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: MastersBackend> HierarchySource<LocationLevel> for LocationSource<B> {
    async fn fetch_graph(&self) -> Result<DropdownGraph<LocationLevel>> {
        let dropdowns = self.backend.location_dropdowns().await?;
        Ok(DropdownGraph::from(dropdowns))
    }
}

/// Build the generate-id request from a complete asset path.
pub fn generate_request(path: &SelectionPath<AssetLevel>) -> Result<GenerateModelIdRequest> {
    let value = |level: AssetLevel| {
        path.value(level)
            .map(str::to_string)
            .ok_or(Error::Incomplete {
                hierarchy: AssetLevel::HIERARCHY,
                level: level.label(),
            })
    };
    Ok(GenerateModelIdRequest {
        category: value(AssetLevel::Category)?,
        sub_category: value(AssetLevel::SubCategory)?,
        asset_group: value(AssetLevel::AssetGroup)?,
        asset_type: value(AssetLevel::AssetType)?,
        make: value(AssetLevel::Make)?,
        model: value(AssetLevel::Model)?,
    })
}
