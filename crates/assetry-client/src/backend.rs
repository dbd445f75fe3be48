//! The `MastersBackend` trait: the only API boundary between pickers and
//! the masters service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AssetDropdowns, AssetMaster, GenerateModelIdRequest, LocationDropdowns, LocationMaster,
    MasterQuery,
};

/// Operations the pickers and forms need from the masters service.
#[async_trait]
pub trait MastersBackend: Send + Sync {
    /// Fetch the whole asset classification dropdown graph.
    async fn asset_dropdowns(&self) -> Result<AssetDropdowns>;

    /// Fetch the whole location dropdown graph.
    async fn location_dropdowns(&self) -> Result<LocationDropdowns>;

    /// Ask the backend to generate a model id for a full classification.
    async fn generate_model_id(&self, request: &GenerateModelIdRequest) -> Result<String>;

    // ── Asset masters ──────────────────────────────────────────

    /// List asset masters.
    async fn list_asset_masters(&self, query: &MasterQuery) -> Result<Vec<AssetMaster>>;

    /// Fetch one asset master by model id.
    async fn asset_master(&self, model_id: &str) -> Result<AssetMaster>;

    /// Create an asset master.
    async fn create_asset_master(&self, master: &AssetMaster) -> Result<AssetMaster>;

    /// Replace an asset master.
    async fn update_asset_master(&self, model_id: &str, master: &AssetMaster)
        -> Result<AssetMaster>;

    // ── Location masters ───────────────────────────────────────

    /// List location masters.
    async fn list_location_masters(&self, query: &MasterQuery) -> Result<Vec<LocationMaster>>;

    /// Fetch one location master by location id.
    async fn location_master(&self, location_id: &str) -> Result<LocationMaster>;

    /// Create a location master.
    async fn create_location_master(&self, master: &LocationMaster) -> Result<LocationMaster>;

    /// Replace a location master.
    async fn update_location_master(
        &self,
        location_id: &str,
        master: &LocationMaster,
    ) -> Result<LocationMaster>;
}

#[async_trait]
impl<B: MastersBackend + ?Sized> MastersBackend for Arc<B> {
    async fn asset_dropdowns(&self) -> Result<AssetDropdowns> {
        (**self).asset_dropdowns().await
    }

    async fn location_dropdowns(&self) -> Result<LocationDropdowns> {
        (**self).location_dropdowns().await
    }

    async fn generate_model_id(&self, request: &GenerateModelIdRequest) -> Result<String> {
        (**self).generate_model_id(request).await
    }

    async fn list_asset_masters(&self, query: &MasterQuery) -> Result<Vec<AssetMaster>> {
        (**self).list_asset_masters(query).await
    }

    async fn asset_master(&self, model_id: &str) -> Result<AssetMaster> {
        (**self).asset_master(model_id).await
    }

    async fn create_asset_master(&self, master: &AssetMaster) -> Result<AssetMaster> {
        (**self).create_asset_master(master).await
    }

    async fn update_asset_master(
        &self,
        model_id: &str,
        master: &AssetMaster,
    ) -> Result<AssetMaster> {
        (**self).update_asset_master(model_id, master).await
    }

    async fn list_location_masters(&self, query: &MasterQuery) -> Result<Vec<LocationMaster>> {
        (**self).list_location_masters(query).await
    }

    async fn location_master(&self, location_id: &str) -> Result<LocationMaster> {
        (**self).location_master(location_id).await
    }

    async fn create_location_master(&self, master: &LocationMaster) -> Result<LocationMaster> {
        (**self).create_location_master(master).await
    }

    async fn update_location_master(
        &self,
        location_id: &str,
        master: &LocationMaster,
    ) -> Result<LocationMaster> {
        (**self).update_location_master(location_id, master).await
    }
}
