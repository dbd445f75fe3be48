//! Wire types for the masters API.

mod dropdowns;
mod masters;

pub use dropdowns::{AssetDropdowns, LocationDropdowns, LocationOption, ModelDetail};
pub use masters::{
    AssetMaster, GenerateModelIdRequest, GenerateModelIdResponse, LocationMaster, MasterQuery,
};
