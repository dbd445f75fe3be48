#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # assetry-client
//!
//! This crate provides:
//! - [`MastersBackend`]: the async seam between pickers and the masters API
//! - [`MastersClient`]: the reqwest implementation of that seam
//! - [`ClientConfig`]: base URL, bearer token, and timeout
//! - Wire types for dropdown data and master records in [`types`]

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use backend::MastersBackend;
pub use client::MastersClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use types::{
    AssetDropdowns, AssetMaster, GenerateModelIdRequest, LocationDropdowns, LocationMaster,
    LocationOption, MasterQuery, ModelDetail,
};
