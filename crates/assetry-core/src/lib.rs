#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Assetry Core: shared types, traits, errors, and utilities.
//!
//! This crate has no internal Assetry dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`level`]: Hierarchy levels for assets and locations
//! - [`key`]: Composite keys into dropdown data
//! - [`selection`]: Selection values and the cascading selection path
//! - [`load_state`]: Load outcome of dropdown caches
//! - [`util`]: Value normalization helpers

pub mod error;
pub mod key;
pub mod level;
pub mod load_state;
pub mod selection;
pub mod util;


// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use key::{CompositeKey, DELIMITER};
pub use level::{AssetLevel, Level, LocationLevel};
pub use load_state::LoadState;
pub use selection::{SelectionPath, SelectionValue};

// Convenience re-exports from util
pub use util::values::{find_option, normalize_value};
