//! Utility modules.
//!
//! # Modules
//!
//! - [`values`]: Normalization and matching of user-entered values

pub mod values;
