#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Modules
//!
//! - [`graph`]: the in-memory dropdown graph of one hierarchy
//! - [`source`]: [`HierarchySource`] and its masters-API implementations
//! - [`cache`]: load-once dropdown cache with degraded fallback
//! - [`machine`]: the selection state machine and its stale guard
//! - [`resolver`]: lookup-then-generate identifier resolution
//! - [`picker`]: a session composing the three
//! - [`form`]: record forms with submit validation

pub mod cache;
pub mod error;
pub mod form;
pub mod graph;
pub mod machine;
pub mod picker;
pub mod resolver;
pub mod source;

#[cfg(test)]
mod proptests;

pub use cache::DropdownCache;
pub use error::{Error, Result};
pub use form::{AssetForm, CompletedSelection, FormError, LocationForm, MasterForm};
pub use graph::DropdownGraph;
pub use machine::{Applied, SelectionMachine, Transition};
pub use picker::{LevelOptions, Picker, Selected};
pub use resolver::{
    IdentifierOrigin, IdentifierResolver, ResolveOutcome, ResolveTicket, ResolvedIdentifier,
};
pub use source::{AssetSource, HierarchySource, LocationSource};
