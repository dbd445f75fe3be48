//! In-memory dropdown graph.
//!
//! A [`DropdownGraph`] is the whole option tree of one hierarchy as served
//! by a single dropdown call: for every level, a map from the composite key
//! of its scoped ancestors to the options offered under that key. The root
//! level lives under [`CompositeKey::root`].
//!
//! The graph also carries the identifier table that ships with the
//! dropdowns (asset `model_details`, location name ids), keyed by the
//! hierarchy's identifier scope.

use std::collections::HashMap;
use std::fmt;

use assetry_client::{AssetDropdowns, LocationDropdowns};
use assetry_core::{AssetLevel, CompositeKey, Level, LocationLevel};

/// Option lists and identifiers of one hierarchy.
#[derive(Clone, PartialEq, Eq)]
pub struct DropdownGraph<L: Level> {
    levels: HashMap<L, HashMap<CompositeKey, Vec<String>>>,
    identifiers: HashMap<CompositeKey, String>,
}

impl<L: Level> DropdownGraph<L> {
    /// Create a graph holding nothing.
    pub fn empty() -> Self {
        Self {
            levels: HashMap::new(),
            identifiers: HashMap::new(),
        }
    }

    /// Create a graph with the given root options.
    pub fn new(roots: Vec<String>) -> Self {
        let mut graph = Self::empty();
        graph.insert_options(L::root(), CompositeKey::root(), roots);
        graph
    }

    /// Bind `options` to `key` at `level`, replacing what was there.
    pub fn insert_options(&mut self, level: L, key: CompositeKey, options: Vec<String>) {
        self.levels.entry(level).or_default().insert(key, options);
    }

    /// Bind every entry of a wire map to `level`.
    pub fn extend_level(&mut self, level: L, entries: HashMap<String, Vec<String>>) {
        let map = self.levels.entry(level).or_default();
        map.extend(
            entries
                .into_iter()
                .map(|(key, options)| (CompositeKey::from(key), options)),
        );
    }

    /// Record an identifier. Empty identifiers are ignored.
    pub fn insert_identifier(&mut self, key: CompositeKey, identifier: impl Into<String>) {
        let identifier = identifier.into();
        if !identifier.trim().is_empty() {
            self.identifiers.insert(key, identifier);
        }
    }

    /// Options bound to exactly `key` at `level`; empty when nothing is bound.
    pub fn options(&self, level: L, key: &CompositeKey) -> &[String] {
        self.levels
            .get(&level)
            .and_then(|map| map.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The identifier recorded for `key`.
    pub fn identifier(&self, key: &CompositeKey) -> Option<&str> {
        self.identifiers.get(key).map(String::as_str)
    }

    /// Number of identifiers in the table.
    pub fn identifier_count(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns `true` when not even the root level has options.
    pub fn is_empty(&self) -> bool {
        self.options(L::root(), &CompositeKey::root()).is_empty()
    }
}

impl<L: Level> Default for DropdownGraph<L> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<L: Level> fmt::Debug for DropdownGraph<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(L, usize)> = self
            .levels
            .iter()
            .map(|(level, map)| (*level, map.len()))
            .collect();
        counts.sort();
        f.debug_struct("DropdownGraph")
            .field("hierarchy", &L::HIERARCHY)
            .field("keys_per_level", &counts)
            .field("identifiers", &self.identifiers.len())
            .finish()
    }
}

impl From<AssetDropdowns> for DropdownGraph<AssetLevel> {
    fn from(dropdowns: AssetDropdowns) -> Self {
        let mut graph = Self::new(dropdowns.categories);
        graph.extend_level(AssetLevel::SubCategory, dropdowns.sub_categories);
        graph.extend_level(AssetLevel::AssetGroup, dropdowns.asset_groups);
        graph.extend_level(AssetLevel::AssetType, dropdowns.asset_types);
        graph.extend_level(AssetLevel::Make, dropdowns.makes);
        graph.extend_level(AssetLevel::Model, dropdowns.models);
        for (key, detail) in dropdowns.model_details {
            graph.insert_identifier(CompositeKey::from(key), detail.model_id);
        }
        graph
    }
}

impl From<LocationDropdowns> for DropdownGraph<LocationLevel> {
    fn from(dropdowns: LocationDropdowns) -> Self {
        let mut graph = Self::new(dropdowns.countries);
        graph.extend_level(LocationLevel::State, dropdowns.states);
        graph.extend_level(LocationLevel::City, dropdowns.cities);
        graph.extend_level(LocationLevel::Unit, dropdowns.units);

        // Names arrive as {name, id} pairs: the names become options and the
        // ids go into the identifier table under the full five-level path.
        for (key, entries) in dropdowns.names {
            let mut names = Vec::with_capacity(entries.len());
            for entry in entries {
                graph.insert_identifier(
                    CompositeKey::from_parts([key.as_str(), entry.name.as_str()]),
                    entry.id,
                );
                names.push(entry.name);
            }
            graph.insert_options(LocationLevel::Name, CompositeKey::from(key), names);
        }
        graph
    }
}
