//! Dropdown cache accessor.
//!
//! [`DropdownCache::load`] fetches the dropdown graph of one hierarchy in a
//! single backend call; every later query is a pure read of that copy.
//! There is no refetch and no expiry: a new form session builds a new cache.
//!
//! A failed fetch is not an error for the form. The cache falls back to an
//! empty graph, logs the failure, and records [`LoadState::Degraded`].
//!
//! Identifiers are not read from here. Resolution always asks the backend
//! again, see [`crate::resolver`].

use assetry_core::{CompositeKey, Level, LoadState, SelectionPath};

use crate::graph::DropdownGraph;
use crate::source::HierarchySource;

/// Read-only dropdown data for one form session.
#[derive(Debug)]
pub struct DropdownCache<L: Level> {
    graph: DropdownGraph<L>,
    state: LoadState,
}

impl<L: Level> DropdownCache<L> {
    /// Fetch the graph from `source`.
    ///
    /// Never fails: on error the cache is empty and its state is
    /// [`LoadState::Degraded`].
    pub async fn load<S>(source: &S) -> Self
    where
        S: HierarchySource<L> + ?Sized,
    {
        let (graph, state) = match source.fetch_graph().await {
            Ok(graph) => {
                log::info!(
                    "loaded {} dropdowns: {} root options, {} identifiers",
                    L::HIERARCHY,
                    graph.options(L::root(), &CompositeKey::root()).len(),
                    graph.identifier_count()
                );
                (graph, LoadState::Ready)
            }
            Err(e) => {
                log::warn!("failed to load {} dropdowns: {e}", L::HIERARCHY);
                (DropdownGraph::empty(), LoadState::Degraded(e.to_string()))
            }
        };

        Self { graph, state }
    }

    /// Build a ready cache around an existing graph.
    pub fn from_graph(graph: DropdownGraph<L>) -> Self {
        Self {
            graph,
            state: LoadState::Ready,
        }
    }

    /// Options offered at `level` for the ancestors chosen in `path`.
    ///
    /// Empty when nothing is bound to the key, and also when the key cannot
    /// be built because a scoped ancestor is empty. Use
    /// [`SelectionPath::is_reachable`] to tell the two apart.
    pub fn options_for(&self, level: L, path: &SelectionPath<L>) -> &[String] {
        match path.key_for(level) {
            Some(key) => self.graph.options(level, &key),
            None => &[],
        }
    }

    /// The cached graph.
    pub fn graph(&self) -> &DropdownGraph<L> {
        &self.graph
    }

    /// How the load went.
    pub fn state(&self) -> &LoadState {
        &self.state
    }
}
