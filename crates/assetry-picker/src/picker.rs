//! A picker session: cache, selection machine, and resolver for one
//! hierarchy.

use std::sync::Arc;

use assetry_core::{Level, LoadState, SelectionPath};

use crate::cache::DropdownCache;
use crate::error::Result;
use crate::graph::DropdownGraph;
use crate::machine::{Applied, SelectionMachine, Transition};
use crate::resolver::{IdentifierResolver, ResolveOutcome, ResolveTicket, ResolvedIdentifier};
use crate::source::HierarchySource;

/// Options shown at one level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelOptions<L: Level> {
    /// The level.
    pub level: L,
    /// `false` while an ancestor is still empty.
    pub reachable: bool,
    /// Options under the current path.
    pub options: Vec<String>,
}

/// A write followed by identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selected<L: Level> {
    /// What the write changed.
    pub transition: Transition<L>,
    /// How the resolution was applied, when the write completed the path.
    pub applied: Option<Applied>,
}

/// One form session over hierarchy `L`.
pub struct Picker<L: Level, S: ?Sized> {
    source: Arc<S>,
    machine: SelectionMachine<L>,
    resolver: IdentifierResolver<L, S>,
}

impl<L, S> Picker<L, S>
where
    L: Level,
    S: HierarchySource<L> + ?Sized,
{
    /// Start a session: load the dropdown graph and begin with an empty path.
    pub async fn open(source: S) -> Self
    where
        S: Sized,
    {
        Self::open_shared(Arc::new(source)).await
    }

    /// Like [`Picker::open`], for a source shared with other sessions.
    pub async fn open_shared(source: Arc<S>) -> Self {
        let cache = Arc::new(DropdownCache::load(source.as_ref()).await);
        Self::with_cache(source, cache)
    }

    /// Start a session over an already-loaded cache.
    pub fn with_cache(source: Arc<S>, cache: Arc<DropdownCache<L>>) -> Self {
        let resolver = IdentifierResolver::new(Arc::clone(&source));
        Self {
            source,
            machine: SelectionMachine::new(cache),
            resolver,
        }
    }

    /// Start a session over a graph obtained elsewhere.
    pub fn with_graph(source: Arc<S>, graph: DropdownGraph<L>) -> Self {
        Self::with_cache(source, Arc::new(DropdownCache::from_graph(graph)))
    }

    /// Write `input` at `level`. See [`SelectionMachine::set_value`].
    pub fn set_value(&mut self, level: L, input: &str) -> Result<Transition<L>> {
        self.machine.set_value(level, input)
    }

    /// A handle for resolving tickets without borrowing the picker.
    pub fn resolver(&self) -> IdentifierResolver<L, S> {
        self.resolver.clone()
    }

    /// Apply a resolution outcome, dropping it if stale.
    pub fn apply(&mut self, outcome: ResolveOutcome<L>) -> Applied {
        self.machine.apply(outcome)
    }

    /// Write `input` at `level` and, if that completes the path, resolve
    /// and apply its identifier.
    pub async fn select(&mut self, level: L, input: &str) -> Result<Selected<L>> {
        let transition = self.set_value(level, input)?;
        let applied = match transition.ticket.clone() {
            Some(ticket) => Some(self.resolve_and_apply(ticket).await),
            None => None,
        };
        Ok(Selected {
            transition,
            applied,
        })
    }

    /// Load a stored path in one step.
    ///
    /// A supplied identifier is remembered for the path, so re-selecting
    /// the same values later yields it again without a backend call.
    pub fn prefill<I, V>(&mut self, values: I, identifier: Option<&str>) -> Option<ResolveTicket<L>>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let ticket = self.machine.prefill(values, identifier);
        if let Some(identifier) = self.machine.identifier() {
            self.resolver
                .remember(self.machine.path(), identifier.clone());
        }
        ticket
    }

    /// Resolve the current path if it is complete and unresolved.
    pub async fn resolve_pending(&mut self) -> Option<Applied> {
        let ticket = self.machine.pending_ticket()?;
        Some(self.resolve_and_apply(ticket).await)
    }

    /// Options for every level under the current path, root first.
    pub fn option_lists(&self) -> Vec<LevelOptions<L>> {
        L::ALL
            .iter()
            .map(|level| LevelOptions {
                level: *level,
                reachable: self.machine.path().is_reachable(*level),
                options: self.machine.options_for(*level).to_vec(),
            })
            .collect()
    }

    /// Options at `level` under the current path.
    pub fn options_for(&self, level: L) -> &[String] {
        self.machine.options_for(level)
    }

    /// Empty the path.
    pub fn clear(&mut self) {
        self.machine.clear();
    }

    /// The current path.
    pub fn path(&self) -> &SelectionPath<L> {
        self.machine.path()
    }

    /// The resolved identifier of the current path.
    pub fn identifier(&self) -> Option<&ResolvedIdentifier> {
        self.machine.identifier()
    }

    /// The selection machine.
    pub fn machine(&self) -> &SelectionMachine<L> {
        &self.machine
    }

    /// The session's dropdown cache.
    pub fn cache(&self) -> &Arc<DropdownCache<L>> {
        self.machine.cache()
    }

    /// Load state of the dropdown cache.
    pub fn load_state(&self) -> LoadState {
        self.cache().state().clone()
    }

    /// The source this session was opened with.
    pub fn source(&self) -> &S {
        &self.source
    }

    async fn resolve_and_apply(&mut self, ticket: ResolveTicket<L>) -> Applied {
        let outcome = self.resolver.resolve(ticket).await;
        self.machine.apply(outcome)
    }
}

impl<L: Level, S: ?Sized> std::fmt::Debug for Picker<L, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker")
            .field("hierarchy", &L::HIERARCHY)
            .field("path", &self.machine.path().to_string())
            .field("generation", &self.machine.generation())
            .field("identifier", &self.machine.identifier())
            .finish()
    }
}
