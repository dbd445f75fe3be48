//! Identifier resolution for complete paths.
//!
//! Resolving a path tries, in order:
//!
//! 1. the session memo (a path resolved earlier in this session);
//! 2. a fresh backend lookup via [`HierarchySource::lookup`];
//! 3. backend generation via [`HierarchySource::generate`].
//!
//! The lookup never reads the session's dropdown cache: that copy may
//! predate identifiers minted by other sessions, or be empty after a failed
//! load. A lookup error fails the resolution instead of falling through to
//! generation. The backend alone decides identifier format and uniqueness.
//! Nothing is built locally.
//!
//! Every request carries a [`ResolveTicket`] taken from the selection
//! machine. The outcome hands the ticket back so the machine can drop
//! results that no longer match its state.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use assetry_core::{Level, SelectionPath};

use crate::error::{Error, Result};
use crate::source::HierarchySource;

// ============================================================================
// Resolved identifiers
// ============================================================================

/// Where a resolved identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierOrigin {
    /// Already held by the backend.
    Existing,
    /// Minted by the backend for this path.
    Generated,
    /// Carried by the record being edited.
    Prefilled,
}

impl fmt::Display for IdentifierOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing => write!(f, "existing"),
            Self::Generated => write!(f, "generated"),
            Self::Prefilled => write!(f, "prefilled"),
        }
    }
}

/// A stable identifier bound to a complete path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedIdentifier {
    /// The identifier text.
    pub value: String,
    /// How it was obtained.
    pub origin: IdentifierOrigin,
}

impl ResolvedIdentifier {
    /// Create a resolved identifier.
    pub fn new(value: impl Into<String>, origin: IdentifierOrigin) -> Self {
        Self {
            value: value.into(),
            origin,
        }
    }
}

impl fmt::Display for ResolvedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.origin)
    }
}

// ============================================================================
// Tickets and outcomes
// ============================================================================

/// The machine state a resolution was started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveTicket<L: Level> {
    /// Machine generation when the ticket was issued.
    pub generation: u64,
    /// The complete path to resolve.
    pub path: SelectionPath<L>,
}

/// Result of one resolution attempt.
#[derive(Debug)]
pub enum ResolveOutcome<L: Level> {
    /// An identifier was found, generated, or remembered.
    Resolved {
        /// Ticket the request was made with.
        ticket: ResolveTicket<L>,
        /// The identifier.
        identifier: ResolvedIdentifier,
    },
    /// Lookup and generation both failed.
    Failed {
        /// Ticket the request was made with.
        ticket: ResolveTicket<L>,
        /// What went wrong.
        error: Error,
    },
    /// Another resolution of the same path is still running.
    AlreadyInFlight {
        /// Ticket the request was made with.
        ticket: ResolveTicket<L>,
    },
}

impl<L: Level> ResolveOutcome<L> {
    /// The ticket the request was made with.
    pub fn ticket(&self) -> &ResolveTicket<L> {
        match self {
            Self::Resolved { ticket, .. }
            | Self::Failed { ticket, .. }
            | Self::AlreadyInFlight { ticket } => ticket,
        }
    }

    /// The identifier, if resolution succeeded.
    pub fn identifier(&self) -> Option<&ResolvedIdentifier> {
        match self {
            Self::Resolved { identifier, .. } => Some(identifier),
            _ => None,
        }
    }
}

// ============================================================================
// IdentifierResolver
// ============================================================================

type MemoKey = Vec<String>;

#[derive(Default)]
struct ResolverState {
    memo: HashMap<MemoKey, ResolvedIdentifier>,
    in_flight: HashSet<MemoKey>,
}

struct ResolverInner<S: ?Sized> {
    source: Arc<S>,
    state: Mutex<ResolverState>,
}

/// Lookup-then-generate resolver with a per-session memo.
///
/// Clones share the memo, so a handle can be moved into a task while the
/// picker keeps accepting input.
pub struct IdentifierResolver<L: Level, S: ?Sized> {
    inner: Arc<ResolverInner<S>>,
    hierarchy: PhantomData<fn() -> L>,
}

impl<L: Level, S: ?Sized> Clone for IdentifierResolver<L, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            hierarchy: PhantomData,
        }
    }
}

impl<L, S> IdentifierResolver<L, S>
where
    L: Level,
    S: HierarchySource<L> + ?Sized,
{
    /// Create a resolver over a session's source.
    pub fn new(source: Arc<S>) -> Self {
        Self {
            inner: Arc::new(ResolverInner {
                source,
                state: Mutex::new(ResolverState::default()),
            }),
            hierarchy: PhantomData,
        }
    }

    /// Resolve the path carried by `ticket`.
    ///
    /// Never returns an error directly: failures come back as
    /// [`ResolveOutcome::Failed`] with the ticket attached.
    pub async fn resolve(&self, ticket: ResolveTicket<L>) -> ResolveOutcome<L> {
        if let Some(level) = ticket.path.first_missing() {
            return ResolveOutcome::Failed {
                ticket,
                error: Error::Incomplete {
                    hierarchy: L::HIERARCHY,
                    level: level.label(),
                },
            };
        }

        let key = ticket.path.to_strings();
        {
            let mut state = self.lock();
            if let Some(identifier) = state.memo.get(&key) {
                log::debug!(
                    "{} identifier for '{}' served from session memo",
                    L::HIERARCHY,
                    ticket.path
                );
                return ResolveOutcome::Resolved {
                    identifier: identifier.clone(),
                    ticket,
                };
            }
            if !state.in_flight.insert(key.clone()) {
                log::debug!(
                    "{} resolution for '{}' already in flight",
                    L::HIERARCHY,
                    ticket.path
                );
                return ResolveOutcome::AlreadyInFlight { ticket };
            }
        }

        let guard = InFlightGuard {
            state: &self.inner.state,
            key: Some(key),
        };
        let result = self.lookup_or_generate(&ticket.path).await;
        let key = guard.release();

        match result {
            Ok(identifier) => {
                log::info!(
                    "resolved {} '{}' to {identifier}",
                    L::HIERARCHY,
                    ticket.path
                );
                self.lock().memo.insert(key, identifier.clone());
                ResolveOutcome::Resolved { ticket, identifier }
            }
            Err(error) => {
                log::warn!(
                    "could not resolve {} identifier for '{}': {error}",
                    L::HIERARCHY,
                    ticket.path
                );
                ResolveOutcome::Failed { ticket, error }
            }
        }
    }

    /// Bind `identifier` to a complete `path` without any I/O.
    ///
    /// Used for identifiers carried by a record being edited.
    pub fn remember(&self, path: &SelectionPath<L>, identifier: ResolvedIdentifier) {
        if path.is_complete() {
            self.lock().memo.insert(path.to_strings(), identifier);
        }
    }

    /// The identifier already resolved for `path` in this session.
    pub fn memoized(&self, path: &SelectionPath<L>) -> Option<ResolvedIdentifier> {
        self.lock().memo.get(&path.to_strings()).cloned()
    }

    /// Returns `true` while a resolution of `path` is running.
    pub fn is_in_flight(&self, path: &SelectionPath<L>) -> bool {
        self.lock().in_flight.contains(&path.to_strings())
    }

    /// Number of memoized paths.
    pub fn memo_len(&self) -> usize {
        self.lock().memo.len()
    }

    async fn lookup_or_generate(&self, path: &SelectionPath<L>) -> Result<ResolvedIdentifier> {
        if let Some(existing) = self.inner.source.lookup(path).await? {
            return Ok(ResolvedIdentifier::new(existing, IdentifierOrigin::Existing));
        }
        log::debug!("no {} identifier for '{path}', generating", L::HIERARCHY);
        let generated = self.inner.source.generate(path).await?;
        Ok(ResolvedIdentifier::new(generated, IdentifierOrigin::Generated))
    }

    fn lock(&self) -> MutexGuard<'_, ResolverState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<L: Level, S: ?Sized> fmt::Debug for IdentifierResolver<L, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("IdentifierResolver")
            .field("hierarchy", &L::HIERARCHY)
            .field("memoized", &state.memo.len())
            .field("in_flight", &state.in_flight.len())
            .finish()
    }
}

/// Clears an in-flight marker even when the resolving future is dropped.
struct InFlightGuard<'a> {
    state: &'a Mutex<ResolverState>,
    key: Option<MemoKey>,
}

impl InFlightGuard<'_> {
    fn release(mut self) -> MemoKey {
        let key = self.key.take().unwrap_or_default();
        self.clear(&key);
        key
    }

    fn clear(&self, key: &MemoKey) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_flight
            .remove(key);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.clear(&key);
        }
    }
}
