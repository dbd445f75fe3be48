//! Selection state machine.
//!
//! The machine owns the current [`SelectionPath`], the identifier resolved
//! for it, and a generation counter. Every write bumps the generation, so a
//! resolution started earlier can be recognized as stale when it returns.

use std::sync::Arc;

use assetry_core::{Level, SelectionPath, SelectionValue};

use crate::cache::DropdownCache;
use crate::error::Result;
use crate::resolver::{IdentifierOrigin, ResolveOutcome, ResolveTicket, ResolvedIdentifier};

/// What a single write changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<L: Level> {
    /// The level that was written.
    pub level: L,
    /// The value now held at `level`; `None` if it was cleared.
    pub value: Option<SelectionValue>,
    /// Deeper levels that lost their value.
    pub cleared: usize,
    /// The level below `level`, if any.
    pub next: Option<L>,
    /// Options offered at `next` under the new path.
    pub options: Vec<String>,
    /// Present when the write completed the path.
    pub ticket: Option<ResolveTicket<L>>,
}

/// How the machine handled a resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The identifier now belongs to the current path.
    Adopted(ResolvedIdentifier),
    /// Resolution failed; the identifier stays unset.
    Unresolved,
    /// The same path is still being resolved elsewhere.
    InFlight,
    /// The path or generation moved on; the outcome was dropped.
    Stale,
}

/// Current path through one hierarchy.
#[derive(Debug)]
pub struct SelectionMachine<L: Level> {
    cache: Arc<DropdownCache<L>>,
    path: SelectionPath<L>,
    identifier: Option<ResolvedIdentifier>,
    last_failure: Option<String>,
    generation: u64,
}

impl<L: Level> SelectionMachine<L> {
    /// Start with an empty path over `cache`.
    pub fn new(cache: Arc<DropdownCache<L>>) -> Self {
        Self {
            cache,
            path: SelectionPath::new(),
            identifier: None,
            last_failure: None,
            generation: 0,
        }
    }

    /// Write `input` at `level`.
    ///
    /// The input is matched against the options currently offered at
    /// `level`; a match is stored as [`SelectionValue::Suggested`] with the
    /// option's spelling, anything else as [`SelectionValue::Freeform`].
    /// Blank input clears the level. Either way every deeper level and the
    /// resolved identifier are emptied.
    ///
    /// # Errors
    ///
    /// [`assetry_core::Error::LevelLocked`] if an ancestor of `level` is
    /// empty. The machine is left untouched.
    pub fn set_value(&mut self, level: L, input: &str) -> Result<Transition<L>> {
        let value = SelectionValue::classify(input, self.cache.options_for(level, &self.path));
        let cleared = self.path.set(level, value.clone())?;

        self.identifier = None;
        self.last_failure = None;
        self.generation += 1;

        log::debug!(
            "{} {level} = {:?} (gen {}, cleared {cleared})",
            L::HIERARCHY,
            value.as_ref().map(SelectionValue::as_str),
            self.generation
        );

        let next = level.next();
        let options = next
            .map(|next| self.cache.options_for(next, &self.path).to_vec())
            .unwrap_or_default();

        Ok(Transition {
            level,
            value,
            cleared,
            next,
            options,
            ticket: self.pending_ticket(),
        })
    }

    /// Replace the whole path at once, as when editing a stored record.
    ///
    /// Values are classified level by level against the options under the
    /// values before them; values missing from the master data are kept as
    /// [`SelectionValue::Freeform`]. Filling stops at the first blank value.
    /// A non-blank `identifier` is adopted as
    /// [`IdentifierOrigin::Prefilled`] when the path is complete.
    ///
    /// The generation is bumped exactly once. Returns a ticket when the path
    /// is complete but no identifier was supplied.
    pub fn prefill<I, V>(&mut self, values: I, identifier: Option<&str>) -> Option<ResolveTicket<L>>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        let mut path = SelectionPath::new();
        for (level, input) in L::ALL.iter().copied().zip(values) {
            let Some(value) =
                SelectionValue::classify(input.as_ref(), self.cache.options_for(level, &path))
            else {
                break;
            };
            if path.set(level, Some(value)).is_err() {
                break;
            }
        }

        self.identifier = identifier
            .map(str::trim)
            .filter(|id| !id.is_empty() && path.is_complete())
            .map(|id| ResolvedIdentifier::new(id, IdentifierOrigin::Prefilled));
        self.path = path;
        self.last_failure = None;
        self.generation += 1;

        log::debug!(
            "{} prefilled '{}' (gen {}, identifier {:?})",
            L::HIERARCHY,
            self.path,
            self.generation,
            self.identifier.as_ref().map(|id| id.value.as_str())
        );

        self.pending_ticket()
    }

    /// Empty the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.identifier = None;
        self.last_failure = None;
        self.generation += 1;
    }

    /// Apply a resolution outcome if it still matches the current state.
    ///
    /// An identifier depends only on the path, so a resolved outcome for the
    /// current path is adopted even if the generation moved on since its
    /// ticket was issued, as long as the path is still unresolved. This
    /// covers re-selecting a path while its first resolution is in flight.
    pub fn apply(&mut self, outcome: ResolveOutcome<L>) -> Applied {
        if let ResolveOutcome::Resolved { ticket, identifier } = &outcome
            && !self.is_current(ticket)
            && ticket.path == self.path
            && self.identifier.is_none()
        {
            log::debug!(
                "adopting {} identifier for '{}' from gen {} at gen {}",
                L::HIERARCHY,
                ticket.path,
                ticket.generation,
                self.generation
            );
            self.identifier = Some(identifier.clone());
            self.last_failure = None;
            return Applied::Adopted(identifier.clone());
        }

        if !self.is_current(outcome.ticket()) {
            log::debug!(
                "dropping stale {} resolution for '{}' (gen {} != {})",
                L::HIERARCHY,
                outcome.ticket().path,
                outcome.ticket().generation,
                self.generation
            );
            return Applied::Stale;
        }

        match outcome {
            ResolveOutcome::Resolved { identifier, .. } => {
                self.identifier = Some(identifier.clone());
                self.last_failure = None;
                Applied::Adopted(identifier)
            }
            ResolveOutcome::Failed { error, .. } => {
                self.identifier = None;
                self.last_failure = Some(error.to_string());
                Applied::Unresolved
            }
            ResolveOutcome::AlreadyInFlight { .. } => Applied::InFlight,
        }
    }

    /// Returns `true` if `ticket` was issued for the current state.
    pub fn is_current(&self, ticket: &ResolveTicket<L>) -> bool {
        ticket.generation == self.generation && ticket.path == self.path
    }

    /// A ticket for the current path, when it is complete and unresolved.
    pub fn pending_ticket(&self) -> Option<ResolveTicket<L>> {
        (self.path.is_complete() && self.identifier.is_none()).then(|| ResolveTicket {
            generation: self.generation,
            path: self.path.clone(),
        })
    }

    /// Options offered at `level` under the current path.
    pub fn options_for(&self, level: L) -> &[String] {
        self.cache.options_for(level, &self.path)
    }

    /// The current path.
    pub fn path(&self) -> &SelectionPath<L> {
        &self.path
    }

    /// The identifier of the current path, once resolved.
    pub fn identifier(&self) -> Option<&ResolvedIdentifier> {
        self.identifier.as_ref()
    }

    /// Message of the last failed resolution for the current path.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    /// Number of writes so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The cache this machine reads options from.
    pub fn cache(&self) -> &Arc<DropdownCache<L>> {
        &self.cache
    }
}
