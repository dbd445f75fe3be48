//! Selection values and the cascading selection path.
//!
//! A [`SelectionPath`] holds one slot per level of a hierarchy. Writes go
//! through [`SelectionPath::set`], which enforces the cascade rule: changing
//! a slot empties every deeper slot in the same update.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::key::CompositeKey;
use crate::level::Level;
use crate::util::values::{clean_input, find_option};

// ============================================================================
// SelectionValue
// ============================================================================

/// A value chosen at one level.
///
/// Every level accepts typed text as well as suggestions, so the two are
/// kept apart instead of being flattened into one string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SelectionValue {
    /// One of the options offered by the master data.
    Suggested(String),
    /// Text that is not (or no longer) among the offered options.
    Freeform(String),
}

impl SelectionValue {
    /// Classify raw input against the options offered at its level.
    ///
    /// Returns `None` for blank input. Input matching an option (ignoring
    /// case and spacing) becomes `Suggested` with the option's spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetry_core::SelectionValue;
    ///
    /// let options = vec!["Sungrow".to_string()];
    /// assert_eq!(
    ///     SelectionValue::classify("sungrow", &options),
    ///     Some(SelectionValue::Suggested("Sungrow".into()))
    /// );
    /// assert_eq!(
    ///     SelectionValue::classify(" Acme ", &options),
    ///     Some(SelectionValue::Freeform("Acme".into()))
    /// );
    /// assert_eq!(SelectionValue::classify("  ", &options), None);
    /// ```
    pub fn classify(input: &str, options: &[String]) -> Option<Self> {
        let input = clean_input(input)?;
        Some(match find_option(input, options) {
            Some(option) => Self::Suggested(option.to_string()),
            None => Self::Freeform(input.to_string()),
        })
    }

    /// Returns the value text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Suggested(v) | Self::Freeform(v) => v,
        }
    }

    /// Returns `true` if the value came from the option list.
    pub fn is_suggested(&self) -> bool {
        matches!(self, Self::Suggested(_))
    }

    /// Converts into the value text.
    pub fn into_string(self) -> String {
        match self {
            Self::Suggested(v) | Self::Freeform(v) => v,
        }
    }
}

impl fmt::Display for SelectionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SelectionPath
// ============================================================================

/// The user's current path through a hierarchy, one slot per level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectionPath<L: Level> {
    slots: Vec<Option<SelectionValue>>,
    _hierarchy: PhantomData<L>,
}

impl<L: Level> SelectionPath<L> {
    /// Create an empty path.
    pub fn new() -> Self {
        Self {
            slots: vec![None; L::depth()],
            _hierarchy: PhantomData,
        }
    }

    /// Build a path from values given root first, all at once.
    ///
    /// Extra values are ignored. Filling stops at the first empty value,
    /// since a slot below a gap has no meaning.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<SelectionValue>>,
    {
        let mut path = Self::new();
        for (slot, value) in path.slots.iter_mut().zip(values) {
            match value {
                Some(value) => *slot = Some(value),
                None => break,
            }
        }
        path
    }

    /// The value at `level`, if any.
    pub fn get(&self, level: L) -> Option<&SelectionValue> {
        self.slots.get(level.index()).and_then(Option::as_ref)
    }

    /// The value text at `level`, if any.
    pub fn value(&self, level: L) -> Option<&str> {
        self.get(level).map(SelectionValue::as_str)
    }

    /// Write `value` at `level` and empty every deeper slot.
    ///
    /// `None` clears the slot itself as well. Returns how many deeper slots
    /// held a value before the write.
    ///
    /// # Errors
    ///
    /// [`Error::LevelLocked`] if an ancestor of `level` is empty.
    pub fn set(&mut self, level: L, value: Option<SelectionValue>) -> Result<usize> {
        if let Some(missing) = self.first_missing_before(level) {
            return Err(Error::LevelLocked {
                hierarchy: L::HIERARCHY,
                level: level.label(),
                missing: missing.label(),
            });
        }

        let index = level.index();
        let cleared = self.slots[index + 1..]
            .iter()
            .filter(|slot| slot.is_some())
            .count();
        self.slots[index] = value;
        for slot in &mut self.slots[index + 1..] {
            *slot = None;
        }
        Ok(cleared)
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Returns `true` when every ancestor of `level` holds a value.
    pub fn is_reachable(&self, level: L) -> bool {
        self.first_missing_before(level).is_none()
    }

    /// The first level without a value.
    pub fn first_missing(&self) -> Option<L> {
        L::ALL.iter().copied().find(|level| self.get(*level).is_none())
    }

    /// Returns `true` when every level holds a value.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Returns `true` when no level holds a value.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of filled slots from the root down.
    pub fn filled_depth(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_some()).count()
    }

    /// The composite key addressing the options of `level`.
    ///
    /// `None` while any level in the key scope is empty.
    pub fn key_for(&self, level: L) -> Option<CompositeKey> {
        self.key_over(level.key_scope())
    }

    /// The composite key addressing the identifier of this path.
    pub fn identifier_key(&self) -> Option<CompositeKey> {
        self.key_over(L::identifier_scope())
    }

    /// Iterate over `(level, value)` pairs, root first.
    pub fn iter(&self) -> impl Iterator<Item = (L, Option<&SelectionValue>)> {
        L::ALL
            .iter()
            .copied()
            .zip(self.slots.iter().map(Option::as_ref))
    }

    /// Value texts root first, with empty strings for empty slots.
    pub fn to_strings(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .map(|v| v.as_str().to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    fn key_over(&self, scope: &[L]) -> Option<CompositeKey> {
        let parts = scope
            .iter()
            .map(|level| self.value(*level))
            .collect::<Option<Vec<&str>>>()?;
        Some(CompositeKey::from_parts(parts))
    }

    fn first_missing_before(&self, level: L) -> Option<L> {
        level
            .ancestors()
            .iter()
            .copied()
            .find(|ancestor| self.get(*ancestor).is_none())
    }
}

impl<L: Level> Default for SelectionPath<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Level> fmt::Display for SelectionPath<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled: Vec<&str> = self
            .slots
            .iter()
            .map_while(Option::as_ref)
            .map(SelectionValue::as_str)
            .collect();
        if filled.is_empty() {
            return f.write_str("(empty)");
        }
        f.write_str(&filled.join(" > "))
    }
}
