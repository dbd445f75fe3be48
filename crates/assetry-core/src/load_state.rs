//! Dropdown load state.
//!
//! A dropdown cache is only handed out once its single fetch has finished,
//! so the state is either [`LoadState::Ready`] or [`LoadState::Degraded`].
//!
//! ```rust
//! use assetry_core::LoadState;
//!
//! let state = LoadState::Degraded("HTTP 500".into());
//! assert!(!state.is_ready());
//! assert_eq!(state.to_string(), "degraded: HTTP 500");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of loading a dropdown cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum LoadState {
    /// Data is available.
    Ready,
    /// The fetch failed; the cache holds empty data.
    Degraded(String),
}

impl LoadState {
    /// Returns `true` when the fetch succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The failure that degraded the cache, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready => None,
            Self::Degraded(reason) => Some(reason),
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => write!(f, "ready"),
            Self::Degraded(reason) => write!(f, "degraded: {reason}"),
        }
    }
}
