//! Composite keys into dropdown data.
//!
//! The masters API indexes every non-root option list by the values of the
//! relevant ancestors joined with [`DELIMITER`], e.g. `"Electrical|Inverter"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between ancestor values in a composite key.
pub const DELIMITER: char = '|';

/// Ancestor values joined by [`DELIMITER`].
///
/// The empty key addresses the root level, whose options have no ancestors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeKey(String);

impl CompositeKey {
    /// The key of the root level.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Join `parts` with the delimiter.
    ///
    /// # Examples
    ///
    /// ```
    /// use assetry_core::CompositeKey;
    ///
    /// let key = CompositeKey::from_parts(["Sungrow", "SG110CX"]);
    /// assert_eq!(key.as_str(), "Sungrow|SG110CX");
    /// ```
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut key = String::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                key.push(DELIMITER);
            }
            key.push_str(part.as_ref());
        }
        Self(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the root key.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The individual ancestor values.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.0.split(DELIMITER).filter(|_| !self.0.is_empty())
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CompositeKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CompositeKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CompositeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
