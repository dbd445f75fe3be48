//! Hierarchy levels.
//!
//! A hierarchy is a fixed, ordered chain of levels. The valid values at a
//! level depend on the values chosen for (some of) its ancestors; which
//! ancestors take part is the level's *key scope*.
//!
//! Two hierarchies are defined here:
//!
//! - [`AssetLevel`]: Category → SubCategory → AssetGroup → AssetType → Make → Model
//! - [`LocationLevel`]: Country → State → City → Unit → Name
//!
//! # Example
//!
//! ```
//! use assetry_core::{AssetLevel, Level};
//!
//! assert_eq!(AssetLevel::root(), AssetLevel::Category);
//! assert_eq!(AssetLevel::Make.next(), Some(AssetLevel::Model));
//! assert_eq!(AssetLevel::Model.key_scope(), &[AssetLevel::Make]);
//! assert_eq!(AssetLevel::from_name("sub-category").unwrap(), AssetLevel::SubCategory);
//! ```

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An ordered position in a fixed hierarchy.
pub trait Level:
    Copy + Eq + Hash + Ord + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Hierarchy name used in logs and errors ("asset", "location").
    const HIERARCHY: &'static str;

    /// Every level, root first.
    const ALL: &'static [Self];

    /// Zero-based position of this level.
    fn index(self) -> usize;

    /// Human-readable label ("Sub Category").
    fn label(self) -> &'static str;

    /// Wire/field name ("sub_category").
    fn field(self) -> &'static str;

    /// Ancestor levels whose values, in order, form the option key for this
    /// level. Empty for the root.
    fn key_scope(self) -> &'static [Self];

    /// Levels whose values key the identifier table of the hierarchy.
    fn identifier_scope() -> &'static [Self];

    /// The first level.
    fn root() -> Self {
        Self::ALL[0]
    }

    /// The last level.
    fn leaf() -> Self {
        Self::ALL[Self::ALL.len() - 1]
    }

    /// Number of levels in the hierarchy.
    fn depth() -> usize {
        Self::ALL.len()
    }

    /// Returns `true` for the last level.
    fn is_leaf(self) -> bool {
        self.index() + 1 == Self::ALL.len()
    }

    /// The level directly below this one.
    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The level directly above this one.
    fn parent(self) -> Option<Self> {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// Every level strictly below this one.
    fn deeper(self) -> &'static [Self] {
        &Self::ALL[self.index() + 1..]
    }

    /// Every level strictly above this one.
    fn ancestors(self) -> &'static [Self] {
        &Self::ALL[..self.index()]
    }

    /// Parse a level from its field name or label.
    ///
    /// Matching ignores case and treats spaces, hyphens, and underscores alike.
    fn from_name(name: &str) -> Result<Self> {
        let wanted = squash(name);
        Self::ALL
            .iter()
            .copied()
            .find(|level| squash(level.field()) == wanted || squash(level.label()) == wanted)
            .ok_or_else(|| Error::UnknownLevel {
                hierarchy: Self::HIERARCHY,
                name: name.to_string(),
            })
    }
}

fn squash(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// AssetLevel
// ============================================================================

/// Levels of the asset classification hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetLevel {
    /// Top-level category (e.g. "Electrical").
    Category,
    /// Sub-category within a category (e.g. "Inverter").
    SubCategory,
    /// Asset group (e.g. "String").
    AssetGroup,
    /// Asset type (e.g. "3-Phase").
    AssetType,
    /// Manufacturer.
    Make,
    /// Manufacturer model; the leaf.
    Model,
}

impl Level for AssetLevel {
    const HIERARCHY: &'static str = "asset";

    const ALL: &'static [Self] = &[
        Self::Category,
        Self::SubCategory,
        Self::AssetGroup,
        Self::AssetType,
        Self::Make,
        Self::Model,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::SubCategory => "Sub Category",
            Self::AssetGroup => "Asset Group",
            Self::AssetType => "Asset Type",
            Self::Make => "Make",
            Self::Model => "Model",
        }
    }

    fn field(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::SubCategory => "sub_category",
            Self::AssetGroup => "asset_group",
            Self::AssetType => "asset_type",
            Self::Make => "make",
            Self::Model => "model",
        }
    }

    // The masters API keys asset groups by the full category path but the
    // deeper levels only by their immediate parent.
    fn key_scope(self) -> &'static [Self] {
        match self {
            Self::Category => &[],
            Self::SubCategory => &[Self::Category],
            Self::AssetGroup => &[Self::Category, Self::SubCategory],
            Self::AssetType => &[Self::AssetGroup],
            Self::Make => &[Self::AssetType],
            Self::Model => &[Self::Make],
        }
    }

    fn identifier_scope() -> &'static [Self] {
        &[Self::Make, Self::Model]
    }
}

impl fmt::Display for AssetLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// LocationLevel
// ============================================================================

/// Levels of the geographic location hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationLevel {
    /// Country.
    Country,
    /// State or province.
    State,
    /// City.
    City,
    /// Plant or business unit.
    Unit,
    /// Named site; the leaf.
    Name,
}

impl Level for LocationLevel {
    const HIERARCHY: &'static str = "location";

    const ALL: &'static [Self] = &[
        Self::Country,
        Self::State,
        Self::City,
        Self::Unit,
        Self::Name,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn label(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::State => "State",
            Self::City => "City",
            Self::Unit => "Unit",
            Self::Name => "Location Name",
        }
    }

    fn field(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Unit => "unit",
            Self::Name => "name",
        }
    }

    fn key_scope(self) -> &'static [Self] {
        self.ancestors()
    }

    fn identifier_scope() -> &'static [Self] {
        Self::ALL
    }
}

impl fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
