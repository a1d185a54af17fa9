//! Category taxonomy
//!
//! Static lookup table from category/use-case label to its [`CategoryType`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Broad grouping of a category label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryType {
    /// Hardware, wiring and build issues
    #[default]
    #[serde(alias = "physical")]
    Physical,
    /// Dimming, latency and connectivity behaviour
    #[serde(alias = "performance")]
    Performance,
    /// Companion app and integrations
    #[serde(alias = "software")]
    Software,
    /// Value, setup and day-to-day experience
    #[serde(alias = "experience")]
    Experience,
}

impl CategoryType {
    /// Display name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Performance => "Performance",
            Self::Software => "Software",
            Self::Experience => "Experience",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label → category type lookup
///
/// Labels without an entry resolve to [`CategoryType::Physical`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy {
    types: IndexMap<String, CategoryType>,
}

impl Taxonomy {
    /// Create empty taxonomy
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an entry
    #[inline]
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, category_type: CategoryType) -> Self {
        self.insert(label, category_type);
        self
    }

    /// Insert or replace an entry
    pub fn insert(&mut self, label: impl Into<String>, category_type: CategoryType) {
        self.types.insert(label.into(), category_type);
    }

    /// Resolve the type for a label
    #[inline]
    #[must_use]
    pub fn category_type(&self, label: &str) -> CategoryType {
        self.types.get(label).copied().unwrap_or_default()
    }

    /// Number of explicit entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// No explicit entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, CategoryType)> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = (S, CategoryType)>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
