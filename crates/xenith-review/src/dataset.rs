//! Review datasets
//!
//! A dataset bundles, per [`ProductType`], a category store and a use-case
//! store over the same review pool, together with the category taxonomy and
//! the product catalogue.
//!
//! # Format
//!
//! ```json
//! {
//!   "taxonomy": { "Installation": "Physical" },
//!   "corpora": {
//!     "dimmer": {
//!       "categories": { "Installation": [ { "productId": "...", "sentiment": "negative", ... } ] },
//!       "useCases":   { "Setup & Pairing": [ ... ] }
//!     }
//!   },
//!   "products": [ ... ]
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::catalog::Product;
use crate::error::DatasetError;
use crate::store::{LoadReport, ReviewStore};
use crate::taxonomy::Taxonomy;

const BUILTIN_DATASET: &str = include_str!("../data/builtin.json");

static BUILTIN: OnceCell<ReviewDataset> = OnceCell::new();

/// Product line a corpus belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Dimmer switches
    #[default]
    Dimmer,
    /// Light (on/off) switches
    Light,
}

impl ProductType {
    /// Lowercase wire name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dimmer => "dimmer",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dimmer" | "dimmers" => Ok(Self::Dimmer),
            "light" | "switch" | "switches" => Ok(Self::Light),
            other => Err(format!("unknown product type: '{other}'")),
        }
    }
}

/// Category and use-case stores for one product line
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCorpus {
    /// Reviews grouped by category
    pub categories: ReviewStore,
    /// Reviews grouped by use case
    pub use_cases: ReviewStore,
}

impl ReviewCorpus {
    /// Create corpus from its two stores
    #[inline]
    #[must_use]
    pub fn new(categories: ReviewStore, use_cases: ReviewStore) -> Self {
        Self {
            categories,
            use_cases,
        }
    }
}

/// Loaded review dataset
#[derive(Debug, Clone, Default)]
pub struct ReviewDataset {
    taxonomy: Taxonomy,
    corpora: IndexMap<ProductType, ReviewCorpus>,
    products: Vec<Product>,
    report: LoadReport,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DatasetFile {
    #[serde(default)]
    taxonomy: Taxonomy,
    #[serde(default)]
    corpora: IndexMap<String, CorpusFile>,
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorpusFile {
    #[serde(default)]
    categories: IndexMap<String, JsonValue>,
    #[serde(default)]
    use_cases: IndexMap<String, JsonValue>,
}

impl ReviewDataset {
    /// Create dataset from parts
    #[must_use]
    pub fn new(taxonomy: Taxonomy, products: Vec<Product>) -> Self {
        Self {
            taxonomy,
            products,
            ..Self::default()
        }
    }

    /// With a corpus for `product_type`
    #[must_use]
    pub fn with_corpus(mut self, product_type: ProductType, corpus: ReviewCorpus) -> Self {
        self.corpora.insert(product_type, corpus);
        self
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if the document is not valid JSON or does not have the
    /// dataset shape. Individual malformed reviews are not errors.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let value: JsonValue = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or does not have the dataset shape
    pub fn from_yaml(yaml: &str) -> Result<Self, DatasetError> {
        let value: JsonValue = serde_yaml::from_str(yaml)?;
        Self::from_value(value)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns error on IO failure, unknown extension or invalid content
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content =
            std::fs::read_to_string(path).map_err(|e| DatasetError::io_error(path, e))?;

        let dataset = match ext.as_str() {
            "json" => Self::from_json(&content)?,
            "yaml" | "yml" => Self::from_yaml(&content)?,
            _ => return Err(DatasetError::UnsupportedFormat(ext)),
        };

        tracing::info!(
            "Loaded dataset {}: {} reviews accepted, {} rejected",
            path.display(),
            dataset.report.accepted,
            dataset.report.rejected()
        );
        Ok(dataset)
    }

    /// Built-in sample dataset, parsed once per process
    ///
    /// # Errors
    /// Returns error if the embedded dataset fails to parse
    pub fn builtin() -> Result<&'static Self, DatasetError> {
        BUILTIN.get_or_try_init(|| Self::from_json(BUILTIN_DATASET))
    }

    fn from_value(value: JsonValue) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_value(value)?;
        let mut dataset = Self::new(file.taxonomy, file.products);

        for (name, corpus) in file.corpora {
            let product_type = match name.parse::<ProductType>() {
                Ok(pt) => pt,
                Err(e) => {
                    tracing::warn!("Skipping corpus: {}", e);
                    continue;
                }
            };

            let (categories, cat_report) = ReviewStore::from_raw(corpus.categories);
            let (use_cases, uc_report) = ReviewStore::from_raw(corpus.use_cases);
            dataset.report.merge(cat_report);
            dataset.report.merge(uc_report);

            tracing::debug!(
                "Corpus {}: {} categories, {} use cases",
                product_type,
                categories.len(),
                use_cases.len()
            );
            dataset
                .corpora
                .insert(product_type, ReviewCorpus::new(categories, use_cases));
        }

        Ok(dataset)
    }

    /// Corpus for a product line
    #[inline]
    #[must_use]
    pub fn corpus(&self, product_type: ProductType) -> Option<&ReviewCorpus> {
        self.corpora.get(&product_type)
    }

    /// Product lines present, in file order
    pub fn product_types(&self) -> impl Iterator<Item = ProductType> + '_ {
        self.corpora.keys().copied()
    }

    /// Category taxonomy
    #[inline]
    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Product catalogue
    #[inline]
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Validation outcome of the load
    #[inline]
    #[must_use]
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }
}
