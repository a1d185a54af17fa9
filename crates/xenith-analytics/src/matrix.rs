//! Competitor matrix
//!
//! Cross product of target products and categories. Every product that
//! resolves to an id gets one cell per category, including cells with no
//! matching reviews. Products without an id are skipped entirely.
//!
//! Cell satisfaction is kept to one decimal place, unlike the whole-percent
//! rate on [`CategoryFeedback`](crate::CategoryFeedback).

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xenith_review::{CategoryType, ReviewStore, Sentiment, Taxonomy};

use crate::aggregate::SentimentTally;

/// Resolves a product name to its review id (ASIN)
pub trait ProductIdLookup {
    /// Id for `product`, if mapped
    fn resolve(&self, product: &str) -> Option<&str>;
}

impl<S: BuildHasher> ProductIdLookup for HashMap<String, String, S> {
    fn resolve(&self, product: &str) -> Option<&str> {
        self.get(product).map(String::as_str)
    }
}

impl<S: BuildHasher> ProductIdLookup for IndexMap<String, String, S> {
    fn resolve(&self, product: &str) -> Option<&str> {
        self.get(product).map(String::as_str)
    }
}

impl ProductIdLookup for BTreeMap<String, String> {
    fn resolve(&self, product: &str) -> Option<&str> {
        self.get(product).map(String::as_str)
    }
}

/// One (product, category) cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorMatrixCell {
    /// Product name as given in the target list
    pub product: String,
    /// Category label
    pub category: String,
    /// Taxonomy group of the category
    pub category_type: CategoryType,
    /// Reviews of this product in this category, neutral included
    pub mentions: usize,
    /// Percent positive among positive + negative, one decimal place
    pub satisfaction_rate: f64,
    /// Positive reviews
    pub positive_count: usize,
    /// Negative reviews
    pub negative_count: usize,
    /// Positive plus negative reviews
    pub total_reviews: usize,
}

/// Builds competitor matrices
#[derive(Debug, Clone)]
pub struct CompetitorMatrixBuilder<'a, L> {
    lookup: &'a L,
    taxonomy: Option<&'a Taxonomy>,
    categories: Option<Vec<String>>,
}

impl<'a, L: ProductIdLookup> CompetitorMatrixBuilder<'a, L> {
    /// Create builder over a product → id lookup
    #[inline]
    #[must_use]
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            taxonomy: None,
            categories: None,
        }
    }

    /// With taxonomy for cell category types
    #[inline]
    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: &'a Taxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Restrict to an explicit category list instead of the store's labels
    ///
    /// Categories absent from the store produce zero cells.
    #[must_use]
    pub fn with_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Build cells, product-major then category order
    #[must_use]
    pub fn build<S: AsRef<str>>(
        &self,
        target_products: &[S],
        store: &ReviewStore,
    ) -> Vec<CompetitorMatrixCell> {
        let categories: Vec<&str> = match &self.categories {
            Some(list) => list.iter().map(String::as_str).collect(),
            None => store.labels().collect(),
        };

        let mut cells = Vec::with_capacity(target_products.len() * categories.len());

        for product in target_products {
            let product = product.as_ref();
            let Some(product_id) = self.lookup.resolve(product) else {
                tracing::warn!("No id mapping for product '{}', skipping", product);
                continue;
            };

            for category in &categories {
                let tally = SentimentTally::from_reviews(
                    store
                        .get(category)
                        .iter()
                        .filter(|review| review.product_id() == product_id),
                );
                cells.push(self.cell(product, category, tally));
            }
        }

        tracing::debug!(
            "Built competitor matrix: {} cells over {} categories",
            cells.len(),
            categories.len()
        );
        cells
    }

    fn cell(&self, product: &str, category: &str, tally: SentimentTally) -> CompetitorMatrixCell {
        CompetitorMatrixCell {
            product: product.to_string(),
            category: category.to_string(),
            category_type: self
                .taxonomy
                .map_or_else(CategoryType::default, |t| t.category_type(category)),
            mentions: tally.total(),
            satisfaction_rate: tally.satisfaction_percent_tenths(),
            positive_count: tally.positive,
            negative_count: tally.negative,
            total_reviews: tally.rated(),
        }
    }
}

/// Build a competitor matrix over every category in `store`
#[must_use]
pub fn build_competitor_matrix<S: AsRef<str>, L: ProductIdLookup>(
    target_products: &[S],
    id_lookup: &L,
    store: &ReviewStore,
) -> Vec<CompetitorMatrixCell> {
    CompetitorMatrixBuilder::new(id_lookup).build(target_products, store)
}

/// Best-rated cell per category, in first-seen category order
///
/// Only cells with at least one positive or negative review compete; ties
/// go to the product listed first.
#[must_use]
pub fn category_leaders(cells: &[CompetitorMatrixCell]) -> Vec<&CompetitorMatrixCell> {
    let mut leaders: IndexMap<&str, &CompetitorMatrixCell> = IndexMap::new();
    for cell in cells.iter().filter(|c| c.total_reviews > 0) {
        leaders
            .entry(cell.category.as_str())
            .and_modify(|best| {
                if cell.satisfaction_rate > best.satisfaction_rate {
                    *best = cell;
                }
            })
            .or_insert(cell);
    }
    leaders.into_values().collect()
}

/// Count of cells for `sentiment` across the matrix
#[must_use]
pub fn total_for(cells: &[CompetitorMatrixCell], sentiment: Sentiment) -> usize {
    cells
        .iter()
        .map(|c| match sentiment {
            Sentiment::Positive => c.positive_count,
            Sentiment::Negative => c.negative_count,
            Sentiment::Neutral => c.mentions - c.total_reviews,
        })
        .sum()
}
