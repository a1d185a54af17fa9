//! Category and use-case ranking
//!
//! All rankings sort descending by the chosen metric with a stable sort, so
//! entries with equal keys keep store insertion order.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use xenith_review::ReviewStore;

use crate::aggregate::{Aggregator, CategoryFeedback, UseCaseFeedback};

/// Metrics shared by rankable feedback entries
pub trait FeedbackMetrics {
    /// Category or use-case label
    fn label(&self) -> &str;

    /// Negative reviews
    fn negative_count(&self) -> usize;

    /// All reviews
    fn total_mentions(&self) -> usize;

    /// Integer satisfaction percent
    fn satisfaction_rate(&self) -> u32;
}

impl FeedbackMetrics for CategoryFeedback {
    fn label(&self) -> &str {
        &self.category
    }

    fn negative_count(&self) -> usize {
        self.negative_count
    }

    fn total_mentions(&self) -> usize {
        self.total_mentions
    }

    fn satisfaction_rate(&self) -> u32 {
        self.satisfaction_rate
    }
}

impl FeedbackMetrics for UseCaseFeedback {
    fn label(&self) -> &str {
        &self.use_case
    }

    fn negative_count(&self) -> usize {
        self.negative_count
    }

    fn total_mentions(&self) -> usize {
        self.total_mentions
    }

    fn satisfaction_rate(&self) -> u32 {
        self.satisfaction_rate
    }
}

/// Ranking key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankMetric {
    /// Most negative reviews first
    #[default]
    NegativeCount,
    /// Most mentions first
    TotalMentions,
    /// Highest satisfaction first
    SatisfactionRate,
}

impl RankMetric {
    /// Sort key for an entry
    #[inline]
    #[must_use]
    pub fn key<F: FeedbackMetrics>(self, entry: &F) -> u64 {
        match self {
            Self::NegativeCount => entry.negative_count() as u64,
            Self::TotalMentions => entry.total_mentions() as u64,
            Self::SatisfactionRate => u64::from(entry.satisfaction_rate()),
        }
    }
}

/// Sort `entries` descending by `metric` and keep the first `n`
///
/// `n == 0` yields an empty list; fewer than `n` entries are all returned.
#[must_use]
pub fn rank<F: FeedbackMetrics>(mut entries: Vec<F>, metric: RankMetric, n: usize) -> Vec<F> {
    if n == 0 {
        return Vec::new();
    }
    // sort_by_key is stable: ties keep insertion order
    entries.sort_by_key(|entry| Reverse(metric.key(entry)));
    entries.truncate(n);
    entries
}

impl Aggregator<'_> {
    /// Top `n` categories of `store` by `metric`
    #[must_use]
    pub fn top_categories(
        &self,
        store: &ReviewStore,
        metric: RankMetric,
        n: usize,
    ) -> Vec<CategoryFeedback> {
        let ranked = rank(self.categories(store), metric, n);
        tracing::debug!(
            "Ranked {} of {} categories by {:?}",
            ranked.len(),
            store.len(),
            metric
        );
        ranked
    }

    /// Top `n` use cases of `store` by `metric`
    #[must_use]
    pub fn top_use_cases(
        &self,
        store: &ReviewStore,
        metric: RankMetric,
        n: usize,
    ) -> Vec<UseCaseFeedback> {
        let ranked = rank(self.use_cases(store), metric, n);
        tracing::debug!(
            "Ranked {} of {} use cases by {:?}",
            ranked.len(),
            store.len(),
            metric
        );
        ranked
    }
}

/// Top `n` categories by negative review count
#[must_use]
pub fn top_categories_by_negative(store: &ReviewStore, n: usize) -> Vec<CategoryFeedback> {
    Aggregator::new().top_categories(store, RankMetric::NegativeCount, n)
}

/// Top `n` use cases by mention count
#[must_use]
pub fn top_use_cases(store: &ReviewStore, n: usize) -> Vec<UseCaseFeedback> {
    Aggregator::new().top_use_cases(store, RankMetric::TotalMentions, n)
}
