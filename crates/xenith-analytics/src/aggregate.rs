//! Sentiment aggregation
//!
//! Reduces a list of reviews to sentiment counts and rates. Aggregation is a
//! pure function of its input; an empty list yields all-zero metrics.

use serde::{Deserialize, Serialize};
use xenith_review::{CategoryType, ReviewRecord, ReviewStore, Sentiment, Taxonomy};

/// Use-case labels longer than this are shortened for display
pub const DISPLAY_NAME_LIMIT: usize = 15;

/// Sentiment counts over a set of reviews
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentTally {
    /// Positive reviews
    pub positive: usize,
    /// Negative reviews
    pub negative: usize,
    /// Neutral reviews
    pub neutral: usize,
}

impl SentimentTally {
    /// Count sentiments over `reviews`
    #[must_use]
    pub fn from_reviews<'a>(reviews: impl IntoIterator<Item = &'a ReviewRecord>) -> Self {
        let mut tally = Self::default();
        for review in reviews {
            tally.record(review.sentiment());
        }
        tally
    }

    /// Count one review
    #[inline]
    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    /// All reviews counted
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Positive plus negative; the satisfaction denominator
    #[inline]
    #[must_use]
    pub fn rated(&self) -> usize {
        self.positive + self.negative
    }

    /// Positive share of rated reviews as a whole percent, rounded half up
    #[inline]
    #[must_use]
    pub fn satisfaction_percent(&self) -> u32 {
        percent_half_up(self.positive, self.rated())
    }

    /// Positive share of rated reviews as a percent with one decimal place
    #[inline]
    #[must_use]
    pub fn satisfaction_percent_tenths(&self) -> f64 {
        percent_tenths_half_up(self.positive, self.rated())
    }

    /// Negative share of all reviews as a whole percent, rounded half up
    #[inline]
    #[must_use]
    pub fn negative_percent(&self) -> u32 {
        percent_half_up(self.negative, self.total())
    }
}

/// `round(num / den * 100)`, zero when `den == 0`
fn percent_half_up(num: usize, den: usize) -> u32 {
    if den == 0 {
        return 0;
    }
    let (num, den) = (num as u64, den as u64);
    ((200 * num + den) / (2 * den)) as u32
}

/// `round(num / den * 1000) / 10`, zero when `den == 0`
fn percent_tenths_half_up(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0;
    }
    let (num, den) = (num as u64, den as u64);
    let tenths = (2000 * num + den) / (2 * den);
    tenths as f64 / 10.0
}

/// Aggregated feedback for one category
///
/// Invariant: `positive_count + negative_count + neutral_count == total_mentions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFeedback {
    /// Category label
    pub category: String,
    /// Taxonomy group
    pub category_type: CategoryType,
    /// All reviews under the label
    pub total_mentions: usize,
    /// Positive reviews
    pub positive_count: usize,
    /// Negative reviews
    pub negative_count: usize,
    /// Neutral reviews
    pub neutral_count: usize,
    /// Integer percent of positive among positive + negative
    pub satisfaction_rate: u32,
    /// Integer percent of negative among all mentions
    pub negative_rate: u32,
}

impl CategoryFeedback {
    /// Build from a tally
    #[must_use]
    pub fn from_tally(
        category: impl Into<String>,
        category_type: CategoryType,
        tally: SentimentTally,
    ) -> Self {
        Self {
            category: category.into(),
            category_type,
            total_mentions: tally.total(),
            positive_count: tally.positive,
            negative_count: tally.negative,
            neutral_count: tally.neutral,
            satisfaction_rate: tally.satisfaction_percent(),
            negative_rate: tally.negative_percent(),
        }
    }
}

/// Aggregated feedback for one use case
///
/// Same metrics as [`CategoryFeedback`], keyed by use-case label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseFeedback {
    /// Use-case label
    pub use_case: String,
    /// Label shortened for chart axes
    pub display_name: String,
    /// Taxonomy group
    pub category_type: CategoryType,
    /// All reviews under the label
    pub total_mentions: usize,
    /// Positive reviews
    pub positive_count: usize,
    /// Negative reviews
    pub negative_count: usize,
    /// Neutral reviews
    pub neutral_count: usize,
    /// Integer percent of positive among positive + negative
    pub satisfaction_rate: u32,
    /// Integer percent of negative among all mentions
    pub negative_rate: u32,
}

impl UseCaseFeedback {
    /// Build from a tally
    #[must_use]
    pub fn from_tally(
        use_case: impl Into<String>,
        category_type: CategoryType,
        tally: SentimentTally,
    ) -> Self {
        let use_case = use_case.into();
        Self {
            display_name: display_name(&use_case),
            use_case,
            category_type,
            total_mentions: tally.total(),
            positive_count: tally.positive,
            negative_count: tally.negative,
            neutral_count: tally.neutral,
            satisfaction_rate: tally.satisfaction_percent(),
            negative_rate: tally.negative_percent(),
        }
    }
}

/// Shorten a label to [`DISPLAY_NAME_LIMIT`] characters plus `...`
#[must_use]
pub fn display_name(label: &str) -> String {
    if label.chars().count() > DISPLAY_NAME_LIMIT {
        let short: String = label.chars().take(DISPLAY_NAME_LIMIT).collect();
        format!("{short}...")
    } else {
        label.to_string()
    }
}

/// Aggregates reviews, resolving category types through an optional taxonomy
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator<'a> {
    taxonomy: Option<&'a Taxonomy>,
}

impl<'a> Aggregator<'a> {
    /// Aggregator without a taxonomy; every label is [`CategoryType::Physical`]
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With taxonomy
    #[inline]
    #[must_use]
    pub fn with_taxonomy(mut self, taxonomy: &'a Taxonomy) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Resolve a label's category type
    #[inline]
    #[must_use]
    pub fn category_type(&self, label: &str) -> CategoryType {
        self.taxonomy
            .map_or_else(CategoryType::default, |t| t.category_type(label))
    }

    /// Aggregate one category
    #[must_use]
    pub fn category(&self, label: &str, reviews: &[ReviewRecord]) -> CategoryFeedback {
        CategoryFeedback::from_tally(
            label,
            self.category_type(label),
            SentimentTally::from_reviews(reviews),
        )
    }

    /// Aggregate one use case
    #[must_use]
    pub fn use_case(&self, label: &str, reviews: &[ReviewRecord]) -> UseCaseFeedback {
        UseCaseFeedback::from_tally(
            label,
            self.category_type(label),
            SentimentTally::from_reviews(reviews),
        )
    }

    /// Aggregate every category in store order
    #[must_use]
    pub fn categories(&self, store: &ReviewStore) -> Vec<CategoryFeedback> {
        store
            .iter()
            .map(|(label, reviews)| self.category(label, reviews))
            .collect()
    }

    /// Aggregate every use case in store order
    #[must_use]
    pub fn use_cases(&self, store: &ReviewStore) -> Vec<UseCaseFeedback> {
        store
            .iter()
            .map(|(label, reviews)| self.use_case(label, reviews))
            .collect()
    }
}

/// Aggregate one category's reviews
#[must_use]
pub fn aggregate_category(label: &str, reviews: &[ReviewRecord]) -> CategoryFeedback {
    Aggregator::new().category(label, reviews)
}

/// Aggregate one use case's reviews
#[must_use]
pub fn aggregate_use_case(label: &str, reviews: &[ReviewRecord]) -> UseCaseFeedback {
    Aggregator::new().use_case(label, reviews)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reviews(pos: usize, neg: usize, neu: usize) -> Vec<ReviewRecord> {
        let mut out = Vec::new();
        out.extend((0..pos).map(|_| ReviewRecord::new("p", "c", Sentiment::Positive)));
        out.extend((0..neg).map(|_| ReviewRecord::new("p", "c", Sentiment::Negative)));
        out.extend((0..neu).map(|_| ReviewRecord::new("p", "c", Sentiment::Neutral)));
        out
    }

    #[test]
    fn empty_input_is_all_zero() {
        let feedback = aggregate_category("Installation", &[]);
        assert_eq!(feedback.total_mentions, 0);
        assert_eq!(feedback.satisfaction_rate, 0);
        assert_eq!(feedback.negative_rate, 0);
    }

    #[test]
    fn satisfaction_rounds_half_up() {
        let feedback = aggregate_category("Installation", &reviews(3, 5, 0));
        assert_eq!(feedback.satisfaction_rate, 38);
        assert_eq!(feedback.negative_rate, 63);
    }

    #[test]
    fn neutral_excluded_from_satisfaction() {
        let feedback = aggregate_category("App", &reviews(1, 1, 8));
        assert_eq!(feedback.total_mentions, 10);
        assert_eq!(feedback.satisfaction_rate, 50);
        assert_eq!(feedback.negative_rate, 10);
    }

    #[test]
    fn only_neutral_has_zero_satisfaction() {
        let feedback = aggregate_category("App", &reviews(0, 0, 4));
        assert_eq!(feedback.satisfaction_rate, 0);
    }

    #[test]
    fn tenths_precision() {
        let tally = SentimentTally {
            positive: 2,
            negative: 1,
            neutral: 0,
        };
        assert!((tally.satisfaction_percent_tenths() - 66.7).abs() < 1e-9);
        assert_eq!(tally.satisfaction_percent(), 67);
    }

    #[test]
    fn display_name_truncates_long_labels() {
        assert_eq!(display_name("Scheduling"), "Scheduling");
        assert_eq!(display_name("Whole-Home Lighting Control"), "Whole-Home Ligh...");
        assert_eq!(display_name("Exactly fifteen"), "Exactly fifteen");
    }

    #[test]
    fn taxonomy_resolves_type() {
        let taxonomy = Taxonomy::new().with("App", CategoryType::Software);
        let aggregator = Aggregator::new().with_taxonomy(&taxonomy);
        assert_eq!(aggregator.category("App", &[]).category_type, CategoryType::Software);
        assert_eq!(aggregator.use_case("Other", &[]).category_type, CategoryType::Physical);
    }
}
