//! Headline figures shown alongside the category and use-case rankings

use serde::{Deserialize, Serialize};

use crate::aggregate::{CategoryFeedback, UseCaseFeedback};

/// Negative count at which a category counts as a critical issue
pub const DEFAULT_CRITICAL_NEGATIVE: usize = 30;

/// Satisfaction at which a use case counts as well served
pub const DEFAULT_HIGH_SATISFACTION: u32 = 65;

/// Summary over ranked categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    /// Categories summarized
    pub total_categories: usize,
    /// Mean negative rate, rounded
    pub average_negative_rate: u32,
    /// Sum of negative counts
    pub total_negative: usize,
    /// Categories at or above the critical threshold
    pub critical_issues: usize,
}

impl CategorySummary {
    /// Summarize `data`
    #[must_use]
    pub fn from_feedback(data: &[CategoryFeedback], critical_threshold: usize) -> Self {
        Self {
            total_categories: data.len(),
            average_negative_rate: rounded_mean(data.iter().map(|f| u64::from(f.negative_rate)), data.len()),
            total_negative: data.iter().map(|f| f.negative_count).sum(),
            critical_issues: data
                .iter()
                .filter(|f| f.negative_count >= critical_threshold)
                .count(),
        }
    }
}

/// Summary over ranked use cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseSummary {
    /// Use cases summarized
    pub total_use_cases: usize,
    /// Mean satisfaction rate, rounded
    pub average_satisfaction: u32,
    /// Sum of mentions
    pub total_mentions: usize,
    /// Use cases at or above the high-satisfaction threshold
    pub high_satisfaction: usize,
}

impl UseCaseSummary {
    /// Summarize `data`
    #[must_use]
    pub fn from_feedback(data: &[UseCaseFeedback], high_threshold: u32) -> Self {
        Self {
            total_use_cases: data.len(),
            average_satisfaction: rounded_mean(
                data.iter().map(|f| u64::from(f.satisfaction_rate)),
                data.len(),
            ),
            total_mentions: data.iter().map(|f| f.total_mentions).sum(),
            high_satisfaction: data
                .iter()
                .filter(|f| f.satisfaction_rate >= high_threshold)
                .count(),
        }
    }
}

fn rounded_mean(values: impl Iterator<Item = u64>, len: usize) -> u32 {
    if len == 0 {
        return 0;
    }
    let sum: u64 = values.sum();
    let len = len as u64;
    ((2 * sum + len) / (2 * len)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SentimentTally;
    use xenith_review::CategoryType;

    fn category(negative: usize, positive: usize) -> CategoryFeedback {
        CategoryFeedback::from_tally(
            "c",
            CategoryType::Physical,
            SentimentTally {
                positive,
                negative,
                neutral: 0,
            },
        )
    }

    #[test]
    fn empty_summary_is_zero() {
        assert_eq!(CategorySummary::from_feedback(&[], 30), CategorySummary::default());
        assert_eq!(UseCaseSummary::from_feedback(&[], 65), UseCaseSummary::default());
    }

    #[test]
    fn category_summary() {
        // negative rates: 75, 50
        let data = [category(30, 10), category(5, 5)];
        let summary = CategorySummary::from_feedback(&data, DEFAULT_CRITICAL_NEGATIVE);
        assert_eq!(summary.total_categories, 2);
        assert_eq!(summary.average_negative_rate, 63);
        assert_eq!(summary.total_negative, 35);
        assert_eq!(summary.critical_issues, 1);
    }
}
