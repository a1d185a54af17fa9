//! Plain-language insights derived from rankings and the competitor matrix

use std::fmt;

use serde::{Deserialize, Serialize};
use xenith_analytics::{category_leaders, CategoryFeedback, CompetitorMatrixCell, UseCaseFeedback};

/// What an insight is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    /// Category with the most negative mentions
    TopPainPoint,
    /// Number of categories over the critical threshold
    CriticalIssues,
    /// Use case with the lowest satisfaction
    WeakestUseCase,
    /// Best-rated competitor in a category
    CategoryLeader,
}

/// One insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Kind
    pub kind: InsightKind,
    /// Category, use case or product the insight is about
    pub subject: String,
    /// Rendered statement
    pub message: String,
}

impl Insight {
    fn new(kind: InsightKind, subject: impl Into<String>, message: String) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message,
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Derive insights
///
/// Inputs with nothing to say produce no insight: no categories means no
/// pain point, use cases without mentions are not considered, and only
/// categories with rated matrix cells get a leader.
#[must_use]
pub fn derive_insights(
    categories: &[CategoryFeedback],
    use_cases: &[UseCaseFeedback],
    matrix: &[CompetitorMatrixCell],
    critical_threshold: usize,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    // first maximum wins, so ranking order breaks ties
    let top = categories
        .iter()
        .filter(|c| c.negative_count > 0)
        .fold(None::<&CategoryFeedback>, |best, c| match best {
            Some(b) if b.negative_count >= c.negative_count => Some(b),
            _ => Some(c),
        });
    if let Some(top) = top {
        insights.push(Insight::new(
            InsightKind::TopPainPoint,
            &top.category,
            format!(
                "{} is the top pain point with {} negative mentions ({}% negative)",
                top.category, top.negative_count, top.negative_rate
            ),
        ));
    }

    if !categories.is_empty() {
        let critical = categories
            .iter()
            .filter(|c| c.negative_count >= critical_threshold)
            .count();
        insights.push(Insight::new(
            InsightKind::CriticalIssues,
            critical.to_string(),
            format!(
                "{critical} of {} categories have {critical_threshold} or more negative mentions",
                categories.len()
            ),
        ));
    }

    let weakest = use_cases
        .iter()
        .filter(|u| u.total_mentions > 0)
        .fold(None::<&UseCaseFeedback>, |worst, u| match worst {
            Some(w) if w.satisfaction_rate <= u.satisfaction_rate => Some(w),
            _ => Some(u),
        });
    if let Some(weakest) = weakest {
        insights.push(Insight::new(
            InsightKind::WeakestUseCase,
            &weakest.use_case,
            format!(
                "{} has the lowest satisfaction at {}% across {} mentions",
                weakest.use_case, weakest.satisfaction_rate, weakest.total_mentions
            ),
        ));
    }

    for leader in category_leaders(matrix) {
        insights.push(Insight::new(
            InsightKind::CategoryLeader,
            &leader.product,
            format!(
                "{} leads {} at {:.1}% satisfaction",
                leader.product, leader.category, leader.satisfaction_rate
            ),
        ));
    }

    insights
}
