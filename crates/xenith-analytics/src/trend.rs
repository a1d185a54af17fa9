//! Category trend series
//!
//! Two sources produce the same row shape, `{month, <category>: value, ...}`:
//!
//! - [`TrendGenerator`]: a seeded synthetic walk per category that ends at
//!   the category's current negative count. Deterministic for a given seed
//!   and input order.
//! - [`bucketize_timestamps`]: negative reviews counted per calendar month
//!   from real review timestamps.
//!
//! Rows are chronological and always carry every tracked category.

use std::cmp::Reverse;

use chrono::{Datelike, Months, NaiveDate};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use xenith_review::{ReviewStore, Sentiment};

use crate::aggregate::CategoryFeedback;

/// Label format for trend months, e.g. `May 2025`
pub const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Longest series produced; longer requests are clamped to this
pub const MAX_TREND_MONTHS: usize = 240;

/// One month of a multi-series trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTrendPoint {
    /// Month label
    pub month: String,
    /// Value per category
    #[serde(flatten)]
    pub values: IndexMap<String, u64>,
}

impl CategoryTrendPoint {
    /// Value for `category`; absent categories read as zero
    #[inline]
    #[must_use]
    pub fn value(&self, category: &str) -> u64 {
        self.values.get(category).copied().unwrap_or(0)
    }
}

/// Synthetic walk parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendConfig {
    /// RNG seed
    pub seed: u64,
    /// Last month of the series (day is ignored)
    pub anchor: NaiveDate,
    /// Smallest month-over-month factor walking backwards
    pub min_step: f64,
    /// Largest month-over-month factor walking backwards
    pub max_step: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            anchor: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap_or_default(),
            min_step: 0.82,
            max_step: 1.04,
        }
    }
}

impl TrendConfig {
    /// With seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// With anchor month
    #[inline]
    #[must_use]
    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor = anchor;
        self
    }

    /// Step bounds ordered, finite and non-negative
    fn step_bounds(&self) -> (f64, f64) {
        let sanitize = |v: f64| if v.is_finite() { v.max(0.0) } else { 1.0 };
        let (a, b) = (sanitize(self.min_step), sanitize(self.max_step));
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Synthetic trend generator
#[derive(Debug, Clone, Copy, Default)]
pub struct TrendGenerator {
    config: TrendConfig,
}

impl TrendGenerator {
    /// Create generator
    #[inline]
    #[must_use]
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Generate `months` rows for `categories`
    ///
    /// Each series ends at the category's negative count and walks backwards
    /// by a random factor per month, so it mostly rises toward the present.
    #[must_use]
    pub fn generate(&self, categories: &[CategoryFeedback], months: usize) -> Vec<CategoryTrendPoint> {
        if months == 0 {
            return Vec::new();
        }
        let months = clamp_months(months);

        let (lo, hi) = self.config.step_bounds();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut rows = vec![IndexMap::with_capacity(categories.len()); months];

        for feedback in categories {
            let mut value = feedback.negative_count as f64;
            for row in rows.iter_mut().rev() {
                row.insert(feedback.category.clone(), value.round().max(0.0) as u64);
                value *= rng.gen_range(lo..=hi);
            }
        }

        tracing::debug!(
            "Generated synthetic trend: {} months x {} categories (seed {})",
            months,
            categories.len(),
            self.config.seed
        );
        label_rows(month_starts(self.config.anchor, months), rows)
    }
}

/// Synthetic trend with default parameters
#[must_use]
pub fn generate_trend(categories: &[CategoryFeedback], months: usize) -> Vec<CategoryTrendPoint> {
    TrendGenerator::default().generate(categories, months)
}

/// Count negative reviews per calendar month for each category
///
/// The window is the `months` calendar months ending at `anchor`. Reviews
/// without a timestamp or outside the window are not counted; categories
/// missing from `store` read as zero.
#[must_use]
pub fn bucketize_timestamps(
    categories: &[CategoryFeedback],
    store: &ReviewStore,
    months: usize,
    anchor: NaiveDate,
) -> Vec<CategoryTrendPoint> {
    if months == 0 {
        return Vec::new();
    }
    let months = clamp_months(months);

    let starts = month_starts(anchor, months);
    let index: IndexMap<(i32, u32), usize> = starts
        .iter()
        .enumerate()
        .map(|(i, d)| ((d.year(), d.month()), i))
        .collect();

    let mut rows: Vec<IndexMap<String, u64>> = vec![IndexMap::with_capacity(categories.len()); months];
    let mut skipped = 0usize;

    for feedback in categories {
        for row in &mut rows {
            row.insert(feedback.category.clone(), 0);
        }
        for review in store.get(&feedback.category) {
            if review.sentiment() != Sentiment::Negative {
                continue;
            }
            let Some(ts) = review.timestamp() else {
                skipped += 1;
                continue;
            };
            if let Some(&i) = index.get(&(ts.year(), ts.month())) {
                if let Some(count) = rows[i].get_mut(&feedback.category) {
                    *count += 1;
                }
            }
        }
    }

    if skipped > 0 {
        tracing::debug!("{} negative reviews without timestamp left out of trend", skipped);
    }
    label_rows(starts, rows)
}

/// Category keys ordered by last-month value, descending
///
/// Ties keep first-seen order.
#[must_use]
pub fn legend_order(points: &[CategoryTrendPoint]) -> Vec<String> {
    let Some(last) = points.last() else {
        return Vec::new();
    };
    let mut keys: Vec<(&String, u64)> = last.values.iter().map(|(k, v)| (k, *v)).collect();
    keys.sort_by_key(|(_, v)| Reverse(*v));
    keys.into_iter().map(|(k, _)| k.clone()).collect()
}

fn clamp_months(months: usize) -> usize {
    if months > MAX_TREND_MONTHS {
        tracing::warn!(
            "Trend of {} months requested, clamping to {}",
            months,
            MAX_TREND_MONTHS
        );
    }
    months.min(MAX_TREND_MONTHS)
}

/// First day of each of the `months` months ending at `anchor`, ascending
fn month_starts(anchor: NaiveDate, months: usize) -> Vec<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).unwrap_or(anchor);
    (0..months)
        .rev()
        .map(|back| {
            u32::try_from(back)
                .ok()
                .and_then(|back| first.checked_sub_months(Months::new(back)))
                .unwrap_or(NaiveDate::MIN)
        })
        .collect()
}

fn label_rows(starts: Vec<NaiveDate>, rows: Vec<IndexMap<String, u64>>) -> Vec<CategoryTrendPoint> {
    starts
        .into_iter()
        .zip(rows)
        .map(|(start, values)| CategoryTrendPoint {
            month: start.format(MONTH_LABEL_FORMAT).to_string(),
            values,
        })
        .collect()
}
