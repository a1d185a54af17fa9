//! Xenith Analytics
//!
//! Pure transforms from review stores to the figures the dashboard shows.
//!
//! # Overview
//!
//! - **Aggregation**: per-label sentiment tallies and rates
//! - **Ranking**: stable top-N by negative count, mentions or satisfaction
//! - **Competitor matrix**: product × category satisfaction cells
//! - **Trends**: monthly series, synthetic or from review timestamps
//! - **Bands, summaries, price segments**: dashboard side panels
//!
//! # Example
//!
//! ```rust
//! use xenith_analytics::top_categories_by_negative;
//! use xenith_review::{ReviewRecord, ReviewStore, Sentiment};
//!
//! let store = ReviewStore::new()
//!     .with(
//!         "Installation",
//!         vec![
//!             ReviewRecord::new("B0BVKZLT3B", "Installation", Sentiment::Negative),
//!             ReviewRecord::new("B0BVKZLT3B", "Installation", Sentiment::Negative),
//!             ReviewRecord::new("B0BVKZLT3B", "Installation", Sentiment::Positive),
//!         ],
//!     )
//!     .with(
//!         "App",
//!         vec![ReviewRecord::new("B0BVKZLT3B", "App", Sentiment::Negative)],
//!     );
//!
//! let top = top_categories_by_negative(&store, 1);
//! assert_eq!(top[0].category, "Installation");
//! assert_eq!(top[0].negative_rate, 67);
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod bands;
pub mod matrix;
pub mod pricing;
pub mod ranking;
pub mod summary;
pub mod trend;

// Re-exports
pub use aggregate::{
    aggregate_category, aggregate_use_case, display_name, Aggregator, CategoryFeedback,
    SentimentTally, UseCaseFeedback, DISPLAY_NAME_LIMIT,
};
pub use bands::{ComplaintLevel, ComplaintThresholds};
pub use matrix::{
    build_competitor_matrix, category_leaders, total_for, CompetitorMatrixBuilder,
    CompetitorMatrixCell, ProductIdLookup,
};
pub use pricing::{price_segments, total_revenue, PriceSegment, SegmentRevenue};
pub use ranking::{rank, top_categories_by_negative, top_use_cases, FeedbackMetrics, RankMetric};
pub use summary::{
    CategorySummary, UseCaseSummary, DEFAULT_CRITICAL_NEGATIVE, DEFAULT_HIGH_SATISFACTION,
};
pub use trend::{
    bucketize_timestamps, generate_trend, legend_order, CategoryTrendPoint, TrendConfig,
    TrendGenerator, MAX_TREND_MONTHS, MONTH_LABEL_FORMAT,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for analytics
    pub use crate::{
        build_competitor_matrix, generate_trend, top_categories_by_negative, top_use_cases,
        Aggregator, CategoryFeedback, CompetitorMatrixCell, CategoryTrendPoint, RankMetric,
        UseCaseFeedback,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
