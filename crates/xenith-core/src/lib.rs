//! Xenith Core - analysis pipeline
//!
//! Ties the review data and analytics crates together:
//! - Loads configuration from TOML, YAML or JSON
//! - Runs aggregation, ranking, matrix and trend stages over a dataset
//! - Tracks the phase sequence of an analysis session
//! - Derives plain-language insights
//!
//! # Example
//!
//! ```rust
//! use xenith_core::{AnalysisPipeline, XenithConfig};
//! use xenith_review::{ProductType, ReviewDataset};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = ReviewDataset::builtin()?;
//! let pipeline = AnalysisPipeline::new(XenithConfig::new().with_top_n(5));
//!
//! let report = pipeline.run(dataset, ProductType::Dimmer)?;
//! assert!(report.categories.len() <= 5);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod insights;
pub mod pipeline;
pub mod session;

// Re-exports for convenience
pub use config::{
    CompetitorSettings, RankingSettings, ThresholdSettings, TrendSettings, TrendSource,
    XenithConfig,
};
pub use error::{ConfigError, CoreError, SessionError};
pub use insights::{derive_insights, Insight, InsightKind};
pub use pipeline::{AnalysisPipeline, AnalysisReport, UseCaseBand};
pub use session::{
    allowed_transitions, validate_transition, AnalysisPhase, AnalysisSession, PhaseTransition,
    SessionId,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Xenith Core
    pub use crate::{
        AnalysisPhase, AnalysisPipeline, AnalysisReport, AnalysisSession, XenithConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
