//! Analysis pipeline
//!
//! Runs every stage over one product line of a dataset and advances the
//! session after each stage completes:
//!
//! 1. aggregation and ranking (`Analyzing -> SummaryShown`)
//! 2. matrix, trend and price segments (`-> ChartsShown`)
//! 3. insights (`-> InsightsShown`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use xenith_analytics::{
    bucketize_timestamps, legend_order, price_segments, total_revenue, Aggregator,
    CategoryFeedback, CategorySummary, CategoryTrendPoint, CompetitorMatrixBuilder,
    CompetitorMatrixCell, ComplaintLevel, ComplaintThresholds, RankMetric, SegmentRevenue,
    TrendGenerator, UseCaseFeedback, UseCaseSummary,
};
use xenith_review::{ProductType, ReviewDataset};

use crate::config::{TrendSource, XenithConfig};
use crate::error::CoreError;
use crate::insights::{derive_insights, Insight};
use crate::session::{AnalysisPhase, AnalysisSession, SessionId};

/// Complaint level of one ranked use case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseBand {
    /// Use case label
    pub use_case: String,
    /// Satisfaction rate
    pub satisfaction_rate: u32,
    /// Level under the report's thresholds
    pub level: ComplaintLevel,
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Session the report was produced in
    pub session_id: SessionId,
    /// Product line analysed
    pub product_type: ProductType,
    /// Completion time
    pub generated_at: DateTime<Utc>,
    /// Records excluded while loading the dataset
    pub rejected_records: usize,
    /// Top categories by negative count
    pub categories: Vec<CategoryFeedback>,
    /// Summary of `categories`
    pub category_summary: CategorySummary,
    /// Top use cases by mentions
    pub use_cases: Vec<UseCaseFeedback>,
    /// Summary of `use_cases`
    pub use_case_summary: UseCaseSummary,
    /// Thresholds derived from use-case satisfaction
    pub complaint_thresholds: ComplaintThresholds,
    /// Complaint level per ranked use case
    pub use_case_bands: Vec<UseCaseBand>,
    /// Competitor matrix over every category
    pub competitor_matrix: Vec<CompetitorMatrixCell>,
    /// Monthly trend of the ranked categories
    pub trend: Vec<CategoryTrendPoint>,
    /// Trend series keys by last-month value
    pub trend_legend: Vec<String>,
    /// Revenue per price segment
    pub price_segments: Vec<SegmentRevenue>,
    /// Catalogue revenue
    pub total_revenue: f64,
    /// Derived statements
    pub insights: Vec<Insight>,
}

/// Stage outputs before the report is assembled
struct Summaries {
    categories: Vec<CategoryFeedback>,
    category_summary: CategorySummary,
    use_cases: Vec<UseCaseFeedback>,
    use_case_summary: UseCaseSummary,
    complaint_thresholds: ComplaintThresholds,
    use_case_bands: Vec<UseCaseBand>,
}

struct Charts {
    competitor_matrix: Vec<CompetitorMatrixCell>,
    trend: Vec<CategoryTrendPoint>,
    trend_legend: Vec<String>,
    price_segments: Vec<SegmentRevenue>,
    total_revenue: f64,
}

/// Analysis pipeline
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    config: XenithConfig,
}

impl AnalysisPipeline {
    /// Create pipeline
    #[inline]
    #[must_use]
    pub fn new(config: XenithConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &XenithConfig {
        &self.config
    }

    /// Run in a fresh session
    pub fn run(
        &self,
        dataset: &ReviewDataset,
        product_type: ProductType,
    ) -> Result<AnalysisReport, CoreError> {
        let mut session = AnalysisSession::new();
        self.run_in(&mut session, dataset, product_type)
    }

    /// Run in `session`, which must be idle
    ///
    /// On error the session is reset to idle.
    pub fn run_in(
        &self,
        session: &mut AnalysisSession,
        dataset: &ReviewDataset,
        product_type: ProductType,
    ) -> Result<AnalysisReport, CoreError> {
        session.advance(AnalysisPhase::Analyzing)?;
        let result = self.stages(session, dataset, product_type);
        if result.is_err() {
            session.reset();
        }
        result
    }

    fn stages(
        &self,
        session: &mut AnalysisSession,
        dataset: &ReviewDataset,
        product_type: ProductType,
    ) -> Result<AnalysisReport, CoreError> {
        tracing::info!("Analyzing {} reviews (session {})", product_type, session.id());

        let summaries = self.summarize(dataset, product_type)?;
        session.advance(AnalysisPhase::SummaryShown)?;

        let charts = self.chart(dataset, product_type, &summaries.categories)?;
        session.advance(AnalysisPhase::ChartsShown)?;

        let insights = derive_insights(
            &summaries.categories,
            &summaries.use_cases,
            &charts.competitor_matrix,
            self.config.thresholds.critical_negative,
        );
        session.advance(AnalysisPhase::InsightsShown)?;

        tracing::info!(
            "Analysis complete: {} categories, {} use cases, {} matrix cells, {} insights",
            summaries.categories.len(),
            summaries.use_cases.len(),
            charts.competitor_matrix.len(),
            insights.len()
        );

        Ok(AnalysisReport {
            session_id: session.id(),
            product_type,
            generated_at: Utc::now(),
            rejected_records: dataset.load_report().rejected(),
            categories: summaries.categories,
            category_summary: summaries.category_summary,
            use_cases: summaries.use_cases,
            use_case_summary: summaries.use_case_summary,
            complaint_thresholds: summaries.complaint_thresholds,
            use_case_bands: summaries.use_case_bands,
            competitor_matrix: charts.competitor_matrix,
            trend: charts.trend,
            trend_legend: charts.trend_legend,
            price_segments: charts.price_segments,
            total_revenue: charts.total_revenue,
            insights,
        })
    }

    fn summarize(
        &self,
        dataset: &ReviewDataset,
        product_type: ProductType,
    ) -> Result<Summaries, CoreError> {
        let corpus = dataset
            .corpus(product_type)
            .ok_or(CoreError::UnknownProductType(product_type))?;
        let aggregator = Aggregator::new().with_taxonomy(dataset.taxonomy());
        let ranking = &self.config.ranking;
        let thresholds = &self.config.thresholds;

        let categories =
            aggregator.top_categories(&corpus.categories, RankMetric::NegativeCount, ranking.top_n);
        let use_cases = aggregator.top_use_cases(
            &corpus.use_cases,
            RankMetric::TotalMentions,
            ranking.use_case_top_n,
        );

        let complaint_thresholds =
            ComplaintThresholds::from_rates(use_cases.iter().map(|u| u.satisfaction_rate));
        let use_case_bands = use_cases
            .iter()
            .map(|u| UseCaseBand {
                use_case: u.use_case.clone(),
                satisfaction_rate: u.satisfaction_rate,
                level: complaint_thresholds.classify(u.satisfaction_rate),
            })
            .collect();

        tracing::debug!(
            "Ranked {} of {} categories, {} of {} use cases",
            categories.len(),
            corpus.categories.len(),
            use_cases.len(),
            corpus.use_cases.len()
        );

        Ok(Summaries {
            category_summary: CategorySummary::from_feedback(&categories, thresholds.critical_negative),
            use_case_summary: UseCaseSummary::from_feedback(&use_cases, thresholds.high_satisfaction),
            categories,
            use_cases,
            complaint_thresholds,
            use_case_bands,
        })
    }

    fn chart(
        &self,
        dataset: &ReviewDataset,
        product_type: ProductType,
        ranked: &[CategoryFeedback],
    ) -> Result<Charts, CoreError> {
        let corpus = dataset
            .corpus(product_type)
            .ok_or(CoreError::UnknownProductType(product_type))?;
        let competitors = &self.config.competitors;
        let trend_settings = &self.config.trend;

        let competitor_matrix = CompetitorMatrixBuilder::new(&competitors.product_ids)
            .with_taxonomy(dataset.taxonomy())
            .build(&competitors.target_products, &corpus.categories);

        let trend = match trend_settings.source {
            TrendSource::Synthetic => {
                TrendGenerator::new(trend_settings.walk).generate(ranked, trend_settings.months)
            }
            TrendSource::Timestamps => bucketize_timestamps(
                ranked,
                &corpus.categories,
                trend_settings.months,
                trend_settings.walk.anchor,
            ),
        };
        let trend_legend = legend_order(&trend);

        Ok(Charts {
            competitor_matrix,
            trend,
            trend_legend,
            price_segments: price_segments(dataset.products()),
            total_revenue: total_revenue(dataset.products()),
        })
    }
}
