//! Plain-text rendering of analysis results

use std::fmt::Write;

use xenith_analytics::{
    display_name, CategoryFeedback, CategoryTrendPoint, CompetitorMatrixCell, ComplaintThresholds,
    SegmentRevenue, UseCaseFeedback,
};
use xenith_core::AnalysisReport;

// Writing to a String cannot fail, so `writeln!` results are ignored throughout.

pub(crate) fn categories(data: &[CategoryFeedback]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<12} {:>8} {:>8} {:>8} {:>8} {:>6}",
        "Category", "Type", "Mentions", "Negative", "Positive", "Satisf.", "Neg.%"
    );
    for f in data {
        let _ = writeln!(
            out,
            "{:<24} {:<12} {:>8} {:>8} {:>8} {:>7}% {:>5}%",
            f.category,
            f.category_type.as_str(),
            f.total_mentions,
            f.negative_count,
            f.positive_count,
            f.satisfaction_rate,
            f.negative_rate
        );
    }
    out
}

pub(crate) fn use_cases(data: &[UseCaseFeedback], thresholds: &ComplaintThresholds) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:>8} {:>8} {:>8}  {}",
        "Use case", "Mentions", "Negative", "Satisf.", "Level"
    );
    for f in data {
        let _ = writeln!(
            out,
            "{:<20} {:>8} {:>8} {:>7}%  {}",
            f.display_name,
            f.total_mentions,
            f.negative_count,
            f.satisfaction_rate,
            thresholds.classify(f.satisfaction_rate)
        );
    }
    let _ = writeln!(
        out,
        "\nThresholds: poor {}%, average {}%",
        thresholds.poor, thresholds.average
    );
    out
}

pub(crate) fn matrix(cells: &[CompetitorMatrixCell]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<24} {:>8} {:>8} {:>8}",
        "Product", "Category", "Mentions", "Rated", "Satisf."
    );
    for c in cells {
        let _ = writeln!(
            out,
            "{:<20} {:<24} {:>8} {:>8} {:>7.1}%",
            c.product, c.category, c.mentions, c.total_reviews, c.satisfaction_rate
        );
    }
    out
}

pub(crate) fn trend(points: &[CategoryTrendPoint], legend: &[String]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<10}", "Month");
    for key in legend {
        let _ = write!(out, " {:>18}", display_name(key));
    }
    out.push('\n');
    for point in points {
        let _ = write!(out, "{:<10}", point.month);
        for key in legend {
            let _ = write!(out, " {:>18}", point.value(key));
        }
        out.push('\n');
    }
    out
}

pub(crate) fn segments(data: &[SegmentRevenue], total: f64) -> String {
    let mut out = String::new();
    for s in data {
        let _ = writeln!(out, "{:<22} {:>14.2}", s.name, s.value);
    }
    let _ = writeln!(out, "{:<22} {:>14.2}", "Total", total);
    out
}

pub(crate) fn report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Xenith analysis: {} (session {})\n",
        report.product_type, report.session_id
    );
    if report.rejected_records > 0 {
        let _ = writeln!(out, "{} malformed records excluded\n", report.rejected_records);
    }

    let s = &report.category_summary;
    let _ = writeln!(
        out,
        "Pain points: {} categories, {} negative mentions, avg {}% negative, {} critical",
        s.total_categories, s.total_negative, s.average_negative_rate, s.critical_issues
    );
    out.push_str(&categories(&report.categories));

    let u = &report.use_case_summary;
    let _ = writeln!(
        out,
        "\nUse cases: {} tracked, {} mentions, avg {}% satisfied, {} highly satisfied",
        u.total_use_cases, u.total_mentions, u.average_satisfaction, u.high_satisfaction
    );
    out.push_str(&use_cases(&report.use_cases, &report.complaint_thresholds));

    out.push_str("\nTrend\n");
    out.push_str(&trend(&report.trend, &report.trend_legend));

    out.push_str("\nRevenue by price segment\n");
    out.push_str(&segments(&report.price_segments, report.total_revenue));

    out.push_str("\nInsights\n");
    for insight in &report.insights {
        let _ = writeln!(out, "- {insight}");
    }
    out
}
