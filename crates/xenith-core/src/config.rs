//! Xenith configuration
//!
//! Every section has defaults, so an empty file (or no file) is a valid
//! configuration. Files are parsed by extension: `.toml`, `.yaml`/`.yml`,
//! `.json`.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xenith_analytics::{
    TrendConfig, DEFAULT_CRITICAL_NEGATIVE, DEFAULT_HIGH_SATISFACTION, MAX_TREND_MONTHS,
};
use xenith_review::ProductType;

use crate::error::ConfigError;

/// Competitors tracked in the matrix by default, with their review ids
const DEFAULT_COMPETITORS: [(&str, &str); 6] = [
    ("Leviton D26HD", "B0BVKYKKRK"),
    ("Leviton D215S", "B0BVKZLT3B"),
    ("Lutron Caseta Diva", "B0BSHKS26L"),
    ("TP Link Switch", "B01EZV35QU"),
    ("Leviton DSL06", "B00NG0ELL0"),
    ("Lutron Diva", "B085D8M2MR"),
];

/// Xenith configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct XenithConfig {
    /// Product line analysed when none is given
    pub product_type: ProductType,
    /// Dataset file; the built-in dataset is used when unset
    pub dataset: Option<PathBuf>,
    /// Ranking sizes
    pub ranking: RankingSettings,
    /// Trend series settings
    pub trend: TrendSettings,
    /// Summary thresholds
    pub thresholds: ThresholdSettings,
    /// Competitor matrix inputs
    pub competitors: CompetitorSettings,
}

impl XenithConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With product type
    #[inline]
    #[must_use]
    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    /// With dataset path
    #[inline]
    #[must_use]
    pub fn with_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset = Some(path.into());
        self
    }

    /// With category ranking size
    #[inline]
    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.ranking.top_n = n;
        self
    }

    /// With use-case ranking size
    #[inline]
    #[must_use]
    pub fn with_use_case_top_n(mut self, n: usize) -> Self {
        self.ranking.use_case_top_n = n;
        self
    }

    /// With trend length in months
    #[inline]
    #[must_use]
    pub fn with_trend_months(mut self, months: usize) -> Self {
        self.trend.months = months;
        self
    }

    /// With trend source
    #[inline]
    #[must_use]
    pub fn with_trend_source(mut self, source: TrendSource) -> Self {
        self.trend.source = source;
        self
    }

    /// Load from a file, choosing the parser by extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match ext.as_str() {
            "toml" => Self::from_toml(&text)?,
            "yaml" | "yml" => Self::from_yaml(&text)?,
            "json" => Self::from_json(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty YAML document is null, not an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let walk = &self.trend.walk;
        for (field, value) in [("trend.minStep", walk.min_step), ("trend.maxStep", walk.max_step)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(field, format!("{value} is not a non-negative number")));
            }
        }
        if self.trend.months > MAX_TREND_MONTHS {
            return Err(ConfigError::invalid(
                "trend.months",
                format!("{} exceeds {MAX_TREND_MONTHS}", self.trend.months),
            ));
        }
        if self.thresholds.high_satisfaction > 100 {
            return Err(ConfigError::invalid(
                "thresholds.highSatisfaction",
                format!("{} exceeds 100", self.thresholds.high_satisfaction),
            ));
        }
        Ok(())
    }
}

/// Ranking sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingSettings {
    /// Categories in the pain-point ranking
    pub top_n: usize,
    /// Use cases in the use-case ranking
    pub use_case_top_n: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            use_case_top_n: 15,
        }
    }
}

/// Where trend values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSource {
    /// Seeded walk ending at the current negative counts
    #[default]
    Synthetic,
    /// Negative reviews counted per month from review timestamps
    Timestamps,
}

/// Trend series settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendSettings {
    /// Months in the series
    pub months: usize,
    /// Value source
    pub source: TrendSource,
    /// Seed, anchor month and step bounds
    #[serde(flatten)]
    pub walk: TrendConfig,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            months: 12,
            source: TrendSource::default(),
            walk: TrendConfig::default(),
        }
    }
}

/// Summary thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThresholdSettings {
    /// Negative mentions at which a category is a critical issue
    pub critical_negative: usize,
    /// Satisfaction at which a use case counts as well served
    pub high_satisfaction: u32,
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self {
            critical_negative: DEFAULT_CRITICAL_NEGATIVE,
            high_satisfaction: DEFAULT_HIGH_SATISFACTION,
        }
    }
}

/// Competitor matrix inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompetitorSettings {
    /// Products compared, in matrix order
    pub target_products: Vec<String>,
    /// Product name → review id
    pub product_ids: IndexMap<String, String>,
}

impl Default for CompetitorSettings {
    fn default() -> Self {
        Self {
            target_products: DEFAULT_COMPETITORS
                .iter()
                .map(|(name, _)| (*name).to_string())
                .collect(),
            product_ids: DEFAULT_COMPETITORS
                .iter()
                .map(|(name, id)| ((*name).to_string(), (*id).to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = XenithConfig::default();
        assert_eq!(config.ranking.top_n, 10);
        assert_eq!(config.ranking.use_case_top_n, 15);
        assert_eq!(config.trend.months, 12);
        assert_eq!(config.trend.source, TrendSource::Synthetic);
        assert_eq!(config.competitors.target_products.len(), 6);
        assert_eq!(
            config.competitors.product_ids.get("Leviton D215S").map(String::as_str),
            Some("B0BVKZLT3B")
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = XenithConfig::from_toml(
            r#"
productType = "light"

[ranking]
topN = 3

[trend]
source = "timestamps"
seed = 9
"#,
        )
        .unwrap();
        assert_eq!(config.product_type, ProductType::Light);
        assert_eq!(config.ranking.top_n, 3);
        assert_eq!(config.ranking.use_case_top_n, 15);
        assert_eq!(config.trend.source, TrendSource::Timestamps);
        assert_eq!(config.trend.walk.seed, 9);
        assert_eq!(config.trend.months, 12);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(XenithConfig::from_yaml("").unwrap(), XenithConfig::default());
    }

    #[test]
    fn negative_step_rejected() {
        let err = XenithConfig::from_json(r#"{"trend": {"minStep": -1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "trend.minStep", .. }));
    }

    #[test]
    fn trend_months_bounded() {
        let err = XenithConfig::from_toml("[trend]\nmonths = 100000\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "trend.months", .. }));

        let config = XenithConfig::from_toml(&format!("[trend]\nmonths = {MAX_TREND_MONTHS}\n")).unwrap();
        assert_eq!(config.trend.months, MAX_TREND_MONTHS);
    }

    #[test]
    fn builders() {
        let config = XenithConfig::new()
            .with_top_n(4)
            .with_trend_months(6)
            .with_trend_source(TrendSource::Timestamps)
            .with_dataset("reviews.yaml");
        assert_eq!(config.ranking.top_n, 4);
        assert_eq!(config.trend.months, 6);
        assert_eq!(config.dataset, Some(PathBuf::from("reviews.yaml")));
    }
}
