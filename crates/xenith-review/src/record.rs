//! Review records
//!
//! A [`ReviewRecord`] is immutable once loaded. Records enter the system as
//! loosely-typed [`RawReviewRecord`]s and are validated at the load boundary;
//! anything that fails validation is excluded rather than aborting the load.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Review sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Counts toward satisfaction
    Positive,
    /// Counts against satisfaction
    Negative,
    /// Counted as a mention, excluded from satisfaction
    Neutral,
}

impl Sentiment {
    /// All sentiments in canonical order
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Negative, Self::Neutral];

    /// Lowercase wire name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            _ => Err(RecordError::UnknownSentiment(s.to_string())),
        }
    }
}

/// Validated review record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    product_id: String,
    category: String,
    sentiment: Sentiment,
    rating: f64,
    brand: String,
    verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl ReviewRecord {
    /// Create record with a neutral 3-star rating, no brand, unverified
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        category: impl Into<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            category: category.into(),
            sentiment,
            rating: 3.0,
            brand: String::new(),
            verified: false,
            timestamp: None,
            text: None,
        }
    }

    /// With rating (clamped to the 1-5 scale)
    #[inline]
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating.clamp(1.0, 5.0);
        self
    }

    /// With brand
    #[inline]
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// With verified-purchase flag
    #[inline]
    #[must_use]
    pub fn with_verified(mut self, verified: bool) -> Self {
        self.verified = verified;
        self
    }

    /// With timestamp
    #[inline]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// With review text
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Product identifier (ASIN)
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Category or use-case label the record was filed under
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Sentiment
    #[inline]
    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        self.sentiment
    }

    /// Star rating (1-5)
    #[inline]
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Brand name
    #[inline]
    #[must_use]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// Verified purchase
    #[inline]
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Review timestamp, if known
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Review text, if captured
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Review record as it appears in a dataset file
///
/// Every field is optional so that a single malformed record can be
/// rejected on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawReviewRecord {
    /// Reviewed product id (ASIN)
    pub product_id: Option<String>,
    /// Category; defaults to the partition label
    pub category: Option<String>,
    /// `positive`, `negative` or `neutral`, any case
    pub sentiment: Option<String>,
    /// Star rating, 1 to 5
    pub rating: Option<f64>,
    /// Product brand
    pub brand: Option<String>,
    /// Verified purchase
    pub verified: Option<bool>,
    /// RFC 3339 timestamp
    pub timestamp: Option<String>,
    /// Review body
    pub text: Option<String>,
}

impl RawReviewRecord {
    /// Validate into a [`ReviewRecord`]
    ///
    /// `label` is the store partition the record was filed under and fills
    /// in a missing `category`.
    ///
    /// # Errors
    /// Returns the first validation failure found.
    pub fn validate(self, label: &str) -> Result<ReviewRecord, RecordError> {
        let product_id = non_empty(self.product_id).ok_or(RecordError::MissingField("productId"))?;
        let sentiment: Sentiment = self
            .sentiment
            .ok_or(RecordError::MissingField("sentiment"))?
            .parse()?;
        let rating = self.rating.ok_or(RecordError::MissingField("rating"))?;
        if !rating.is_finite() || !(1.0..=5.0).contains(&rating) {
            return Err(RecordError::RatingOutOfRange(rating));
        }
        let brand = non_empty(self.brand).ok_or(RecordError::MissingField("brand"))?;

        let timestamp = match self.timestamp {
            Some(value) => Some(
                DateTime::parse_from_rfc3339(&value)
                    .map(|ts| ts.with_timezone(&Utc))
                    .map_err(|e| RecordError::InvalidTimestamp {
                        message: e.to_string(),
                        value,
                    })?,
            ),
            None => None,
        };

        Ok(ReviewRecord {
            product_id,
            category: non_empty(self.category).unwrap_or_else(|| label.to_string()),
            sentiment,
            rating,
            brand,
            verified: self.verified.unwrap_or(false),
            timestamp,
            text: self.text,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawReviewRecord {
        RawReviewRecord {
            product_id: Some("B0BVKZLT3B".into()),
            category: None,
            sentiment: Some("Negative".into()),
            rating: Some(2.0),
            brand: Some("Leviton".into()),
            verified: None,
            timestamp: Some("2025-03-14T09:00:00Z".into()),
            text: None,
        }
    }

    #[test]
    fn validate_fills_category_from_label() {
        let record = raw().validate("Installation").unwrap();
        assert_eq!(record.category(), "Installation");
        assert_eq!(record.sentiment(), Sentiment::Negative);
        assert!(!record.is_verified());
        assert!(record.timestamp().is_some());
    }

    #[test]
    fn validate_rejects_missing_product() {
        let mut r = raw();
        r.product_id = Some("  ".into());
        assert_eq!(r.validate("x"), Err(RecordError::MissingField("productId")));
    }

    #[test]
    fn validate_rejects_unknown_sentiment() {
        let mut r = raw();
        r.sentiment = Some("mixed".into());
        assert!(matches!(r.validate("x"), Err(RecordError::UnknownSentiment(_))));
    }

    #[test]
    fn validate_rejects_rating_out_of_range() {
        let mut r = raw();
        r.rating = Some(7.0);
        assert_eq!(r.validate("x"), Err(RecordError::RatingOutOfRange(7.0)));
    }

    #[test]
    fn validate_rejects_bad_timestamp() {
        let mut r = raw();
        r.timestamp = Some("last tuesday".into());
        assert!(matches!(r.validate("x"), Err(RecordError::InvalidTimestamp { .. })));
    }

    #[test]
    fn builder_clamps_rating() {
        let record = ReviewRecord::new("p", "c", Sentiment::Positive).with_rating(9.0);
        assert!((record.rating() - 5.0).abs() < f64::EPSILON);
    }
}
