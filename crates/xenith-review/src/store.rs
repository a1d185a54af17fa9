//! Review store
//!
//! Insertion-ordered mapping from category/use-case label to the reviews
//! filed under it. Iteration order is the order labels were first inserted,
//! which downstream rankings rely on for tie-breaking.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::RecordError;
use crate::record::{RawReviewRecord, ReviewRecord};

/// Label → reviews mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReviewStore {
    partitions: IndexMap<String, Vec<ReviewRecord>>,
}

impl ReviewStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a partition
    #[inline]
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, reviews: Vec<ReviewRecord>) -> Self {
        self.insert(label, reviews);
        self
    }

    /// Insert or replace a partition
    ///
    /// Replacing keeps the label's original position.
    pub fn insert(&mut self, label: impl Into<String>, reviews: Vec<ReviewRecord>) {
        self.partitions.insert(label.into(), reviews);
    }

    /// Append a single review under `label`
    pub fn push(&mut self, label: impl Into<String>, review: ReviewRecord) {
        self.partitions.entry(label.into()).or_default().push(review);
    }

    /// Reviews under `label`
    ///
    /// A missing label yields an empty slice.
    #[inline]
    #[must_use]
    pub fn get(&self, label: &str) -> &[ReviewRecord] {
        self.partitions.get(label).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check whether `label` has a partition
    #[inline]
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.partitions.contains_key(label)
    }

    /// Labels in insertion order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }

    /// Partitions in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ReviewRecord])> {
        self.partitions
            .iter()
            .map(|(label, reviews)| (label.as_str(), reviews.as_slice()))
    }

    /// Number of partitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// No partitions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Total reviews across all partitions
    #[must_use]
    pub fn total_reviews(&self) -> usize {
        self.partitions.values().map(Vec::len).sum()
    }

    /// Build a store from untyped partitions, validating every record
    ///
    /// Malformed records are excluded and reported; a partition that is
    /// not an array is treated as empty.
    #[must_use]
    pub fn from_raw(raw: IndexMap<String, JsonValue>) -> (Self, LoadReport) {
        let mut store = Self::new();
        let mut report = LoadReport::default();

        for (label, value) in raw {
            let items = match value {
                JsonValue::Array(items) => items,
                JsonValue::Null => Vec::new(),
                other => {
                    tracing::warn!("Partition '{}' is not an array ({}), treating as empty", label, kind(&other));
                    Vec::new()
                }
            };

            let mut reviews = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match parse_record(item, &label) {
                    Ok(record) => reviews.push(record),
                    Err(error) => {
                        tracing::warn!("Rejected review {} in '{}': {}", index, label, error);
                        report.rejections.push(Rejection {
                            label: label.clone(),
                            index,
                            error,
                        });
                    }
                }
            }

            report.accepted += reviews.len();
            store.insert(label, reviews);
        }

        (store, report)
    }
}

impl<S: Into<String>> FromIterator<(S, Vec<ReviewRecord>)> for ReviewStore {
    fn from_iter<I: IntoIterator<Item = (S, Vec<ReviewRecord>)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (label, reviews) in iter {
            store.insert(label, reviews);
        }
        store
    }
}

fn parse_record(item: JsonValue, label: &str) -> Result<ReviewRecord, RecordError> {
    if !item.is_object() {
        return Err(RecordError::NotAnObject(kind(&item).to_string()));
    }
    let raw: RawReviewRecord =
        serde_json::from_value(item).map_err(|e| RecordError::Malformed(e.to_string()))?;
    raw.validate(label)
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Outcome of loading untyped partitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Records that passed validation
    pub accepted: usize,
    /// Records excluded from the store
    pub rejections: Vec<Rejection>,
}

impl LoadReport {
    /// Number of rejected records
    #[inline]
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: LoadReport) {
        self.accepted += other.accepted;
        self.rejections.extend(other.rejections);
    }
}

/// A record excluded at load time
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Partition label
    pub label: String,
    /// Position within the partition
    pub index: usize,
    /// Why it was rejected
    pub error: RecordError,
}
