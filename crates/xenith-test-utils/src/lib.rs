//! Testing utilities for Xenith workspace
//!
//! Shared review fixtures and store builders.

#![allow(missing_docs)]

use indexmap::IndexMap;
use xenith_review::{ReviewRecord, ReviewStore, Sentiment};

/// Product names and ids used by the dimmer competitor matrix
pub const PRODUCT_IDS: [(&str, &str); 6] = [
    ("Leviton D26HD", "B0BVKYKKRK"),
    ("Leviton D215S", "B0BVKZLT3B"),
    ("Lutron Caseta Diva", "B0BSHKS26L"),
    ("TP Link Switch", "B01EZV35QU"),
    ("Leviton DSL06", "B00NG0ELL0"),
    ("Lutron Diva", "B085D8M2MR"),
];

pub fn review(product_id: &str, sentiment: Sentiment) -> ReviewRecord {
    ReviewRecord::new(product_id, "test", sentiment)
}

pub fn review_in(product_id: &str, label: &str, sentiment: Sentiment) -> ReviewRecord {
    ReviewRecord::new(product_id, label, sentiment)
}

/// `pos` positive, then `neg` negative, then `neu` neutral reviews of one product
pub fn reviews(label: &str, pos: usize, neg: usize, neu: usize) -> Vec<ReviewRecord> {
    let mut out = Vec::with_capacity(pos + neg + neu);
    for (count, sentiment) in [
        (pos, Sentiment::Positive),
        (neg, Sentiment::Negative),
        (neu, Sentiment::Neutral),
    ] {
        out.extend((0..count).map(|_| review_in("B085D8M2MR", label, sentiment)));
    }
    out
}

/// Store from `(label, positive, negative, neutral)` rows, in row order
pub fn store_from_counts(rows: &[(&str, usize, usize, usize)]) -> ReviewStore {
    rows.iter()
        .map(|&(label, pos, neg, neu)| (label.to_string(), reviews(label, pos, neg, neu)))
        .collect()
}

/// Installation 3/5/2 and App 8/1/1
pub fn installation_app_store() -> ReviewStore {
    store_from_counts(&[("Installation", 3, 5, 2), ("App", 8, 1, 1)])
}

/// Product-name → id lookup for the six tracked dimmers
pub fn default_product_ids() -> IndexMap<String, String> {
    PRODUCT_IDS
        .iter()
        .map(|(name, id)| (name.to_string(), id.to_string()))
        .collect()
}

/// Target product names in matrix order
pub fn target_products() -> Vec<String> {
    PRODUCT_IDS.iter().map(|(name, _)| name.to_string()).collect()
}
