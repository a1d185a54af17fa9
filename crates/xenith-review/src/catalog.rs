//! Product catalogue entries

use serde::{Deserialize, Serialize};

/// Catalogue entry for a listed product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalogue identifier
    pub id: String,
    /// Listing title
    pub name: String,
    /// Brand name
    pub brand: String,
    /// Listing price (whole pack)
    pub price: f64,
    /// Price per unit in the pack
    pub unit_price: f64,
    /// Estimated revenue
    pub revenue: f64,
    /// Estimated units sold
    pub volume: u64,
    /// Listing URL
    pub url: String,
    /// Catalogue category, e.g. "Dimmer Switches"
    pub category: String,
    /// Finer product segment
    pub product_segment: String,
    /// Units per pack
    pub pack_count: u32,
}
