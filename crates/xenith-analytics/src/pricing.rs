//! Revenue by price segment

use std::fmt;

use serde::{Deserialize, Serialize};
use xenith_review::Product;

/// Price band of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceSegment {
    /// Up to $30
    Budget,
    /// Up to $70
    MidRange,
    /// Up to $150
    Premium,
    /// Above $150
    HighEnd,
}

impl PriceSegment {
    /// Segments in display order
    pub const ALL: [PriceSegment; 4] = [Self::Budget, Self::MidRange, Self::Premium, Self::HighEnd];

    /// Segment for a listing price; bounds are inclusive upper limits
    #[must_use]
    pub fn for_price(price: f64) -> Self {
        if price <= 30.0 {
            Self::Budget
        } else if price <= 70.0 {
            Self::MidRange
        } else if price <= 150.0 {
            Self::Premium
        } else {
            Self::HighEnd
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Budget => "Budget ($0-$30)",
            Self::MidRange => "Mid-Range ($30-$70)",
            Self::Premium => "Premium ($70-$150)",
            Self::HighEnd => "High-End ($150+)",
        }
    }
}

impl fmt::Display for PriceSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Revenue attributed to one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRevenue {
    /// Segment label
    pub name: String,
    /// Segment
    pub segment: PriceSegment,
    /// Summed revenue
    pub value: f64,
}

/// Revenue per price segment; every segment is present, in display order
#[must_use]
pub fn price_segments(products: &[Product]) -> Vec<SegmentRevenue> {
    PriceSegment::ALL
        .iter()
        .map(|&segment| SegmentRevenue {
            name: segment.label().to_string(),
            segment,
            value: products
                .iter()
                .filter(|p| PriceSegment::for_price(p.price) == segment)
                .map(|p| p.revenue)
                .sum(),
        })
        .collect()
}

/// Total revenue across the catalogue
#[must_use]
pub fn total_revenue(products: &[Product]) -> f64 {
    products.iter().map(|p| p.revenue).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, revenue: f64) -> Product {
        Product {
            id: "d_1".into(),
            name: "Dimmer".into(),
            brand: "Lutron".into(),
            price,
            unit_price: price,
            revenue,
            volume: 1,
            url: String::new(),
            category: "Dimmer Switches".into(),
            product_segment: "LED Optimized Dimmer Switches".into(),
            pack_count: 1,
        }
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(PriceSegment::for_price(30.0), PriceSegment::Budget);
        assert_eq!(PriceSegment::for_price(30.01), PriceSegment::MidRange);
        assert_eq!(PriceSegment::for_price(150.0), PriceSegment::Premium);
        assert_eq!(PriceSegment::for_price(189.9), PriceSegment::HighEnd);
    }

    #[test]
    fn all_segments_emitted() {
        let segments = price_segments(&[product(19.47, 100.0), product(69.95, 50.0), product(59.95, 25.0)]);
        assert_eq!(segments.len(), 4);
        assert!((segments[1].value - 75.0).abs() < 1e-9);
        assert!(segments[3].value.abs() < f64::EPSILON);
        assert!((total_revenue(&[product(1.0, 2.0), product(3.0, 4.5)]) - 6.5).abs() < 1e-9);
    }
}
