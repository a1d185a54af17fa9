//! Xenith Review Data
//!
//! Validated review records and the stores the analytics crates read from.
//!
//! # Overview
//!
//! - **ReviewRecord**: immutable review, validated at the load boundary
//! - **ReviewStore**: insertion-ordered label → reviews mapping
//! - **Taxonomy**: label → [`CategoryType`] lookup
//! - **ReviewDataset**: per-product-line corpora plus taxonomy and catalogue
//!
//! # Example
//!
//! ```rust
//! use xenith_review::{ReviewRecord, ReviewStore, Sentiment};
//!
//! let store = ReviewStore::new().with(
//!     "Installation",
//!     vec![ReviewRecord::new("B0BVKZLT3B", "Installation", Sentiment::Negative)],
//! );
//!
//! assert_eq!(store.get("Installation").len(), 1);
//! assert!(store.get("Missing").is_empty());
//! ```

#![warn(missing_docs)]

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod record;
pub mod store;
pub mod taxonomy;

// Re-exports
pub use catalog::Product;
pub use dataset::{ProductType, ReviewCorpus, ReviewDataset};
pub use error::{DatasetError, RecordError};
pub use record::{RawReviewRecord, ReviewRecord, Sentiment};
pub use store::{LoadReport, Rejection, ReviewStore};
pub use taxonomy::{CategoryType, Taxonomy};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for review data
    pub use crate::{
        CategoryType, ProductType, ReviewCorpus, ReviewDataset, ReviewRecord, ReviewStore,
        Sentiment, Taxonomy,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
