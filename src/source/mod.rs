//! Catalog sources.
//!
//! The [`CatalogSource`] trait is the seam between the aggregator and the
//! network; the HTTP client and the mock both implement it.

pub mod http;
pub mod mock;
pub mod traits;

pub use http::CatalogClient;
pub use mock::MockSource;
pub use traits::{CatalogSource, Endpoint};
