//! The `CatalogSource` trait: the read surface of the catalog API.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AstrologicalSystem, Philosophy, Religion, SearchResults};

/// Collections exposed by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Philosophies,
    Religions,
    AstrologicalSystems,
    Search,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Philosophies => "/philosophies/",
            Endpoint::Religions => "/religions/",
            Endpoint::AstrologicalSystems => "/astrological-systems/",
            Endpoint::Search => "/search/",
        }
    }
}

/// Read-only access to the catalog.
///
/// Implemented over HTTP by [`crate::CatalogClient`] and in memory by
/// [`crate::MockSource`]. Implementations return raw payloads; boundary
/// validation happens in the aggregator.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// `GET /philosophies/`
    async fn philosophies(&self) -> Result<Vec<Philosophy>>;

    /// `GET /religions/`
    async fn religions(&self) -> Result<Vec<Religion>>;

    /// `GET /astrological-systems/`
    async fn astrological_systems(&self) -> Result<Vec<AstrologicalSystem>>;

    /// `GET /search/?query=<query>`
    async fn search(&self, query: &str) -> Result<SearchResults>;
}
