//! In-memory catalog source for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use super::traits::{CatalogSource, Endpoint};
use crate::error::{CatalogError, Result};
use crate::types::{AstrologicalSystem, Philosophy, Religion, SearchResults};

/// Collections served by [`MockSource`].
#[derive(Default)]
struct Fixtures {
    philosophies: Vec<Philosophy>,
    religions: Vec<Religion>,
    astrological_systems: Vec<AstrologicalSystem>,
    search_results: SearchResults,
}

/// Mock source for testing.
///
/// Serves fixed collections, can be told to fail individual endpoints, and
/// counts every request it receives. A gate can hold responses back until the
/// test releases them.
///
/// Each request takes its payload and its gate when it arrives, so both can
/// be swapped while earlier requests are still held.
#[derive(Default)]
pub struct MockSource {
    fixtures: Mutex<Fixtures>,
    failing: HashSet<Endpoint>,
    gate: Mutex<Option<Arc<Semaphore>>>,
    call_count: AtomicU32,
    queries: Mutex<Vec<String>>,
}

impl MockSource {
    /// Create an empty mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the philosophies collection.
    pub fn with_philosophies(mut self, items: Vec<Philosophy>) -> Self {
        self.fixtures_mut().philosophies = items;
        self
    }

    /// Set the religions collection.
    pub fn with_religions(mut self, items: Vec<Religion>) -> Self {
        self.fixtures_mut().religions = items;
        self
    }

    /// Set the astrological systems collection.
    pub fn with_astrological_systems(mut self, items: Vec<AstrologicalSystem>) -> Self {
        self.fixtures_mut().astrological_systems = items;
        self
    }

    /// Set the response returned for any search.
    pub fn with_search_results(mut self, results: SearchResults) -> Self {
        self.fixtures_mut().search_results = results;
        self
    }

    /// Make requests to `endpoint` fail with a server error.
    pub fn failing(mut self, endpoint: Endpoint) -> Self {
        self.failing.insert(endpoint);
        self
    }

    /// Hold every response until a permit is added to `gate`.
    pub fn with_gate(self, gate: Arc<Semaphore>) -> Self {
        self.set_gate(Some(gate));
        self
    }

    /// Replace the philosophies served to later requests.
    pub fn set_philosophies(&self, items: Vec<Philosophy>) {
        if let Ok(mut fixtures) = self.fixtures.lock() {
            fixtures.philosophies = items;
        }
    }

    /// Replace the gate for later requests. `None` lets them straight through.
    pub fn set_gate(&self, gate: Option<Arc<Semaphore>>) {
        if let Ok(mut current) = self.gate.lock() {
            *current = gate;
        }
    }

    /// Get the number of requests received.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Queries received by `search`, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    fn fixtures_mut(&mut self) -> &mut Fixtures {
        self.fixtures
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn respond<T>(&self, endpoint: Endpoint, select: impl FnOnce(&Fixtures) -> T) -> Result<T> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        let value = {
            let fixtures = self
                .fixtures
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            select(&fixtures)
        };
        let gate = self.gate.lock().ok().and_then(|gate| gate.clone());

        if let Some(gate) = gate {
            // The permit is returned on drop so one release lets every waiter through.
            let _permit = gate.acquire().await;
        }

        if self.failing.contains(&endpoint) {
            return Err(CatalogError::Server {
                status: 500,
                message: format!("mock failure on {}", endpoint.path()),
            });
        }

        Ok(value)
    }
}

#[async_trait]
impl CatalogSource for MockSource {
    async fn philosophies(&self) -> Result<Vec<Philosophy>> {
        self.respond(Endpoint::Philosophies, |f| f.philosophies.clone())
            .await
    }

    async fn religions(&self) -> Result<Vec<Religion>> {
        self.respond(Endpoint::Religions, |f| f.religions.clone()).await
    }

    async fn astrological_systems(&self) -> Result<Vec<AstrologicalSystem>> {
        self.respond(Endpoint::AstrologicalSystems, |f| {
            f.astrological_systems.clone()
        })
        .await
    }

    async fn search(&self, query: &str) -> Result<SearchResults> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }
        self.respond(Endpoint::Search, |f| f.search_results.clone())
            .await
    }
}
