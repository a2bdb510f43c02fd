//! Knowledge-base session - drives the state through user actions.
//!
//! A session owns the [`KnowledgeBase`] for one view. Network work happens
//! outside the state lock; results are applied only if the session is still
//! live and no newer activation has started since the request went out.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::aggregator::{load_catalog, search_catalog};
use crate::cards::Card;
use crate::render;
use crate::source::CatalogSource;
use crate::state::{Action, Category, KnowledgeBase, Status};

/// What happened to a search submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query, or nothing loaded yet. No request was made.
    Ignored,
    /// Results replaced the collections.
    Applied,
    /// The request failed; the collections were kept.
    Failed,
    /// The response arrived after disposal or a newer activation.
    Discarded,
}

/// One knowledge-base view bound to a catalog source.
#[derive(Clone)]
pub struct KnowledgeBaseSession {
    source: Arc<dyn CatalogSource>,
    state: Arc<RwLock<KnowledgeBase>>,
    /// Bumped by every activation
    epoch: Arc<AtomicU64>,
    disposed: Arc<AtomicBool>,
}

impl KnowledgeBaseSession {
    /// Create an idle session.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(KnowledgeBase::new())),
            epoch: Arc::new(AtomicU64::new(0)),
            disposed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Load all three collections. Returns the status afterwards.
    ///
    /// Issues exactly one round of three concurrent requests. Any failure
    /// leaves the session in `Error` with empty collections.
    pub async fn activate(&self) -> Status {
        if self.is_disposed() {
            return self.status().await;
        }

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.apply(Action::LoadStarted);
        info!(epoch, "loading catalog");

        let action = match load_catalog(self.source.as_ref()).await {
            Ok(catalog) => Action::LoadSucceeded(catalog),
            Err(e) => {
                warn!(error = %e, "catalog load failed");
                Action::LoadFailed
            }
        };

        let mut state = self.state.write().await;
        if self.is_current(epoch) {
            state.apply(action);
        } else {
            debug!(epoch, "discarding stale load result");
        }
        state.status()
    }

    /// Replace the search query.
    pub async fn set_query(&self, query: impl Into<String>) {
        self.state
            .write()
            .await
            .apply(Action::QueryChanged(query.into()));
    }

    /// Switch the displayed category. Never touches the network.
    pub async fn select_tab(&self, category: Category) {
        self.state.write().await.apply(Action::TabSelected(category));
    }

    /// Submit the current query.
    ///
    /// Only runs once the catalog is loaded. A blank query makes no request.
    pub async fn submit_search(&self) -> SearchOutcome {
        if self.is_disposed() {
            return SearchOutcome::Ignored;
        }

        let (query, status) = {
            let state = self.state.read().await;
            (state.query().to_string(), state.status())
        };
        if status != Status::Ready || query.trim().is_empty() {
            debug!(?status, "search submission ignored");
            return SearchOutcome::Ignored;
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        let (action, outcome) = match search_catalog(self.source.as_ref(), &query).await {
            Ok(Some(catalog)) => (Action::SearchSucceeded(catalog), SearchOutcome::Applied),
            Ok(None) => return SearchOutcome::Ignored,
            Err(e) => {
                warn!(error = %e, query = %query.trim(), "search failed");
                (Action::SearchFailed, SearchOutcome::Failed)
            }
        };

        let mut state = self.state.write().await;
        if !self.is_current(epoch) || !state.apply(action) {
            debug!(epoch, "discarding stale search result");
            return SearchOutcome::Discarded;
        }
        outcome
    }

    /// Tear the session down. Responses still in flight are dropped.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> KnowledgeBase {
        self.state.read().await.clone()
    }

    pub async fn status(&self) -> Status {
        self.state.read().await.status()
    }

    /// Cards for the active tab.
    pub async fn cards(&self) -> Vec<Card> {
        render::render_active(&*self.state.read().await)
    }

    /// Whole view as HTML.
    pub async fn render_html(&self) -> String {
        render::render_page(&*self.state.read().await)
    }

    /// Whole view as plain text.
    pub async fn render_text(&self) -> String {
        render::render_page_text(&*self.state.read().await)
    }

    fn is_current(&self, epoch: u64) -> bool {
        !self.is_disposed() && self.epoch.load(Ordering::SeqCst) == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Endpoint, MockSource};
    use crate::state::{LOAD_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE};
    use crate::types::{Philosophy, Religion, SearchResults};
    use tokio::sync::Semaphore;

    fn stoicism() -> Philosophy {
        Philosophy {
            id: 1,
            name: "Stoicism".into(),
            origin: "Greece".into(),
            description: "...".into(),
            key_principles: vec!["Virtue".into(), "Logos".into()],
        }
    }

    fn hinduism() -> Religion {
        Religion {
            id: 2,
            name: "Hinduism".into(),
            description: "...".into(),
            sacred_texts: vec!["Vedas".into()],
            practices: vec!["Yoga".into()],
        }
    }

    fn karma_results() -> SearchResults {
        SearchResults {
            religions: vec![hinduism()],
            ..Default::default()
        }
    }

    async fn wait_for_calls(source: &MockSource, calls: u32) {
        while source.call_count() < calls {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_activate_loads_catalog() {
        let source = Arc::new(MockSource::new().with_philosophies(vec![stoicism()]));
        let session = KnowledgeBaseSession::new(source.clone());

        assert_eq!(session.activate().await, Status::Ready);
        assert_eq!(source.call_count(), 3);

        let state = session.snapshot().await;
        assert_eq!(state.catalog().philosophies, vec![stoicism()]);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_activate_fails_closed() {
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .failing(Endpoint::Religions),
        );
        let session = KnowledgeBaseSession::new(source);

        assert_eq!(session.activate().await, Status::Error);

        let state = session.snapshot().await;
        assert_eq!(state.error(), Some(LOAD_FAILED_MESSAGE));
        assert!(state.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_tab_switch_issues_no_requests() {
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .with_religions(vec![hinduism()]),
        );
        let session = KnowledgeBaseSession::new(source.clone());
        session.activate().await;
        let calls = source.call_count();

        session.select_tab(Category::Religion).await;
        let cards = session.cards().await;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Hinduism");

        session.select_tab(Category::Astrology).await;
        assert!(session.cards().await.is_empty());
        assert_eq!(source.call_count(), calls);
    }

    #[tokio::test]
    async fn test_blank_search_is_ignored() {
        let source = Arc::new(MockSource::new().with_philosophies(vec![stoicism()]));
        let session = KnowledgeBaseSession::new(source.clone());
        session.activate().await;
        let before = session.snapshot().await;

        session.set_query("   ").await;
        assert_eq!(session.submit_search().await, SearchOutcome::Ignored);

        assert_eq!(source.call_count(), 3);
        assert_eq!(session.snapshot().await.catalog(), before.catalog());
    }

    #[tokio::test]
    async fn test_search_replaces_collections() {
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .with_search_results(karma_results()),
        );
        let session = KnowledgeBaseSession::new(source.clone());
        session.activate().await;

        session.set_query("karma").await;
        assert_eq!(session.submit_search().await, SearchOutcome::Applied);

        let state = session.snapshot().await;
        assert_eq!(state.status(), Status::Ready);
        assert_eq!(state.active(), Category::Philosophy);
        assert!(session.cards().await.is_empty());

        session.select_tab(Category::Religion).await;
        assert_eq!(session.cards().await[0].title, "Hinduism");
        assert_eq!(source.queries(), vec!["karma"]);
    }

    #[tokio::test]
    async fn test_search_failure_keeps_collections() {
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .failing(Endpoint::Search),
        );
        let session = KnowledgeBaseSession::new(source);
        session.activate().await;

        session.set_query("karma").await;
        assert_eq!(session.submit_search().await, SearchOutcome::Failed);

        let state = session.snapshot().await;
        assert_eq!(state.status(), Status::Ready);
        assert_eq!(state.search_error(), Some(SEARCH_FAILED_MESSAGE));
        assert_eq!(state.catalog().philosophies, vec![stoicism()]);
    }

    #[tokio::test]
    async fn test_search_before_load_is_ignored() {
        let source = Arc::new(MockSource::new());
        let session = KnowledgeBaseSession::new(source.clone());

        session.set_query("karma").await;
        assert_eq!(session.submit_search().await, SearchOutcome::Ignored);
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_late_load_after_dispose_is_dropped() {
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .with_gate(gate.clone()),
        );
        let session = KnowledgeBaseSession::new(source.clone());

        let task = tokio::spawn({
            let session = session.clone();
            async move { session.activate().await }
        });
        wait_for_calls(&source, 3).await;

        session.dispose();
        gate.add_permits(1);
        task.await.unwrap();

        let state = session.snapshot().await;
        assert_eq!(state.status(), Status::Loading);
        assert!(state.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_late_search_after_dispose_is_discarded() {
        let gate = Arc::new(Semaphore::new(1));
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .with_search_results(karma_results())
                .with_gate(gate.clone()),
        );
        let session = KnowledgeBaseSession::new(source.clone());
        session.activate().await;

        // Hold the only permit so the search blocks.
        let permit = gate.clone().acquire_owned().await.unwrap();
        session.set_query("karma").await;
        let task = tokio::spawn({
            let session = session.clone();
            async move { session.submit_search().await }
        });
        wait_for_calls(&source, 4).await;

        session.dispose();
        drop(permit);

        assert_eq!(task.await.unwrap(), SearchOutcome::Discarded);
        assert_eq!(
            session.snapshot().await.catalog().philosophies,
            vec![stoicism()]
        );
    }

    #[tokio::test]
    async fn test_search_overtaken_by_reactivation_is_discarded() {
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .with_search_results(karma_results()),
        );
        let session = KnowledgeBaseSession::new(source.clone());
        session.activate().await;

        let gate = Arc::new(Semaphore::new(0));
        source.set_gate(Some(gate.clone()));
        session.set_query("karma").await;
        let search = tokio::spawn({
            let session = session.clone();
            async move { session.submit_search().await }
        });
        wait_for_calls(&source, 4).await;

        // The reload runs ungated and finishes while the search is held.
        source.set_gate(None);
        assert_eq!(session.activate().await, Status::Ready);

        gate.add_permits(1);
        assert_eq!(search.await.unwrap(), SearchOutcome::Discarded);

        let state = session.snapshot().await;
        assert_eq!(state.status(), Status::Ready);
        assert_eq!(state.catalog().philosophies, vec![stoicism()]);
        assert!(state.catalog().religions.is_empty());
    }

    #[tokio::test]
    async fn test_older_activation_resolving_last_is_dropped() {
        let epicureanism = Philosophy {
            id: 9,
            name: "Epicureanism".into(),
            origin: "Greece".into(),
            description: "...".into(),
            key_principles: vec!["Ataraxia".into()],
        };
        let gate = Arc::new(Semaphore::new(0));
        let source = Arc::new(
            MockSource::new()
                .with_philosophies(vec![stoicism()])
                .with_gate(gate.clone()),
        );
        let session = KnowledgeBaseSession::new(source.clone());

        let older = tokio::spawn({
            let session = session.clone();
            async move { session.activate().await }
        });
        wait_for_calls(&source, 3).await;

        source.set_gate(None);
        source.set_philosophies(vec![epicureanism.clone()]);
        assert_eq!(session.activate().await, Status::Ready);

        gate.add_permits(1);
        older.await.unwrap();

        let state = session.snapshot().await;
        assert_eq!(state.status(), Status::Ready);
        assert_eq!(state.catalog().philosophies, vec![epicureanism]);
        assert_eq!(source.call_count(), 6);
    }

    #[tokio::test]
    async fn test_disposed_session_does_not_activate() {
        let source = Arc::new(MockSource::new());
        let session = KnowledgeBaseSession::new(source.clone());
        session.dispose();

        assert_eq!(session.activate().await, Status::Idle);
        assert_eq!(source.call_count(), 0);
    }
}
