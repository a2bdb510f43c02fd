//! Catalog aggregation: fan-out reads joined into one [`Catalog`].

use tracing::debug;

use crate::error::Result;
use crate::source::CatalogSource;
use crate::types::{Catalog, Validate};

/// Fetch the three collections concurrently and merge them.
///
/// Fails closed: the first failing request (transport error, non-success
/// status or malformed payload) fails the whole load, and the in-flight
/// sibling requests are dropped without their results being observed.
pub async fn load_catalog<S: CatalogSource + ?Sized>(source: &S) -> Result<Catalog> {
    let (philosophies, religions, astrological_systems) = tokio::try_join!(
        source.philosophies(),
        source.religions(),
        source.astrological_systems(),
    )?;

    philosophies.validate()?;
    religions.validate()?;
    astrological_systems.validate()?;

    let catalog = Catalog {
        philosophies,
        religions,
        astrological_systems,
    };
    debug!(records = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Run a server-side search.
///
/// Returns `Ok(None)` without issuing a request when the trimmed query is
/// empty. The trimmed query is what gets sent.
pub async fn search_catalog<S: CatalogSource + ?Sized>(
    source: &S,
    query: &str,
) -> Result<Option<Catalog>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }

    let results = source.search(query).await?;
    results.validate()?;

    let catalog = Catalog::from(results);
    debug!(query, records = catalog.len(), "search completed");
    Ok(Some(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::source::{Endpoint, MockSource};
    use crate::types::{Philosophy, Religion, SearchResults};

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
            practices: vec!["Puja".into(), "Yoga".into()],
        }
    }

    #[tokio::test]
    async fn test_load_merges_all_three_collections() {
        let source = MockSource::new()
            .with_philosophies(vec![stoicism()])
            .with_religions(vec![hinduism()]);

        let catalog = load_catalog(&source).await.unwrap();

        assert_eq!(source.call_count(), 3);
        assert_eq!(catalog.philosophies, vec![stoicism()]);
        assert_eq!(catalog.religions, vec![hinduism()]);
        assert!(catalog.astrological_systems.is_empty());
    }

    #[tokio::test]
    async fn test_load_fails_when_any_request_fails() {
        let source = MockSource::new()
            .with_philosophies(vec![stoicism()])
            .failing(Endpoint::AstrologicalSystems);

        let err = load_catalog(&source).await.unwrap_err();
        assert!(matches!(err, CatalogError::Server { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_record() {
        let mut nameless = stoicism();
        nameless.name = String::new();
        let source = MockSource::new().with_philosophies(vec![nameless]);

        let err = load_catalog(&source).await.unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { .. }));
    }

    #[tokio::test]
    async fn test_blank_search_issues_no_request() {
        let source = MockSource::new();

        assert!(search_catalog(&source, "").await.unwrap().is_none());
        assert!(search_catalog(&source, "  \t ").await.unwrap().is_none());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_sends_trimmed_query() {
        let source = MockSource::new().with_search_results(SearchResults {
            religions: vec![hinduism()],
            ..Default::default()
        });

        let catalog = search_catalog(&source, "  karma ").await.unwrap().unwrap();

        assert_eq!(source.queries(), vec!["karma"]);
        assert_eq!(catalog.religions, vec![hinduism()]);
        assert!(catalog.philosophies.is_empty());
    }
}
