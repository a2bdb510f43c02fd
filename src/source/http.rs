//! HTTP client for the catalog API

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::traits::{CatalogSource, Endpoint};
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::types::{AstrologicalSystem, Philosophy, Religion, SearchResults};

/// HTTP client for the catalog API
///
/// # Example
///
/// ```rust,no_run
/// use wisdom_catalog::{CatalogClient, CatalogConfig, CatalogSource};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CatalogClient::new(CatalogConfig::new("http://localhost:8001"))?;
///
/// let philosophies = client.philosophies().await?;
/// let results = client.search("karma").await?;
/// # Ok(())
/// # }
/// ```
pub struct CatalogClient {
    config: CatalogConfig,
    client: Client,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let config = config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url, endpoint.path())
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?query={}",
            self.url(Endpoint::Search),
            urlencoding::encode(query)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Server {
                status,
                message: body,
            });
        }

        // Decode via serde_json so malformed payloads surface as `Json`
        // rather than as a transport error.
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn philosophies(&self) -> Result<Vec<Philosophy>> {
        self.get_json(&self.url(Endpoint::Philosophies)).await
    }

    async fn religions(&self) -> Result<Vec<Religion>> {
        self.get_json(&self.url(Endpoint::Religions)).await
    }

    async fn astrological_systems(&self) -> Result<Vec<AstrologicalSystem>> {
        self.get_json(&self.url(Endpoint::AstrologicalSystems)).await
    }

    async fn search(&self, query: &str) -> Result<SearchResults> {
        self.get_json(&self.search_url(query)).await
    }
}
