//! Rust client for the wisdom traditions catalog
//!
//! Fetches philosophy, religion and astrology records from the catalog API,
//! holds them in an explicit view state, and renders them as tab-scoped
//! cards with a keyword search.
//!
//! ```text
//! CatalogSource ──▶ aggregator (3 concurrent reads, fail closed)
//!                        │
//!                        ▼
//!   user actions ──▶ KnowledgeBaseSession ──Action──▶ KnowledgeBase
//!                                                        │
//!                                                        ▼
//!                                          render (active tab) ──▶ Card
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wisdom_catalog::{CatalogClient, CatalogConfig, Category, KnowledgeBaseSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CatalogClient::new(CatalogConfig::default())?;
//! let session = KnowledgeBaseSession::new(Arc::new(client));
//!
//! session.activate().await;
//! session.select_tab(Category::Religion).await;
//!
//! session.set_query("karma").await;
//! session.submit_search().await;
//!
//! println!("{}", session.render_text().await);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cards;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod source;
pub mod state;
pub mod types;

// Re-export main types
pub use aggregator::{load_catalog, search_catalog};
pub use cards::{Card, CardSection};
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use render::{render_cards, render_page, render_page_text, render_tab};
pub use session::{KnowledgeBaseSession, SearchOutcome};
pub use source::{CatalogClient, CatalogSource, Endpoint, MockSource};
pub use state::{Action, Category, KnowledgeBase, Status};
pub use types::*;
