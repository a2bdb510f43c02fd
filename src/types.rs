//! Record schemas for the wisdom traditions catalog API
//!
//! Wire field names are snake_case and match the JSON served by the
//! catalog backend. Every field is required; serde rejects payloads with
//! missing or mistyped fields, and [`Validate`] rejects records that parse
//! but could not be rendered meaningfully.

use serde::Deserialize;

use crate::error::{CatalogError, Result};

/// Boundary validation for records received from the API
pub trait Validate {
    /// Check the record, returning `InvalidRecord` on the first problem
    fn validate(&self) -> Result<()>;
}

fn require_name(kind: &'static str, id: i64, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::InvalidRecord {
            kind,
            id,
            reason: "name is blank".to_string(),
        });
    }
    Ok(())
}

// ==================== Records ====================

/// A philosophical tradition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Philosophy {
    pub id: i64,
    pub name: String,
    pub origin: String,
    pub description: String,
    /// Key principles, in the order the API returns them
    pub key_principles: Vec<String>,
}

impl Validate for Philosophy {
    fn validate(&self) -> Result<()> {
        require_name("philosophy", self.id, &self.name)
    }
}

/// A religious tradition
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Religion {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub sacred_texts: Vec<String>,
    pub practices: Vec<String>,
}

impl Validate for Religion {
    fn validate(&self) -> Result<()> {
        require_name("religion", self.id, &self.name)
    }
}

/// An astrological system
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AstrologicalSystem {
    pub id: i64,
    pub name: String,
    pub origin: String,
    pub description: String,
    pub key_concepts: Vec<String>,
    pub zodiac_signs: Vec<String>,
}

impl Validate for AstrologicalSystem {
    fn validate(&self) -> Result<()> {
        require_name("astrological system", self.id, &self.name)
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(|record| record.validate())
    }
}

// ==================== Aggregates ====================

/// Response body of `GET /search/`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchResults {
    pub philosophies: Vec<Philosophy>,
    pub religions: Vec<Religion>,
    pub astrological_systems: Vec<AstrologicalSystem>,
}

impl Validate for SearchResults {
    fn validate(&self) -> Result<()> {
        self.philosophies.validate()?;
        self.religions.validate()?;
        self.astrological_systems.validate()
    }
}

/// The three collections held by the client.
///
/// Each sequence is only ever replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub philosophies: Vec<Philosophy>,
    pub religions: Vec<Religion>,
    pub astrological_systems: Vec<AstrologicalSystem>,
}

impl Catalog {
    /// True when all three sequences are empty
    pub fn is_empty(&self) -> bool {
        self.philosophies.is_empty()
            && self.religions.is_empty()
            && self.astrological_systems.is_empty()
    }

    /// Total number of records across the three sequences
    pub fn len(&self) -> usize {
        self.philosophies.len() + self.religions.len() + self.astrological_systems.len()
    }
}

impl From<SearchResults> for Catalog {
    fn from(results: SearchResults) -> Self {
        Self {
            philosophies: results.philosophies,
            religions: results.religions,
            astrological_systems: results.astrological_systems,
        }
    }
}
