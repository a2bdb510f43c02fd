//! Knowledge-base view state and its reducer
//!
//! [`KnowledgeBase`] is the aggregated record: the three collections plus
//! status, error message, active category and search query. It is only
//! mutated through [`KnowledgeBase::apply`].
//!
//! ```text
//!   Idle ──LoadStarted──▶ Loading ──LoadSucceeded──▶ Ready
//!                           │                          │ SearchSucceeded / SearchFailed
//!                           └──LoadFailed──▶ Error     │ (status unchanged)
//!   Ready / Error ──LoadStarted──▶ Loading
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::types::Catalog;

/// Message shown when the initial load fails
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Message shown when a search fails
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed";

/// Category tabs of the knowledge base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Philosophy,
    Religion,
    Astrology,
}

impl Category {
    /// All categories in tab order
    pub const ALL: [Category; 3] = [Category::Philosophy, Category::Religion, Category::Astrology];

    /// Stable tag used by controls and the CLI
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Philosophy => "philosophy",
            Category::Religion => "religion",
            Category::Astrology => "astrology",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Philosophy => "Philosophy",
            Category::Religion => "Religion",
            Category::Astrology => "Astrology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a tag names no category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "philosophy" => Ok(Category::Philosophy),
            "religion" => Ok(Category::Religion),
            "astrology" => Ok(Category::Astrology),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Load status. Exactly one holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadStarted,
    LoadSucceeded(Catalog),
    LoadFailed,
    SearchSucceeded(Catalog),
    SearchFailed,
    TabSelected(Category),
    QueryChanged(String),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::LoadStarted => "load_started",
            Action::LoadSucceeded(_) => "load_succeeded",
            Action::LoadFailed => "load_failed",
            Action::SearchSucceeded(_) => "search_succeeded",
            Action::SearchFailed => "search_failed",
            Action::TabSelected(_) => "tab_selected",
            Action::QueryChanged(_) => "query_changed",
        }
    }
}

/// The aggregated record behind the knowledge-base view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    catalog: Catalog,
    status: Status,
    error: Option<String>,
    active: Category,
    query: String,
}

impl KnowledgeBase {
    /// Empty state, status `Idle`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Current error message, from either a failed load or a failed search
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Error message from a failed search while content is still shown
    pub fn search_error(&self) -> Option<&str> {
        match self.status {
            Status::Ready => self.error(),
            _ => None,
        }
    }

    pub fn active(&self) -> Category {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Apply a transition. Returns `false` when the action is not valid in
    /// the current status and was ignored.
    ///
    /// A failed load clears all three collections. A failed search keeps
    /// the collections currently shown.
    pub fn apply(&mut self, action: Action) -> bool {
        let name = action.name();
        let accepted = match action {
            Action::LoadStarted => {
                self.status = Status::Loading;
                self.error = None;
                true
            }
            Action::LoadSucceeded(catalog) if self.status == Status::Loading => {
                self.catalog = catalog;
                self.status = Status::Ready;
                self.error = None;
                true
            }
            Action::LoadFailed if self.status == Status::Loading => {
                self.catalog = Catalog::default();
                self.status = Status::Error;
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
                true
            }
            Action::SearchSucceeded(catalog) if self.status == Status::Ready => {
                self.catalog = catalog;
                self.error = None;
                true
            }
            Action::SearchFailed if self.status == Status::Ready => {
                self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
                true
            }
            Action::TabSelected(category) => {
                self.active = category;
                true
            }
            Action::QueryChanged(query) => {
                self.query = query;
                true
            }
            _ => false,
        };

        if !accepted {
            debug!(action = name, status = ?self.status, "ignored transition");
        }
        accepted
    }
}
