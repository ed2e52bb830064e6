//! Public project list: tag filters plus free-text search.

use crate::models::{Project, TagCategory, TagSelection, UnknownTag};
use crate::store::{CatalogStore, ProjectQuery, StoreError};

use super::{QueryTicket, Sequencer};

/// Error banner shown when the list cannot be loaded.
const LOAD_ERROR: &str = "Failed to load projects. Please try again later.";

/// State behind the public project list.
///
/// Only approved projects are ever requested. Tag filters are conjunctive
/// per category; the search text matches name or content. Filters and search
/// have independent clear affordances: clearing one never touches the other.
pub struct ProjectBrowser<S> {
    store: S,
    filters: TagSelection,
    search: String,
    projects: Vec<Project>,
    error: Option<String>,
    loading: bool,
    sequencer: Sequencer,
}

impl<S: CatalogStore> ProjectBrowser<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            filters: TagSelection::new(),
            search: String::new(),
            projects: Vec::new(),
            error: None,
            loading: false,
            sequencer: Sequencer::default(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filters(&self) -> &TagSelection {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Idempotent tag toggle; unknown tags are rejected unchanged.
    pub fn toggle_tag(&mut self, category: TagCategory, tag: &str) -> Result<(), UnknownTag> {
        self.filters.toggle(category, tag)?;
        Ok(())
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Empty every filter category. The search text stays.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Empty the search text. Filter selections stay.
    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Snapshot the current filters and search into a sequenced refresh.
    pub fn begin_refresh(&mut self) -> QueryTicket {
        self.loading = true;
        let query = ProjectQuery {
            tags: self.filters.clone(),
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            ..ProjectQuery::approved()
        };
        self.sequencer.issue(query)
    }

    /// Apply a finished refresh. Results older than the newest applied one
    /// are discarded, so a stale response cannot overwrite fresher state.
    ///
    /// On failure the previous results are discarded and an error banner is
    /// set; nothing is retried.
    pub fn apply(&mut self, ticket: QueryTicket, result: Result<Vec<Project>, StoreError>) {
        if self.sequencer.is_latest(&ticket) {
            self.loading = false;
        }
        if !self.sequencer.admit(&ticket) {
            return;
        }
        match result {
            Ok(projects) => {
                self.projects = projects;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("project query failed: {}", err);
                self.projects.clear();
                self.error = Some(LOAD_ERROR.to_string());
            }
        }
    }

    /// Issue one refresh against the store and apply it.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let result = self.store.query_projects(ticket.query()).await;
        self.apply(ticket, result);
    }
}
