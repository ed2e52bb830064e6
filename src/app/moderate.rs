//! Approval dashboard: status tabs and moderation actions.

use uuid::Uuid;

use crate::models::{ModerationStatus, Project};
use crate::store::{CatalogStore, ProjectQuery, StoreError};

use super::{QueryTicket, Sequencer};

/// Error banner shown when the dashboard list cannot be loaded.
const LOAD_ERROR: &str = "Failed to load projects. Please try again.";

/// Dashboard tab selecting which projects to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Status constraint for the store query; `None` on the All tab.
    pub fn status(&self) -> Option<ModerationStatus> {
        match self {
            Self::All => None,
            Self::Pending => Some(ModerationStatus::Pending),
            Self::Approved => Some(ModerationStatus::Approved),
            Self::Rejected => Some(ModerationStatus::Rejected),
        }
    }
}

/// State behind the approval dashboard.
///
/// Lists projects by moderation status, starting on the Pending tab, and
/// applies approve/reject/reset actions as single-row updates.
pub struct ModerationDesk<S> {
    store: S,
    filter: StatusFilter,
    projects: Vec<Project>,
    error: Option<String>,
    loading: bool,
    sequencer: Sequencer,
}

impl<S: CatalogStore> ModerationDesk<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            filter: StatusFilter::Pending,
            projects: Vec::new(),
            error: None,
            loading: false,
            sequencer: Sequencer::default(),
        }
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
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

    /// Switch tabs and re-fetch the list.
    pub async fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.refresh().await;
    }

    /// Snapshot the active tab into a sequenced refresh.
    pub fn begin_refresh(&mut self) -> QueryTicket {
        self.loading = true;
        let query = ProjectQuery {
            status: self.filter.status(),
            ..ProjectQuery::default()
        };
        self.sequencer.issue(query)
    }

    /// Apply a finished refresh, discarding out-of-order results.
    ///
    /// Unlike the public list, a failed refresh keeps the last good rows on
    /// screen alongside the error banner; moderators lose nothing.
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
                tracing::warn!("moderation list fetch failed: {}", err);
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

    /// Apply a moderation action to one project.
    ///
    /// On success only the matching local entry is patched; the list is not
    /// re-fetched, so the row may disagree with the active tab until the
    /// next refresh (an approved project stays visible on the Pending tab,
    /// for example). On failure local state is untouched, an error banner is
    /// set, and the transition is not retried.
    pub async fn set_status(&mut self, id: Uuid, status: ModerationStatus) {
        self.error = None;
        match self.store.update_project_status(id, status).await {
            Ok(()) => {
                for project in &mut self.projects {
                    if project.id == id {
                        project.status = status;
                    }
                }
                tracing::info!("project {} set to {}", id, status.as_str());
            }
            Err(err) => {
                tracing::warn!("status update for {} failed: {}", id, err);
                self.error = Some(format!("Failed to update project: {}", err));
            }
        }
    }
}
