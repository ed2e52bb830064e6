//! Project detail loading.

use uuid::Uuid;

use crate::models::Project;
use crate::store::{CatalogStore, StoreError};

/// Error text shown when the detail fetch fails outright.
const LOAD_ERROR: &str = "Failed to load project details. Please try again later.";

/// What the detail page should render.
#[derive(Debug, Clone)]
pub enum DetailView {
    Loading,
    Ready(Project),
    /// Unknown id, or a project that is not approved. Rendered as its own
    /// display, distinct from a service failure.
    NotFound,
    Failed(String),
}

/// State behind the project detail page.
pub struct ProjectDetail<S> {
    store: S,
    view: DetailView,
}

impl<S: CatalogStore> ProjectDetail<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            view: DetailView::Loading,
        }
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }

    /// Fetch one approved project, replacing any previous state.
    pub async fn load(&mut self, id: Uuid) {
        self.view = DetailView::Loading;
        self.view = match self.store.fetch_project(id).await {
            Ok(Some(project)) => DetailView::Ready(project),
            Ok(None) => DetailView::NotFound,
            Err(StoreError::NotFound(_)) => DetailView::NotFound,
            Err(err) => {
                tracing::warn!("project {} fetch failed: {}", id, err);
                DetailView::Failed(LOAD_ERROR.to_string())
            }
        };
    }
}
