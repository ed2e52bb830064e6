//! In-memory catalog for tests and offline development.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::{
    Author, ImageFile, ModerationStatus, NewAuthorRow, Project, ProjectDraft, TagCategory,
};

use super::{CatalogStore, ProjectQuery, StoreError};

/// Which operations fail with an injected service error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureSwitches {
    pub query_projects: bool,
    pub insert_project: bool,
    pub insert_authors: bool,
    pub update_status: bool,
    pub upload_image: bool,
}

/// In-memory stand-in for the hosted catalog.
///
/// Mirrors the query semantics of [`RestCatalog`](super::RestCatalog):
/// conjunctive per-category tag containment, case-insensitive name/content
/// search, exact status matches, and pending-forced inserts. Results come
/// back in insertion order. Clones share the same state, so a test can hand
/// one handle to a controller and keep another for assertions; call counters
/// record how often each operation ran.
pub struct MemoryCatalog {
    inner: Arc<Inner>,
}

struct Inner {
    projects: Mutex<Vec<Project>>,
    authors: Mutex<Vec<Author>>,
    failures: Mutex<FailureSwitches>,
    query_calls: AtomicU64,
    insert_project_calls: AtomicU64,
    insert_author_calls: AtomicU64,
    update_status_calls: AtomicU64,
    upload_calls: AtomicU64,
}

impl Clone for MemoryCatalog {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                projects: Mutex::new(Vec::new()),
                authors: Mutex::new(Vec::new()),
                failures: Mutex::new(FailureSwitches::default()),
                query_calls: AtomicU64::new(0),
                insert_project_calls: AtomicU64::new(0),
                insert_author_calls: AtomicU64::new(0),
                update_status_calls: AtomicU64::new(0),
                upload_calls: AtomicU64::new(0),
            }),
        }
    }

    /// Place a project directly into the store, bypassing the pending rule.
    pub async fn seed_project(&self, project: Project) {
        self.inner.projects.lock().await.push(project);
    }

    /// Place an author row directly into the store.
    pub async fn seed_author(&self, author: Author) {
        self.inner.authors.lock().await.push(author);
    }

    /// Choose which operations fail until changed again.
    pub async fn set_failures(&self, switches: FailureSwitches) {
        *self.inner.failures.lock().await = switches;
    }

    /// Stored project by id, any status.
    pub async fn find_project(&self, id: Uuid) -> Option<Project> {
        self.inner
            .projects
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Stored author rows for one project.
    pub async fn authors_of(&self, project_id: Uuid) -> Vec<Author> {
        self.inner
            .authors
            .lock()
            .await
            .iter()
            .filter(|a| a.project_id == project_id)
            .cloned()
            .collect()
    }

    pub fn query_calls(&self) -> u64 {
        self.inner.query_calls.load(Ordering::Relaxed)
    }

    pub fn insert_project_calls(&self) -> u64 {
        self.inner.insert_project_calls.load(Ordering::Relaxed)
    }

    pub fn insert_author_calls(&self) -> u64 {
        self.inner.insert_author_calls.load(Ordering::Relaxed)
    }

    pub fn update_status_calls(&self) -> u64 {
        self.inner.update_status_calls.load(Ordering::Relaxed)
    }

    pub fn upload_calls(&self) -> u64 {
        self.inner.upload_calls.load(Ordering::Relaxed)
    }

    async fn failures(&self) -> FailureSwitches {
        *self.inner.failures.lock().await
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_query(project: &Project, query: &ProjectQuery) -> bool {
    if let Some(status) = query.status {
        if project.status != status {
            return false;
        }
    }
    for category in TagCategory::all() {
        if !query.tags.set(category).is_subset(project.tags(category)) {
            return false;
        }
    }
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        let in_name = project.name.to_lowercase().contains(&needle);
        let in_content = project.content.to_lowercase().contains(&needle);
        if !in_name && !in_content {
            return false;
        }
    }
    true
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn query_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, StoreError> {
        self.inner.query_calls.fetch_add(1, Ordering::Relaxed);
        if self.failures().await.query_projects {
            return Err(StoreError::Server("injected query failure".to_string()));
        }
        let projects = self.inner.projects.lock().await;
        let mut rows: Vec<Project> = projects
            .iter()
            .filter(|p| matches_query(p, query))
            .cloned()
            .collect();
        drop(projects);
        if query.with_authors {
            let authors = self.inner.authors.lock().await;
            for row in &mut rows {
                row.authors = authors
                    .iter()
                    .filter(|a| a.project_id == row.id)
                    .cloned()
                    .collect();
            }
        }
        Ok(rows)
    }

    async fn fetch_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        self.inner.query_calls.fetch_add(1, Ordering::Relaxed);
        if self.failures().await.query_projects {
            return Err(StoreError::Server("injected query failure".to_string()));
        }
        let found = self
            .inner
            .projects
            .lock()
            .await
            .iter()
            .find(|p| p.id == id && p.status == ModerationStatus::Approved)
            .cloned();
        match found {
            Some(mut project) => {
                project.authors = self.authors_of(project.id).await;
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }

    async fn insert_project(&self, draft: &ProjectDraft) -> Result<Project, StoreError> {
        self.inner.insert_project_calls.fetch_add(1, Ordering::Relaxed);
        if self.failures().await.insert_project {
            return Err(StoreError::Server("injected insert failure".to_string()));
        }
        let project = Project {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            summary: draft.summary.clone(),
            content: draft.content.clone(),
            image_url: draft.image_url.clone(),
            demo_url: draft.demo_url.clone(),
            topics: draft.topics.clone(),
            forms: draft.forms.clone(),
            audiences: draft.audiences.clone(),
            status: ModerationStatus::Pending,
            created_at: Utc::now(),
            authors: Vec::new(),
        };
        self.inner.projects.lock().await.push(project.clone());
        Ok(project)
    }

    async fn update_project_status(
        &self,
        id: Uuid,
        status: ModerationStatus,
    ) -> Result<(), StoreError> {
        self.inner.update_status_calls.fetch_add(1, Ordering::Relaxed);
        if self.failures().await.update_status {
            return Err(StoreError::Server("injected update failure".to_string()));
        }
        let mut projects = self.inner.projects.lock().await;
        match projects.iter_mut().find(|p| p.id == id) {
            Some(project) => {
                project.status = status;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("no project {}", id))),
        }
    }

    async fn insert_authors(&self, rows: &[NewAuthorRow]) -> Result<(), StoreError> {
        self.inner.insert_author_calls.fetch_add(1, Ordering::Relaxed);
        if self.failures().await.insert_authors {
            return Err(StoreError::Server(
                "injected author insert failure".to_string(),
            ));
        }
        // Foreign-key check: every row must reference an existing project.
        let projects = self.inner.projects.lock().await;
        for row in rows {
            if !projects.iter().any(|p| p.id == row.project_id) {
                return Err(StoreError::BadRequest(format!(
                    "no project {} for author row",
                    row.project_id
                )));
            }
        }
        drop(projects);
        let mut authors = self.inner.authors.lock().await;
        for row in rows {
            authors.push(Author {
                id: Uuid::new_v4(),
                project_id: row.project_id,
                name: row.name.clone(),
                title: row.title.clone(),
                email: row.email.clone(),
                institution: row.institution.clone(),
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn upload_image(&self, image: &ImageFile) -> Result<String, StoreError> {
        self.inner.upload_calls.fetch_add(1, Ordering::Relaxed);
        if self.failures().await.upload_image {
            return Err(StoreError::Server("injected upload failure".to_string()));
        }
        Ok(format!("memory://images/{}", image.file_name))
    }
}
