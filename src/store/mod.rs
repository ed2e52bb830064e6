//! Access to the hosted catalog service.
//!
//! The showcase keeps no data of its own: projects, authors, and images all
//! live in a hosted service consumed through [`CatalogStore`].
//! [`RestCatalog`] talks to the real service; [`MemoryCatalog`] mirrors its
//! query semantics in process for tests and offline work.

mod memory;
mod rest;

pub use memory::{FailureSwitches, MemoryCatalog};
pub use rest::RestCatalog;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    ImageFile, ModerationStatus, NewAuthorRow, Project, ProjectDraft, TagSelection,
};

/// Errors from the hosted catalog service.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: sign-in required or key invalid")]
    Unauthorized,

    #[error("Service error: {0}")]
    Server(String),
}

impl StoreError {
    /// Map an error response status and body to the matching variant.
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::BAD_REQUEST => Self::BadRequest(body),
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            _ => Self::Server(format!("{}: {}", status, body)),
        }
    }
}

/// A filtered project listing request.
///
/// Tag constraints are conjunctive per category: a project matches only when
/// its tag set contains every selected tag. The free-text search matches the
/// name or the long-form content, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    /// Exact status constraint; `None` lists every status.
    pub status: Option<ModerationStatus>,
    /// Per-category conjunctive tag constraints.
    pub tags: TagSelection,
    /// Case-insensitive substring matched against name or content.
    pub search: Option<String>,
    /// Embed author rows in the response.
    pub with_authors: bool,
}

impl ProjectQuery {
    /// The public-list baseline: approved projects with their authors.
    pub fn approved() -> Self {
        Self {
            status: Some(ModerationStatus::Approved),
            with_authors: true,
            ..Self::default()
        }
    }
}

/// Operations the hosted catalog service provides.
///
/// Writes are individual requests with no cross-request transaction: callers
/// that insert a project and then its authors own the consistency gap in
/// between.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List projects matching `query`.
    async fn query_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, StoreError>;

    /// Fetch one approved project with its authors.
    ///
    /// Returns `None` when the id is missing or the project is not approved.
    async fn fetch_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Insert a project row. The stored status is always `pending`.
    async fn insert_project(&self, draft: &ProjectDraft) -> Result<Project, StoreError>;

    /// Set one project's moderation status.
    async fn update_project_status(
        &self,
        id: Uuid,
        status: ModerationStatus,
    ) -> Result<(), StoreError>;

    /// Insert author rows in one batch.
    async fn insert_authors(&self, rows: &[NewAuthorRow]) -> Result<(), StoreError>;

    /// Upload an image and return its durable public URL.
    async fn upload_image(&self, image: &ImageFile) -> Result<String, StoreError>;
}
