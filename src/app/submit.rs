//! Submission form state and the submit pipeline.

use thiserror::Error;

use crate::models::{
    AuthorDraft, ImageFile, NewAuthorRow, Project, ProjectDraft, TagCategory, TagSelection,
    UnknownTag,
};
use crate::store::{CatalogStore, StoreError};

/// Image shown for submissions without an attachment.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/800x400";

/// A local validation failure, reported before any network call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("project name is required")]
    MissingName,

    #[error("project description is required")]
    MissingContent,

    #[error("author {} is missing a name", .0 + 1)]
    AuthorMissingName(usize),

    #[error("author {} is missing an email", .0 + 1)]
    AuthorMissingEmail(usize),

    #[error("select at least one {} tag", .0.as_str())]
    EmptyCategory(TagCategory),
}

/// Why a submit attempt produced no project.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Local validation failed; no network call was made.
    #[error("submission blocked: {}", format_validation(.0))]
    Invalid(Vec<ValidationError>),

    /// A pipeline step failed. The form keeps its data for correction.
    #[error("{0}")]
    Store(#[from] StoreError),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// An attachment whose declared content type is not an image.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("attachment must be an image, got {0}")]
pub struct NotAnImage(pub String);

/// State behind the submission form.
///
/// Starts with exactly one blank author and keeps at least one at all
/// times. Text inputs bind to the public fields; authors, tags, and the
/// image attachment go through methods so their invariants hold.
pub struct SubmissionForm<S> {
    store: S,
    pub name: String,
    pub summary: String,
    pub content: String,
    pub demo_url: String,
    tags: TagSelection,
    authors: Vec<AuthorDraft>,
    image: Option<ImageFile>,
}

impl<S: CatalogStore> SubmissionForm<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            name: String::new(),
            summary: String::new(),
            content: String::new(),
            demo_url: String::new(),
            tags: TagSelection::new(),
            authors: vec![AuthorDraft::default()],
            image: None,
        }
    }

    pub fn authors(&self) -> &[AuthorDraft] {
        &self.authors
    }

    /// Mutable access to one author's fields.
    pub fn author_mut(&mut self, index: usize) -> Option<&mut AuthorDraft> {
        self.authors.get_mut(index)
    }

    /// Append a blank author row.
    pub fn add_author(&mut self) {
        self.authors.push(AuthorDraft::default());
    }

    /// Remove one author row.
    ///
    /// A no-op when only one author remains or the index is out of range;
    /// the list never drops below one entry.
    pub fn remove_author(&mut self, index: usize) {
        if self.authors.len() > 1 && index < self.authors.len() {
            self.authors.remove(index);
        }
    }

    pub fn tags(&self) -> &TagSelection {
        &self.tags
    }

    /// Idempotent tag toggle; unknown tags are rejected unchanged.
    pub fn toggle_tag(&mut self, category: TagCategory, tag: &str) -> Result<(), UnknownTag> {
        self.tags.toggle(category, tag)?;
        Ok(())
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    /// Attach an image, replacing any previous attachment.
    ///
    /// Files whose declared content type is not `image/*` are rejected and
    /// nothing is stored.
    pub fn attach_image(&mut self, file: ImageFile) -> Result<(), NotAnImage> {
        if !file.is_image() {
            return Err(NotAnImage(file.content_type));
        }
        self.image = Some(file);
        Ok(())
    }

    pub fn remove_image(&mut self) {
        self.image = None;
    }

    /// Synchronous checks run before any network call.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ValidationError::MissingName);
        }
        if self.content.trim().is_empty() {
            errors.push(ValidationError::MissingContent);
        }
        for (index, author) in self.authors.iter().enumerate() {
            if author.name.trim().is_empty() {
                errors.push(ValidationError::AuthorMissingName(index));
            }
            if author.email.trim().is_empty() {
                errors.push(ValidationError::AuthorMissingEmail(index));
            }
        }
        for category in TagCategory::all() {
            if self.tags.set(category).is_empty() {
                errors.push(ValidationError::EmptyCategory(category));
            }
        }
        errors
    }

    /// Run the submit pipeline.
    ///
    /// Validation failures abort before any store call. Otherwise: upload
    /// the image (or fall back to the placeholder URL), insert the project
    /// row with status forced to pending, then insert the author rows in one
    /// batch. The last two steps are separate requests with no transaction
    /// around them; an author-insert failure leaves the already-inserted
    /// project without authors, and no compensating delete is attempted.
    ///
    /// On success the form resets and the created project is returned. On
    /// any failure the form keeps its data.
    pub async fn submit(&mut self) -> Result<Project, SubmitError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }

        let image_url = match &self.image {
            Some(file) => self.store.upload_image(file).await?,
            None => PLACEHOLDER_IMAGE_URL.to_string(),
        };

        let draft = ProjectDraft {
            name: self.name.clone(),
            summary: self.summary.clone(),
            content: self.content.clone(),
            image_url,
            demo_url: (!self.demo_url.is_empty()).then(|| self.demo_url.clone()),
            topics: self.tags.topics.clone(),
            forms: self.tags.forms.clone(),
            audiences: self.tags.audiences.clone(),
        };
        let project = self.store.insert_project(&draft).await?;

        let rows: Vec<NewAuthorRow> = self
            .authors
            .iter()
            .map(|author| NewAuthorRow::from_draft(project.id, author))
            .collect();
        if let Err(err) = self.store.insert_authors(&rows).await {
            tracing::warn!(
                "author insert failed after project {} was created: {}",
                project.id,
                err
            );
            return Err(err.into());
        }

        tracing::info!("project {} submitted for review", project.id);
        self.reset();
        Ok(project)
    }

    /// Clear the form back to its initial state.
    pub fn reset(&mut self) {
        self.name.clear();
        self.summary.clear();
        self.content.clear();
        self.demo_url.clear();
        self.tags.clear();
        self.authors = vec![AuthorDraft::default()];
        self.image = None;
    }
}
