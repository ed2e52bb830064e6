use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person behind a project.
///
/// Authors belong to exactly one [`Project`](crate::models::Project) and are
/// inserted together with it at submission time; they never exist without a
/// parent. The hosted service stores them under `author_*` column names,
/// mapped here to plain field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub project_id: Uuid,
    #[serde(rename = "author_name")]
    pub name: String,
    #[serde(rename = "author_title")]
    pub title: Option<String>,
    #[serde(rename = "author_email")]
    pub email: String,
    #[serde(rename = "author_institution")]
    pub institution: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One author row as the submission form collects it.
///
/// All fields are plain strings bound to text inputs; empty optional fields
/// become `None` when converted to an insert payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorDraft {
    pub name: String,
    pub title: String,
    pub email: String,
    pub institution: String,
}

/// Insert payload for one author row, linked to its parent project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuthorRow {
    pub project_id: Uuid,
    #[serde(rename = "author_name")]
    pub name: String,
    #[serde(rename = "author_title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "author_email")]
    pub email: String,
    #[serde(rename = "author_institution", default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

impl NewAuthorRow {
    /// Build the insert payload for a draft author under `project_id`.
    pub fn from_draft(project_id: Uuid, draft: &AuthorDraft) -> Self {
        Self {
            project_id,
            name: draft.name.clone(),
            title: some_if_filled(&draft.title),
            email: draft.email.clone(),
            institution: some_if_filled(&draft.institution),
        }
    }
}

fn some_if_filled(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
