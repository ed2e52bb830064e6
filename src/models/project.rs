use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Author, TagCategory};

/// An educator-built project in the directory.
///
/// Projects are submitted through the public form and hidden from the public
/// list until a moderator approves them. Tag sets come from the closed
/// per-category vocabularies in [`crate::models::TagCategory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    /// One-line summary shown on list cards.
    pub summary: String,
    /// Long-form description shown on the detail page.
    pub content: String,
    pub image_url: String,
    /// Link to a live demo, when the submitter provided one.
    pub demo_url: Option<String>,
    pub topics: BTreeSet<String>,
    pub forms: BTreeSet<String>,
    pub audiences: BTreeSet<String>,
    pub status: ModerationStatus,
    pub created_at: DateTime<Utc>,
    /// Author rows embedded by queries that request them.
    #[serde(default)]
    pub authors: Vec<Author>,
}

impl Project {
    /// The tag set for one category.
    pub fn tags(&self, category: TagCategory) -> &BTreeSet<String> {
        match category {
            TagCategory::Topic => &self.topics,
            TagCategory::Form => &self.forms,
            TagCategory::Audience => &self.audiences,
        }
    }
}

/// Moderation state governing a project's visibility in public listings.
///
/// - `Pending`: Awaiting review; hidden from the public list
/// - `Approved`: Visible in the public list and detail view
/// - `Rejected`: Hidden; kept for the record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Input for creating a project.
///
/// Carries no id, timestamp, or status: the server assigns the first two and
/// every new project is stored as `pending` no matter what the client sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub summary: String,
    pub content: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    pub topics: BTreeSet<String>,
    pub forms: BTreeSet<String>,
    pub audiences: BTreeSet<String>,
}

/// An image attachment captured from the submission form.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    /// Declared MIME type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Whether the declared content type is an image type.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}
