//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use std::collections::BTreeSet;

use chrono::Utc;
use uuid::Uuid;

use showntell::app::PLACEHOLDER_IMAGE_URL;
use showntell::auth::Session;
use showntell::models::{Author, ModerationStatus, Project};

/// Install the test tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A minimal project with the given status and no tags.
pub fn sample_project(name: &str, status: ModerationStatus) -> Project {
    Project {
        id: Uuid::new_v4(),
        name: name.to_string(),
        summary: format!("{} in one line", name),
        content: format!("Everything about {}.", name),
        image_url: PLACEHOLDER_IMAGE_URL.to_string(),
        demo_url: None,
        topics: BTreeSet::new(),
        forms: BTreeSet::new(),
        audiences: BTreeSet::new(),
        status,
        created_at: Utc::now(),
        authors: Vec::new(),
    }
}

/// Attach tag sets to a project.
pub fn tagged(
    mut project: Project,
    topics: &[&str],
    forms: &[&str],
    audiences: &[&str],
) -> Project {
    project.topics = topics.iter().map(|t| t.to_string()).collect();
    project.forms = forms.iter().map(|f| f.to_string()).collect();
    project.audiences = audiences.iter().map(|a| a.to_string()).collect();
    project
}

/// An author row belonging to `project_id`.
pub fn sample_author(project_id: Uuid, name: &str, email: &str) -> Author {
    Author {
        id: Uuid::new_v4(),
        project_id,
        name: name.to_string(),
        title: None,
        email: email.to_string(),
        institution: None,
        created_at: Utc::now(),
    }
}

/// A session for `email`, admin or not.
pub fn session_for(email: &str, is_admin: bool) -> Session {
    Session {
        user_id: Uuid::new_v4(),
        email: email.to_string(),
        is_admin,
        access_token: format!("token-{}", Uuid::new_v4()),
    }
}
