//! Domain models for the project showcase.
//!
//! # Core Concepts
//!
//! ## Catalog entities
//!
//! - [`Project`]: An educator-built project in the directory. Visibility in
//!   public listings is governed by its [`ModerationStatus`].
//! - [`Author`]: A person behind a project. Every project has at least one;
//!   authors never exist without a parent project.
//!
//! ## Form-side types
//!
//! These never carry server-assigned fields (ids, timestamps, status):
//!
//! - [`ProjectDraft`] / [`AuthorDraft`]: What the submission form collects.
//! - [`NewAuthorRow`]: The author insert payload, linked to its parent
//!   project id.
//! - [`ImageFile`]: An image attachment awaiting upload.
//!
//! ## Classification
//!
//! Tags come from closed per-category vocabularies (see [`TagCategory`]);
//! free-form strings are rejected at the boundary. [`TagSelection`] holds the
//! transient per-category selections used by the filter sidebar and the
//! submission form.

mod author;
mod project;
mod tags;

pub use author::*;
pub use project::*;
pub use tags::*;
