//! Application core for the SHOW'N TELL educator project showcase.
//!
//! The showcase is a directory of educator-built projects backed by a hosted
//! data/auth/storage service. This crate is the headless part of the site:
//! typed domain models, a client for the hosted service, and the state
//! machines behind each view. Rendering and routing live in the embedding
//! application.
//!
//! # Layout
//!
//! - [`models`]: catalog entities ([`models::Project`], [`models::Author`]),
//!   moderation status, tag vocabularies, and form drafts.
//! - [`store`]: the [`store::CatalogStore`] abstraction over the hosted
//!   service, with [`store::RestCatalog`] for production and
//!   [`store::MemoryCatalog`] for tests.
//! - [`auth`]: session handling against the hosted identity provider and the
//!   [`auth::SessionGuard`] in front of admin views.
//! - [`app`]: view controllers for browsing, submission, moderation, and the
//!   project detail page.
//! - [`config`]: environment-driven connection settings.

pub mod app;
pub mod auth;
pub mod config;
pub mod models;
pub mod store;

pub use config::{CatalogConfig, ConfigError};
