//! REST client for the hosted catalog service.
//!
//! The service speaks a PostgREST-flavored dialect: row filters ride in the
//! query string (`status=eq.approved`, `topics=cs.{"STEM"}`), tabular data
//! lives under `/rest/v1`, and images under `/storage/v1`. Every request
//! carries the publishable key in an `apikey` header; the bearer credential
//! is the signed-in session's access token when one has been wired in, the
//! publishable key otherwise.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::models::{
    ImageFile, ModerationStatus, NewAuthorRow, Project, ProjectDraft, TagCategory,
};

use super::{CatalogStore, ProjectQuery, StoreError};

/// Response shape requested for single-row reads and writes.
const OBJECT_ACCEPT: &str = "application/vnd.pgrst.object+json";

/// REST client for the hosted catalog service.
#[derive(Debug, Clone)]
pub struct RestCatalog {
    base_url: String,
    api_key: String,
    bucket: String,
    bearer: Option<String>,
    client: Client,
}

/// Project insert body: the draft plus the forced initial status.
#[derive(Serialize)]
struct InsertProjectBody<'a> {
    #[serde(flatten)]
    draft: &'a ProjectDraft,
    status: ModerationStatus,
}

impl RestCatalog {
    /// Create a client for the configured service.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            base_url: config.base_url,
            api_key: config.api_key,
            bucket: config.bucket,
            bearer: None,
            client: Client::new(),
        }
    }

    /// Create from `SHOWNTELL_*` environment variables.
    pub fn from_env() -> Result<Self, crate::config::ConfigError> {
        Ok(Self::new(CatalogConfig::from_env()?))
    }

    /// Replace the bearer credential.
    ///
    /// Pass a session's access token after sign-in so writes run with the
    /// signed-in user's permissions; pass `None` to fall back to the
    /// publishable key.
    pub fn set_bearer(&mut self, token: Option<String>) {
        self.bearer = token;
    }

    /// Build a request with the service's auth headers.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self
            .client
            .request(method, &url)
            .header("apikey", self.api_key.as_str());
        match &self.bearer {
            Some(token) => req.bearer_auth(token),
            None => req.bearer_auth(&self.api_key),
        }
    }

    /// Handle a response with a JSON body, converting HTTP errors to StoreError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::from_status(status, body))
        }
    }

    /// Handle a response whose body is ignored (201/204 writes).
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), StoreError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(StoreError::from_status(status, body))
        }
    }

    /// Translate a query into the service's filter parameters.
    fn filter_params(query: &ProjectQuery) -> Vec<(String, String)> {
        let select = if query.with_authors {
            "*,authors:project_authors(*)"
        } else {
            "*"
        };
        let mut params = vec![("select".to_string(), select.to_string())];

        if let Some(status) = query.status {
            params.push(("status".to_string(), format!("eq.{}", status.as_str())));
        }

        // Array containment, conjunctive within each category.
        for category in TagCategory::all() {
            let selected = query.tags.set(category);
            if selected.is_empty() {
                continue;
            }
            let quoted: Vec<String> = selected.iter().map(|tag| format!("\"{}\"", tag)).collect();
            params.push((
                category.field().to_string(),
                format!("cs.{{{}}}", quoted.join(",")),
            ));
        }

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push((
                "or".to_string(),
                format!("(name.ilike.*{}*,content.ilike.*{}*)", search, search),
            ));
        }

        // Newest submissions first; callers must not rely on this order.
        params.push(("order".to_string(), "created_at.desc".to_string()));
        params
    }
}

#[async_trait]
impl CatalogStore for RestCatalog {
    async fn query_projects(&self, query: &ProjectQuery) -> Result<Vec<Project>, StoreError> {
        let response = self
            .request(Method::GET, "/rest/v1/projects")
            .query(&Self::filter_params(query))
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn fetch_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let params = vec![
            ("select".to_string(), "*,authors:project_authors(*)".to_string()),
            ("id".to_string(), format!("eq.{}", id)),
            ("status".to_string(), "eq.approved".to_string()),
        ];
        let response = self
            .request(Method::GET, "/rest/v1/projects")
            .query(&params)
            .send()
            .await?;
        let rows: Vec<Project> = self.handle_response(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_project(&self, draft: &ProjectDraft) -> Result<Project, StoreError> {
        let body = InsertProjectBody {
            draft,
            status: ModerationStatus::Pending,
        };
        let response = self
            .request(Method::POST, "/rest/v1/projects")
            .header("Prefer", "return=representation")
            .header("Accept", OBJECT_ACCEPT)
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn update_project_status(
        &self,
        id: Uuid,
        status: ModerationStatus,
    ) -> Result<(), StoreError> {
        let response = self
            .request(Method::PATCH, "/rest/v1/projects")
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=minimal")
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    async fn insert_authors(&self, rows: &[NewAuthorRow]) -> Result<(), StoreError> {
        let response = self
            .request(Method::POST, "/rest/v1/project_authors")
            .header("Prefer", "return=minimal")
            .json(&rows)
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    async fn upload_image(&self, image: &ImageFile) -> Result<String, StoreError> {
        // Prefix with a fresh id so repeated file names cannot collide.
        let object_name = format!("{}-{}", Uuid::new_v4(), image.file_name);
        let response = self
            .request(
                Method::POST,
                &format!("/storage/v1/object/{}/{}", self.bucket, object_name),
            )
            .header("Content-Type", image.content_type.as_str())
            .body(image.bytes.clone())
            .send()
            .await?;
        self.handle_empty_response(response).await?;
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, object_name
        ))
    }
}
