//! REST client for the notebook API.
//!
//! Wraps every `/api` endpoint using [`reqwest`]. Non-2xx responses become
//! [`ClientError::Api`] carrying the server's `error` message.

use notebook_core::types::DbId;
use notebook_db::models::note::{CreateNote, MoveNote, Note, NoteFilter, UpdateNote};
use notebook_db::models::notebook::{CreateNotebook, Notebook, UpdateNotebook};
use notebook_db::models::tag::TagCount;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ClientError;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub store: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for one notebook API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// * `base_url` - server root, e.g. `http://localhost:8000`. The `/api`
    ///   prefix is added per request.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    pub async fn health(&self) -> Result<Health, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        Self::parse_response(response).await
    }

    // ---- notebooks ----

    pub async fn list_notebooks(&self) -> Result<Vec<Notebook>, ClientError> {
        let response = self.client.get(self.url("/notebooks")).send().await?;
        Self::parse_response(response).await
    }

    pub async fn get_notebook(&self, id: DbId) -> Result<Notebook, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/notebooks/{id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn create_notebook(&self, input: &CreateNotebook) -> Result<Notebook, ClientError> {
        let response = self
            .client
            .post(self.url("/notebooks"))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn update_notebook(
        &self,
        id: DbId,
        input: &UpdateNotebook,
    ) -> Result<Notebook, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/notebooks/{id}")))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Deletes the notebook and all of its notes.
    pub async fn delete_notebook(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/notebooks/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- notes ----

    pub async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<Note>, ClientError> {
        let response = self
            .client
            .get(self.url("/notes"))
            .query(filter)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn get_note(&self, id: DbId) -> Result<Note, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/notes/{id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn create_note(&self, input: &CreateNote) -> Result<Note, ClientError> {
        let response = self
            .client
            .post(self.url("/notes"))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn update_note(&self, id: DbId, input: &UpdateNote) -> Result<Note, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/notes/{id}")))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Soft-delete: the note moves to the trash.
    pub async fn delete_note(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/notes/{id}")))
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub async fn move_note(&self, id: DbId, notebook_id: DbId) -> Result<Note, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/notes/{id}/move")))
            .json(&MoveNote { notebook_id })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- discovery ----

    pub async fn search_notes(&self, query: &str) -> Result<Vec<Note>, ClientError> {
        let response = self
            .client
            .get(self.url("/search"))
            .query(&[("q", query)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn list_tags(&self) -> Result<Vec<TagCount>, ClientError> {
        let response = self.client.get(self.url("/tags")).send().await?;
        Self::parse_response(response).await
    }

    pub async fn list_favorites(&self) -> Result<Vec<Note>, ClientError> {
        let response = self.client.get(self.url("/favorites")).send().await?;
        Self::parse_response(response).await
    }

    // ---- trash ----

    pub async fn list_trash(&self) -> Result<Vec<Note>, ClientError> {
        let response = self.client.get(self.url("/trash")).send().await?;
        Self::parse_response(response).await
    }

    pub async fn restore_note(&self, id: DbId) -> Result<Note, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/trash/{id}/restore")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a [`ClientError::Api`]
    /// with the server's error message on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
