//! REST client for the hosted task service.
//!
//! Speaks the service's two surfaces: the auth endpoints (`auth/v1/user`,
//! `auth/v1/logout`) and the row-store endpoints (`rest/v1/tasks`,
//! `rest/v1/task_collaborators`). Every request carries the project's anon
//! key plus the session's bearer token; row visibility is enforced by the
//! backend's row-level security, never by the client.

use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use url::Url;
use zudio_types::{NewCollaborator, NewTask, Task, TaskId, TaskPatch, User};

use super::{Backend, BackendError};

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the hosted project (e.g. `https://abc.example.co`).
    pub base_url: String,
    /// Project anon key, sent as the `apikey` header on every request.
    pub anon_key: String,
    /// Session access token, sent as a bearer token on every request.
    pub access_token: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// REST implementation of [`Backend`].
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
    anon_key: String,
    access_token: String,
}

impl HttpBackend {
    /// Creates a backend client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] if the base URL does not parse,
    /// or [`BackendError::Request`] if the HTTP client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self, BackendError> {
        let mut base = Url::parse(&config.base_url)?;
        // A trailing slash makes Url::join keep the full base path.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base,
            anon_key: config.anon_key.clone(),
            access_token: config.access_token.clone(),
        })
    }

    /// Resolves a relative endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base.join(path)?)
    }

    /// Attaches the anon key and bearer token to a request.
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
    }

    /// Maps a non-success response to [`BackendError::Api`].
    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl Backend for HttpBackend {
    async fn current_user(&self) -> Result<Option<User>, BackendError> {
        let url = self.endpoint("auth/v1/user")?;
        let response = self.authed(self.client.get(url)).send().await?;
        // The auth endpoint answers 401/403 for a missing or expired
        // session; that is "no session", not a failure.
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let response = Self::check(response).await?;
        let user = response
            .json::<User>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let url = self.endpoint("auth/v1/logout")?;
        let response = self.authed(self.client.post(url)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, BackendError> {
        let mut url = self.endpoint("rest/v1/tasks")?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");
        let response = self.authed(self.client.get(url)).send().await?;
        let response = Self::check(response).await?;
        response
            .json::<Vec<Task>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn insert_task(&self, new: &NewTask) -> Result<Task, BackendError> {
        let url = self.endpoint("rest/v1/tasks")?;
        let response = self
            .authed(self.client.post(url))
            .header("Prefer", "return=representation")
            .json(new)
            .send()
            .await?;
        let response = Self::check(response).await?;
        // The row store returns the inserted rows as an array.
        let mut rows = response
            .json::<Vec<Task>>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| BackendError::Decode("insert returned no rows".to_string()))
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> Result<(), BackendError> {
        let mut url = self.endpoint("rest/v1/tasks")?;
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"));
        let response = self
            .authed(self.client.patch(url))
            .json(patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn insert_collaborator(&self, new: &NewCollaborator) -> Result<(), BackendError> {
        let url = self.endpoint("rest/v1/task_collaborators")?;
        let response = self.authed(self.client.post(url)).json(new).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
