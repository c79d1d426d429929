//! REST client for the intern-lifecycle backend.
//!
//! Direct HTTP via reqwest against the `/api/v1` surface. List endpoints
//! historically return either a bare JSON array or a paginated
//! `{ "items": [...] }` wrapper depending on backend version, so every
//! list fetch goes through [`Paginated`].
//!
//! The [`BoardApi`] trait is the seam between the board orchestration and
//! the network: production uses [`ApiClient`], tests use stubs.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    Account, AccountRole, AttendanceRecord, Config, DsuEntry, InternProfile, Project, Task,
};

/// Request timeout, matching the frontend client this replaces.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// List responses are either a bare array or `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Paginated<T> {
    Items(Vec<T>),
    Page { items: Vec<T> },
}

impl<T> Paginated<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Paginated::Items(items) | Paginated::Page { items } => items,
        }
    }
}

/// Read/write surface the board needs from the backend.
#[async_trait]
pub trait BoardApi: Send + Sync {
    async fn fetch_intern_profiles(&self) -> Result<Vec<InternProfile>, ApiError>;
    async fn fetch_accounts(&self, role: AccountRole) -> Result<Vec<Account>, ApiError>;
    async fn fetch_projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn fetch_dsu_entries(&self) -> Result<Vec<DsuEntry>, ApiError>;
    async fn fetch_attendance(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ApiError>;
    async fn mark_attendance(&self, record: &AttendanceRecord) -> Result<(), ApiError>;
}

/// HTTP implementation of [`BoardApi`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.post(format!("{}{}", self.base_url, path));
        if let Some(ref token) = self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ApiError> {
        let response = self.get(path).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<Paginated<T>>().await?.into_vec())
    }
}

#[async_trait]
impl BoardApi for ApiClient {
    async fn fetch_intern_profiles(&self) -> Result<Vec<InternProfile>, ApiError> {
        self.get_list("/interns/", &[]).await
    }

    async fn fetch_accounts(&self, role: AccountRole) -> Result<Vec<Account>, ApiError> {
        self.get_list("/users", &[("role", role.as_str())]).await
    }

    async fn fetch_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_list("/projects/", &[]).await
    }

    async fn fetch_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get_list("/tasks/", &[]).await
    }

    async fn fetch_dsu_entries(&self) -> Result<Vec<DsuEntry>, ApiError> {
        self.get_list("/dsu-entries/", &[]).await
    }

    async fn fetch_attendance(&self, date: NaiveDate) -> Result<Vec<AttendanceRecord>, ApiError> {
        let date_key = date.format("%Y-%m-%d").to_string();
        self.get_list("/office-attendance", &[("date", date_key.as_str())])
            .await
    }

    async fn mark_attendance(&self, record: &AttendanceRecord) -> Result<(), ApiError> {
        let response = self.post("/office-attendance").json(record).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
