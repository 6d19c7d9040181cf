//! HTTP client for the visit service
//!
//! Two calls, no retries: list all visits and submit one visit. Any network
//! or status failure surfaces as a [`ClientError`].

use dinelog_common::{VisitDraft, VisitRecord};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Default API base URL
pub const DEFAULT_SERVER: &str = "http://localhost:5001/api";

#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, timeout, or body decoding failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error status
    #[error("Visit service returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Visit service client
#[derive(Debug, Clone)]
pub struct VisitClient {
    http: reqwest::Client,
    base_url: String,
}

impl VisitClient {
    /// Client for the API rooted at `base_url`, e.g. `http://localhost:5001/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn restaurants_url(&self) -> String {
        format!("{}/restaurants", self.base_url)
    }

    /// All visits, newest first
    pub async fn list_visits(&self) -> Result<Vec<VisitRecord>> {
        let response = self.http.get(self.restaurants_url()).send().await?;
        let visits: Vec<VisitRecord> = check(response).await?.json().await?;
        debug!("Fetched {} visits", visits.len());
        Ok(visits)
    }

    /// Store a visit and return it with its assigned id
    pub async fn submit_visit(&self, draft: &VisitDraft) -> Result<VisitRecord> {
        let response = self
            .http
            .post(self.restaurants_url())
            .json(draft)
            .send()
            .await?;
        let visit: VisitRecord = check(response).await?.json().await?;
        debug!("Stored visit {}", visit.id);
        Ok(visit)
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.message)
        .unwrap_or(text);

    Err(ClientError::Status { status, message })
}
