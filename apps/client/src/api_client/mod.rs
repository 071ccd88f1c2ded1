//! Screening API client. Every request to the remote API goes through here.
//!
//! The server owns parsing, scoring and persistence. This module only moves
//! records across the wire and turns bad answers into typed `ClientError`s.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, StatusCode};
use tracing::{debug, warn};

use crate::errors::ClientError;
use crate::models::upload::FIELD_RESUME;
use crate::models::{Candidate, DeleteResponse, UploadPayload, UploadResponse, UploadResult};

const CANDIDATES_PATH: &str = "/candidates/filter";
const UPLOAD_PATH: &str = "/upload";

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch candidates";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete candidate";

/// The three exchanges the client has with the screening API.
///
/// Carried by controllers as `Arc<dyn ScreeningApi>` so tests can swap in a fake.
#[async_trait]
pub trait ScreeningApi: Send + Sync {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, ClientError>;

    async fn delete_candidate(&self, id: i64) -> Result<(), ClientError>;

    async fn upload_resume(&self, payload: UploadPayload) -> Result<UploadResult, ClientError>;
}

/// `ScreeningApi` over HTTP.
#[derive(Clone)]
pub struct HttpScreeningApi {
    client: Client,
    base_url: String,
}

impl HttpScreeningApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ScreeningApi for HttpScreeningApi {
    /// GET /candidates/filter
    async fn list_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
        let response = self.client.get(self.url(CANDIDATES_PATH)).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Candidate list returned {}", status);
            return Err(ClientError::Fetch(FETCH_FAILED_MESSAGE.to_string()));
        }

        let candidates: Vec<Candidate> = response.json().await?;
        debug!("Fetched {} candidates", candidates.len());
        Ok(candidates)
    }

    /// DELETE /candidates/{id}
    ///
    /// The server reports failures in the body (`success: false`) alongside a 500,
    /// so the body is read before the status is judged.
    async fn delete_candidate(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/candidates/{id}")))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let parsed = match serde_json::from_str::<DeleteResponse>(&body) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => return Err(ClientError::Parse(e)),
            Err(_) => {
                return Err(ClientError::Delete(format!(
                    "{DELETE_FAILED_MESSAGE} (status {})",
                    status.as_u16()
                )))
            }
        };

        if !parsed.success {
            let message = parsed
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DELETE_FAILED_MESSAGE.to_string());
            return Err(ClientError::Delete(message));
        }

        debug!("Deleted candidate {}", id);
        Ok(())
    }

    /// POST /upload
    async fn upload_resume(&self, payload: UploadPayload) -> Result<UploadResult, ClientError> {
        let UploadPayload { fields, resume } = payload;

        let mut form = multipart::Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        let length = resume.bytes.len() as u64;
        let part = multipart::Part::stream_with_length(resume.bytes, length)
            .file_name(resume.file_name);
        form = form.part(FIELD_RESUME, part);

        let response = self
            .client
            .post(self.url(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upload returned {}: {}", status, body);
            return Err(upload_status_error(status, &body));
        }

        let result = response.json::<UploadResponse>().await?.into_result()?;
        debug!(
            "Upload scored: name={}, match_score={}, keywords={}",
            result.name,
            result.match_score,
            result.matched_keywords.len()
        );
        Ok(result)
    }
}

/// Prefers the server's own `error` text; falls back to the bare status.
fn upload_status_error(status: StatusCode, body: &str) -> ClientError {
    match serde_json::from_str::<UploadResponse>(body) {
        Ok(UploadResponse::Rejected { error }) if !error.trim().is_empty() => {
            ClientError::Upload(error)
        }
        _ => ClientError::Upload(format!("HTTP error! status: {}", status.as_u16())),
    }
}
