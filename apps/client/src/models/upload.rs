use std::path::Path;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ClientError;

/// Role-select value that switches the effective role to the free-text field.
pub const CUSTOM_ROLE_SENTINEL: &str = "custom";

/// Multipart field names expected by `POST /upload`.
pub const FIELD_RESUME: &str = "resume";
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_CUSTOM_ROLE: &str = "customRole";
pub const FIELD_JOB_DESC: &str = "job_desc";

/// A resume picked by the user, held in memory until it is posted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a resume from disk. The label is the final path component.
    pub async fn load(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ClientError::Validation(format!("'{}' is not a file path", path.display()))
            })?;
        Ok(Self::new(file_name, bytes))
    }
}

/// Snapshot of the upload form at the moment it is submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub resume: Option<SelectedFile>,
    pub name: String,
    pub email: String,
    /// Role-select value; `"custom"` defers to `custom_role`.
    pub role: String,
    pub custom_role: String,
    pub job_desc: String,
}

/// The multipart body actually sent: ordered text fields plus the resume file.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPayload {
    pub fields: Vec<(String, String)>,
    pub resume: SelectedFile,
}

impl UploadPayload {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set(&mut self, name: &str, value: String) {
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    fn remove(&mut self, name: &str) {
        self.fields.retain(|(key, _)| key != name);
    }
}

impl UploadForm {
    /// Converts the snapshot into the outgoing payload.
    ///
    /// A `"custom"` role is replaced by the free-text role when that text is non-empty.
    /// `customRole` itself never leaves the client.
    pub fn into_payload(self) -> Result<UploadPayload, ClientError> {
        let resume = self
            .resume
            .ok_or_else(|| ClientError::Validation("Please select a resume file".to_string()))?;

        let mut payload = UploadPayload {
            fields: vec![
                (FIELD_NAME.to_string(), self.name),
                (FIELD_EMAIL.to_string(), self.email),
                (FIELD_ROLE.to_string(), self.role),
                (FIELD_CUSTOM_ROLE.to_string(), self.custom_role),
                (FIELD_JOB_DESC.to_string(), self.job_desc),
            ],
            resume,
        };

        if payload.field(FIELD_ROLE) == Some(CUSTOM_ROLE_SENTINEL) {
            if let Some(custom) = payload
                .field(FIELD_CUSTOM_ROLE)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
            {
                payload.set(FIELD_ROLE, custom);
            }
        }
        payload.remove(FIELD_CUSTOM_ROLE);

        Ok(payload)
    }
}

/// Successful scoring result from `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    pub match_score: f64,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
}

/// Either shape the upload endpoint can answer with. A non-blank `error` wins;
/// a blank one counts as absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Rejected {
        #[serde(deserialize_with = "non_blank")]
        error: String,
    },
    Scored(UploadResult),
}

fn non_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    if text.trim().is_empty() {
        return Err(serde::de::Error::custom("blank error text"));
    }
    Ok(text)
}

impl UploadResponse {
    pub fn into_result(self) -> Result<UploadResult, ClientError> {
        match self {
            UploadResponse::Rejected { error } => Err(ClientError::Upload(error)),
            UploadResponse::Scored(result) => Ok(result),
        }
    }
}
