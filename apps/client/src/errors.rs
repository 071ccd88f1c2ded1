use thiserror::Error;

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Client-level error type.
/// Every gateway call and controller step returns `Result<T, ClientError>`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The candidate list could not be read.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The server refused or failed a delete.
    #[error("Delete error: {0}")]
    Delete(String),

    /// The server refused or failed a resume upload.
    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// The text shown to the user in a blocking notification.
    /// Transport-level failures collapse into a generic message; the detail goes to the log.
    pub fn user_message(&self) -> String {
        self.user_message_or(GENERIC_ERROR_MESSAGE)
    }

    /// Like `user_message`, with a caller-chosen fallback for errors that carry no text.
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            ClientError::Fetch(msg)
            | ClientError::Delete(msg)
            | ClientError::Upload(msg)
            | ClientError::Validation(msg)
                if !msg.trim().is_empty() =>
            {
                msg.clone()
            }
            ClientError::Io(e) => format!("Could not read file: {e}"),
            _ => fallback.to_string(),
        }
    }
}
