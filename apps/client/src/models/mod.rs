pub mod candidate;
pub mod upload;

pub use candidate::{Candidate, DeleteResponse};
pub use upload::{SelectedFile, UploadForm, UploadPayload, UploadResponse, UploadResult};
