//! Upload submission flow: post a resume for scoring, show the result, then refresh the feed.

use std::sync::Arc;

use tracing::{error, info};

use crate::api_client::ScreeningApi;
use crate::busy::BusySignal;
use crate::errors::ClientError;
use crate::feed::FeedController;
use crate::models::upload::FIELD_ROLE;
use crate::models::{UploadForm, UploadResult};
use crate::view::CandidateView;

pub struct UploadFlow {
    api: Arc<dyn ScreeningApi>,
    view: Arc<dyn CandidateView>,
    busy: BusySignal,
    feed: Arc<FeedController>,
}

impl UploadFlow {
    pub fn new(
        api: Arc<dyn ScreeningApi>,
        view: Arc<dyn CandidateView>,
        busy: BusySignal,
        feed: Arc<FeedController>,
    ) -> Self {
        Self {
            api,
            view,
            busy,
            feed,
        }
    }

    /// Submits one form snapshot. Errors are logged and shown to the user; the
    /// results panel and form are only touched after the server accepted the resume.
    pub async fn submit(&self, form: UploadForm) -> Option<UploadResult> {
        let _busy = self.busy.acquire();
        match self.try_submit(form).await {
            Ok(result) => Some(result),
            Err(e) => {
                error!("Upload failed: {e}");
                self.view.notify_error(&e.user_message());
                None
            }
        }
    }

    async fn try_submit(&self, form: UploadForm) -> Result<UploadResult, ClientError> {
        let payload = form.into_payload()?;
        info!(
            "Uploading '{}' for role '{}'",
            payload.resume.file_name,
            payload.field(FIELD_ROLE).unwrap_or_default()
        );

        let result = self.api.upload_resume(payload).await?;
        info!(
            "Resume scored: {} <{}> match_score={}",
            result.name, result.email, result.match_score
        );

        self.view.show_upload_result(&result);
        self.view.reset_form();
        self.feed.load_feed("").await;

        Ok(result)
    }
}
