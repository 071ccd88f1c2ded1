use std::sync::Arc;

use crate::api_client::ScreeningApi;
use crate::busy::BusySignal;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::feed::FeedController;
use crate::upload::UploadFlow;
use crate::view::CandidateView;

/// Everything a front end needs, wired once at startup.
/// The feed and upload flow share one busy signal so overlapping work composes.
#[derive(Clone)]
pub struct ClientState {
    pub config: Config,
    pub feed: Arc<FeedController>,
    pub upload: Arc<UploadFlow>,
    /// Role-filter input wired through the debouncer.
    pub filter: Debouncer<String>,
}

impl ClientState {
    pub fn new(config: Config, api: Arc<dyn ScreeningApi>, view: Arc<dyn CandidateView>) -> Self {
        let busy = BusySignal::new(Arc::clone(&view));
        let feed = Arc::new(FeedController::new(
            Arc::clone(&api),
            Arc::clone(&view),
            busy.clone(),
        ));
        let upload = Arc::new(UploadFlow::new(api, view, busy, Arc::clone(&feed)));
        let filter = feed.filter_debouncer(config.filter_debounce);

        Self {
            config,
            feed,
            upload,
            filter,
        }
    }
}
