//! Candidate feed controller. Loads, filters and renders the list, and handles deletes.
//!
//! Every reload fetches the full list again and filters it locally; nothing is
//! merged across fetches. Reloads can overlap (a debounced filter firing while a
//! delete refreshes), so each one takes a ticket and a response older than the
//! last one rendered is dropped instead of overwriting fresher data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, error, info};

use crate::api_client::{ScreeningApi, DELETE_FAILED_MESSAGE};
use crate::busy::BusySignal;
use crate::debounce::Debouncer;
use crate::render::FeedState;
use crate::view::CandidateView;

pub const DELETE_CONFIRM_PROMPT: &str = "Are you sure you want to delete this candidate?";

pub struct FeedController {
    api: Arc<dyn ScreeningApi>,
    view: Arc<dyn CandidateView>,
    busy: BusySignal,
    issued: AtomicU64,
    /// Ticket of the response currently on screen.
    rendered: Mutex<u64>,
}

impl FeedController {
    pub fn new(api: Arc<dyn ScreeningApi>, view: Arc<dyn CandidateView>, busy: BusySignal) -> Self {
        Self {
            api,
            view,
            busy,
            issued: AtomicU64::new(0),
            rendered: Mutex::new(0),
        }
    }

    /// Fetches the full list, keeps candidates whose role contains `role_filter`
    /// (case-insensitive; empty keeps all) and renders the result.
    /// A failed fetch renders the inline failure state and returns `false`.
    pub async fn load_feed(&self, role_filter: &str) -> bool {
        let _busy = self.busy.acquire();
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let feed = match self.api.list_candidates().await {
            Ok(candidates) => {
                let feed = FeedState::from_candidates(&candidates, role_filter);
                debug!(
                    "Feed #{ticket}: {} of {} candidates match '{}'",
                    feed.cards().len(),
                    candidates.len(),
                    role_filter
                );
                feed
            }
            Err(e) => {
                error!("Failed to load candidates: {e}");
                FeedState::Failed
            }
        };

        self.publish(ticket, &feed);
        feed != FeedState::Failed
    }

    fn publish(&self, ticket: u64, feed: &FeedState) {
        let mut rendered = self.rendered.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket < *rendered {
            debug!("Dropping stale feed #{ticket}; #{} already shown", *rendered);
            return;
        }
        *rendered = ticket;
        self.view.render_feed(feed);
    }

    /// Deletes a candidate after the user confirms, then reloads with the active filter.
    /// Declining sends nothing. Failures are reported and leave the list as it was.
    /// Returns `true` only when the server removed the candidate.
    pub async fn delete_candidate(&self, id: i64) -> bool {
        if !self.view.confirm(DELETE_CONFIRM_PROMPT).await {
            debug!("Delete of candidate {id} declined");
            return false;
        }

        let _busy = self.busy.acquire();
        match self.api.delete_candidate(id).await {
            Ok(()) => {
                info!("Deleted candidate {id}");
                let filter = self.current_filter();
                self.load_feed(&filter).await;
                true
            }
            Err(e) => {
                error!("Failed to delete candidate {id}: {e}");
                self.view.notify_error(&e.user_message_or(DELETE_FAILED_MESSAGE));
                false
            }
        }
    }

    /// Role filter text currently entered in the view.
    pub fn current_filter(&self) -> String {
        self.view.filter_text()
    }

    /// A debouncer that reloads the feed with the latest filter text after `wait` of quiet.
    pub fn filter_debouncer(self: &Arc<Self>, wait: Duration) -> Debouncer<String> {
        let feed = Arc::clone(self);
        Debouncer::new(wait, move |term: String| {
            let feed = Arc::clone(&feed);
            async move {
                feed.load_feed(&term).await;
            }
        })
    }
}
