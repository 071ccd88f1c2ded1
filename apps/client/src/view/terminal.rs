use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use dialoguer::Confirm;
use indicatif::ProgressBar;
use tracing::warn;

use crate::form::FormState;
use crate::models::UploadResult;
use crate::render::{format_upload_result, FeedState};
use crate::view::CandidateView;

/// Terminal front end: spinner for the busy indicator, stdout for the feed,
/// stderr for notifications, an interactive prompt for confirmation.
pub struct TerminalView {
    form: Mutex<FormState>,
    spinner: Mutex<Option<ProgressBar>>,
    assume_yes: bool,
}

impl TerminalView {
    /// `assume_yes` answers every confirmation with yes (non-interactive runs).
    pub fn new(assume_yes: bool) -> Self {
        Self {
            form: Mutex::new(FormState::default()),
            spinner: Mutex::new(None),
            assume_yes,
        }
    }

    /// Mutable access to the form inputs the controllers read.
    pub fn form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Prints without tearing an active spinner.
    fn print(&self, text: &str, to_stderr: bool) {
        let emit = || {
            if to_stderr {
                eprintln!("{text}");
            } else {
                println!("{text}");
            }
        };
        let spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        match spinner.as_ref() {
            Some(bar) => bar.suspend(emit),
            None => emit(),
        }
    }
}

#[async_trait]
impl CandidateView for TerminalView {
    fn set_busy(&self, busy: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if busy {
            if spinner.is_none() {
                let bar = ProgressBar::new_spinner();
                bar.set_message("Working...");
                bar.enable_steady_tick(Duration::from_millis(100));
                *spinner = Some(bar);
            }
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn render_feed(&self, feed: &FeedState) {
        self.print(feed.to_string().trim_end(), false);
    }

    fn filter_text(&self) -> String {
        self.form().filter.clone()
    }

    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new().with_prompt(prompt).default(false).interact()
        })
        .await;

        match answer {
            Ok(Ok(confirmed)) => confirmed,
            Ok(Err(e)) => {
                warn!("Confirmation prompt failed: {e}");
                false
            }
            Err(e) => {
                warn!("Confirmation prompt task failed: {e}");
                false
            }
        }
    }

    fn notify_error(&self, message: &str) {
        self.print(&format!("Error: {message}"), true);
    }

    fn show_upload_result(&self, result: &UploadResult) {
        self.print(&format_upload_result(result), false);
    }

    fn reset_form(&self) {
        self.form().reset();
    }
}
