//! View adapter: the narrow surface controllers use to read inputs and show results.
//!
//! Controllers never print or prompt directly. `TerminalView` backs the binary;
//! tests substitute a recording implementation.

pub mod terminal;

use async_trait::async_trait;

use crate::models::UploadResult;
use crate::render::FeedState;

pub use terminal::TerminalView;

#[async_trait]
pub trait CandidateView: Send + Sync {
    /// Shows or hides the busy indicator. Only called on idle/busy transitions.
    fn set_busy(&self, busy: bool);

    /// Replaces the candidate list with `feed`.
    fn render_feed(&self, feed: &FeedState);

    /// Current text of the role filter input.
    fn filter_text(&self) -> String;

    /// Asks the user a yes/no question. `false` means declined.
    async fn confirm(&self, prompt: &str) -> bool;

    /// Blocking-style error notification.
    fn notify_error(&self, message: &str);

    /// Fills the upload results panel.
    fn show_upload_result(&self, result: &UploadResult);

    /// Clears the upload form and the selected-file label.
    fn reset_form(&self);
}
