//! In-memory fakes shared by controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api_client::ScreeningApi;
use crate::errors::ClientError;
use crate::models::{Candidate, UploadPayload, UploadResult};
use crate::render::FeedState;
use crate::view::CandidateView;

pub fn candidate(id: i64, name: &str, role: &str, skills: &str) -> Candidate {
    Candidate {
        id,
        name: Some(name.to_string()),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        role: Some(role.to_string()),
        match_score: Some(id as f64),
        skills: Some(skills.to_string()),
    }
}

/// How the fake answers an upload.
#[derive(Debug, Clone)]
pub enum UploadReply {
    Scored(UploadResult),
    Rejected(String),
}

/// Scripted `ScreeningApi`. Deletes really remove rows so a follow-up list reflects them.
pub struct FakeApi {
    pub candidates: Mutex<Vec<Candidate>>,
    pub fail_list: AtomicBool,
    /// Per-call delays for `list_candidates`, consumed front to back.
    pub list_delays: Mutex<VecDeque<Duration>>,
    /// `Some(message)` makes deletes fail with that message.
    pub delete_failure: Mutex<Option<String>>,
    pub upload_reply: Mutex<UploadReply>,
    pub list_calls: AtomicUsize,
    pub delete_calls: Mutex<Vec<i64>>,
    pub uploads: Mutex<Vec<UploadPayload>>,
}

impl FakeApi {
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates: Mutex::new(candidates),
            fail_list: AtomicBool::new(false),
            list_delays: Mutex::default(),
            delete_failure: Mutex::default(),
            upload_reply: Mutex::new(UploadReply::Scored(scored("Ada", &["python"]))),
            list_calls: AtomicUsize::new(0),
            delete_calls: Mutex::default(),
            uploads: Mutex::default(),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

pub fn scored(name: &str, keywords: &[&str]) -> UploadResult {
    UploadResult {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: None,
        match_score: keywords.len() as f64,
        matched_keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

#[async_trait]
impl ScreeningApi for FakeApi {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.list_delays.lock().unwrap().pop_front();
        let snapshot = self.candidates.lock().unwrap().clone();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::Fetch("Failed to fetch candidates".into()));
        }
        Ok(snapshot)
    }

    async fn delete_candidate(&self, id: i64) -> Result<(), ClientError> {
        self.delete_calls.lock().unwrap().push(id);
        if let Some(message) = self.delete_failure.lock().unwrap().clone() {
            return Err(ClientError::Delete(message));
        }
        self.candidates.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn upload_resume(&self, payload: UploadPayload) -> Result<UploadResult, ClientError> {
        self.uploads.lock().unwrap().push(payload);
        match self.upload_reply.lock().unwrap().clone() {
            UploadReply::Scored(result) => Ok(result),
            UploadReply::Rejected(error) => Err(ClientError::Upload(error)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Busy(bool),
    Feed(FeedState),
    Confirm(String),
    Error(String),
    UploadResult(UploadResult),
    FormReset,
}

/// `CandidateView` that records every call in order.
pub struct RecordingView {
    events: Mutex<Vec<ViewEvent>>,
    pub filter: Mutex<String>,
    pub confirm_answer: AtomicBool,
}

impl Default for RecordingView {
    fn default() -> Self {
        Self {
            events: Mutex::default(),
            filter: Mutex::default(),
            confirm_answer: AtomicBool::new(true),
        }
    }
}

impl RecordingView {
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn busy_transitions(&self) -> Vec<bool> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Busy(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    pub fn feeds(&self) -> Vec<FeedState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Feed(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    pub fn last_feed(&self) -> Option<FeedState> {
        self.feeds().pop()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ViewEvent::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl CandidateView for RecordingView {
    fn set_busy(&self, busy: bool) {
        self.push(ViewEvent::Busy(busy));
    }

    fn render_feed(&self, feed: &FeedState) {
        self.push(ViewEvent::Feed(feed.clone()));
    }

    fn filter_text(&self) -> String {
        self.filter.lock().unwrap().clone()
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.push(ViewEvent::Confirm(prompt.to_string()));
        self.confirm_answer.load(Ordering::SeqCst)
    }

    fn notify_error(&self, message: &str) {
        self.push(ViewEvent::Error(message.to_string()));
    }

    fn show_upload_result(&self, result: &UploadResult) {
        self.push(ViewEvent::UploadResult(result.clone()));
    }

    fn reset_form(&self) {
        self.push(ViewEvent::FormReset);
    }
}
