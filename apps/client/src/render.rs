//! Feed rendering. Turns fetched candidate rows into what the view displays.
//!
//! Pure functions only. The controller decides *when* to render; this module
//! decides *what* a card or placeholder looks like.

use std::fmt;

use crate::models::{Candidate, UploadResult};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_CANDIDATES_MESSAGE: &str = "No candidates found";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load candidates. Please try again later.";

/// One candidate as displayed, with placeholders already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCard {
    /// Target of the card's delete action.
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub match_score: String,
    pub skill_tags: Vec<String>,
}

impl From<&Candidate> for CandidateCard {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            name: text_or_placeholder(candidate.name.as_deref()),
            email: text_or_placeholder(candidate.email.as_deref()),
            role: text_or_placeholder(candidate.role.as_deref()),
            match_score: format_score(candidate.match_score),
            skill_tags: candidate.skill_tags(),
        }
    }
}

/// Everything the candidate list container can show.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    Cards(Vec<CandidateCard>),
    /// The filter matched nothing, or the server has no candidates.
    Empty,
    /// The list request failed.
    Failed,
}

impl FeedState {
    /// Filters the full list by role and builds the cards.
    pub fn from_candidates(candidates: &[Candidate], role_filter: &str) -> Self {
        let cards: Vec<CandidateCard> = filter_by_role(candidates, role_filter)
            .into_iter()
            .map(CandidateCard::from)
            .collect();

        if cards.is_empty() {
            FeedState::Empty
        } else {
            FeedState::Cards(cards)
        }
    }

    pub fn cards(&self) -> &[CandidateCard] {
        match self {
            FeedState::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// Case-insensitive role substring filter. An empty term keeps every candidate.
pub fn filter_by_role<'a>(candidates: &'a [Candidate], term: &str) -> Vec<&'a Candidate> {
    if term.is_empty() {
        return candidates.iter().collect();
    }
    candidates.iter().filter(|c| c.role_matches(term)).collect()
}

fn text_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Missing and zero scores both display as "0"; integral scores drop the fraction.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(s) if s != 0.0 && s.is_finite() => s.to_string(),
        _ => "0".to_string(),
    }
}

impl fmt::Display for CandidateCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[#{}] {}", self.id, self.name)?;
        writeln!(f, "    Email: {}", self.email)?;
        writeln!(f, "    Role: {}", self.role)?;
        writeln!(f, "    Match Score: {}", self.match_score)?;
        write!(f, "    Skills:")?;
        for tag in &self.skill_tags {
            write!(f, " [{tag}]")?;
        }
        Ok(())
    }
}

impl fmt::Display for FeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedState::Cards(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "{card}")?;
                }
                Ok(())
            }
            FeedState::Empty => writeln!(f, "{NO_CANDIDATES_MESSAGE}"),
            FeedState::Failed => writeln!(f, "{LOAD_FAILED_MESSAGE}"),
        }
    }
}

/// Text block for the upload results panel.
pub fn format_upload_result(result: &UploadResult) -> String {
    let keywords = result
        .matched_keywords
        .iter()
        .map(|k| format!("[{k}]"))
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "Name: {}\nEmail: {}\nMatch Score: {}\nMatched Keywords: {}",
        result.name, result.email, result.match_score, keywords
    )
}
