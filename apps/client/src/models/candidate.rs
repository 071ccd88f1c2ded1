use serde::{Deserialize, Serialize};

/// A scored resume record as returned by `GET /candidates/filter`.
///
/// The server hands back raw table rows, so every display column may be NULL.
/// Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub match_score: Option<f64>,
    /// Comma-separated free-text tags, e.g. `"python, sql, docker"`.
    #[serde(default)]
    pub skills: Option<String>,
}

impl Candidate {
    /// Case-insensitive substring match on `role`. An empty term matches everything;
    /// a candidate without a role never matches a non-empty term.
    pub fn role_matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.role
            .as_deref()
            .map(|role| role.to_lowercase().contains(&needle))
            .unwrap_or(false)
    }

    /// Trimmed, non-empty skill tokens in their original order.
    pub fn skill_tags(&self) -> Vec<String> {
        self.skills
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body of `DELETE /candidates/{id}`. Sent with a 200 on success and a 500 on failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
