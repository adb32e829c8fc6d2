use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Rows per dashboard page. The backend accepts any limit, the views always ask for six.
pub const PAGE_SIZE: u32 = 6;

/// Rating the form starts with and resets to after a successful submission.
pub const DEFAULT_RATING: u8 = 3;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// A stored feedback record. Only ever created by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub student_name: String,
    pub subject: String,
    pub rating: u8,
    #[serde(default)]
    pub comments: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Feedback {
    /// Submission date as shown on the dashboard cards.
    pub fn submitted_on(&self) -> String {
        self.created_at.date().to_string()
    }

    /// Comments worth showing, ignoring blank strings.
    pub fn visible_comments(&self) -> Option<&str> {
        self.comments
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Validated payload for `POST /feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub student_name: String,
    pub subject: String,
    pub rating: u8,
    pub comments: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: String,
    pub name: String,
}

/// One page of `GET /feedbacks` or `GET /feedbacks/{subject}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPage {
    pub feedbacks: Vec<Feedback>,
    pub total_pages: u32,
}
