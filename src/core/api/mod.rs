mod http;

use std::sync::Arc;

use reqwest::StatusCode;
use thiserror::Error;

use crate::models::{Course, Feedback, FeedbackPage, NewFeedback};

pub use http::{Endpoints, HttpApi};

/// Failure talking to the feedback backend.
///
/// `Display` is the message shown to the user as-is.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,

    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(Arc::new(err))
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Calls the client makes against the backend.
///
/// Implemented over HTTP by [`HttpApi`]; the workflows only see this trait.
pub trait FeedbackApi {
    fn submit_feedback(
        &self,
        feedback: &NewFeedback,
    ) -> impl Future<Output = ApiResult<Feedback>> + Send;

    fn list_feedbacks(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = ApiResult<FeedbackPage>> + Send;

    fn list_feedbacks_by_subject(
        &self,
        subject: &str,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = ApiResult<FeedbackPage>> + Send;

    fn list_courses(&self) -> impl Future<Output = ApiResult<Vec<Course>>> + Send;

    fn init_courses(&self) -> impl Future<Output = ApiResult<Vec<Course>>> + Send;
}
