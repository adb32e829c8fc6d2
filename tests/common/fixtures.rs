use std::sync::Mutex;

use coursefeedback::{
    ApiError, Course, Feedback, FeedbackApi, FeedbackPage, NewFeedback,
    core::api::ApiResult,
};
use reqwest::StatusCode;
use time::OffsetDateTime;

/// A call the client made against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Submit(NewFeedback),
    List { page: u32, limit: u32 },
    ListBySubject { subject: String, page: u32, limit: u32 },
    Courses,
    InitCourses,
}

#[derive(Debug, Default)]
struct Backend {
    feedbacks: Vec<Feedback>,
    courses: Vec<Course>,
    calls: Vec<Call>,
    next_id: u32,
    fail_with: Option<ApiError>,
}

/// In-memory stand-in for the feedback backend that records every call.
///
/// Pages are cut the way the real backend does it, `totalPages` included
/// (zero for an empty result).
#[derive(Debug, Default)]
pub struct FakeApi {
    backend: Mutex<Backend>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(courses: Vec<Course>) -> Self {
        let api = Self::new();
        api.backend().courses = courses;
        api
    }

    pub fn with_feedbacks(feedbacks: Vec<Feedback>) -> Self {
        let api = Self::new();
        api.backend().feedbacks = feedbacks;
        api
    }

    /// Every following call fails with `error` until [`FakeApi::recover`].
    pub fn fail_with(&self, error: ApiError) {
        self.backend().fail_with = Some(error);
    }

    pub fn recover(&self) {
        self.backend().fail_with = None;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.backend().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.backend().calls.clear();
    }

    pub fn stored(&self) -> Vec<Feedback> {
        self.backend().feedbacks.clone()
    }

    fn backend(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.backend.lock().expect("fake backend poisoned")
    }

    fn record(&self, call: Call) -> ApiResult<std::sync::MutexGuard<'_, Backend>> {
        let mut backend = self.backend();
        backend.calls.push(call);
        match backend.fail_with.clone() {
            Some(error) => Err(error),
            None => Ok(backend),
        }
    }
}

fn paginate<'a>(items: impl Iterator<Item = &'a Feedback>, page: u32, limit: u32) -> FeedbackPage {
    let items: Vec<Feedback> = items.cloned().collect();
    let total_pages = (items.len() as u32).div_ceil(limit);
    let feedbacks = items
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();
    FeedbackPage {
        feedbacks,
        total_pages,
    }
}

impl FeedbackApi for FakeApi {
    async fn submit_feedback(&self, feedback: &NewFeedback) -> ApiResult<Feedback> {
        let mut backend = self.record(Call::Submit(feedback.clone()))?;
        backend.next_id += 1;
        let stored = Feedback {
            id: format!("fb-{}", backend.next_id),
            student_name: feedback.student_name.clone(),
            subject: feedback.subject.clone(),
            rating: feedback.rating,
            comments: Some(feedback.comments.clone()),
            created_at: test_timestamp(),
        };
        backend.feedbacks.push(stored.clone());
        Ok(stored)
    }

    async fn list_feedbacks(&self, page: u32, limit: u32) -> ApiResult<FeedbackPage> {
        let backend = self.record(Call::List { page, limit })?;
        Ok(paginate(backend.feedbacks.iter(), page, limit))
    }

    async fn list_feedbacks_by_subject(
        &self,
        subject: &str,
        page: u32,
        limit: u32,
    ) -> ApiResult<FeedbackPage> {
        let backend = self.record(Call::ListBySubject {
            subject: subject.to_string(),
            page,
            limit,
        })?;
        Ok(paginate(
            backend.feedbacks.iter().filter(|f| f.subject == subject),
            page,
            limit,
        ))
    }

    async fn list_courses(&self) -> ApiResult<Vec<Course>> {
        let backend = self.record(Call::Courses)?;
        Ok(backend.courses.clone())
    }

    async fn init_courses(&self) -> ApiResult<Vec<Course>> {
        let mut backend = self.record(Call::InitCourses)?;
        backend.courses = default_courses();
        Ok(backend.courses.clone())
    }
}

pub fn test_timestamp() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_709_287_200).expect("valid timestamp")
}

pub fn course(code: &str, name: &str) -> Course {
    Course {
        code: code.to_string(),
        name: name.to_string(),
    }
}

pub fn default_courses() -> Vec<Course> {
    vec![
        course("MATH101", "Math"),
        course("PHYS101", "Physics"),
        course("CHEM101", "Chemistry"),
    ]
}

pub fn feedback(id: u32, student: &str, subject: &str, rating: u8) -> Feedback {
    Feedback {
        id: format!("fb-{id}"),
        student_name: student.to_string(),
        subject: subject.to_string(),
        rating,
        comments: None,
        created_at: test_timestamp(),
    }
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.to_string(),
    }
}
