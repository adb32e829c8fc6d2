use std::{collections::BTreeMap, fmt};

use tracing::{debug, error, info, warn};

use crate::{
    core::api::{ApiResult, FeedbackApi},
    models::{Course, DEFAULT_RATING, Feedback, MAX_RATING, MIN_RATING, NewFeedback},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    StudentName,
    Subject,
    Rating,
    Comments,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::StudentName => "Student Name",
            Field::Subject => "Subject",
            Field::Rating => "Rating",
            Field::Comments => "Comments",
        })
    }
}

/// Inline messages keyed by the field they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// Checks a raw rating. Kept as a float so fractional input can be rejected
/// rather than silently truncated.
pub fn validate_rating(rating: Option<f64>) -> Result<u8, &'static str> {
    let Some(rating) = rating else {
        return Err("Rating is required");
    };
    if !rating.is_finite() || rating.fract() != 0.0 {
        return Err("Rating must be a whole number");
    }
    if rating < f64::from(MIN_RATING) {
        return Err("Rating must be at least 1");
    }
    if rating > f64::from(MAX_RATING) {
        return Err("Rating must be at most 5");
    }
    Ok(rating as u8)
}

/// Values currently entered in the feedback form.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackForm {
    pub student_name: String,
    pub subject: String,
    pub rating: Option<f64>,
    pub comments: String,
}

impl Default for FeedbackForm {
    fn default() -> Self {
        Self {
            student_name: String::new(),
            subject: String::new(),
            rating: Some(f64::from(DEFAULT_RATING)),
            comments: String::new(),
        }
    }
}

impl FeedbackForm {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Field-level validation. Comments are free-form and never fail.
    pub fn validate(&self) -> Result<NewFeedback, FieldErrors> {
        let mut errors = FieldErrors::default();
        let student_name = self.student_name.trim();
        if student_name.is_empty() {
            errors.insert(Field::StudentName, "Student name is required");
        }
        let subject = self.subject.trim();
        if subject.is_empty() {
            errors.insert(Field::Subject, "Subject is required");
        }
        let rating = match validate_rating(self.rating) {
            Ok(rating) => Some(rating),
            Err(msg) => {
                errors.insert(Field::Rating, msg);
                None
            }
        };

        match rating {
            Some(rating) if errors.is_empty() => Ok(NewFeedback {
                student_name: student_name.to_string(),
                subject: subject.to_string(),
                rating,
                comments: self.comments.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// A single edit coming from the form's inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
    StudentName(String),
    Subject(String),
    Rating(Option<f64>),
    Comments(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    /// Backend message, shown verbatim.
    Failed(String),
}

/// Drives the feedback form between edits, validation, and submission.
///
/// Holds no connection; callers take the payload from [`begin_submit`]
/// to the API and hand the outcome back to [`finish_submit`].
///
/// [`begin_submit`]: SubmissionState::begin_submit
/// [`finish_submit`]: SubmissionState::finish_submit
#[derive(Debug, Clone, Default)]
pub struct SubmissionState {
    form: FeedbackForm,
    courses: Vec<Course>,
    errors: FieldErrors,
    status: SubmitStatus,
}

impl SubmissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FeedbackForm {
        &self.form
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course_names(&self) -> Vec<String> {
        self.courses.iter().map(|c| c.name.clone()).collect()
    }

    pub fn set_courses(&mut self, courses: Vec<Course>) {
        self.courses = courses;
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Applies an edit. Once a submit attempt has flagged errors they are
    /// re-checked on every edit so messages clear as soon as the input is fixed.
    pub fn edit(&mut self, edit: FormEdit) {
        match edit {
            FormEdit::StudentName(value) => self.form.student_name = value,
            FormEdit::Subject(value) => self.form.subject = value,
            FormEdit::Rating(value) => self.form.rating = value,
            FormEdit::Comments(value) => self.form.comments = value,
        }
        if !self.errors.is_empty() {
            self.errors = self.check().err().unwrap_or_default();
        }
    }

    /// Validates and, if everything passes, marks the form as submitting and
    /// returns the payload to send. `None` means no request should be made.
    pub fn begin_submit(&mut self) -> Option<NewFeedback> {
        if self.is_submitting() {
            return None;
        }
        match self.check() {
            Ok(feedback) => {
                self.errors = FieldErrors::default();
                self.status = SubmitStatus::Submitting;
                Some(feedback)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// On success the form goes back to its defaults; on failure it keeps
    /// what the user typed so they can retry. Outcomes arriving while no
    /// submission is in flight are ignored.
    pub fn finish_submit(&mut self, result: ApiResult<Feedback>) {
        if !self.is_submitting() {
            debug!("Ignoring submission outcome with nothing in flight");
            return;
        }
        match result {
            Ok(feedback) => {
                info!(id = %feedback.id, subject = %feedback.subject, "Feedback submitted");
                self.form = FeedbackForm::default();
                self.errors = FieldErrors::default();
                self.status = SubmitStatus::Succeeded;
            }
            Err(e) => {
                error!("Error submitting feedback: {e}");
                self.status = SubmitStatus::Failed(e.to_string());
            }
        }
    }

    /// Runs one full submission against `api`.
    pub async fn submit<A: FeedbackApi>(&mut self, api: &A) -> &SubmitStatus {
        if let Some(feedback) = self.begin_submit() {
            let result = api.submit_feedback(&feedback).await;
            self.finish_submit(result);
        }
        &self.status
    }

    fn check(&self) -> Result<NewFeedback, FieldErrors> {
        let result = self.form.validate();
        let subject = self.form.subject.trim();
        if subject.is_empty() || self.is_known_subject(subject) {
            return result;
        }
        let mut errors = result.err().unwrap_or_default();
        errors.insert(Field::Subject, "Select a subject from the course list");
        Err(errors)
    }

    /// Without a course list (it failed to load) any subject is let through.
    fn is_known_subject(&self, subject: &str) -> bool {
        self.courses.is_empty() || self.courses.iter().any(|c| c.name == subject)
    }
}

/// Course options for the subject selector.
///
/// Asks the backend to create its default courses when none exist. Failures
/// are logged and leave the selector empty; the form stays usable.
pub async fn load_course_options<A: FeedbackApi>(api: &A) -> Vec<Course> {
    let courses = match api.list_courses().await {
        Ok(courses) if courses.is_empty() => {
            info!("No courses found, initializing defaults");
            api.init_courses().await
        }
        other => other,
    };
    courses.unwrap_or_else(|e| {
        warn!("Error fetching courses: {e}");
        Vec::new()
    })
}
