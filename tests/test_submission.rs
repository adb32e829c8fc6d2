//! Integration tests for the feedback submission form.
//!
//! Tests cover:
//! - Rating bounds and required fields
//! - Successful and failed submissions against a fake backend
//! - Rejecting a second submission while one is in flight
//! - Subject checks against the course list
//! - Lazy course initialization

mod common;

use common::*;
use coursefeedback::core::workflow::{FeedbackForm, load_course_options, validate_rating};

fn filled_form(state: &mut SubmissionState, name: &str, subject: &str, rating: f64) {
    state.edit(FormEdit::StudentName(name.to_string()));
    state.edit(FormEdit::Subject(subject.to_string()));
    state.edit(FormEdit::Rating(Some(rating)));
}

#[test]
fn test_rating_bounds() {
    for rating in 1..=5u8 {
        assert_eq!(validate_rating(Some(f64::from(rating))), Ok(rating));
    }
    assert_eq!(validate_rating(Some(0.0)), Err("Rating must be at least 1"));
    assert_eq!(validate_rating(Some(6.0)), Err("Rating must be at most 5"));
    assert_eq!(validate_rating(Some(3.5)), Err("Rating must be a whole number"));
    assert_eq!(validate_rating(Some(f64::NAN)), Err("Rating must be a whole number"));
    assert_eq!(validate_rating(None), Err("Rating is required"));
}

#[test]
fn test_form_defaults() {
    let form = FeedbackForm::default();
    assert_eq!(form.student_name, "");
    assert_eq!(form.subject, "");
    assert_eq!(form.rating, Some(3.0));
    assert_eq!(form.comments, "");
    assert!(form.is_default());
}

#[tokio::test]
async fn test_missing_fields_make_no_call() -> anyhow::Result<()> {
    let api = FakeApi::new();
    let mut state = SubmissionState::new();

    let status = state.submit(&api).await.clone();
    assert_eq!(status, SubmitStatus::Idle);
    assert!(api.calls().is_empty());
    assert_eq!(
        state.errors().get(Field::StudentName),
        Some("Student name is required")
    );
    assert_eq!(state.errors().get(Field::Subject), Some("Subject is required"));
    assert_eq!(state.errors().get(Field::Rating), None);

    // whitespace only counts as empty
    filled_form(&mut state, "   ", "Math", 4.0);
    state.submit(&api).await;
    assert!(api.calls().is_empty());
    assert_eq!(
        state.errors().get(Field::StudentName),
        Some("Student name is required")
    );
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_rating_makes_no_call() -> anyhow::Result<()> {
    let api = FakeApi::new();
    let mut state = SubmissionState::new();

    for rating in [0.0, 6.0, 3.5] {
        filled_form(&mut state, "Alice", "Math", rating);
        state.submit(&api).await;
        assert!(state.errors().get(Field::Rating).is_some());
    }
    state.edit(FormEdit::Rating(None));
    state.submit(&api).await;
    assert_eq!(state.errors().get(Field::Rating), Some("Rating is required"));
    assert!(api.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_successful_submit_resets_form() -> anyhow::Result<()> {
    let api = FakeApi::new();
    let mut state = SubmissionState::new();
    filled_form(&mut state, "  Alice ", "Math", 5.0);
    state.edit(FormEdit::Comments("Great course".to_string()));

    let status = state.submit(&api).await.clone();
    assert_eq!(status, SubmitStatus::Succeeded);
    assert!(state.form().is_default());
    assert!(state.errors().is_empty());

    assert_eq!(
        api.calls(),
        vec![Call::Submit(NewFeedback {
            student_name: "Alice".to_string(),
            subject: "Math".to_string(),
            rating: 5,
            comments: "Great course".to_string(),
        })]
    );
    let stored = api.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].rating, 5);
    Ok(())
}

#[tokio::test]
async fn test_failed_submit_keeps_input() -> anyhow::Result<()> {
    let api = FakeApi::new();
    api.fail_with(server_error("Database unavailable"));
    let mut state = SubmissionState::new();
    filled_form(&mut state, "Bob", "Physics", 2.0);

    let status = state.submit(&api).await.clone();
    assert_eq!(status, SubmitStatus::Failed("Database unavailable".to_string()));
    assert_eq!(state.form().student_name, "Bob");
    assert_eq!(state.form().subject, "Physics");
    assert_eq!(state.form().rating, Some(2.0));
    assert!(!state.is_submitting());

    // retry once the backend is back
    api.recover();
    let status = state.submit(&api).await.clone();
    assert_eq!(status, SubmitStatus::Succeeded);
    assert_eq!(api.calls().len(), 2);
    Ok(())
}

#[test]
fn test_double_submit_is_rejected() {
    let mut state = SubmissionState::new();
    filled_form(&mut state, "Alice", "Math", 4.0);

    let first = state.begin_submit();
    assert!(first.is_some());
    assert!(state.is_submitting());
    assert_eq!(state.begin_submit(), None);

    state.finish_submit(Ok(feedback(1, "Alice", "Math", 4)));
    assert_eq!(state.status(), &SubmitStatus::Succeeded);
}

#[test]
fn test_outcome_without_submit_is_ignored() {
    let mut state = SubmissionState::new();
    filled_form(&mut state, "Alice", "Math", 4.0);

    state.finish_submit(Err(server_error("late failure")));
    assert_eq!(state.status(), &SubmitStatus::Idle);
    assert_eq!(state.form().student_name, "Alice");
}

#[test]
fn test_edits_clear_errors() {
    let mut state = SubmissionState::new();
    assert_eq!(state.begin_submit(), None);
    assert_eq!(state.errors().len(), 2);

    state.edit(FormEdit::StudentName("Alice".to_string()));
    assert_eq!(state.errors().get(Field::StudentName), None);
    assert_eq!(state.errors().len(), 1);

    state.edit(FormEdit::Subject("Math".to_string()));
    assert!(state.errors().is_empty());
}

#[test]
fn test_subject_must_be_a_known_course() {
    let mut state = SubmissionState::new();
    state.set_courses(default_courses());
    assert_eq!(state.course_names(), vec!["Math", "Physics", "Chemistry"]);

    filled_form(&mut state, "Alice", "Art", 4.0);
    assert_eq!(state.begin_submit(), None);
    assert_eq!(
        state.errors().get(Field::Subject),
        Some("Select a subject from the course list")
    );

    state.edit(FormEdit::Subject("Chemistry".to_string()));
    assert!(state.begin_submit().is_some());
}

#[test]
fn test_any_subject_without_courses() {
    let mut state = SubmissionState::new();
    filled_form(&mut state, "Alice", "Art", 4.0);
    let payload = state.begin_submit().expect("no course list to check against");
    assert_eq!(payload.subject, "Art");
}

#[tokio::test]
async fn test_course_options_existing() -> anyhow::Result<()> {
    let api = FakeApi::with_courses(vec![course("BIO101", "Biology")]);

    let courses = load_course_options(&api).await;
    assert_eq!(courses, vec![course("BIO101", "Biology")]);
    assert_eq!(api.calls(), vec![Call::Courses]);
    Ok(())
}

#[tokio::test]
async fn test_course_options_initialized_when_empty() -> anyhow::Result<()> {
    let api = FakeApi::new();

    let courses = load_course_options(&api).await;
    assert_eq!(courses, default_courses());
    assert_eq!(api.calls(), vec![Call::Courses, Call::InitCourses]);

    // defaults exist now, so no second init
    api.clear_calls();
    assert_eq!(load_course_options(&api).await, default_courses());
    assert_eq!(api.calls(), vec![Call::Courses]);
    Ok(())
}

#[tokio::test]
async fn test_course_options_failure_leaves_selector_empty() -> anyhow::Result<()> {
    let api = FakeApi::new();
    api.fail_with(ApiError::Timeout);

    assert!(load_course_options(&api).await.is_empty());
    assert_eq!(api.calls(), vec![Call::Courses]);
    Ok(())
}
