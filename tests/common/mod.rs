#![allow(dead_code)]

mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from coursefeedback for tests
pub use coursefeedback::{
    ApiError, Course, Feedback, FeedbackApi, FeedbackPage, MemoryStore, NewFeedback, Route,
    Session, SessionStore,
    core::workflow::{
        Applied, Dashboard, Field, FormEdit, Phase, SubmissionState, SubmitStatus,
    },
};

/// A session that already passed the admin login.
pub fn admin_session() -> Session<MemoryStore> {
    let session = Session::new(MemoryStore::default());
    session
        .login("admin", "admin123")
        .expect("mock credentials accepted");
    session
}
