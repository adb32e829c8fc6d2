pub mod config;
pub mod core;
pub mod models;

pub use config::ClientConfig;
pub use core::api::{ApiError, FeedbackApi, HttpApi};
pub use core::navigation::{Route, Visit, visit};
pub use core::session::{FileStore, LoginError, MemoryStore, Session, SessionStore};
pub use models::{Course, Feedback, FeedbackPage, NewFeedback};

#[cfg(feature = "gui")]
pub mod gui;
