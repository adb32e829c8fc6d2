//! Integration tests for client configuration.
//!
//! Tests cover:
//! - Defaults and overrides
//! - Rejecting bad URLs and timeouts
//! - Backend URL construction

use std::{path::PathBuf, time::Duration};

use coursefeedback::{
    ClientConfig,
    config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS},
    core::api::Endpoints,
};

#[test]
fn test_defaults() -> anyhow::Result<()> {
    let config = ClientConfig::load(None, None, Some(PathBuf::from("session.json")))?;
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.api_url, "http://localhost:5000/api");
    assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(config.session_file(), PathBuf::from("session.json"));
    assert!(
        ClientConfig::default()
            .session_file()
            .ends_with(".coursefeedback/session.json")
    );
    Ok(())
}

#[test]
fn test_overrides() -> anyhow::Result<()> {
    let config = ClientConfig::load(
        Some("https://feedback.example.edu/api".to_string()),
        Some(30),
        None,
    )?;
    assert_eq!(config.api_url, "https://feedback.example.edu/api");
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    Ok(())
}

#[test]
fn test_rejects_bad_values() {
    assert!(ClientConfig::load(Some("localhost:5000".to_string()), None, None).is_err());
    assert!(ClientConfig::load(Some("mailto:admin@example.edu".to_string()), None, None).is_err());
    assert!(ClientConfig::load(None, Some(0), None).is_err());
}

#[test]
fn test_endpoint_urls() -> anyhow::Result<()> {
    let endpoints = Endpoints::new("http://localhost:5000/api")?;
    assert_eq!(
        endpoints.feedback().as_str(),
        "http://localhost:5000/api/feedback"
    );
    assert_eq!(
        endpoints.feedbacks(1, 6).as_str(),
        "http://localhost:5000/api/feedbacks?page=1&limit=6"
    );
    assert_eq!(
        endpoints.feedbacks_by_subject("Math", 3, 6).as_str(),
        "http://localhost:5000/api/feedbacks/Math?page=3&limit=6"
    );
    assert_eq!(
        endpoints.courses().as_str(),
        "http://localhost:5000/api/courses"
    );
    assert_eq!(
        endpoints.init_courses().as_str(),
        "http://localhost:5000/api/init-courses"
    );
    Ok(())
}

#[test]
fn test_endpoint_base_normalization() -> anyhow::Result<()> {
    // trailing slash, query and fragment on the base are dropped
    let endpoints = Endpoints::new("http://localhost:5000/api/?debug=1#top")?;
    assert_eq!(
        endpoints.courses().as_str(),
        "http://localhost:5000/api/courses"
    );

    let root = Endpoints::new("http://localhost:5000")?;
    assert_eq!(root.courses().as_str(), "http://localhost:5000/courses");
    Ok(())
}
