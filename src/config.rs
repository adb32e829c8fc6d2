use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use tracing::info;

use crate::core::api::Endpoints;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const SESSION_DIR: &str = ".coursefeedback";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every backend route is joined onto.
    pub api_url: String,
    /// Upper bound on each HTTP request, connect included.
    pub request_timeout: Duration,
    /// Where the admin session flag is persisted.
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: default_session_file(),
        }
    }
}

impl ClientConfig {
    /// Builds a config from optional overrides, falling back to defaults.
    pub fn load(
        api_url: Option<String>,
        timeout_secs: Option<u64>,
        session_file: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let config = Self {
            api_url: api_url.unwrap_or_else(|| {
                info!("API URL not set, using default: {DEFAULT_API_URL}");
                defaults.api_url
            }),
            request_timeout: timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            session_file: session_file.unwrap_or(defaults.session_file),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        Endpoints::new(&self.api_url).with_context(|| "API URL misconfigured")?;
        anyhow::ensure!(
            !self.request_timeout.is_zero(),
            "Request timeout must be at least one second"
        );
        Ok(())
    }

    pub fn session_file(&self) -> &Path {
        &self.session_file
    }
}

fn default_session_file() -> PathBuf {
    let root = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    root.join(SESSION_DIR).join(SESSION_FILE)
}
