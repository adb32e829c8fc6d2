use crate::{
    config::ClientConfig,
    core::{
        api::HttpApi,
        session::{FileStore, Session},
    },
};

/// What every screen can reach: the backend and the admin session.
#[derive(Debug, Clone)]
pub struct AppState {
    pub api: HttpApi,
    pub session: Session<FileStore>,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        Ok(Self {
            api: HttpApi::new(config)?,
            session: Session::new(FileStore::new(config.session_file())),
        })
    }
}
