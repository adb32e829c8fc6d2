use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use anyhow::Context;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::navigation::Route;

/// Storage key holding the admin flag.
pub const SESSION_KEY: &str = "isAuthenticated";
const AUTHENTICATED: &str = "true";

/// Placeholder credentials. Checking happens entirely on the client; a real
/// deployment has to move this server-side and issue expiring tokens.
pub const MOCK_USERNAME: &str = "admin";
pub const MOCK_PASSWORD: &str = "admin123";

/// Durable string key/value storage, the client's equivalent of browser local storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// Keys persisted as a flat JSON object in a single file.
///
/// Every call re-reads the file, so a flag written by another process (the CLI
/// logging in while the GUI runs) is seen on the next check.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("Corrupt session file {}", self.path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read session file {}", self.path.display())),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut entries = self.read_all().unwrap_or_else(|e| {
            warn!("Discarding unreadable session data: {e:#}");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        match self.read_all() {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write_all(&entries)?;
                }
                Ok(())
            }
            Err(e) => {
                warn!("Discarding unreadable session data: {e:#}");
                self.write_all(&BTreeMap::new())
            }
        }
    }
}

/// Non-durable store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    fn entries(&self) -> anyhow::Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("Session store lock poisoned"))
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Deliberately the same for a wrong username and a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Could not save session: {0:#}")]
    Storage(anyhow::Error),
}

/// The admin session gate.
///
/// Owned by the navigation shell and lent to the views that need it, rather
/// than read from ambient global state.
#[derive(Debug, Clone)]
pub struct Session<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// On success returns where to go next.
    pub fn login(&self, username: &str, password: &str) -> Result<Route, LoginError> {
        if username != MOCK_USERNAME || password != MOCK_PASSWORD {
            info!("Rejected admin login");
            return Err(LoginError::InvalidCredentials);
        }
        self.store
            .set(SESSION_KEY, AUTHENTICATED)
            .map_err(LoginError::Storage)?;
        info!("Admin logged in");
        Ok(Route::Feedbacks)
    }

    /// Clears the flag and returns where to go next. A store that cannot be
    /// written is logged; the user still ends up on the login view.
    pub fn logout(&self) -> Route {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            warn!("Failed to clear session flag: {e:#}");
        }
        info!("Admin logged out");
        Route::Login
    }

    /// Anything other than a readable `"true"` counts as logged out.
    pub fn is_authenticated(&self) -> bool {
        match self.store.get(SESSION_KEY) {
            Ok(value) => value.as_deref() == Some(AUTHENTICATED),
            Err(e) => {
                warn!("Failed to read session flag: {e:#}");
                false
            }
        }
    }
}
