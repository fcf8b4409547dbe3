//! Session-scoped key/value storage holding the auth token.

mod file;

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;

pub use file::FileSession;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to access session file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Reads the token, treating storage failures as "logged out".
pub fn read_token(storage: &dyn SessionStorage) -> Option<String> {
    match storage.get(TOKEN_KEY) {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!(error = %e, "session read failed");
            None
        }
    }
}

/// Process-lifetime storage.
#[derive(Debug, Default)]
pub struct MemorySession {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySession {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.values.lock().remove(key);
        Ok(())
    }
}
