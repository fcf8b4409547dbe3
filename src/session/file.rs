//! File-backed session so a CLI login survives between invocations.

use std::collections::HashMap;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
#[cfg(unix)]
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{SessionError, SessionStorage};

/// JSON map stored in one file, guarded by an exclusive file lock.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `folio/session.json` under the per-user runtime dir, or the cache dir
    /// where there is no runtime dir.
    pub fn default_path() -> PathBuf {
        dirs::runtime_dir()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join("folio")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Opens the file owner-only, refusing a symlink in its place.
    fn open(&self) -> Result<File, SessionError> {
        if let Some(parent) = self.path.parent() {
            let mut builder = DirBuilder::new();
            builder.recursive(true);
            #[cfg(unix)]
            builder.mode(0o700);
            builder.create(parent).map_err(|e| self.io_error(e))?;
        }
        if let Ok(meta) = fs::symlink_metadata(&self.path) {
            if meta.file_type().is_symlink() {
                return Err(self.io_error(io::Error::other("session file is a symlink")));
            }
        }

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(false);
        #[cfg(unix)]
        options.mode(0o600);
        let file = options.open(&self.path).map_err(|e| self.io_error(e))?;

        // Tighten files left behind with looser permissions.
        #[cfg(unix)]
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| self.io_error(e))?;

        FileExt::lock_exclusive(&file).map_err(|e| self.io_error(e))?;
        Ok(file)
    }

    fn read_map(&self, file: &mut File) -> Result<HashMap<String, String>, SessionError> {
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, file: &mut File, map: &HashMap<String, String>) -> Result<(), SessionError> {
        let content = serde_json::to_vec(map).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        file.set_len(0).map_err(|e| self.io_error(e))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| self.io_error(e))?;
        file.write_all(&content).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))
    }

    fn update(&self, f: impl FnOnce(&mut HashMap<String, String>)) -> Result<(), SessionError> {
        let mut file = self.open()?;
        let mut map = self.read_map(&mut file)?;
        f(&mut map);
        self.write_map(&mut file, &map)
    }
}

impl SessionStorage for FileSession {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut file = self.open()?;
        Ok(self.read_map(&mut file)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|map| {
            map.remove(key);
        })
    }
}
