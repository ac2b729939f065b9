//! Session token storage
//!
//! Holds the single bearer token issued at login. Written on successful
//! login, read on every authenticated request and deleted on logout. No
//! encryption or expiry is applied here; the backend rejects stale tokens.

use crate::error::{StorageError, StorageResult};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// Durable home for the session token
pub trait TokenStorage: Send + Sync {
    /// Read the stored token, if any
    fn get(&self) -> StorageResult<Option<String>>;

    /// Store a token, replacing any previous one
    fn set(&self, token: &str) -> StorageResult<()>;

    /// Delete the stored token
    fn remove(&self) -> StorageResult<()>;
}

/// File-backed token storage that survives process restarts
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Create a storage backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self) -> StorageResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn set(&self, token: &str) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            create_private_dir(parent)?;
        }

        let mut file = open_private_file(&self.path)?;
        file.write_all(token.as_bytes())?;
        info!("Session token stored at {}", self.path.display());
        Ok(())
    }

    fn remove(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Session token removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session token to remove at {}", self.path.display());
                Ok(())
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

/// Create the token directory, readable by the owner only on unix
#[cfg(unix)]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(path)
}

#[cfg(not(unix))]
fn create_private_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

/// Open the token file for writing, readable by the owner only on unix
#[cfg(unix)]
fn open_private_file(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // The mode only applies on creation; tighten files left by older runs
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private_file(path: &Path) -> std::io::Result<fs::File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Process-local token storage
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self) -> StorageResult<Option<String>> {
        let token = self.token.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(token.clone())
    }

    fn set(&self, token: &str) -> StorageResult<()> {
        let mut slot = self.token.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> StorageResult<()> {
        let mut slot = self.token.lock().map_err(|_| StorageError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}
