//! Durable storage for the persisted auth token
//!
//! The client keeps exactly one durable key: the opaque session token.
//! Absence of the key means logged out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Backing store for the persisted token. Implementations hold one value and
/// never inspect it; token semantics belong to the server.
pub trait TokenStorage: Send + Sync {
    /// Read the persisted token, if any
    fn load(&self) -> io::Result<Option<String>>;

    /// Persist the token, replacing any previous value
    fn store(&self, token: &str) -> io::Result<()>;

    /// Remove the persisted token
    fn clear(&self) -> io::Result<()>;
}

/// Token persisted as a single file on disk
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Create a file-backed store at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory storage, for tests and for clients that opt out of persistence
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStorage {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.token.read().unwrap().clone())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self.token.write().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.token.write().unwrap() = None;
        Ok(())
    }
}
