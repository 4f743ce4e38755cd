//! Session Store
//!
//! The session token is an explicit context object handed to whatever makes
//! authenticated calls. Backends: in-memory (tests, embedding), a token file
//! for the CLI, and browser `localStorage` in the SPA.

use std::sync::Mutex;
use thiserror::Error;

/// `localStorage` key the SPA keeps the token under
pub const TOKEN_STORAGE_KEY: &str = "authToken";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistent holder of the opaque session token
pub trait SessionStore {
    /// Current token, if any
    fn token(&self) -> Option<String>;

    /// Store a token, overwriting any previous one
    fn set_token(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the token (logout or forced logout)
    fn clear(&self) -> Result<(), SessionError>;

    fn is_authenticated(&self) -> bool {
        self.token().map(|t| !t.is_empty()).unwrap_or(false)
    }
}

/// Process-local session
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self
            .token
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        Ok(())
    }
}

#[cfg(feature = "client")]
pub use file_store::FileSessionStore;

#[cfg(feature = "client")]
mod file_store {
    use std::path::{Path, PathBuf};

    use super::{SessionError, SessionStore};

    /// Token kept in a single file, read on every access
    #[derive(Debug, Clone)]
    pub struct FileSessionStore {
        path: PathBuf,
    }

    impl FileSessionStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl SessionStore for FileSessionStore {
        fn token(&self) -> Option<String> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) => {
                    let token = content.trim();
                    (!token.is_empty()).then(|| token.to_string())
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    tracing::warn!("Failed to read session file {:?}: {}", self.path, e);
                    None
                }
            }
        }

        fn set_token(&self, token: &str) -> Result<(), SessionError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&self.path, token)?;
            restrict_permissions(&self.path)?;
            tracing::debug!("Session token stored at {:?}", self.path);
            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }

    #[cfg(unix)]
    fn restrict_permissions(path: &Path) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
    }

    #[cfg(not(unix))]
    fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}
