//! Session Storage
//!
//! Token persistence in `window.localStorage`.

use filedeck::{SessionError, SessionStore, TOKEN_STORAGE_KEY};

/// [`SessionStore`] backed by the browser's local storage
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSession;

fn storage() -> Result<web_sys::Storage, SessionError> {
    web_sys::window()
        .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?
        .local_storage()
        .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| SessionError::Unavailable("localStorage disabled".to_string()))
}

impl SessionStore for LocalStorageSession {
    fn token(&self) -> Option<String> {
        storage()
            .ok()?
            .get_item(TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|t| !t.is_empty())
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        storage()?
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), SessionError> {
        storage()?
            .remove_item(TOKEN_STORAGE_KEY)
            .map_err(|e| SessionError::Unavailable(format!("{:?}", e)))
    }
}
