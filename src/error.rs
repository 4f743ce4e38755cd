//! Client Error Types
//!
//! Every failure of a user action is one of these. Callers turn them into
//! alerts; only [`ClientError::Unauthorized`] on the file-list fetch has a
//! side effect (session teardown).

use thiserror::Error;

use crate::model::ApiErrorBody;
use crate::session::SessionError;
use crate::validation::ValidationError;

/// Errors raised by client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected before any network call
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The API answered 401
    #[error("Session expired or invalid")]
    Unauthorized,

    /// Non-2xx response other than 401. `message` is the body's `message`,
    /// else its `error`; `error` is the body's `error` field alone.
    #[error("API error {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Api {
        status: u16,
        message: Option<String>,
        error: Option<String>,
    },

    /// Connection failure or transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Client-wide request timeout elapsed
    #[error("Request timeout")]
    Timeout,

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// An authenticated call was attempted without a session token
    #[error("Not logged in")]
    NoSession,

    /// The file is not in the loaded collection
    #[error("Unknown file: {0}")]
    UnknownFile(String),

    /// Another mutating action is in flight for the same file
    #[error("Another action is in progress for this file")]
    Busy,

    /// The session token could not be stored or removed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Reading an upload source failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Build [`ClientError::Api`] from a status and the parsed error body
    pub fn api(status: u16, body: Option<ApiErrorBody>) -> Self {
        let body = body.unwrap_or_default();
        let error = body.error.clone().filter(|e| !e.trim().is_empty());
        ClientError::Api {
            status,
            message: body.into_message(),
            error,
        }
    }

    /// Text for an alert: validation messages verbatim, the server's message
    /// when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Text for an upload failure alert: the server's `error` field first,
    /// then whatever [`user_message`](Self::user_message) would show.
    pub fn upload_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                error: Some(error), ..
            } => error.clone(),
            _ => self.user_message(fallback),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// True for errors raised before any request was sent
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_)
                | ClientError::NoSession
                | ClientError::Busy
                | ClientError::UnknownFile(_)
        )
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
