//! Alert Notifier State
//!
//! A single transient banner. Showing an alert replaces the current one and
//! hands back a ticket; the 5 second expiry only clears the alert the ticket
//! was issued for.

use std::time::Duration;

use crate::error::ClientError;

/// How long an alert stays visible
pub const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient success or error banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error alert using the server's message when it sent one, else `fallback`
    pub fn from_error(title: impl Into<String>, err: &ClientError, fallback: &str) -> Self {
        Self::error(title, err.user_message(fallback))
    }

    /// "Upload Failed" alert, preferring the server's `error` field
    pub fn upload_failed(err: &ClientError) -> Self {
        Self::error("Upload Failed", err.upload_message("Failed to upload file"))
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Identifies one showing of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertTicket(u64);

/// Holder for the single visible alert
#[derive(Debug, Clone, Default)]
pub struct AlertSlot {
    current: Option<Alert>,
    generation: u64,
}

impl AlertSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever is visible with `alert`
    pub fn show(&mut self, alert: Alert) -> AlertTicket {
        self.generation += 1;
        self.current = Some(alert);
        AlertTicket(self.generation)
    }

    /// Expire the alert shown under `ticket`. Returns false if it was
    /// already superseded or cleared.
    pub fn expire(&mut self, ticket: AlertTicket) -> bool {
        if ticket.0 == self.generation && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_alert_supersedes() {
        let mut slot = AlertSlot::new();
        slot.show(Alert::success("Success", "File uploaded successfully"));
        slot.show(Alert::error("Error", "Failed to delete file"));

        let current = slot.current().unwrap();
        assert!(current.is_error());
        assert_eq!(current.message, "Failed to delete file");
    }

    #[test]
    fn test_expire_clears_own_alert() {
        let mut slot = AlertSlot::new();
        let ticket = slot.show(Alert::success("Success", "ok"));
        assert!(slot.expire(ticket));
        assert!(slot.current().is_none());
        assert!(!slot.expire(ticket));
    }

    #[test]
    fn test_stale_timer_does_not_clear_successor() {
        let mut slot = AlertSlot::new();
        let first = slot.show(Alert::error("Error", "first"));
        let second = slot.show(Alert::error("Error", "second"));

        assert!(!slot.expire(first));
        assert_eq!(slot.current().unwrap().message, "second");
        assert!(slot.expire(second));
    }

    #[test]
    fn test_from_error_fallback() {
        let err = ClientError::Api {
            status: 500,
            message: None,
            error: None,
        };
        let alert = Alert::from_error("Upload Failed", &err, "Failed to upload file");
        assert_eq!(alert.message, "Failed to upload file");

        let err = ClientError::Api {
            status: 413,
            message: Some("File too large".to_string()),
            error: None,
        };
        let alert = Alert::from_error("Upload Failed", &err, "Failed to upload file");
        assert_eq!(alert.message, "File too large");
        assert_eq!(alert.title, "Upload Failed");
    }

    #[test]
    fn test_upload_failed_uses_error_field() {
        let err = ClientError::Api {
            status: 400,
            message: Some("Bad Request".to_string()),
            error: Some("File type not supported by storage".to_string()),
        };
        let alert = Alert::upload_failed(&err);
        assert!(alert.is_error());
        assert_eq!(alert.title, "Upload Failed");
        assert_eq!(alert.message, "File type not supported by storage");

        let alert = Alert::upload_failed(&ClientError::Network("down".to_string()));
        assert_eq!(alert.message, "Failed to upload file");
    }

    #[test]
    fn test_timeout_is_five_seconds() {
        assert_eq!(ALERT_TIMEOUT.as_millis(), 5000);
    }
}
