//! Alert Notifier
//!
//! Shared handle to the single visible alert. Each shown alert schedules its
//! own expiry on the tokio runtime.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::alert::{Alert, AlertSlot, AlertTicket, ALERT_TIMEOUT};

#[derive(Debug, Clone, Default)]
pub struct Notifier {
    slot: Arc<Mutex<AlertSlot>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `alert`, replacing the current one, and schedule its dismissal
    pub fn show(&self, alert: Alert) -> AlertTicket {
        if alert.is_error() {
            tracing::debug!(title = %alert.title, message = %alert.message, "error alert");
        } else {
            tracing::debug!(title = %alert.title, message = %alert.message, "success alert");
        }

        let ticket = self.lock().show(alert);

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let slot = Arc::clone(&self.slot);
            handle.spawn(async move {
                tokio::time::sleep(ALERT_TIMEOUT).await;
                slot.lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .expire(ticket);
            });
        }

        ticket
    }

    pub fn success(&self, title: &str, message: &str) -> AlertTicket {
        self.show(Alert::success(title, message))
    }

    pub fn error(&self, title: &str, message: &str) -> AlertTicket {
        self.show(Alert::error(title, message))
    }

    /// Currently visible alert
    pub fn current(&self) -> Option<Alert> {
        self.lock().current().cloned()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, AlertSlot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_alert_expires_after_timeout() {
        let notifier = Notifier::new();
        notifier.success("Success", "File uploaded successfully");

        tokio::time::sleep(ALERT_TIMEOUT - Duration::from_millis(10)).await;
        assert!(notifier.current().is_some());

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_alert_gets_full_timeout() {
        let notifier = Notifier::new();
        notifier.error("Error", "first");

        tokio::time::sleep(Duration::from_secs(3)).await;
        notifier.error("Error", "second");
        assert_eq!(notifier.current().unwrap().message, "second");

        // First alert's timer fires at 5s and must leave the second alone
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(notifier.current().unwrap().message, "second");

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(notifier.current().is_none());
    }

    #[test]
    fn test_show_without_runtime() {
        let notifier = Notifier::new();
        notifier.success("Success", "ok");
        assert_eq!(notifier.current().unwrap().title, "Success");
        notifier.clear();
        assert!(notifier.current().is_none());
    }
}
