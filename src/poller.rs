//! View Count Poller
//!
//! Fetches a file's view count immediately and then on a fixed interval until
//! stopped. A stop never aborts a request already in flight; it only prevents
//! the next one from being scheduled.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::FileApi;

/// One successful poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewUpdate {
    pub file_id: String,
    pub views: u64,
}

/// Handle to a running poller. Dropping it stops polling.
pub struct ViewPoller {
    stop: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl ViewPoller {
    pub fn spawn<A>(
        api: Arc<A>,
        file_id: impl Into<String>,
        interval: Duration,
        updates: mpsc::UnboundedSender<ViewUpdate>,
    ) -> Self
    where
        A: FileApi + ?Sized + 'static,
    {
        let file_id = file_id.into();
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = stopped.changed() => break,
                    _ = ticker.tick() => {}
                }

                match api.view_count(&file_id).await {
                    Ok(views) => {
                        let update = ViewUpdate {
                            file_id: file_id.clone(),
                            views,
                        };
                        if updates.send(update).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(file_id = %file_id, "Error fetching view count: {}", e);
                    }
                }

                if *stopped.borrow() {
                    break;
                }
            }

            tracing::debug!(file_id = %file_id, "View poller stopped");
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop polling and wait for the task to finish
    pub async fn shutdown(mut self) {
        let _ = self.stop.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ViewPoller {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
    }
}
