//! Dashboard Controller
//!
//! Owns the in-memory file collection for a session and runs every dashboard
//! action against the API: fetch on mount, upload, tag edits, share, delete,
//! and view-count refresh. Each action reports its outcome through the
//! [`Notifier`]; mutating actions on one file are serialized by a busy flag.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::alert::Alert;
use crate::client::{FileApi, SharedSession, UploadFile};
use crate::collection::FileCollection;
use crate::error::{ClientError, ClientResult};
use crate::model::FileRecord;
use crate::navigation::{guard, Navigation, Route};
use crate::notifier::Notifier;
use crate::share::share_url;
use crate::validation::{tags_with, tags_without, validate_new_tag, UploadPolicy};

pub struct Dashboard<A: FileApi> {
    api: A,
    session: SharedSession,
    files: Mutex<FileCollection>,
    busy: BusySet,
    notifier: Notifier,
    policy: UploadPolicy,
}

impl<A: FileApi> Dashboard<A> {
    pub fn new(api: A, session: SharedSession, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            files: Mutex::new(FileCollection::new()),
            busy: BusySet::default(),
            notifier,
            policy: UploadPolicy::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Snapshot of the collection
    pub fn files(&self) -> Vec<FileRecord> {
        self.lock_files().to_vec()
    }

    pub fn file(&self, id: &str) -> Option<FileRecord> {
        self.lock_files().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock_files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_files().is_empty()
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.contains(id)
    }

    /// Load the file list.
    ///
    /// Without a token this redirects to login without calling the API. A 401
    /// forces a logout; other failures leave the list empty and raise an
    /// alert.
    pub async fn mount(&self) -> ClientResult<Navigation> {
        let token = self.session.token();
        if let nav @ Navigation::Redirect(_) = guard(Route::Dashboard, token.as_deref()) {
            return Ok(nav);
        }

        match self.api.list_files().await {
            Ok(files) => {
                tracing::info!("Fetched {} files", files.len());
                self.lock_files().replace_all(files);
                Ok(Navigation::Stay)
            }
            Err(ClientError::Unauthorized) => {
                tracing::warn!("File list rejected with 401, logging out");
                Ok(self.logout())
            }
            Err(e) => {
                tracing::error!("Error fetching files: {}", e);
                self.lock_files().replace_all(Vec::new());
                self.notifier.error("Error", "Failed to fetch files");
                Err(e)
            }
        }
    }

    /// Drop the session and return to login
    pub fn logout(&self) -> Navigation {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear session: {}", e);
        }
        self.lock_files().replace_all(Vec::new());
        Navigation::Redirect(Route::Login)
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Validate and upload a file, appending the returned record
    pub async fn upload(&self, file: UploadFile) -> ClientResult<FileRecord> {
        if let Err(e) = self.policy.check(&file.mime_type, file.size()) {
            self.notifier.error("Error", &e.to_string());
            return Err(e.into());
        }

        match self.api.upload(file).await {
            Ok(record) => {
                self.lock_files().append(record.clone());
                self.notifier.success("Success", "File uploaded successfully");
                Ok(record)
            }
            Err(e) => {
                tracing::error!("Upload error: {}", e);
                self.notifier.show(Alert::upload_failed(&e));
                Err(e)
            }
        }
    }

    /// Add a tag to a file. Returns the new tag list.
    pub async fn add_tag(&self, id: &str, input: &str) -> ClientResult<Vec<String>> {
        let _busy = self.busy.try_acquire(id)?;
        let current = self.current_tags(id)?;

        let tag = match validate_new_tag(&current, input) {
            Ok(tag) => tag,
            Err(e) => {
                self.notifier.error("Error", &e.to_string());
                return Err(e.into());
            }
        };

        let tags = tags_with(&current, &tag);
        self.submit_tags(id, tags, "Failed to add tag").await
    }

    /// Remove every occurrence of `tag` from a file. Returns the new tag list.
    pub async fn remove_tag(&self, id: &str, tag: &str) -> ClientResult<Vec<String>> {
        let _busy = self.busy.try_acquire(id)?;
        let current = self.current_tags(id)?;

        let tags = tags_without(&current, tag);
        self.submit_tags(id, tags, "Failed to remove tag").await
    }

    async fn submit_tags(
        &self,
        id: &str,
        tags: Vec<String>,
        failure: &str,
    ) -> ClientResult<Vec<String>> {
        match self.api.update_tags(id, &tags).await {
            Ok(()) => {
                self.lock_files().set_tags(id, tags.clone());
                Ok(tags)
            }
            Err(e) => {
                tracing::error!(file_id = %id, "Tag update failed: {}", e);
                self.notifier.error("Error", failure);
                Err(e)
            }
        }
    }

    /// Generate (or fetch) the share link and return its full URL
    pub async fn share(&self, id: &str, origin: &str) -> ClientResult<String> {
        let _busy = self.busy.try_acquire(id)?;

        let result = self.api.share(id).await.and_then(|record| {
            let link = record
                .shareable_link
                .clone()
                .ok_or_else(|| ClientError::Decode("response has no shareableLink".to_string()))?;
            Ok((record, link))
        });

        match result {
            Ok((record, link)) => {
                self.lock_files().apply_share(&record);
                self.notifier.success("Success", "Share link generated");
                Ok(share_url(origin, &link))
            }
            Err(e) => {
                tracing::error!(file_id = %id, "Share failed: {}", e);
                self.notifier.error("Error", "Failed to generate share link");
                Err(e)
            }
        }
    }

    /// Delete a file after `confirm` approves. Returns false when declined.
    pub async fn delete(&self, id: &str, confirm: impl FnOnce() -> bool) -> ClientResult<bool> {
        if self.busy.contains(id) {
            return Err(ClientError::Busy);
        }
        if !confirm() {
            return Ok(false);
        }
        let _busy = self.busy.try_acquire(id)?;

        match self.api.delete_file(id).await {
            Ok(()) => {
                self.lock_files().remove(id);
                self.notifier.success("Success", "File deleted successfully");
                Ok(true)
            }
            Err(e) => {
                tracing::error!(file_id = %id, "Delete failed: {}", e);
                self.notifier.error("Error", "Failed to delete file");
                Err(e)
            }
        }
    }

    /// Fetch the current view count. Failures are only logged.
    pub async fn refresh_views(&self, id: &str) -> ClientResult<u64> {
        match self.api.view_count(id).await {
            Ok(views) => {
                self.lock_files().set_views(id, views);
                Ok(views)
            }
            Err(e) => {
                tracing::warn!(file_id = %id, "Failed to fetch view count: {}", e);
                Err(e)
            }
        }
    }

    fn current_tags(&self, id: &str) -> ClientResult<Vec<String>> {
        self.lock_files()
            .get(id)
            .map(|f| f.tags.clone())
            .ok_or_else(|| ClientError::UnknownFile(id.to_string()))
    }

    fn lock_files(&self) -> MutexGuard<'_, FileCollection> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Ids of files with a mutating action in flight
#[derive(Debug, Clone, Default)]
struct BusySet {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl BusySet {
    fn try_acquire(&self, id: &str) -> ClientResult<BusyGuard> {
        let mut ids = self.lock();
        if !ids.insert(id.to_string()) {
            return Err(ClientError::Busy);
        }
        Ok(BusyGuard {
            ids: Arc::clone(&self.ids),
            id: id.to_string(),
        })
    }

    fn contains(&self, id: &str) -> bool {
        self.lock().contains(id)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.ids.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears the busy flag when the action finishes
struct BusyGuard {
    ids: Arc<Mutex<HashSet<String>>>,
    id: String,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&self.id);
    }
}
