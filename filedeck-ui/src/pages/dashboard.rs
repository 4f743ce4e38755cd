//! Dashboard Page
//!
//! Loads the user's files on mount and renders the upload zone plus one card
//! per file. A 401 on the initial fetch ends the session.

use filedeck::{ClientError, ClientResult, FileCollection, FileRecord, Route};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{FileCard, Header, Loading, UploadZone};
use crate::state::global::GlobalState;

/// Memoized views of the collection the page renders from. Neither changes
/// when a write only touches a file's views, tags or share link, so cards
/// stay mounted across those updates.
#[derive(Clone, Copy)]
struct FileListView {
    has_files: Memo<bool>,
    ids: Memo<Vec<String>>,
}

impl FileListView {
    fn new(files: RwSignal<FileCollection>) -> Self {
        Self {
            has_files: create_memo(move |_| files.with(|c| !c.is_empty())),
            ids: create_memo(move |_| files.with(|c| c.iter().map(|f| f.id.clone()).collect())),
        }
    }
}

/// How the initial fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchOutcome {
    Loaded,
    SessionExpired,
    Failed,
}

/// Apply the file-list response to the collection. A 401 leaves the
/// collection to the logout that follows.
fn settle_fetch(files: RwSignal<FileCollection>, result: ClientResult<Vec<FileRecord>>) -> FetchOutcome {
    match result {
        Ok(records) => {
            files.update(|c| c.replace_all(records));
            FetchOutcome::Loaded
        }
        Err(ClientError::Unauthorized) => FetchOutcome::SessionExpired,
        Err(_) => {
            files.update(|c| c.replace_all(Vec::new()));
            FetchOutcome::Failed
        }
    }
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    // Fetch files once on mount
    create_effect(move |_| {
        if !state.is_authenticated() {
            navigate(Route::Login.path(), Default::default());
            return;
        }

        state.loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api::fetch_files().await;
            if let Err(e) = &result {
                web_sys::console::error_1(&format!("Error fetching files: {}", e).into());
            }

            match settle_fetch(state.files, result) {
                FetchOutcome::Loaded => {}
                FetchOutcome::SessionExpired => {
                    state.logout();
                    navigate(Route::Login.path(), Default::default());
                }
                FetchOutcome::Failed => state.show_error("Error", "Failed to fetch files"),
            }

            let _ = state.loading.try_set(false);
        });
    });

    let list = FileListView::new(state.files);

    view! {
        <div class="p-6 space-y-6">
            <Header />

            <UploadZone />

            {move || {
                if state.loading.get() {
                    view! { <Loading /> }.into_view()
                } else if !list.has_files.get() {
                    view! {
                        <p class="text-center text-gray-500 py-12">
                            "No files yet. Drop an image or video above to get started."
                        </p>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-1 gap-6 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4">
                            <For
                                each=move || list.ids.get()
                                key=|id| id.clone()
                                children=move |id| view! { <FileCard id=id /> }
                            />
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn record(id: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            original_name: Some(format!("{}.png", id)),
            mime_type: Some("image/png".to_string()),
            size: 1024,
            path: format!("/uploads/{}.png", id),
            tags: Vec::new(),
            views: 0,
            shareable_link: None,
        }
    }

    fn collection(ids: &[&str]) -> RwSignal<FileCollection> {
        let files = create_rw_signal(FileCollection::new());
        files.update(|c| c.replace_all(ids.iter().map(|id| record(id)).collect()));
        files
    }

    /// Mount one child owner per id under an effect shaped like the page's
    /// list closure, counting mounts and cleanups
    fn mount_cards(list: FileListView) -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let mounts = Rc::new(Cell::new(0));
        let cleanups = Rc::new(Cell::new(0));

        let (m, c) = (Rc::clone(&mounts), Rc::clone(&cleanups));
        create_effect(move |_| {
            if !list.has_files.get() {
                return;
            }
            for _ in list.ids.get() {
                let (m, c) = (Rc::clone(&m), Rc::clone(&c));
                create_effect(move |_| {
                    m.set(m.get() + 1);
                    let c = Rc::clone(&c);
                    on_cleanup(move || c.set(c.get() + 1));
                });
            }
        });

        (mounts, cleanups)
    }

    #[test]
    fn test_record_updates_keep_cards_mounted() {
        let runtime = create_runtime();
        let files = collection(&["a", "b"]);
        let (mounts, cleanups) = mount_cards(FileListView::new(files));
        assert_eq!((mounts.get(), cleanups.get()), (2, 0));

        files.update(|c| {
            c.set_views("a", 7);
        });
        files.update(|c| {
            c.set_tags("b", vec!["beach".to_string()]);
        });
        let mut shared = record("a");
        shared.views = 8;
        shared.shareable_link = Some("link-a".to_string());
        files.update(|c| {
            c.apply_share(&shared);
        });

        assert_eq!((mounts.get(), cleanups.get()), (2, 0));
        runtime.dispose();
    }

    #[test]
    fn test_membership_changes_remount() {
        let runtime = create_runtime();
        let files = collection(&["a"]);
        let list = FileListView::new(files);
        let (mounts, cleanups) = mount_cards(list);

        files.update(|c| c.append(record("b")));
        assert_eq!(list.ids.get_untracked(), vec!["a", "b"]);
        assert_eq!((mounts.get(), cleanups.get()), (3, 1));

        files.update(|c| {
            c.remove("a");
            c.remove("b");
        });
        assert!(!list.has_files.get_untracked());
        assert_eq!((mounts.get(), cleanups.get()), (3, 3));
        runtime.dispose();
    }

    #[test]
    fn test_settle_fetch_loaded() {
        let runtime = create_runtime();
        let files = create_rw_signal(FileCollection::new());

        let outcome = settle_fetch(files, Ok(vec![record("a"), record("b")]));
        assert_eq!(outcome, FetchOutcome::Loaded);
        assert_eq!(files.with_untracked(|c| c.len()), 2);
        runtime.dispose();
    }

    #[test]
    fn test_settle_fetch_unauthorized_expires_session() {
        let runtime = create_runtime();
        let files = collection(&["a"]);

        let outcome = settle_fetch(files, Err(ClientError::Unauthorized));
        assert_eq!(outcome, FetchOutcome::SessionExpired);
        runtime.dispose();
    }

    #[test]
    fn test_settle_fetch_failure_empties_list() {
        let runtime = create_runtime();
        let files = collection(&["a"]);

        let outcome = settle_fetch(files, Err(ClientError::Timeout));
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(files.with_untracked(|c| c.is_empty()));

        let outcome = settle_fetch(files, Err(ClientError::api(500, None)));
        assert_eq!(outcome, FetchOutcome::Failed);
        runtime.dispose();
    }
}
