//! File Card
//!
//! Preview, metadata, tags and actions for one file. The card reads its
//! record from the global collection by id, polls the view count while
//! mounted, and serializes its mutating actions behind one busy flag.

use filedeck::model::VIEW_POLL_INTERVAL;
use filedeck::validation::{tags_with, tags_without, validate_new_tag, MAX_TAG_LEN};
use filedeck::{share_url, FileRecord, MediaKind, ValidationError};
use leptos::*;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};

use crate::api;
use crate::state::global::GlobalState;

/// Shown when an image preview fails to load
const PLACEHOLDER_IMAGE: &str = "https://placehold.co/300x200";

#[component]
pub fn FileCard(id: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let file_id = store_value(id);
    let file = create_memo(move |_| state.files.with(|c| file_id.with_value(|id| c.get(id).cloned())));

    let (busy, set_busy) = create_signal(false);
    let (tag_input_visible, set_tag_input_visible) = create_signal(false);
    let (new_tag, set_new_tag) = create_signal(String::new());
    let (image_failed, set_image_failed) = create_signal(false);

    // View count: once now, then on the interval until unmount
    let refresh_views = move || {
        let id = file_id.get_value();
        spawn_local(async move {
            match api::fetch_view_count(&id).await {
                Ok(views) => {
                    let _ = state.files.try_update(|c| c.set_views(&id, views));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch view count: {}", e).into());
                }
            }
        });
    };
    poll_while_mounted(VIEW_POLL_INTERVAL, refresh_views);

    let save_tags = move |tags: Vec<String>, failure: &'static str, clear_input: bool| {
        set_busy.set(true);
        let id = file_id.get_value();
        spawn_local(async move {
            match api::update_tags(&id, &tags).await {
                Ok(()) => {
                    state.files.update(|c| {
                        c.set_tags(&id, tags);
                    });
                    if clear_input {
                        let _ = set_new_tag.try_set(String::new());
                        let _ = set_tag_input_visible.try_set(false);
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Tag update failed: {}", e).into());
                    state.show_error("Error", failure);
                }
            }
            let _ = set_busy.try_set(false);
        });
    };

    let on_add_tag = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let Some(current) = file.get_untracked() else {
            return;
        };

        match validate_new_tag(&current.tags, &new_tag.get_untracked()) {
            Ok(tag) => save_tags(tags_with(&current.tags, &tag), "Failed to add tag", true),
            Err(ValidationError::EmptyTag) => {}
            Err(e) => state.show_error("Error", &e.to_string()),
        }
    };

    let remove_tag = move |tag: String| {
        if busy.get_untracked() {
            return;
        }
        if let Some(current) = file.get_untracked() {
            save_tags(tags_without(&current.tags, &tag), "Failed to remove tag", false);
        }
    };

    let on_share = move |_| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        let id = file_id.get_value();
        spawn_local(async move {
            match share_and_copy(&id).await {
                Ok(record) => {
                    state.files.update(|c| {
                        c.apply_share(&record);
                    });
                    state.show_success("Success", "Link copied to clipboard!");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Share failed: {}", e).into());
                    state.show_error("Error", "Failed to generate share link");
                }
            }
            let _ = set_busy.try_set(false);
        });
    };

    let on_delete = move |_| {
        if busy.get_untracked() {
            return;
        }
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Are you sure you want to delete this file?")
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        set_busy.set(true);
        let id = file_id.get_value();
        spawn_local(async move {
            match api::delete_file(&id).await {
                Ok(()) => {
                    state.files.update(|c| {
                        c.remove(&id);
                    });
                    state.show_success("Success", "File deleted successfully");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Delete failed: {}", e).into());
                    state.show_error("Error", "Failed to delete file");
                    let _ = set_busy.try_set(false);
                }
            }
        });
    };

    let with_file = move |f: fn(&FileRecord) -> String| file.with(|r| r.as_ref().map(f).unwrap_or_default());
    let name = move || with_file(|f| f.display_name().to_string());
    let path = move || with_file(|f| f.path.clone());
    let tags = move || file.with(|r| r.as_ref().map(|f| f.tags.clone()).unwrap_or_default());
    let media_kind = move || file.with(|r| r.as_ref().map(FileRecord::media_kind));

    view! {
        <div class="rounded-lg bg-white p-4 shadow-md">
            <div class="aspect-video w-full overflow-hidden rounded-lg bg-gray-100">
                {move || match media_kind() {
                    Some(MediaKind::Image) => view! {
                        <img
                            src=move || if image_failed.get() { PLACEHOLDER_IMAGE.to_string() } else { path() }
                            alt=name
                            class="h-full w-full object-cover"
                            loading="lazy"
                            on:error=move |_| set_image_failed.set(true)
                        />
                    }.into_view(),
                    Some(MediaKind::Video) => view! {
                        <video
                            src=path
                            class="h-full w-full"
                            controls=true
                            on:error=move |_| state.show_error("Error", "Failed to load video")
                        />
                    }.into_view(),
                    None => view! {}.into_view(),
                }}
            </div>

            <div class="mt-4">
                <div class="flex items-center justify-between">
                    <h3 class="flex-1 min-w-0 pr-2 truncate text-sm font-medium" title=name>
                        {name}
                    </h3>
                    <button
                        on:click=on_delete
                        disabled=move || busy.get()
                        class="flex-shrink-0 text-red-600 hover:text-red-800 disabled:opacity-50"
                        aria-label="Delete file"
                    >
                        "Delete"
                    </button>
                </div>

                <div class="mt-1 flex items-center justify-between text-sm text-gray-500">
                    <p>{move || with_file(FileRecord::formatted_size)}</p>
                    <p>{move || format!("{} views", file.with(|r| r.as_ref().map(|f| f.views).unwrap_or(0)))}</p>
                </div>

                <div class="mt-2 flex flex-wrap gap-2">
                    {move || tags().into_iter().map(|tag| {
                        let label = tag.clone();
                        view! {
                            <span class="flex items-center gap-1 rounded-full bg-blue-100 px-2 py-1 text-xs text-blue-800">
                                {label.clone()}
                                <button
                                    on:click=move |_| remove_tag(tag.clone())
                                    disabled=move || busy.get()
                                    class="hover:text-blue-600 disabled:opacity-50"
                                    aria-label=format!("Remove {} tag", label)
                                >
                                    "×"
                                </button>
                            </span>
                        }
                    }).collect_view()}
                </div>

                <div class="mt-4 flex items-center justify-between">
                    {move || if tag_input_visible.get() {
                        view! {
                            <form on:submit=on_add_tag class="flex gap-2">
                                <input
                                    type="text"
                                    class="rounded border px-2 py-1 text-sm"
                                    placeholder="Add tag..."
                                    maxlength=MAX_TAG_LEN
                                    prop:value=new_tag
                                    on:input=move |ev| set_new_tag.set(event_target_value(&ev))
                                    disabled=move || busy.get()
                                />
                                <button
                                    type="submit"
                                    disabled=move || busy.get() || new_tag.get().trim().is_empty()
                                    class="rounded bg-blue-600 px-2 py-1 text-sm text-white disabled:bg-blue-400"
                                >
                                    "Add"
                                </button>
                            </form>
                        }.into_view()
                    } else {
                        view! {
                            <button
                                on:click=move |_| set_tag_input_visible.set(true)
                                disabled=move || busy.get()
                                class="text-sm text-blue-600 disabled:opacity-50"
                            >
                                "Add Tag"
                            </button>
                        }.into_view()
                    }}

                    <button
                        on:click=on_share
                        disabled=move || busy.get()
                        class="flex items-center text-sm text-gray-600 hover:text-gray-800 disabled:opacity-50"
                    >
                        "Share"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Run `refresh` now and then every `every` until the owning scope is
/// cleaned up
fn poll_while_mounted(every: Duration, refresh: impl Fn() + 'static) {
    refresh();
    let interval = gloo_timers::callback::Interval::new(every.as_millis() as u32, refresh);
    on_cleanup(move || drop(interval));
}

/// Request the share link and copy its full URL to the clipboard
async fn share_and_copy(id: &str) -> Result<FileRecord, String> {
    let record = api::share_file(id).await.map_err(|e| e.to_string())?;
    let link = record
        .shareable_link
        .as_deref()
        .ok_or("response has no shareableLink")?;

    let window = web_sys::window().ok_or("no window")?;
    let origin = window.location().origin().map_err(js_error)?;
    copy_to_clipboard(&window, &share_url(&origin, link)).await?;

    Ok(record)
}

async fn copy_to_clipboard(window: &web_sys::Window, text: &str) -> Result<(), String> {
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(js_error)?;
    let write_text: js_sys::Function = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;
    let promise: js_sys::Promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(js_error)?;
    Ok(())
}

fn js_error(value: JsValue) -> String {
    format!("{:?}", value)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_polling_starts_on_mount_and_stops_on_cleanup() {
        let runtime = create_runtime();
        let mounted = create_rw_signal(true);
        let polls = Rc::new(Cell::new(0u32));

        let counter = Rc::clone(&polls);
        create_effect(move |_| {
            if mounted.get() {
                let counter = Rc::clone(&counter);
                poll_while_mounted(Duration::from_millis(20), move || counter.set(counter.get() + 1));
            }
        });
        assert_eq!(polls.get(), 1);

        TimeoutFuture::new(70).await;
        assert!(polls.get() >= 3);

        mounted.set(false);
        let stopped_at = polls.get();
        TimeoutFuture::new(70).await;
        assert_eq!(polls.get(), stopped_at);

        runtime.dispose();
    }
}
