//! Upload Zone
//!
//! File picker plus drag-and-drop target. Files are validated against the
//! upload policy before anything is sent.

use filedeck::{Alert, UploadPolicy};
use leptos::*;
use wasm_bindgen::JsCast;

use crate::api;
use crate::components::loading::InlineLoading;
use crate::state::global::GlobalState;

#[component]
pub fn UploadZone() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (dragging, set_dragging) = create_signal(false);
    let (uploading, set_uploading) = create_signal(false);

    let upload = move |file: web_sys::File| {
        let policy = UploadPolicy::default();
        if let Err(e) = policy.check(&file.type_(), file.size() as u64) {
            state.show_error("Error", &e.to_string());
            return;
        }

        set_uploading.set(true);
        spawn_local(async move {
            match api::upload_file(&file).await {
                Ok(record) => {
                    state.files.update(|c| c.append(record));
                    state.show_success("Success", "File uploaded successfully");
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Upload error: {}", e).into());
                    state.show_alert(Alert::upload_failed(&e));
                }
            }
            let _ = set_uploading.try_set(false);
        });
    };

    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };

        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            upload(file);
        }
        // Reset so the same file can be picked again
        input.set_value("");
    };

    let on_drag_enter = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_dragging.set(true);
    };

    let on_drag_over = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if let Some(transfer) = ev.data_transfer() {
            transfer.set_drop_effect("copy");
        }
    };

    let on_drag_leave = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if leaving_into_child(&ev) {
            return;
        }
        set_dragging.set(false);
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_dragging.set(false);

        // Only the first dropped file is used
        let file = ev
            .data_transfer()
            .and_then(|t| t.files())
            .and_then(|files| files.get(0));
        if let Some(file) = file {
            upload(file);
        }
    };

    view! {
        <div
            on:dragenter=on_drag_enter
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
            class=move || format!(
                "rounded-lg border-2 border-dashed p-8 text-center transition-colors {}",
                if dragging.get() { "border-blue-500 bg-blue-50" } else { "border-gray-300 bg-white" }
            )
        >
            <label class="flex cursor-pointer flex-col items-center gap-2">
                <input
                    type="file"
                    accept="image/jpeg,image/png,image/gif,video/mp4"
                    class="hidden"
                    on:change=on_change
                    disabled=move || uploading.get()
                />
                {move || if uploading.get() {
                    view! {
                        <span class="flex items-center gap-2 text-gray-600">
                            <InlineLoading />
                            "Uploading..."
                        </span>
                    }.into_view()
                } else {
                    view! {
                        <span class="text-gray-600">
                            "Drag and drop a file here, or click to select"
                        </span>
                    }.into_view()
                }}
                <span class="text-xs text-gray-400">"JPEG, PNG, GIF or MP4 up to 10MB"</span>
            </label>
        </div>
    }
}

/// True when the pointer moved onto a descendant of the drop zone
fn leaving_into_child(ev: &web_sys::DragEvent) -> bool {
    let zone = ev
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    let entered = ev
        .related_target()
        .and_then(|t| t.dyn_into::<web_sys::Node>().ok());

    match (zone, entered) {
        (Some(zone), Some(entered)) => zone.contains(Some(&entered)),
        _ => false,
    }
}
