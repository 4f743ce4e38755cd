//! FileDeck Dashboard
//!
//! Browser front end for the file API built with Leptos (WASM).
//!
//! # Features
//!
//! - Login and registration
//! - Drag-and-drop image and video upload
//! - Inline tagging, share links and live view counts
//!
//! # Architecture
//!
//! Client-side rendered (CSR) Leptos application compiled to WebAssembly.
//! Validation rules, file records and alert state come from the `filedeck`
//! crate; this crate owns rendering and the browser HTTP calls.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
