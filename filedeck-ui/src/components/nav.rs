//! Dashboard Header
//!
//! Title bar with the logout button.

use filedeck::Route;
use leptos::*;
use leptos_router::*;

use crate::state::global::GlobalState;

#[component]
pub fn Header() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let on_logout = move |_| {
        state.logout();
        navigate(Route::Login.path(), Default::default());
    };

    view! {
        <div class="flex items-center justify-between">
            <h1 class="text-2xl font-bold">"File Management Dashboard"</h1>
            <button
                on:click=on_logout
                class="flex items-center gap-2 rounded-lg bg-red-600 px-4 py-2 text-white hover:bg-red-700"
            >
                "Logout"
            </button>
        </div>
    }
}
