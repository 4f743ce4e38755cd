//! App Root Component
//!
//! Main application component with routing and global providers.

use filedeck::{guard, Navigation, Route as AppRoute};
use leptos::*;
use leptos_router::*;

use crate::components::AlertBanner;
use crate::pages::{Dashboard, Login, Register};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let can_enter_dashboard = move || {
        state
            .token
            .with(|token| guard(AppRoute::Dashboard, token.as_deref()) == Navigation::Stay)
    };

    view! {
        <Router>
            <div class="min-h-screen bg-gray-100 text-gray-900">
                <Routes>
                    <Route path=AppRoute::Login.path() view=Login />
                    <Route path=AppRoute::Register.path() view=Register />
                    <ProtectedRoute
                        path=AppRoute::Dashboard.path()
                        redirect_path=AppRoute::Login.path()
                        condition=can_enter_dashboard
                        view=Dashboard
                    />
                    <Route
                        path="/"
                        view=|| view! { <Redirect path=AppRoute::Dashboard.path() /> }
                    />
                    <Route path="/*any" view=NotFound />
                </Routes>

                <AlertBanner />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href=AppRoute::Dashboard.path()
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
