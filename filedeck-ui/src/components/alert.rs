//! Alert Banner
//!
//! Renders the single active alert in the top-right corner.

use filedeck::Severity;
use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn AlertBanner() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed top-4 right-4 z-50">
            {move || {
                state.current_alert().map(|alert| {
                    let (icon, class) = match alert.severity {
                        Severity::Success => ("✓", "border-green-500 bg-white text-gray-900"),
                        Severity::Error => ("!", "border-red-500 bg-red-50 text-red-900"),
                    };

                    view! {
                        <div
                            role="alert"
                            class=format!(
                                "flex items-start gap-3 rounded-lg border px-4 py-3 shadow-lg \
                                 animate-slide-in {}",
                                class
                            )
                        >
                            <span class="text-lg leading-none">{icon}</span>
                            <div>
                                <p class="font-semibold">{alert.title}</p>
                                <p class="text-sm">{alert.message}</p>
                            </div>
                        </div>
                    }
                })
            }}
        </div>
    }
}
