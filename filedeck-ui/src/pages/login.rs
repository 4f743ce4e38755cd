//! Login Page

use filedeck::validation::validate_credentials;
use filedeck::{Alert, Credentials, Route, NAVIGATE_DELAY};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let credentials = Credentials::new(email.get(), password.get());
        if let Err(e) = validate_credentials(&credentials) {
            state.show_error("Error", &e.to_string());
            return;
        }

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&credentials).await {
                Ok(token) => {
                    state.login(token);
                    state.show_success("Success", "Successfully logged in!");
                    gloo_timers::callback::Timeout::new(
                        NAVIGATE_DELAY.as_millis() as u32,
                        move || navigate(Route::Dashboard.path(), Default::default()),
                    )
                    .forget();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Login failed: {}", e).into());
                    state.show_alert(Alert::from_error("Login Failed", &e, "Invalid credentials"));
                }
            }
            let _ = set_submitting.try_set(false);
        });
    };

    view! {
        <div class="flex min-h-screen items-center justify-center">
            <div class="w-full max-w-md space-y-8 rounded-xl bg-white p-8 shadow-lg">
                <div class="text-center">
                    <h2 class="text-3xl font-bold">"Sign in to your account"</h2>
                    <p class="mt-2 text-sm text-gray-600">
                        "Don't have an account? "
                        <A href=Route::Register.path() class="text-blue-600 hover:text-blue-800">
                            "Create one"
                        </A>
                    </p>
                </div>

                <form on:submit=on_submit class="space-y-6">
                    <div>
                        <label class="block text-sm font-medium">"Email"</label>
                        <input
                            type="email"
                            class="mt-1 block w-full rounded-md border p-2"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div>
                        <label class="block text-sm font-medium">"Password"</label>
                        <input
                            type="password"
                            class="mt-1 block w-full rounded-md border p-2"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full rounded-md bg-blue-600 py-2 text-white hover:bg-blue-700
                               disabled:bg-blue-400 disabled:cursor-not-allowed"
                    >
                        {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
