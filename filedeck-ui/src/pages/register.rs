//! Registration Page

use filedeck::validation::validate_registration;
use filedeck::{Alert, Registration, Route, NAVIGATE_DELAY};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::GlobalState;

#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let form = Registration::new(email.get(), password.get(), confirm.get());
        if let Err(e) = validate_registration(&form) {
            state.show_error("Error", &e.to_string());
            return;
        }

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            // The confirmation never leaves the browser
            match api::register(&form.credentials()).await {
                Ok(token) => {
                    state.login(token);
                    state.show_success("Success", "Registration successful!");
                    gloo_timers::callback::Timeout::new(
                        NAVIGATE_DELAY.as_millis() as u32,
                        move || navigate(Route::Dashboard.path(), Default::default()),
                    )
                    .forget();
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Registration failed: {}", e).into());
                    state.show_alert(Alert::from_error(
                        "Registration Failed",
                        &e,
                        "Failed to register",
                    ));
                }
            }
            let _ = set_submitting.try_set(false);
        });
    };

    view! {
        <div class="flex min-h-screen items-center justify-center">
            <div class="w-full max-w-md space-y-8 rounded-xl bg-white p-8 shadow-lg">
                <div class="text-center">
                    <h2 class="text-3xl font-bold">"Create an account"</h2>
                    <p class="mt-2 text-sm text-gray-600">
                        "Already have an account? "
                        <A href=Route::Login.path() class="text-blue-600 hover:text-blue-800">
                            "Sign in"
                        </A>
                    </p>
                </div>

                <form on:submit=on_submit class="space-y-6">
                    <FormField label="Email" kind="email" value=email set_value=set_email />
                    <FormField label="Password" kind="password" value=password set_value=set_password />
                    <FormField
                        label="Confirm Password"
                        kind="password"
                        value=confirm
                        set_value=set_confirm
                    />
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full rounded-md bg-blue-600 py-2 text-white hover:bg-blue-700
                               disabled:bg-blue-400 disabled:cursor-not-allowed"
                    >
                        {move || if submitting.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[component]
fn FormField(
    label: &'static str,
    kind: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium">{label}</label>
            <input
                type=kind
                class="mt-1 block w-full rounded-md border p-2"
                prop:value=value
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        </div>
    }
}
