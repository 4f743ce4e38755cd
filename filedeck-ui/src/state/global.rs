//! Global Application State
//!
//! Reactive state shared by every page: the session token, the loaded file
//! collection, the single alert slot, and the dashboard loading flag.

use filedeck::{Alert, AlertSlot, FileCollection, SessionStore, ALERT_TIMEOUT};
use leptos::*;

use super::session::LocalStorageSession;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Session token mirrored from local storage
    pub token: RwSignal<Option<String>>,
    /// Files loaded for the dashboard
    pub files: RwSignal<FileCollection>,
    /// Current alert and its generation counter
    pub alert: RwSignal<AlertSlot>,
    /// True until the initial file fetch settles
    pub loading: RwSignal<bool>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        token: create_rw_signal(LocalStorageSession.token()),
        files: create_rw_signal(FileCollection::new()),
        alert: create_rw_signal(AlertSlot::new()),
        loading: create_rw_signal(false),
    };

    provide_context(state);
}

impl GlobalState {
    /// Untracked: reading this inside an effect does not subscribe to the token
    pub fn is_authenticated(&self) -> bool {
        self.token
            .with_untracked(|t| t.as_deref().is_some_and(|t| !t.is_empty()))
    }

    /// Store a new token, overwriting the previous one
    pub fn login(&self, token: String) {
        if let Err(e) = LocalStorageSession.set_token(&token) {
            web_sys::console::error_1(&format!("Failed to store session: {}", e).into());
        }
        self.token.set(Some(token));
    }

    /// Remove the token and forget loaded files
    pub fn logout(&self) {
        if let Err(e) = LocalStorageSession.clear() {
            web_sys::console::error_1(&format!("Failed to clear session: {}", e).into());
        }
        self.token.set(None);
        self.files.set(FileCollection::new());
    }

    /// Show an alert, replacing the current one, and dismiss it after
    /// [`ALERT_TIMEOUT`] unless another alert took its place
    pub fn show_alert(&self, alert: Alert) {
        let Some(ticket) = self.alert.try_update(|slot| slot.show(alert)) else {
            return;
        };

        let slot = self.alert;
        gloo_timers::callback::Timeout::new(ALERT_TIMEOUT.as_millis() as u32, move || {
            let _ = slot.try_update(|slot| slot.expire(ticket));
        })
        .forget();
    }

    pub fn show_success(&self, title: &str, message: &str) {
        self.show_alert(Alert::success(title, message));
    }

    pub fn show_error(&self, title: &str, message: &str) {
        self.show_alert(Alert::error(title, message));
    }

    pub fn current_alert(&self) -> Option<Alert> {
        self.alert.with(|slot| slot.current().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_auth_check_does_not_subscribe() {
        let runtime = create_runtime();
        let state = GlobalState {
            token: create_rw_signal(Some("token-123".to_string())),
            files: create_rw_signal(FileCollection::new()),
            alert: create_rw_signal(AlertSlot::new()),
            loading: create_rw_signal(false),
        };

        let runs = Rc::new(Cell::new(0));
        let counter = Rc::clone(&runs);
        create_effect(move |_| {
            state.is_authenticated();
            counter.set(counter.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        state.token.set(None);
        assert!(!state.is_authenticated());
        state.token.set(Some(String::new()));
        assert!(!state.is_authenticated());
        assert_eq!(runs.get(), 1);
        runtime.dispose();
    }
}
