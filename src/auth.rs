//! Login and Registration
//!
//! Validates the form, calls the API, and on success stores the token.
//! Callers perform the redirect after [`NAVIGATE_DELAY`](crate::navigation::NAVIGATE_DELAY).

use crate::client::{FileApi, SharedSession};
use crate::error::ClientResult;
use crate::model::{Credentials, Registration};
use crate::navigation::{Navigation, Route};
use crate::notifier::Notifier;
use crate::validation::{validate_credentials, validate_registration, ValidationError};

pub struct AuthForms<'a, A: FileApi> {
    api: &'a A,
    session: SharedSession,
    notifier: Notifier,
}

impl<'a, A: FileApi> AuthForms<'a, A> {
    pub fn new(api: &'a A, session: SharedSession, notifier: Notifier) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    pub async fn submit_login(&self, credentials: &Credentials) -> ClientResult<Navigation> {
        if let Err(e) = validate_credentials(credentials) {
            return Err(self.invalid(e));
        }

        match self.api.login(credentials).await {
            Ok(token) => {
                self.session.set_token(&token)?;
                tracing::info!("Logged in as {}", credentials.email);
                self.notifier.success("Success", "Successfully logged in!");
                Ok(Navigation::Redirect(Route::Dashboard))
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.notifier
                    .error("Login Failed", &e.user_message("Invalid credentials"));
                Err(e)
            }
        }
    }

    /// Only email and password are sent; the confirmation stays client-side
    pub async fn submit_register(&self, form: &Registration) -> ClientResult<Navigation> {
        if let Err(e) = validate_registration(form) {
            return Err(self.invalid(e));
        }

        match self.api.register(&form.credentials()).await {
            Ok(token) => {
                self.session.set_token(&token)?;
                tracing::info!("Registered {}", form.email);
                self.notifier.success("Success", "Registration successful!");
                Ok(Navigation::Redirect(Route::Dashboard))
            }
            Err(e) => {
                tracing::warn!("Registration failed: {}", e);
                self.notifier
                    .error("Registration Failed", &e.user_message("Failed to register"));
                Err(e)
            }
        }
    }

    fn invalid(&self, err: ValidationError) -> crate::error::ClientError {
        self.notifier.error("Error", &err.to_string());
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpClient;
    use crate::config::ApiConfig;
    use crate::error::ClientError;
    use crate::session::{MemorySessionStore, SessionStore};
    use crate::testing::{self, MockApi};
    use std::sync::Arc;

    async fn setup(token: Option<&str>) -> (MockApi, Arc<MemorySessionStore>, HttpClient) {
        let mock = MockApi::spawn(testing::seeded()).await;
        let session = Arc::new(match token {
            Some(t) => MemorySessionStore::with_token(t),
            None => MemorySessionStore::new(),
        });
        let config = ApiConfig {
            base_url: mock.base_url.clone(),
            request_timeout_secs: 5,
        };
        let api = HttpClient::new(&config, session.clone()).unwrap();
        (mock, session, api)
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (_mock, session, api) = setup(Some("old-token")).await;
        let notifier = Notifier::new();
        let forms = AuthForms::new(&api, session.clone(), notifier.clone());

        let nav = forms
            .submit_login(&Credentials::new(testing::EMAIL, testing::PASSWORD))
            .await
            .unwrap();

        assert_eq!(nav, Navigation::Redirect(Route::Dashboard));
        assert_eq!(session.token().as_deref(), Some(testing::TOKEN));
        assert_eq!(notifier.current().unwrap().message, "Successfully logged in!");
    }

    #[tokio::test]
    async fn test_login_failure_shows_server_message() {
        let (_mock, session, api) = setup(None).await;
        let notifier = Notifier::new();
        let forms = AuthForms::new(&api, session.clone(), notifier.clone());

        let result = forms
            .submit_login(&Credentials::new(testing::EMAIL, "wrong"))
            .await;

        assert!(result.is_err());
        assert_eq!(session.token(), None);
        let alert = notifier.current().unwrap();
        assert_eq!(alert.title, "Login Failed");
        assert_eq!(alert.message, "Invalid email or password");
    }

    #[tokio::test]
    async fn test_login_empty_fields_no_request() {
        let (mock, session, api) = setup(None).await;
        let notifier = Notifier::new();
        let forms = AuthForms::new(&api, session, notifier.clone());

        let err = forms
            .submit_login(&Credentials::new("", "pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Validation(ValidationError::MissingFields)));
        assert_eq!(mock.requests(), 0);
        assert_eq!(notifier.current().unwrap().message, "Please fill in all fields");
    }

    #[tokio::test]
    async fn test_register_password_mismatch_no_request() {
        let (mock, session, api) = setup(None).await;
        let notifier = Notifier::new();
        let forms = AuthForms::new(&api, session, notifier.clone());

        let form = Registration::new("new@example.com", "one", "two");
        assert!(forms.submit_register(&form).await.is_err());
        assert_eq!(mock.requests(), 0);
        assert_eq!(notifier.current().unwrap().message, "Passwords do not match");
    }

    #[tokio::test]
    async fn test_register_success() {
        let (_mock, session, api) = setup(None).await;
        let notifier = Notifier::new();
        let forms = AuthForms::new(&api, session.clone(), notifier.clone());

        let form = Registration::new("new@example.com", "pw", "pw");
        let nav = forms.submit_register(&form).await.unwrap();

        assert_eq!(nav, Navigation::Redirect(Route::Dashboard));
        assert!(session.is_authenticated());
        assert_eq!(notifier.current().unwrap().message, "Registration successful!");
    }

    #[tokio::test]
    async fn test_register_taken_email() {
        let (_mock, session, api) = setup(None).await;
        let notifier = Notifier::new();
        let forms = AuthForms::new(&api, session.clone(), notifier.clone());

        let form = Registration::new(testing::TAKEN_EMAIL, "pw", "pw");
        assert!(forms.submit_register(&form).await.is_err());
        assert!(!session.is_authenticated());

        let alert = notifier.current().unwrap();
        assert_eq!(alert.title, "Registration Failed");
        assert_eq!(alert.message, "User already exists");
    }
}
