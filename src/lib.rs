//! # FileDeck
//!
//! Client library for a personal media dashboard: sign in, upload images and
//! videos, tag them, share them by link, and watch their view counts.
//!
//! ## Modules
//!
//! Always available (also compiled into the browser app):
//!
//! - [`model`]: File records and API payloads
//! - [`validation`]: Upload and tag rules checked before any request
//! - [`collection`]: In-memory file list and its reconciliation rules
//! - [`alert`]: Single-slot alert state
//! - [`navigation`]: Routes and the route guard
//! - [`session`]: Session token storage contract
//! - [`error`]: Client error taxonomy
//!
//! With the `client` feature (default):
//!
//! - [`client`]: reqwest implementation of the file API
//! - [`dashboard`]: Dashboard controller
//! - [`auth`]: Login and registration forms
//! - [`poller`]: Periodic view-count refresh
//! - [`config`]: TOML configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filedeck::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let session: SharedSession = Arc::new(FileSessionStore::new(&config.session.token_file));
//!     let api = HttpClient::new(&config.api, session.clone())?;
//!
//!     let dashboard = Dashboard::new(api, session, Notifier::new());
//!     dashboard.mount().await?;
//!
//!     for file in dashboard.files() {
//!         println!("{} ({}) views={}", file.display_name(), file.formatted_size(), file.views);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod alert;
pub mod collection;
pub mod error;
pub mod model;
pub mod navigation;
pub mod session;
pub mod share;
pub mod validation;

#[cfg(feature = "client")]
pub mod auth;
#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod config;
#[cfg(feature = "client")]
pub mod dashboard;
#[cfg(feature = "client")]
pub mod notifier;
#[cfg(feature = "client")]
pub mod poller;

#[cfg(all(test, feature = "client"))]
mod testing;

pub use alert::{Alert, AlertSlot, AlertTicket, Severity, ALERT_TIMEOUT};
pub use collection::FileCollection;
pub use error::{ClientError, ClientResult};
pub use model::{format_file_size, Credentials, FileRecord, MediaKind, Registration};
pub use navigation::{guard, Navigation, Route, NAVIGATE_DELAY};
pub use session::{MemorySessionStore, SessionError, SessionStore, TOKEN_STORAGE_KEY};
pub use share::share_url;
pub use validation::{UploadPolicy, ValidationError};

#[cfg(feature = "client")]
pub use auth::AuthForms;
#[cfg(feature = "client")]
pub use client::{FileApi, HttpClient, SharedSession, UploadFile};
#[cfg(feature = "client")]
pub use config::{Config, ConfigError};
#[cfg(feature = "client")]
pub use dashboard::Dashboard;
#[cfg(feature = "client")]
pub use notifier::Notifier;
#[cfg(feature = "client")]
pub use poller::{ViewPoller, ViewUpdate};
#[cfg(feature = "client")]
pub use session::FileSessionStore;
