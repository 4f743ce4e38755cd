//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod alert;
pub mod file_card;
pub mod loading;
pub mod nav;
pub mod upload_zone;

pub use alert::AlertBanner;
pub use file_card::FileCard;
pub use loading::Loading;
pub use nav::Header;
pub use upload_zone::UploadZone;
