//! State Management
//!
//! Global reactive state and session persistence.

pub mod global;
pub mod session;

pub use global::{provide_global_state, GlobalState};
pub use session::LocalStorageSession;
