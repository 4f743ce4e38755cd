//! API Access
//!
//! Browser HTTP calls to the file API.

pub mod client;

pub use client::*;
