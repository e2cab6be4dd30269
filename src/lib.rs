//! Lernova: a desktop shell hosting the Lernova web frontend in native windows.
//!
//! File downloads started inside a window are mirrored to the remote downloads
//! API. This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
