// Lernova state managers
// Managers handle stateful operations: download sessions, download tracking, windows.

pub mod download_bridge;
pub mod download_session;
pub mod download_tracker;
pub mod window_registry;
