// Lernova platform abstraction
// Provides platform-specific paths for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory for Lernova.
///
/// - **Linux**: `~/.config/lernova` (or `$XDG_CONFIG_HOME/lernova`)
/// - **macOS**: `~/Library/Application Support/Lernova`
/// - **Windows**: `%APPDATA%/Lernova`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Returns the directory downloads are saved to when settings don't name one.
///
/// - **Linux**: `$XDG_DOWNLOAD_DIR` or `~/Downloads`
/// - **macOS**: `~/Downloads`
/// - **Windows**: `%USERPROFILE%/Downloads`
pub fn get_download_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_download_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_download_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_download_dir()
    }
}

/// Whether closing the last window should quit the application.
/// On macOS the app stays alive without windows.
pub fn quit_when_last_window_closes() -> bool {
    !cfg!(target_os = "macos")
}

/// What the shell does in response to a window-lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Quit,
    OpenWindow,
    Nothing,
}

/// Decision after a window closed, given how many remain open.
pub fn after_window_closed(open_windows: usize) -> LifecycleAction {
    window_closed_action(open_windows, quit_when_last_window_closes())
}

/// Decision when the app is re-activated (dock icon click on macOS).
/// A window is only opened when none exists, visible or still loading.
pub fn on_reopen(open_windows: usize, has_visible_windows: bool) -> LifecycleAction {
    if open_windows == 0 && !has_visible_windows {
        LifecycleAction::OpenWindow
    } else {
        LifecycleAction::Nothing
    }
}

fn window_closed_action(open_windows: usize, quit_on_last: bool) -> LifecycleAction {
    if open_windows == 0 && quit_on_last {
        LifecycleAction::Quit
    } else {
        LifecycleAction::Nothing
    }
}
