// Lernova platform paths for Linux
// Config:    ~/.config/lernova
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Returns the configuration directory for Lernova on Linux.
/// Uses `$XDG_CONFIG_HOME/lernova` if set, otherwise `~/.config/lernova`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("lernova"),
        _ => home_dir().join(".config").join("lernova"),
    }
}

/// Returns the download directory on Linux.
/// Uses `$XDG_DOWNLOAD_DIR` if set, otherwise `~/Downloads`.
pub fn get_download_dir() -> PathBuf {
    match env::var("XDG_DOWNLOAD_DIR") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => home_dir().join("Downloads"),
    }
}
