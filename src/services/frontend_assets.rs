// Lernova frontend assets
// Decides what a new window loads and serves the built frontend from disk
// through the `lernova://` custom protocol.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::types::settings::FrontendSettings;

/// Scheme registered with the webview for bundled frontend files.
pub const PROTOCOL: &str = "lernova";

/// URL a freshly created window should load.
pub fn start_url(frontend: &FrontendSettings) -> String {
    if frontend.dev_mode {
        frontend.dev_server_url.clone()
    } else {
        format!("{}://localhost/index.html", PROTOCOL)
    }
}

/// Maps a request path onto a file under `dist_dir`. Rejects any path that
/// would climb out of it.
pub fn resolve_asset_path(dist_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    let relative = if trimmed.is_empty() { "index.html" } else { trimmed };

    let mut resolved = dist_dir.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Reads a bundled asset. Returns the bytes and their content type.
pub fn load_asset(dist_dir: &Path, request_path: &str) -> Option<(Vec<u8>, &'static str)> {
    let path = resolve_asset_path(dist_dir, request_path)?;
    match fs::read(&path) {
        Ok(bytes) => Some((bytes, content_type_for(&path))),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "frontend asset not found");
            None
        }
    }
}
