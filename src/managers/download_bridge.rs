//! Bridge between the webview's download callbacks and the download tracker.
//!
//! The webview reports only two moments per download: started (with a
//! mutable save path) and completed (with a success flag). Each start opens a
//! [`DownloadSession`] sent to the tracker. Each completion closes the oldest
//! open session for the same URL.

use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::managers::download_session::{DownloadSession, DownloadSessionHandle};
use crate::types::download::{DownloadMetadata, DownloadState};

const FALLBACK_FILENAME: &str = "download";

struct PendingDownload {
    handle: DownloadSessionHandle,
    save_path: PathBuf,
}

/// Turns webview download callbacks into tracked sessions.
pub struct DownloadBridge {
    sessions: Mutex<Option<UnboundedSender<DownloadSession>>>,
    pending: Mutex<HashMap<String, VecDeque<PendingDownload>>>,
    download_dir: PathBuf,
}

impl DownloadBridge {
    pub fn new(sessions: UnboundedSender<DownloadSession>, download_dir: PathBuf) -> Self {
        Self {
            sessions: Mutex::new(Some(sessions)),
            pending: Mutex::new(HashMap::new()),
            download_dir,
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    fn pending(&self) -> MutexGuard<'_, HashMap<String, VecDeque<PendingDownload>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Called when the webview starts a download. Fixes up the save path and
    /// opens a session. Always lets the download proceed.
    pub fn on_started(&self, url: &str, suggested_path: &mut PathBuf) -> bool {
        let save_path = resolve_save_path(&self.download_dir, url, suggested_path);
        *suggested_path = save_path.clone();

        let filename = save_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string());

        // The webview reports neither size nor content type up front.
        let metadata = DownloadMetadata {
            filename,
            url: url.to_string(),
            total_bytes: 0,
            mime_type: String::new(),
            save_path: save_path.to_string_lossy().to_string(),
        };

        info!(%url, path = %save_path.display(), "download started");

        // Held until the handle is pending so `close` cannot slip in between.
        let sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let (session, handle) = DownloadSession::open(metadata);
        let sent = sessions.as_ref().is_some_and(|tx| tx.send(session).is_ok());
        if !sent {
            warn!(%url, "download tracker is not running; download will not be tracked");
            return true;
        }

        self.pending()
            .entry(url.to_string())
            .or_default()
            .push_back(PendingDownload { handle, save_path });
        true
    }

    /// Called when the webview finishes a download, successfully or not.
    pub fn on_completed(&self, url: &str, path: Option<PathBuf>, success: bool) {
        let pending = {
            let mut map = self.pending();
            let next = map.get_mut(url).and_then(VecDeque::pop_front);
            if map.get(url).is_some_and(VecDeque::is_empty) {
                map.remove(url);
            }
            next
        };

        let Some(pending) = pending else {
            warn!(%url, "completion for an unknown download");
            return;
        };

        let final_path = path.unwrap_or(pending.save_path);
        let received = fs::metadata(&final_path).map(|m| m.len()).unwrap_or(0);

        if success {
            info!(%url, path = %final_path.display(), bytes = received, "download completed");
            pending.handle.progress(received);
            pending.handle.finish(DownloadState::Completed, received);
        } else {
            info!(%url, "download interrupted");
            pending.handle.finish(DownloadState::Interrupted, received);
        }
    }

    /// Stops handing sessions to the tracker and drops downloads still in
    /// flight, so the tracker's session channel closes even while webview
    /// callbacks keep the bridge alive. Returns how many were dropped.
    pub fn close(&self) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        if sessions.take().is_none() {
            return 0;
        }

        let abandoned: usize = self.pending().drain().map(|(_, queue)| queue.len()).sum();
        if abandoned > 0 {
            warn!(abandoned, "closing download bridge with downloads still in progress");
        }
        abandoned
    }

    /// Number of downloads started but not yet completed.
    pub fn pending_count(&self) -> usize {
        self.pending().values().map(VecDeque::len).sum()
    }
}

/// Picks where a download is written. An absolute suggestion from the webview
/// wins; otherwise the file goes into `download_dir`.
pub fn resolve_save_path(download_dir: &Path, url: &str, suggested: &Path) -> PathBuf {
    if suggested.is_absolute() && suggested.file_name().is_some() {
        return suggested.to_path_buf();
    }

    let name = suggested
        .file_name()
        .map(|n| sanitize_filename(&n.to_string_lossy()))
        .filter(|n| !n.is_empty())
        .or_else(|| filename_from_url(url))
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string());

    debug!(%url, %name, "resolved download filename");
    download_dir.join(name)
}

/// Last non-empty path segment of `url`, percent-decoded and made safe for
/// use as a file name.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    let name = sanitize_filename(&decoded);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim().trim_matches('.');
    trimmed.to_string()
}
