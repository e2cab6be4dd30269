//! Tests for the DownloadBridge: webview download callbacks -> download sessions.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lernova::app::App;
use lernova::managers::download_bridge::{resolve_save_path, DownloadBridge};
use lernova::managers::download_session::DownloadSession;
use lernova::services::downloads_api::DownloadsApi;
use lernova::services::settings_engine::SettingsEngine;
use lernova::types::download::{
    CreateDownloadRequest, DownloadEvent, DownloadState, RecordId, RemoteStatus,
    UpdateDownloadRequest,
};
use lernova::types::errors::ApiError;
use tempfile::TempDir;
use tokio::sync::mpsc::{self, UnboundedReceiver};

fn bridge_in(dir: &TempDir) -> (DownloadBridge, UnboundedReceiver<DownloadSession>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (DownloadBridge::new(tx, dir.path().to_path_buf()), rx)
}

async fn drain(session: DownloadSession) -> Vec<DownloadEvent> {
    let (_, mut events) = session.into_parts();
    let mut out = Vec::new();
    while let Some(e) = events.recv().await {
        out.push(e);
    }
    out
}

#[tokio::test]
async fn test_started_opens_session_in_download_dir() {
    let dir = TempDir::new().unwrap();
    let (bridge, mut rx) = bridge_in(&dir);

    let mut suggested = PathBuf::new();
    assert!(bridge.on_started("https://example.com/docs/syllabus.pdf", &mut suggested));

    assert_eq!(suggested, dir.path().join("syllabus.pdf"));
    assert_eq!(bridge.pending_count(), 1);

    let session = rx.recv().await.unwrap();
    let meta = session.metadata();
    assert_eq!(meta.filename, "syllabus.pdf");
    assert_eq!(meta.url, "https://example.com/docs/syllabus.pdf");
    assert_eq!(meta.total_bytes, 0);
    assert_eq!(meta.save_path, dir.path().join("syllabus.pdf").to_string_lossy());
}

#[test]
fn test_absolute_suggestion_is_kept() {
    let dir = TempDir::new().unwrap();
    let chosen = dir.path().join("elsewhere").join("file.bin");

    let resolved = resolve_save_path(dir.path(), "https://example.com/x", &chosen);

    assert_eq!(resolved, chosen);
}

#[test]
fn test_relative_suggestion_keeps_its_name() {
    let dir = TempDir::new().unwrap();

    let resolved = resolve_save_path(
        dir.path(),
        "https://example.com/download?id=1",
        &PathBuf::from("report.csv"),
    );

    assert_eq!(resolved, dir.path().join("report.csv"));
}

#[test]
fn test_fallback_filename_when_url_has_no_path() {
    let dir = TempDir::new().unwrap();

    let resolved = resolve_save_path(dir.path(), "https://example.com/", &PathBuf::new());

    assert_eq!(resolved, dir.path().join("download"));
}

#[tokio::test]
async fn test_successful_completion_reports_file_size() {
    let dir = TempDir::new().unwrap();
    let (bridge, mut rx) = bridge_in(&dir);
    let url = "https://example.com/data.bin";

    let mut path = PathBuf::new();
    bridge.on_started(url, &mut path);
    fs::write(&path, vec![0u8; 1234]).unwrap();
    bridge.on_completed(url, Some(path.clone()), true);

    assert_eq!(bridge.pending_count(), 0);
    let events = drain(rx.recv().await.unwrap()).await;
    assert_eq!(
        events,
        vec![
            DownloadEvent::Updated {
                state: DownloadState::Progressing,
                received_bytes: 1234
            },
            DownloadEvent::Done {
                state: DownloadState::Completed,
                received_bytes: 1234
            },
        ]
    );
}

#[tokio::test]
async fn test_failed_completion_is_interrupted() {
    let dir = TempDir::new().unwrap();
    let (bridge, mut rx) = bridge_in(&dir);
    let url = "https://example.com/broken.iso";

    let mut path = PathBuf::new();
    bridge.on_started(url, &mut path);
    bridge.on_completed(url, None, false);

    let events = drain(rx.recv().await.unwrap()).await;
    assert_eq!(
        events,
        vec![DownloadEvent::Done {
            state: DownloadState::Interrupted,
            received_bytes: 0
        }]
    );
}

#[tokio::test]
async fn test_same_url_completions_pair_in_order() {
    let dir = TempDir::new().unwrap();
    let (bridge, mut rx) = bridge_in(&dir);
    let url = "https://example.com/same.txt";

    let mut first_path = dir.path().join("first.txt");
    let mut second_path = dir.path().join("second.txt");
    bridge.on_started(url, &mut first_path);
    bridge.on_started(url, &mut second_path);
    assert_eq!(bridge.pending_count(), 2);

    bridge.on_completed(url, None, false);
    bridge.on_completed(url, None, true);

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.metadata().filename, "first.txt");
    assert_eq!(second.metadata().filename, "second.txt");

    let first_events = drain(first).await;
    let second_events = drain(second).await;
    assert!(matches!(
        first_events.last(),
        Some(DownloadEvent::Done { state: DownloadState::Interrupted, .. })
    ));
    assert!(matches!(
        second_events.last(),
        Some(DownloadEvent::Done { state: DownloadState::Completed, .. })
    ));
}

#[test]
fn test_unknown_completion_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (bridge, _rx) = bridge_in(&dir);

    bridge.on_completed("https://example.com/never-started", None, true);

    assert_eq!(bridge.pending_count(), 0);
}

#[test]
fn test_download_proceeds_without_tracker() {
    let dir = TempDir::new().unwrap();
    let (bridge, rx) = bridge_in(&dir);
    drop(rx);

    let mut path = PathBuf::new();
    assert!(bridge.on_started("https://example.com/a.txt", &mut path));
    assert_eq!(bridge.pending_count(), 0);
}

#[tokio::test]
async fn test_close_ends_session_stream_and_abandons_pending() {
    let dir = TempDir::new().unwrap();
    let (bridge, mut rx) = bridge_in(&dir);

    let mut path = PathBuf::new();
    bridge.on_started("https://example.com/slow.zip", &mut path);
    assert_eq!(bridge.close(), 1);
    assert_eq!(bridge.pending_count(), 0);
    assert_eq!(bridge.close(), 0);

    // The open session sees its handle dropped; then the channel is closed.
    let events = drain(rx.recv().await.unwrap()).await;
    assert!(events.is_empty());
    assert!(rx.recv().await.is_none());

    let mut late = PathBuf::new();
    assert!(bridge.on_started("https://example.com/late.txt", &mut late));
    assert_eq!(bridge.pending_count(), 0);
}

/// Counts terminal updates so shutdown can be checked end to end.
#[derive(Default)]
struct CountingApi {
    terminal_updates: AtomicUsize,
}

#[async_trait]
impl DownloadsApi for CountingApi {
    async fn create_download(&self, _request: &CreateDownloadRequest) -> Result<RecordId, ApiError> {
        Ok(RecordId::new("rec-1"))
    }

    async fn update_download(
        &self,
        _id: &RecordId,
        update: &UpdateDownloadRequest,
    ) -> Result<(), ApiError> {
        if update.status == Some(RemoteStatus::Completed) {
            self.terminal_updates.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[test]
fn test_shutdown_delivers_final_update_while_bridge_is_shared() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(CountingApi::default());
    let engine = SettingsEngine::new(Some(
        dir.path().join("settings.json").to_string_lossy().to_string(),
    ));
    let app = App::with_api(engine, api.clone() as Arc<dyn DownloadsApi>).unwrap();

    // Stands in for the webview handler closures that outlive the windows.
    let held_by_webview = Arc::clone(&app.downloads);

    let url = "https://example.com/notes.txt";
    let mut path = dir.path().join("notes.txt");
    held_by_webview.on_started(url, &mut path);
    fs::write(&path, b"hello").unwrap();
    held_by_webview.on_completed(url, Some(path), true);

    app.shutdown();

    assert_eq!(api.terminal_updates.load(Ordering::SeqCst), 1);
    drop(held_by_webview);
}
