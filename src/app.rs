//! App Core for Lernova.
//!
//! Holds the settings and the download pipeline: a [`DownloadBridge`] fed by
//! the webview, and a [`DownloadTracker`] running on its own thread with a
//! single-threaded tokio runtime.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::JoinHandle;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::managers::download_bridge::DownloadBridge;
use crate::managers::download_tracker::DownloadTracker;
use crate::platform;
use crate::services::downloads_api::{DownloadsApi, HttpDownloadsApi};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::settings::ShellSettings;

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub downloads: Arc<DownloadBridge>,
    tracker_thread: Option<JoinHandle<()>>,
}

impl App {
    /// Loads settings (file, then environment) and starts the download tracker
    /// against the configured API.
    pub fn new(config_path: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut settings_engine = SettingsEngine::new(config_path);
        settings_engine.load()?;
        settings_engine.apply_env_overrides();

        let api = HttpDownloadsApi::from_settings(&settings_engine.get_settings().api)?;
        info!(api_url = %api.base_url(), "downloads API configured");

        Self::with_api(settings_engine, Arc::new(api))
    }

    /// Builds the app around an already-loaded settings engine and any API client.
    pub fn with_api(
        settings_engine: SettingsEngine,
        api: Arc<dyn DownloadsApi>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let download_dir = settings_engine
            .get_settings()
            .downloads
            .directory
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(platform::get_download_dir);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        let tracker = DownloadTracker::new(api);

        let tracker_thread = std::thread::Builder::new()
            .name("download-tracker".to_string())
            .spawn(move || runtime.block_on(tracker.run(rx)))?;

        Ok(Self {
            settings_engine,
            downloads: Arc::new(DownloadBridge::new(tx, download_dir)),
            tracker_thread: Some(tracker_thread),
        })
    }

    pub fn settings(&self) -> &ShellSettings {
        self.settings_engine.get_settings()
    }

    /// Stops accepting downloads and waits for in-flight tracking to finish.
    ///
    /// Downloads the webview never completed are abandoned; records already
    /// finished still get their final update before this returns.
    pub fn shutdown(mut self) {
        self.downloads.close();

        let Some(thread) = self.tracker_thread.take() else {
            return;
        };
        if thread.join().is_err() {
            warn!("download tracker thread panicked");
        }
    }
}
