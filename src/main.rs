//! Lernova: entry point.
//!
//! With the `gui` feature, opens the main window. Without it, replays a
//! synthetic download against the configured downloads API so the tracking
//! pipeline can be exercised headless.

use tracing::error;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "gui")]
fn main() {
    init_tracing();

    let app = match lernova::app::App::new(None) {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "failed to initialize Lernova");
            std::process::exit(1);
        }
    };

    if let Err(e) = lernova::ui::webview_app::run(app) {
        error!(error = %e, "failed to open main window");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use std::sync::Arc;

    use lernova::managers::download_session::DownloadSession;
    use lernova::managers::download_tracker::DownloadTracker;
    use lernova::services::downloads_api::HttpDownloadsApi;
    use lernova::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    use lernova::types::download::{DownloadMetadata, DownloadState};
    use tracing::info;

    init_tracing();

    let mut settings = SettingsEngine::new(None);
    if let Err(e) = settings.load() {
        error!(error = %e, "failed to load settings");
        std::process::exit(1);
    }
    settings.apply_env_overrides();

    let api = match HttpDownloadsApi::from_settings(&settings.get_settings().api) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "failed to build downloads API client");
            std::process::exit(1);
        }
    };
    info!(api_url = %api.base_url(), "replaying a synthetic download");

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "failed to start runtime");
            std::process::exit(1);
        }
    };

    let tracker = DownloadTracker::new(Arc::new(api));
    let (session, handle) = DownloadSession::open(DownloadMetadata {
        filename: "demo.bin".to_string(),
        url: "https://example.com/demo.bin".to_string(),
        total_bytes: 1000,
        mime_type: "application/octet-stream".to_string(),
        save_path: "/tmp/demo.bin".to_string(),
    });
    for received in [100, 500, 1000] {
        handle.progress(received);
    }
    handle.finish(DownloadState::Completed, 1000);

    let outcome = runtime.block_on(tracker.track(session));
    info!(?outcome, "synthetic download tracked");
}
