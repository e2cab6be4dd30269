//! Download Tracker for Lernova.
//!
//! Mirrors each download into a record owned by the remote downloads API:
//! one create call when the download starts, one update per progress event,
//! and one terminal update. Every remote call is best-effort. Failures are
//! logged and never touch the download itself.
//!
//! Each download is tracked by its own task holding a [`TrackedDownload`]
//! context, so concurrent downloads share nothing but the API client.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, warn};

use crate::managers::download_session::DownloadSession;
use crate::services::downloads_api::DownloadsApi;
use crate::types::download::{
    known_total, CreateDownloadRequest, DownloadEvent, DownloadState, RecordId, RemoteStatus,
    UpdateDownloadRequest, INTERRUPTED_MESSAGE,
};

/// How tracking of a single download ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingOutcome {
    /// The create call failed; nothing else was sent.
    CreateFailed,
    /// A terminal update was attempted. `delivered` is false if that call failed.
    Finished {
        id: RecordId,
        status: RemoteStatus,
        delivered: bool,
    },
    /// The session ended with a state that has no remote mapping.
    Ignored { id: RecordId, state: DownloadState },
    /// The session's producer went away without a terminal event.
    Abandoned { id: RecordId },
}

/// Computes progress as a percentage of a known total.
///
/// Returns `None` when the total is unknown (zero or negative). The result is
/// clamped to `[0, 100]`.
pub fn compute_progress(received_bytes: u64, total_bytes: i64) -> Option<f64> {
    let total = known_total(total_bytes)?;
    let pct = received_bytes as f64 / total as f64 * 100.0;
    Some(pct.clamp(0.0, 100.0))
}

/// Per-download context: the remote id plus what has been reported so far.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedDownload {
    id: RecordId,
    total_bytes: i64,
    last_received: u64,
}

impl TrackedDownload {
    pub fn new(id: RecordId, total_bytes: i64) -> Self {
        Self {
            id,
            total_bytes,
            last_received: 0,
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn total_bytes(&self) -> i64 {
        self.total_bytes
    }

    pub fn last_received(&self) -> u64 {
        self.last_received
    }

    /// Never goes backwards, never exceeds a known total.
    fn observe(&mut self, received_bytes: u64) -> u64 {
        let mut received = received_bytes.max(self.last_received);
        if let Some(total) = known_total(self.total_bytes) {
            received = received.min(total);
        }
        self.last_received = received;
        received
    }

    /// Body for a `progressing` update. `progress` is omitted when the total is unknown.
    pub fn progress_update(&mut self, received_bytes: u64) -> UpdateDownloadRequest {
        let received = self.observe(received_bytes);
        UpdateDownloadRequest {
            progress: compute_progress(received, self.total_bytes),
            downloaded_bytes: Some(received),
            status: Some(RemoteStatus::InProgress),
            error_message: None,
        }
    }

    /// Body for a terminal update, or `None` for states with no remote mapping.
    pub fn done_update(&mut self, state: DownloadState, received_bytes: u64) -> Option<UpdateDownloadRequest> {
        match state {
            DownloadState::Completed => {
                let received = self.observe(received_bytes);
                let downloaded = known_total(self.total_bytes).unwrap_or(received);
                Some(UpdateDownloadRequest {
                    progress: Some(100.0),
                    downloaded_bytes: Some(downloaded),
                    status: Some(RemoteStatus::Completed),
                    error_message: None,
                })
            }
            DownloadState::Cancelled => Some(UpdateDownloadRequest {
                status: Some(RemoteStatus::Cancelled),
                ..Default::default()
            }),
            DownloadState::Interrupted => Some(UpdateDownloadRequest {
                status: Some(RemoteStatus::Failed),
                error_message: Some(INTERRUPTED_MESSAGE.to_string()),
                ..Default::default()
            }),
            DownloadState::Progressing => None,
        }
    }

    /// Handles an intermediate event. Only `progressing` produces a remote call.
    /// Returns whether an update was delivered.
    pub async fn on_progress(
        &mut self,
        api: &dyn DownloadsApi,
        state: DownloadState,
        received_bytes: u64,
    ) -> bool {
        if state != DownloadState::Progressing {
            debug!(id = %self.id, ?state, "ignoring non-progressing update");
            return false;
        }

        let update = self.progress_update(received_bytes);
        match api.update_download(&self.id, &update).await {
            Ok(()) => true,
            Err(e) => {
                warn!(id = %self.id, error = %e, "failed to send download progress");
                false
            }
        }
    }

    /// Handles the terminal event. Returns the remote status it maps to and
    /// whether the update was delivered, or `None` for unmapped states.
    pub async fn on_done(
        &mut self,
        api: &dyn DownloadsApi,
        state: DownloadState,
        received_bytes: u64,
    ) -> Option<(RemoteStatus, bool)> {
        let update = match self.done_update(state, received_bytes) {
            Some(update) => update,
            None => {
                debug!(id = %self.id, ?state, "unhandled terminal download state");
                return None;
            }
        };
        let status = update.status?;

        let delivered = match api.update_download(&self.id, &update).await {
            Ok(()) => true,
            Err(e) => {
                error!(id = %self.id, ?status, error = %e, "failed to finalize download record");
                false
            }
        };
        Some((status, delivered))
    }
}

/// Trait defining the download tracking entry point.
pub trait DownloadTrackerTrait {
    /// Starts tracking a new download on the current tokio runtime.
    fn on_download_started(&self, session: DownloadSession) -> JoinHandle<TrackingOutcome>;
}

/// Download tracker sharing one API client across all downloads.
#[derive(Clone)]
pub struct DownloadTracker {
    api: Arc<dyn DownloadsApi>,
}

impl DownloadTracker {
    pub fn new(api: Arc<dyn DownloadsApi>) -> Self {
        Self { api }
    }

    /// Tracks one download to completion.
    ///
    /// The session's events are only read after the create call resolves, so
    /// every update carries a valid record id.
    #[tracing::instrument(skip_all, fields(filename = %session.metadata().filename))]
    pub async fn track(&self, session: DownloadSession) -> TrackingOutcome {
        let (metadata, mut events) = session.into_parts();
        let request = CreateDownloadRequest::from(&metadata);

        let id = match self.api.create_download(&request).await {
            Ok(id) => id,
            Err(e) => {
                error!(url = %metadata.url, error = %e, "error tracking download");
                return TrackingOutcome::CreateFailed;
            }
        };
        debug!(%id, total_bytes = metadata.total_bytes, "tracking download");

        let mut ctx = TrackedDownload::new(id, metadata.total_bytes);
        drive(self.api.as_ref(), &mut ctx, &mut events).await
    }

    /// Tracks every session received on `sessions` until the channel closes,
    /// then waits for in-flight downloads to finish.
    pub async fn run(&self, mut sessions: UnboundedReceiver<DownloadSession>) {
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                session = sessions.recv() => match session {
                    Some(session) => {
                        let tracker = self.clone();
                        tasks.spawn(async move { tracker.track(session).await });
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    log_joined(joined);
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            log_joined(joined);
        }
    }
}

impl DownloadTrackerTrait for DownloadTracker {
    fn on_download_started(&self, session: DownloadSession) -> JoinHandle<TrackingOutcome> {
        let tracker = self.clone();
        tokio::spawn(async move { tracker.track(session).await })
    }
}

async fn drive(
    api: &dyn DownloadsApi,
    ctx: &mut TrackedDownload,
    events: &mut UnboundedReceiver<DownloadEvent>,
) -> TrackingOutcome {
    while let Some(event) = events.recv().await {
        match event {
            DownloadEvent::Updated {
                state,
                received_bytes,
            } => {
                ctx.on_progress(api, state, received_bytes).await;
            }
            DownloadEvent::Done {
                state,
                received_bytes,
            } => {
                // Terminal: anything queued after this is never read.
                return match ctx.on_done(api, state, received_bytes).await {
                    Some((status, delivered)) => TrackingOutcome::Finished {
                        id: ctx.id().clone(),
                        status,
                        delivered,
                    },
                    None => TrackingOutcome::Ignored {
                        id: ctx.id().clone(),
                        state,
                    },
                };
            }
        }
    }

    debug!(id = %ctx.id(), "download session closed without a terminal event");
    TrackingOutcome::Abandoned {
        id: ctx.id().clone(),
    }
}

fn log_joined(joined: Result<TrackingOutcome, tokio::task::JoinError>) {
    match joined {
        Ok(outcome) => debug!(?outcome, "download tracking finished"),
        Err(e) => error!(error = %e, "download tracking task failed"),
    }
}
