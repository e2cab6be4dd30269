//! Download sessions: the event stream a single download exposes to the tracker.
//!
//! The producer side ([`DownloadSessionHandle`]) is owned by whatever observes
//! the actual transfer (the webview bridge, or a test). The consumer side
//! ([`DownloadSession`]) carries the start-time metadata and the event stream.
//! `finish` consumes the handle, so a session can deliver at most one terminal
//! event.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::types::download::{DownloadEvent, DownloadMetadata, DownloadState};

/// Consumer side of a download: metadata plus the event stream.
#[derive(Debug)]
pub struct DownloadSession {
    metadata: DownloadMetadata,
    events: UnboundedReceiver<DownloadEvent>,
}

/// Producer side of a download.
#[derive(Debug)]
pub struct DownloadSessionHandle {
    events: UnboundedSender<DownloadEvent>,
}

impl DownloadSession {
    /// Opens a session. Events sent before the tracker starts reading are buffered.
    pub fn open(metadata: DownloadMetadata) -> (Self, DownloadSessionHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                metadata,
                events: rx,
            },
            DownloadSessionHandle { events: tx },
        )
    }

    pub fn metadata(&self) -> &DownloadMetadata {
        &self.metadata
    }

    pub fn into_parts(self) -> (DownloadMetadata, UnboundedReceiver<DownloadEvent>) {
        (self.metadata, self.events)
    }
}

impl DownloadSessionHandle {
    /// Reports an intermediate update. Returns `false` once nobody is tracking the session.
    pub fn update(&self, state: DownloadState, received_bytes: u64) -> bool {
        self.events
            .send(DownloadEvent::Updated {
                state,
                received_bytes,
            })
            .is_ok()
    }

    /// Shorthand for a `progressing` update.
    pub fn progress(&self, received_bytes: u64) -> bool {
        self.update(DownloadState::Progressing, received_bytes)
    }

    /// Reports the terminal state and closes the stream.
    pub fn finish(self, state: DownloadState, received_bytes: u64) -> bool {
        self.events
            .send(DownloadEvent::Done {
                state,
                received_bytes,
            })
            .is_ok()
    }

    /// Whether the tracking side has gone away.
    pub fn is_detached(&self) -> bool {
        self.events.is_closed()
    }
}
